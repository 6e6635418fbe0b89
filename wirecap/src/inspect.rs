use std::path::{Path, PathBuf};

use serde::Serialize;
use wirecap_lib::capture::is_chunked;
use wirecap_lib::Record;

type InspectResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Serialize)]
struct RecordSummary {
    file: String,
    peer: String,
    scheme: &'static str,
    request_line: String,
    request_headers: usize,
    request_body_len: usize,
    response_line: String,
    response_headers: usize,
    response_body_len: usize,
    content_encoding: Option<String>,
    chunked: bool,
}

impl RecordSummary {
    fn new(file: &Path, record: &Record) -> Self {
        let header_str = |name: &str| {
            record
                .response
                .header(name)
                .map(|v| String::from_utf8_lossy(v).into_owned())
        };
        let transfer_encoding = header_str("Transfer-Encoding");
        Self {
            file: file.display().to_string(),
            peer: format!("{}:{}", record.ip, record.port),
            scheme: record.scheme.as_str(),
            request_line: String::from_utf8_lossy(&record.request.first_line).into_owned(),
            request_headers: record.request.headers.len(),
            request_body_len: record.request.body.as_ref().map_or(0, |b| b.len()),
            response_line: String::from_utf8_lossy(&record.response.first_line).into_owned(),
            response_headers: record.response.headers.len(),
            response_body_len: record.response.body.as_ref().map_or(0, |b| b.len()),
            content_encoding: header_str("Content-Encoding"),
            chunked: is_chunked(transfer_encoding.as_deref()),
        }
    }
}

/// Decode each record file and print one summary per record
pub fn inspect(files: &[PathBuf], json: bool) -> InspectResult<()> {
    for file in files {
        let bytes = std::fs::read(file)?;
        let record = Record::decode(&bytes)
            .map_err(|e| format!("{}: {e}", file.display()))?;
        let summary = RecordSummary::new(file, &record);

        if json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!("{}", summary.file);
            println!("  peer:     {} ({})", summary.peer, summary.scheme);
            println!(
                "  request:  {} [{} headers, {} body bytes]",
                summary.request_line, summary.request_headers, summary.request_body_len
            );
            println!(
                "  response: {} [{} headers, {} body bytes{}{}]",
                summary.response_line,
                summary.response_headers,
                summary.response_body_len,
                summary
                    .content_encoding
                    .as_deref()
                    .map(|e| format!(", {e}"))
                    .unwrap_or_default(),
                if summary.chunked { ", chunked" } else { "" },
            );
        }
    }
    Ok(())
}
