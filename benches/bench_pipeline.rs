//! Micro benchmarks for the capture pipeline stages that run per exchange.
//! Pure CPU - no network, no IO.
//!
//! ```bash
//! cargo bench --bench bench_pipeline
//! ```

use std::io::Write;

use bytes::Bytes;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use flate2::write::GzEncoder;
use flate2::Compression;
use http::{Method, StatusCode};
use wirecap_lib::capture::RawCapture;
use wirecap_lib::{decompress, encode, CapturedResponse, Encoded, HeaderFields, InterceptedRequest};

/// A compressible HTML-like payload of roughly 64 KiB
fn payload() -> Vec<u8> {
    b"<div class=\"row\"><span>recorded page content</span></div>\n"
        .iter()
        .copied()
        .cycle()
        .take(64 * 1024)
        .collect()
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    if let Err(e) = encoder.write_all(data) {
        panic!("gzip fixture failed: {e}");
    }
    match encoder.finish() {
        Ok(out) => out,
        Err(e) => panic!("gzip fixture failed: {e}"),
    }
}

fn bench_decompress(c: &mut Criterion) {
    let plain = payload();
    let compressed = Bytes::from(gzip(&plain));

    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Bytes(plain.len() as u64));
    group.bench_function("gzip_64k", |b| {
        b.iter(|| decompress(std::hint::black_box(compressed.clone()), Some("gzip")));
    });
    group.bench_function("identity_64k", |b| {
        let body = Bytes::from(plain.clone());
        b.iter(|| decompress(std::hint::black_box(body.clone()), None));
    });
    group.finish();
}

fn bench_raw_capture(c: &mut Criterion) {
    let body = payload();
    // typical hyper frame sizes
    let chunks: Vec<&[u8]> = body.chunks(8 * 1024).collect();

    let mut group = c.benchmark_group("raw_capture");
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("chunked_8k_frames", |b| {
        b.iter(|| {
            let mut capture = RawCapture::new(true);
            for chunk in &chunks {
                capture.push(std::hint::black_box(chunk));
            }
            capture.finish()
        });
    });
    group.bench_function("sized_8k_frames", |b| {
        b.iter(|| {
            let mut capture = RawCapture::new(false);
            for chunk in &chunks {
                capture.push(std::hint::black_box(chunk));
            }
            capture.finish()
        });
    });
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut request_headers = HeaderFields::new();
    let mut response_headers = HeaderFields::new();
    for (name, value) in [
        ("accept", "text/html,application/xhtml+xml"),
        ("accept-language", "en-US,en;q=0.9"),
        ("cookie", "session=abc123; theme=dark"),
    ] {
        if let Err(e) = request_headers.append_str(name, value) {
            panic!("invalid header fixture: {e}");
        }
    }
    for (name, value) in [
        ("Content-Type", "text/html; charset=utf-8"),
        ("Content-Encoding", "gzip"),
        ("Cache-Control", "max-age=3600"),
        ("Set-Cookie", "a=1"),
        ("Set-Cookie", "b=2"),
    ] {
        if let Err(e) = response_headers.append_str(name, value) {
            panic!("invalid header fixture: {e}");
        }
    }

    let plain = payload();
    let raw = Bytes::from(gzip(&plain));
    let request = InterceptedRequest::new(Method::GET, "https://example.com/index.html?page=2")
        .with_headers(request_headers);
    let peer = match "93.184.216.34:443".parse() {
        Ok(peer) => peer,
        Err(e) => panic!("invalid peer fixture: {e}"),
    };
    let response = CapturedResponse {
        status: StatusCode::OK,
        status_text: "OK".to_string(),
        headers: response_headers,
        content_encoding: Some("gzip".to_string()),
        transfer_encoding: None,
        decoded_body: Bytes::from(plain),
        raw_bytes: raw,
        peer: Some(peer),
    };

    if !matches!(encode(&request, &response, "UA/1"), Encoded::Produced(_)) {
        panic!("encode fixture produced no record");
    }

    c.bench_function("encode_record", |b| {
        b.iter(|| encode(std::hint::black_box(&request), std::hint::black_box(&response), "UA/1"));
    });
    c.bench_function("encode_record_to_vec", |b| {
        b.iter(|| match encode(&request, &response, "UA/1") {
            Encoded::Produced(record) => record.encode_to_vec(),
            Encoded::Skipped(_) => Vec::new(),
        });
    });
}

criterion_group!(pipeline_benches, bench_decompress, bench_raw_capture, bench_encode);
criterion_main!(pipeline_benches);
