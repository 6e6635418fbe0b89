use bytes::Bytes;
use url::Url;

use crate::capture::{CapturedResponse, HeaderFields, InterceptedRequest};
use crate::record::{HttpMessage, Record, Scheme};

/// The request line is frozen to HTTP/1.1 whatever was negotiated
const PROTOCOL: &str = "HTTP/1.1";

/// Why an exchange was not turned into a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InvalidUrl,
    UnsupportedScheme,
    /// The transport did not expose the remote address
    MissingPeer,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::InvalidUrl => "invalid_url",
            SkipReason::UnsupportedScheme => "unsupported_scheme",
            SkipReason::MissingPeer => "missing_peer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Produced(Record),
    Skipped(SkipReason),
}

pub fn scheme_for_url(url: &Url) -> Option<Scheme> {
    match url.scheme() {
        "http" => Some(Scheme::Http),
        "https" => Some(Scheme::Https),
        _ => None,
    }
}

/// Map a captured exchange to a record
///
/// The response body stored is the raw, wire-accurate one. Synthesized `host`
/// and `user-agent` headers come first; the request's own headers follow and
/// may repeat them.
pub fn encode(request: &InterceptedRequest, response: &CapturedResponse, user_agent: &str) -> Encoded {
    let Ok(url) = Url::parse(&request.url) else {
        return Encoded::Skipped(SkipReason::InvalidUrl);
    };
    let Some(scheme) = scheme_for_url(&url) else {
        return Encoded::Skipped(SkipReason::UnsupportedScheme);
    };
    let Some(peer) = response.peer else {
        return Encoded::Skipped(SkipReason::MissingPeer);
    };

    let mut request_headers = vec![
        (Bytes::from_static(b"host"), Bytes::from(host_of(&url))),
        (Bytes::from_static(b"user-agent"), Bytes::copy_from_slice(user_agent.as_bytes())),
    ];
    request_headers.extend(header_pairs(&request.headers));

    Encoded::Produced(Record {
        ip: peer.ip().to_string(),
        port: peer.port(),
        scheme,
        request: HttpMessage {
            first_line: Bytes::from(request_line(request.method.as_str(), &url)),
            headers: request_headers,
            body: request.has_body().then(|| request.body.clone()).flatten(),
        },
        response: HttpMessage {
            first_line: Bytes::from(format!(
                "{PROTOCOL} {} {}",
                response.status.as_u16(),
                response.status_text
            )),
            headers: header_pairs(&response.headers),
            body: (!response.raw_bytes.is_empty()).then(|| response.raw_bytes.clone()),
        },
    })
}

/// `GET /p?q=1#f HTTP/1.1`
pub fn request_line(method: &str, url: &Url) -> String {
    let mut line = format!("{} {}", method.to_ascii_uppercase(), url.path());
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        line.push('?');
        line.push_str(query);
    }
    if let Some(fragment) = url.fragment().filter(|f| !f.is_empty()) {
        line.push('#');
        line.push_str(fragment);
    }
    line.push(' ');
    line.push_str(PROTOCOL);
    line
}

/// Host as it appears in the URL, port included when not the default one
fn host_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

fn header_pairs(fields: &HeaderFields) -> Vec<(Bytes, Bytes)> {
    fields
        .pairs()
        .map(|(name, value)| {
            (Bytes::copy_from_slice(name.as_bytes()), Bytes::copy_from_slice(value.as_bytes()))
        })
        .collect()
}
