use std::net::SocketAddr;

use bytes::Bytes;
use http::{Method, StatusCode};

use crate::capture::headers::HeaderFields;

/// A request intercepted in the browser session, as handed over by the hook
#[derive(Debug, Clone)]
pub struct InterceptedRequest {
    pub method: Method,
    /// Absolute URL, including any fragment
    pub url: String,
    pub headers: HeaderFields,
    pub body: Option<Bytes>,
}

impl InterceptedRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: HeaderFields::new(), body: None }
    }

    pub fn with_headers(mut self, headers: HeaderFields) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Whether a non-empty body was supplied
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|b| !b.is_empty())
    }
}


/// Upstream response captured for one intercepted request
#[derive(Debug, Clone)]
pub struct CapturedResponse {
    pub status: StatusCode,
    pub status_text: String,
    /// Header names normalized to Train-Case
    pub headers: HeaderFields,
    pub content_encoding: Option<String>,
    pub transfer_encoding: Option<String>,
    /// Body after content decoding, used to answer the browser
    pub decoded_body: Bytes,
    /// Body as seen on the wire: still compressed, chunk framing included
    pub raw_bytes: Bytes,
    /// Remote endpoint actually contacted, when the transport exposes it
    pub peer: Option<SocketAddr>,
}
