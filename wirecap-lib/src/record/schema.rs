//! Protobuf wire types for persisted records.
//!
//! Field numbers match Mahimahi's `RequestResponse` / `HTTPMessage` /
//! `HTTPHeader` messages (proto2, every field optional), so recordings can be
//! replayed by `mm-webreplay` directly.

use bytes::Bytes;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Scheme {
    Http = 1,
    Https = 2,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct HttpHeader {
    #[prost(bytes = "bytes", optional, tag = "1")]
    pub key: Option<Bytes>,
    #[prost(bytes = "bytes", optional, tag = "2")]
    pub value: Option<Bytes>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct HttpMessage {
    #[prost(bytes = "bytes", optional, tag = "1")]
    pub first_line: Option<Bytes>,
    #[prost(message, repeated, tag = "2")]
    pub header: Vec<HttpHeader>,
    #[prost(bytes = "bytes", optional, tag = "3")]
    pub body: Option<Bytes>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RequestResponse {
    #[prost(string, optional, tag = "1")]
    pub ip: Option<String>,
    #[prost(uint32, optional, tag = "2")]
    pub port: Option<u32>,
    #[prost(enumeration = "Scheme", optional, tag = "3")]
    pub scheme: Option<i32>,
    #[prost(message, optional, tag = "4")]
    pub request: Option<HttpMessage>,
    #[prost(message, optional, tag = "5")]
    pub response: Option<HttpMessage>,
}
