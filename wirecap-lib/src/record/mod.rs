//! Replayable records of captured exchanges.

pub mod encoder;
pub mod schema;

use bytes::Bytes;
use prost::Message;

use crate::error::RecordError;

pub use encoder::{encode, scheme_for_url, Encoded, SkipReason};
pub use schema::Scheme;

/// One side of an exchange, with headers kept as raw byte pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMessage {
    pub first_line: Bytes,
    pub headers: Vec<(Bytes, Bytes)>,
    pub body: Option<Bytes>,
}

/// A captured request/response exchange, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub ip: String,
    pub port: u16,
    pub scheme: Scheme,
    pub request: HttpMessage,
    pub response: HttpMessage,
}

impl Record {
    pub fn to_proto(&self) -> schema::RequestResponse {
        schema::RequestResponse {
            ip: Some(self.ip.clone()),
            port: Some(u32::from(self.port)),
            scheme: Some(self.scheme.into()),
            request: Some(self.request.to_proto()),
            response: Some(self.response.to_proto()),
        }
    }

    /// Serialize to the binary record format
    pub fn encode_to_vec(&self) -> Vec<u8> {
        self.to_proto().encode_to_vec()
    }

    /// Parse a persisted record
    pub fn decode(buf: &[u8]) -> Result<Self, RecordError> {
        Self::try_from(schema::RequestResponse::decode(buf)?)
    }
}

impl TryFrom<schema::RequestResponse> for Record {
    type Error = RecordError;

    fn try_from(msg: schema::RequestResponse) -> Result<Self, Self::Error> {
        let port = msg.port.ok_or(RecordError::MissingField("port"))?;
        let scheme = msg.scheme.ok_or(RecordError::MissingField("scheme"))?;
        Ok(Record {
            ip: msg.ip.ok_or(RecordError::MissingField("ip"))?,
            port: u16::try_from(port).map_err(|_| RecordError::InvalidPort(port))?,
            scheme: Scheme::try_from(scheme).map_err(|_| RecordError::InvalidScheme(scheme))?,
            request: msg
                .request
                .ok_or(RecordError::MissingField("request"))?
                .try_into()?,
            response: msg
                .response
                .ok_or(RecordError::MissingField("response"))?
                .try_into()?,
        })
    }
}

impl HttpMessage {
    fn to_proto(&self) -> schema::HttpMessage {
        schema::HttpMessage {
            first_line: Some(self.first_line.clone()),
            header: self
                .headers
                .iter()
                .map(|(key, value)| schema::HttpHeader {
                    key: Some(key.clone()),
                    value: Some(value.clone()),
                })
                .collect(),
            body: self.body.clone(),
        }
    }

    /// Value of the first header whose key matches `name`, ignoring case
    pub fn header(&self, name: &str) -> Option<&Bytes> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name.as_bytes()))
            .map(|(_, value)| value)
    }
}

impl TryFrom<schema::HttpMessage> for HttpMessage {
    type Error = RecordError;

    fn try_from(msg: schema::HttpMessage) -> Result<Self, Self::Error> {
        Ok(HttpMessage {
            first_line: msg.first_line.ok_or(RecordError::MissingField("first_line"))?,
            headers: msg
                .header
                .into_iter()
                .map(|h| (h.key.unwrap_or_default(), h.value.unwrap_or_default()))
                .collect(),
            body: msg.body,
        })
    }
}
