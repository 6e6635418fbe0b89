use thiserror::Error;

/// A compressed body that could not be decompressed
#[derive(Error, Debug)]
#[error("failed to decode {encoding} body: {source}")]
pub struct DecodeError {
    pub encoding: &'static str,
    #[source]
    pub source: std::io::Error,
}

/// Errors that abort the capture of a single exchange
///
/// Every variant is recovered the same way: the original request is allowed
/// to continue unintercepted and the error callback is notified.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CaptureError {
    /// Label used for the `error_type` metric attribute
    pub fn error_type(&self) -> &'static str {
        match self {
            CaptureError::Transport(e) if e.is_timeout() => "timeout",
            CaptureError::Transport(e) if e.is_connect() => "connect",
            CaptureError::Transport(_) => "transport",
            CaptureError::Decode(_) => "decode",
            CaptureError::InvalidRequest(_) => "invalid_request",
        }
    }
}

/// Errors raised when parsing a persisted record
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("record is missing field `{0}`")]
    MissingField(&'static str),

    #[error("unknown scheme value: {0}")]
    InvalidScheme(i32),

    #[error("port out of range: {0}")]
    InvalidPort(u32),
}

/// Errors surfaced by the recording orchestrator for one intercepted request
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("interception error: {0}")]
    Interception(String),
}

impl RecorderError {
    pub fn error_type(&self) -> &'static str {
        match self {
            RecorderError::Io(_) => "io",
            RecorderError::Interception(_) => "interception",
        }
    }
}

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, RecorderError>;
