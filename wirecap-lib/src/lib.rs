#![forbid(unsafe_code)]

pub mod capture;
pub mod config;
pub mod decompress;
pub mod error;
pub mod record;
pub mod recorder;
pub mod telemetry;

pub use capture::{CaptureClient, CapturedResponse, HeaderFields, InterceptedRequest};
pub use config::{load_from_path, Config, LoggingConfig, TransportConfig};
pub use decompress::{decompress, ContentEncoding};
pub use error::{CaptureError, ConfigError, DecodeError, RecordError, RecorderError, Result};
pub use record::{encode, Encoded, Record, Scheme, SkipReason};
pub use recorder::{
    BrowserResponse, DirectorySink, Interception, OnError, Outcome, RecordSink, Recorder,
    RecordingHandle,
};
