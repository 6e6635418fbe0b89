//! Raw-capture transport: re-issues intercepted requests and keeps both the
//! decoded body and the wire-accurate bytes of the response.

pub mod accumulator;
pub mod client;
pub mod headers;
pub mod types;

pub use accumulator::{is_chunked, RawCapture};
pub use client::CaptureClient;
pub use headers::{train_case, HeaderFields};
pub use types::{CapturedResponse, InterceptedRequest};
