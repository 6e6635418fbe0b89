use std::future::Future;

use bytes::Bytes;
use http::StatusCode;

use crate::capture::{HeaderFields, InterceptedRequest};
use crate::error::RecorderError;

/// Response handed back to the browser in place of the network
#[derive(Debug, Clone)]
pub struct BrowserResponse {
    pub status: StatusCode,
    pub headers: HeaderFields,
    pub body: Bytes,
}

/// One request paused by the browser-automation host
///
/// Both actions consume the interception: exactly one of them is called
/// per request.
pub trait Interception: Send + 'static {
    fn request(&self) -> &InterceptedRequest;

    /// Let the original request reach the network unmodified
    fn continue_request(self) -> impl Future<Output = Result<(), RecorderError>> + Send;

    /// Satisfy the request with `response`
    fn respond(
        self,
        response: BrowserResponse,
    ) -> impl Future<Output = Result<(), RecorderError>> + Send;
}
