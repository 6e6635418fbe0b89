use std::future::Future;

use tracing::info;
use wirecap_lib::{BrowserResponse, InterceptedRequest, Interception, RecorderError};

/// Interception for requests issued from the command line
///
/// There is no browser waiting on the other side: answers are logged and
/// dropped.
pub struct StandaloneInterception {
    request: InterceptedRequest,
}

impl StandaloneInterception {
    pub fn new(request: InterceptedRequest) -> Self {
        Self { request }
    }
}

impl Interception for StandaloneInterception {
    fn request(&self) -> &InterceptedRequest {
        &self.request
    }

    fn continue_request(self) -> impl Future<Output = Result<(), RecorderError>> + Send {
        async move {
            info!(url = %self.request.url, "request not captured");
            Ok(())
        }
    }

    fn respond(
        self,
        response: BrowserResponse,
    ) -> impl Future<Output = Result<(), RecorderError>> + Send {
        async move {
            info!(
                url = %self.request.url,
                status = response.status.as_u16(),
                body_len = response.body.len(),
                "response captured"
            );
            Ok(())
        }
    }
}
