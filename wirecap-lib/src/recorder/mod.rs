//! Recording orchestrator: wires intercepted requests to the capture client,
//! answers the browser and persists the encoded exchange.

pub mod interception;
pub mod sink;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};
use url::Url;

use crate::capture::{CaptureClient, InterceptedRequest};
use crate::error::{CaptureError, Result};
use crate::record::{encode, scheme_for_url, Encoded, SkipReason};
use crate::telemetry::metrics::{values, Metrics};

pub use interception::{BrowserResponse, Interception};
pub use sink::{record_name, DirectorySink, RecordSink};

/// Called when an exchange could not be captured, before the original
/// request is continued
pub type OnError = Arc<dyn Fn(&InterceptedRequest, &CaptureError) + Send + Sync>;

/// What happened to one intercepted request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not http(s): continued untouched
    PassedThrough,
    /// Transport or decode failure: continued untouched
    CaptureFailed,
    /// Answered from the capture and persisted under `name`
    Recorded { name: String },
    /// Answered from the capture, nothing persisted
    NotRecorded(SkipReason),
}

pub struct Recorder<S> {
    client: CaptureClient,
    sink: Arc<S>,
    user_agent: Arc<str>,
    on_error: Option<OnError>,
    metrics: Option<Arc<Metrics>>,
}

impl<S> Clone for Recorder<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            sink: self.sink.clone(),
            user_agent: self.user_agent.clone(),
            on_error: self.on_error.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<S: RecordSink> Recorder<S> {
    pub fn new(client: CaptureClient, sink: S, user_agent: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            sink: Arc::new(sink),
            user_agent: user_agent.into(),
            on_error: None,
            metrics: None,
        }
    }

    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = Some(on_error);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Handle one intercepted request end to end
    ///
    /// The browser is answered only once the whole upstream response has been
    /// received and decoded, and before the record is written. Errors returned
    /// here come from the hook or the sink; capture failures are recovered by
    /// continuing the original request.
    pub async fn handle<I: Interception>(&self, interception: I) -> Result<Outcome> {
        let request = interception.request().clone();

        let scheme = Url::parse(&request.url).ok().and_then(|url| scheme_for_url(&url));
        let Some(scheme) = scheme else {
            debug!(url = %request.url, "not an http(s) request, passing through");
            interception.continue_request().await?;
            self.count(values::OUTCOME_PASSED_THROUGH);
            return Ok(Outcome::PassedThrough);
        };

        let start = Instant::now();
        let response = match self.client.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    method = %request.method,
                    url = %request.url,
                    error = %e,
                    "capture failed, continuing original request"
                );
                if let Some(ref m) = self.metrics {
                    m.record_capture_error(e.error_type());
                }
                if let Some(ref on_error) = self.on_error {
                    on_error(&request, &e);
                }
                interception.continue_request().await?;
                self.count(values::OUTCOME_CAPTURE_FAILED);
                return Ok(Outcome::CaptureFailed);
            }
        };

        if let Some(ref m) = self.metrics {
            m.record_upstream_duration(
                start.elapsed().as_secs_f64(),
                response.status.as_u16(),
                scheme.as_str(),
            );
        }

        interception
            .respond(BrowserResponse {
                status: response.status,
                headers: response.headers.clone(),
                body: response.decoded_body.clone(),
            })
            .await?;

        match encode(&request, &response, &self.user_agent) {
            Encoded::Produced(record) => {
                let bytes = record.encode_to_vec();
                let len = bytes.len();
                let name = record_name();
                self.sink.write(&name, bytes).await?;
                debug!(url = %request.url, %name, len, "record written");
                if let Some(ref m) = self.metrics {
                    m.record_written(len as u64);
                }
                self.count(values::OUTCOME_RECORDED);
                Ok(Outcome::Recorded { name })
            }
            Encoded::Skipped(reason) => {
                debug!(url = %request.url, reason = reason.as_str(), "exchange not recorded");
                self.count(values::OUTCOME_NOT_RECORDED);
                Ok(Outcome::NotRecorded(reason))
            }
        }
    }

    /// Spawn one task per interception received on `interceptions`
    ///
    /// Runs until the channel closes or [`RecordingHandle::stop`] is called.
    pub fn start<I: Interception>(self, mut interceptions: mpsc::Receiver<I>) -> RecordingHandle {
        let token = CancellationToken::new();
        let tracker = TaskTracker::new();

        let driver = {
            let token = token.clone();
            let tracker = tracker.clone();
            tokio::spawn(async move {
                info!("recording started");
                loop {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        next = interceptions.recv() => {
                            let Some(interception) = next else {
                                break;
                            };
                            let recorder = self.clone();
                            tracker.spawn(async move {
                                if let Err(e) = recorder.handle(interception).await {
                                    warn!(error = %e, error_type = e.error_type(), "failed to handle intercepted request");
                                }
                            });
                        }
                    }
                }
                tracker.close();
            })
        };

        RecordingHandle { token, tracker, driver }
    }

    fn count(&self, outcome: &str) {
        if let Some(ref m) = self.metrics {
            m.record_exchange(outcome);
        }
    }
}

/// Control over a running recording
pub struct RecordingHandle {
    token: CancellationToken,
    tracker: TaskTracker,
    driver: JoinHandle<()>,
}

impl RecordingHandle {
    /// Stop accepting interceptions and wait for in-flight ones to finish
    pub async fn stop(self) {
        self.token.cancel();
        self.join().await;
    }

    /// Wait until the interception channel closes and every task is done
    pub async fn join(self) {
        if let Err(e) = self.driver.await {
            warn!(error = %e, "recording driver task failed");
        }
        self.tracker.close();
        self.tracker.wait().await;
        info!("recording stopped");
    }
}
