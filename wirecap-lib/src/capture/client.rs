use http::{HeaderMap, HeaderName};
use reqwest::redirect;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

use crate::capture::accumulator::{is_chunked, RawCapture};
use crate::capture::headers::HeaderFields;
use crate::capture::types::{CapturedResponse, InterceptedRequest};
use crate::config::TransportConfig;
use crate::decompress::decompress;
use crate::error::CaptureError;

/// Shared outbound client for capture tasks
///
/// Built once and cloned into every task; clones share the same connection
/// pool. Redirects are never followed and bodies are never decoded by the
/// transport, so 3xx responses and compressed bytes reach the pipeline as
/// the server sent them. Proxies are bypassed: the recorded peer must be the
/// origin server.
#[derive(Clone, Debug)]
pub struct CaptureClient {
    inner: reqwest::Client,
}

impl CaptureClient {
    pub fn new(config: &TransportConfig) -> Result<Self, CaptureError> {
        let mut builder = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .no_proxy()
            .no_gzip()
            .no_brotli()
            .no_deflate()
            .no_zstd()
            .connect_timeout(config.connect_timeout())
            .pool_idle_timeout(config.pool_idle_timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self { inner: builder.build()? })
    }

    /// Issue `request` upstream and capture the full response
    ///
    /// No retries. Either the whole body is received and decoded, or the
    /// call fails and nothing is returned.
    pub async fn send(&self, request: &InterceptedRequest) -> Result<CapturedResponse, CaptureError> {
        let mut url = Url::parse(&request.url)
            .map_err(|e| CaptureError::InvalidRequest(format!("invalid URL {}: {e}", request.url)))?;
        // fragments never go on the wire
        url.set_fragment(None);
        let headers = to_header_map(&request.headers)?;
        let body = request.body.clone().unwrap_or_default();

        let start = Instant::now();
        let mut response = self
            .inner
            .request(request.method.clone(), url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let status_text = status_text(&response);
        let peer = response.remote_addr();
        let headers = HeaderFields::from_header_map_train_case(response.headers());
        let content_encoding = headers.first_str("Content-Encoding").map(str::to_owned);
        let transfer_encoding = headers.first_str("Transfer-Encoding").map(str::to_owned);

        let mut capture = RawCapture::new(is_chunked(transfer_encoding.as_deref()));
        while let Some(chunk) = response.chunk().await? {
            capture.push(&chunk);
        }
        let (body, raw_bytes) = capture.finish();

        let decoded_body = decompress(body, content_encoding.as_deref())?;

        debug!(
            method = %request.method,
            url = %request.url,
            status = status.as_u16(),
            ?peer,
            raw_len = raw_bytes.len(),
            decoded_len = decoded_body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "captured upstream response"
        );

        Ok(CapturedResponse {
            status,
            status_text,
            headers,
            content_encoding,
            transfer_encoding,
            decoded_body,
            raw_bytes,
            peer,
        })
    }
}

fn to_header_map(fields: &HeaderFields) -> Result<HeaderMap, CaptureError> {
    let mut map = HeaderMap::with_capacity(fields.len());
    for (name, value) in fields.pairs() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| CaptureError::InvalidRequest(format!("invalid header name {name:?}: {e}")))?;
        map.append(name, value.clone());
    }
    Ok(map)
}

/// Reason phrase as sent by the server, or the canonical one
fn status_text(response: &reqwest::Response) -> String {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .or_else(|| response.status().canonical_reason())
        .unwrap_or_default()
        .to_string()
}
