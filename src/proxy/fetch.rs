//! Shared upstream fetch primitive.

use std::time::Duration;

use axum::http::StatusCode;
use reqwest::header;
use serde_json::Value;

/// The upstream rejects default client identifiers, so every fetch carries
/// a browser-like User-Agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Failure of a single upstream attempt.
///
/// All three kinds are treated identically for retry purposes; the
/// distinction only matters for the error detail surfaced to the client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    /// Connection failure or timeout before a complete response arrived.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The upstream responded with a non-success HTTP status.
    #[error("upstream returned status {0}")]
    BadStatus(StatusCode),

    /// A 2xx response whose body does not parse as JSON.
    #[error("upstream returned a non-JSON body")]
    BadPayload,
}

/// Issue one upstream GET and parse the body as JSON.
///
/// Success requires connecting and completing within the timeout, a success
/// HTTP status, and a JSON body. Every other outcome maps to one
/// [`UpstreamError`]; nothing else is relayed.
pub async fn fetch_json(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<(Value, StatusCode), UpstreamError> {
    let response = client
        .get(url)
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::BadStatus(status));
    }

    let body = response.json::<Value>().await.map_err(|e| {
        if e.is_decode() {
            UpstreamError::BadPayload
        } else {
            UpstreamError::Unreachable(e.to_string())
        }
    })?;

    Ok((body, status))
}
