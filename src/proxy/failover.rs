//! Bounded failover across the rotating instance pool.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;

use crate::config::FailoverConfig;
use crate::error::GatewayError;
use crate::observability::metrics;
use crate::pool::Instance;
use crate::proxy::fetch::{fetch_json, UpstreamError};
use crate::proxy::request::{build_target, ProxyRequest};
use crate::selector::InstanceSelector;

/// Record of one failed attempt, kept only to build the final error report.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub instance: Arc<Instance>,
    pub error: UpstreamError,
}

/// Delivers a request against successive instances until one succeeds or
/// the attempt budget is exhausted.
pub struct FailoverExecutor {
    selector: InstanceSelector,
    client: reqwest::Client,
    max_attempts: u32,
    attempt_timeout: Duration,
}

impl FailoverExecutor {
    pub fn new(
        selector: InstanceSelector,
        client: reqwest::Client,
        config: &FailoverConfig,
    ) -> Self {
        Self {
            selector,
            client,
            max_attempts: config.max_attempts,
            attempt_timeout: Duration::from_millis(config.attempt_timeout_ms),
        }
    }

    pub fn selector(&self) -> &InstanceSelector {
        &self.selector
    }

    /// Execute the request with at most `max_attempts` upstream calls.
    ///
    /// A successful attempt short-circuits immediately with the parsed body
    /// and the upstream's status code. Once the budget is exhausted the last
    /// failure's detail is surfaced as [`GatewayError::PoolExhausted`].
    pub async fn execute(
        &self,
        request: &ProxyRequest,
    ) -> Result<(Value, StatusCode), GatewayError> {
        let mut last_failure: Option<AttemptOutcome> = None;

        for attempt in 1..=self.max_attempts {
            let instance = self.selector.select().await;
            let url = build_target(instance.base(), request.path(), request.query());

            tracing::debug!(
                attempt,
                instance = %instance.host(),
                path = %request.path(),
                "Attempting upstream fetch"
            );

            match fetch_json(&self.client, &url, self.attempt_timeout).await {
                Ok((body, status)) => {
                    metrics::record_attempt(instance.host(), true);
                    tracing::debug!(
                        attempt,
                        instance = %instance.host(),
                        status = %status,
                        "Upstream fetch succeeded"
                    );
                    return Ok((body, status));
                }
                Err(error) => {
                    metrics::record_attempt(instance.host(), false);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        instance = %instance.host(),
                        error = %error,
                        "Upstream fetch failed"
                    );
                    self.selector.note_failure();
                    last_failure = Some(AttemptOutcome { instance, error });
                }
            }
        }

        let detail = last_failure
            .map(|o| format!("{}: {}", o.instance.host(), o.error))
            .unwrap_or_else(|| "no attempts were made".to_string());

        Err(GatewayError::PoolExhausted {
            attempts: self.max_attempts,
            detail,
        })
    }
}
