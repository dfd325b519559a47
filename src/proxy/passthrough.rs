//! Single-attempt forwarding to fixed-origin services.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;

use crate::error::GatewayError;
use crate::proxy::fetch::fetch_json;
use crate::proxy::request::{build_target, ProxyRequest};

/// Forwards requests to one fixed origin (Deezer or LRCLIB).
///
/// One call, no retry, no rotation; any failure surfaces immediately as a
/// gateway error.
pub struct PassthroughForwarder {
    client: reqwest::Client,
    service: &'static str,
    origin: String,
    timeout: Duration,
}

impl PassthroughForwarder {
    pub fn new(
        client: reqwest::Client,
        service: &'static str,
        origin: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            service,
            origin: origin.into(),
            timeout,
        }
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Relay the request to the fixed origin and return the parsed body and
    /// upstream status.
    pub async fn forward(
        &self,
        request: &ProxyRequest,
    ) -> Result<(Value, StatusCode), GatewayError> {
        let url = build_target(&self.origin, request.path(), request.query());

        tracing::debug!(service = self.service, path = %request.path(), "Forwarding to fixed origin");

        fetch_json(&self.client, &url, self.timeout)
            .await
            .map_err(|source| {
                tracing::warn!(
                    service = self.service,
                    error = %source,
                    "Fixed-origin request failed"
                );
                GatewayError::SingleOriginFailure {
                    service: self.service,
                    source,
                }
            })
    }
}
