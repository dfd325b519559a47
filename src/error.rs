//! Client-facing gateway errors.
//!
//! Every failure is caught at the handler boundary and converted to a JSON
//! envelope with an HTTP status; no failure escapes without a body, and no
//! HTML ever reaches the client. Upstream error text only appears inside
//! the `details` field, as an opaque string.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::proxy::fetch::UpstreamError;

/// Errors surfaced to clients as JSON envelopes.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Every attempt against the rotating pool failed.
    #[error("All Piped instances failed")]
    PoolExhausted { attempts: u32, detail: String },

    /// A fixed-origin service failed its single attempt.
    #[error("{service} request failed")]
    SingleOriginFailure {
        service: &'static str,
        #[source]
        source: UpstreamError,
    },

    /// No handler matched the request path.
    #[error("Not Found")]
    RouteNotFound { path: String },
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::PoolExhausted { attempts, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "All Piped instances failed",
                    "attempts": attempts,
                    "details": detail,
                })),
            )
                .into_response(),
            GatewayError::SingleOriginFailure { service, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": format!("{service} request failed"),
                    "details": source.to_string(),
                })),
            )
                .into_response(),
            GatewayError::RouteNotFound { path } => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Not Found",
                    "path": path,
                })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_exhausted_status_and_message() {
        let err = GatewayError::PoolExhausted {
            attempts: 3,
            detail: "pipedapi.kavin.rocks: upstream returned status 503".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_status() {
        let err = GatewayError::RouteNotFound {
            path: "/unknown/path".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
