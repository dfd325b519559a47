//! HTTP server setup and request handlers.
//!
//! # Responsibilities
//! - Create the Axum router with all gateway routes (root and `/api` twins)
//! - Wire up middleware (CORS, tracing, request ID, timeout)
//! - Dispatch piped requests to the failover executor
//! - Dispatch deezer/lrclib requests to the passthrough forwarders
//! - Convert every failure into a JSON envelope at the boundary

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, RawQuery, Request, State},
    http::{header, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::health::Prober;
use crate::http::response;
use crate::observability::metrics;
use crate::pool::{EmptyPool, InstancePool};
use crate::proxy::{FailoverExecutor, PassthroughForwarder, ProxyRequest};
use crate::selector::InstanceSelector;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub failover: Arc<FailoverExecutor>,
    pub deezer: Arc<PassthroughForwarder>,
    pub lrclib: Arc<PassthroughForwarder>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only when the configured pool yields no usable instances.
    pub fn new(config: GatewayConfig) -> Result<Self, EmptyPool> {
        let pool = Arc::new(InstancePool::from_config(&config.pool)?);
        let client = reqwest::Client::new();

        let prober = Prober::new(client.clone(), &config.pool.probe);
        let selector = InstanceSelector::new(pool, prober, config.pool.policy);
        let failover = Arc::new(FailoverExecutor::new(
            selector,
            client.clone(),
            &config.failover,
        ));

        let upstream_timeout = Duration::from_millis(config.upstreams.timeout_ms);
        let deezer = Arc::new(PassthroughForwarder::new(
            client.clone(),
            "deezer",
            config.upstreams.deezer.clone(),
            upstream_timeout,
        ));
        let lrclib = Arc::new(PassthroughForwarder::new(
            client,
            "lrclib",
            config.upstreams.lrclib.clone(),
            upstream_timeout,
        ));

        let state = AppState {
            failover,
            deezer,
            lrclib,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all routes and middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        Router::new()
            .route("/", get(root_status))
            .route("/api", get(root_status))
            .route("/piped", get(piped_root))
            .route("/api/piped", get(piped_root))
            .route("/piped/{*path}", get(piped_proxy))
            .route("/api/piped/{*path}", get(piped_proxy))
            .route("/deezer", get(deezer_root))
            .route("/api/deezer", get(deezer_root))
            .route("/deezer/{*path}", get(deezer_proxy))
            .route("/api/deezer/{*path}", get(deezer_proxy))
            .route("/lrclib", get(lrclib_root))
            .route("/api/lrclib", get(lrclib_root))
            .route("/lrclib/{*path}", get(lrclib_proxy))
            .route("/api/lrclib/{*path}", get(lrclib_proxy))
            .fallback(not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(middleware::from_fn(options_short_circuit))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(cors)
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            policy = ?self.config.pool.policy,
            instances = self.config.pool.instances.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Answer any OPTIONS request with 200 before routing; the CORS layer above
/// attaches the permissive headers.
async fn options_short_circuit(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

async fn root_status() -> impl IntoResponse {
    response::status_ok()
}

async fn piped_root() -> impl IntoResponse {
    response::service_ok("piped")
}

async fn piped_proxy(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let start = Instant::now();
    let request = ProxyRequest::new(path, query);

    // An empty upstream path is a liveness query, answered locally.
    if request.is_empty() {
        return response::service_ok("piped").into_response();
    }

    match state.failover.execute(&request).await {
        Ok((body, status)) => {
            metrics::record_request("piped", status.as_u16(), start);
            (status, Json(body)).into_response()
        }
        Err(e) => {
            metrics::record_request("piped", 500, start);
            e.into_response()
        }
    }
}

async fn deezer_root(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    passthrough(&state.deezer, String::new(), query).await
}

async fn deezer_proxy(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    passthrough(&state.deezer, path, query).await
}

async fn lrclib_root(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    passthrough(&state.lrclib, String::new(), query).await
}

async fn lrclib_proxy(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    passthrough(&state.lrclib, path, query).await
}

/// Shared single-attempt relay for the fixed-origin services.
async fn passthrough(
    forwarder: &PassthroughForwarder,
    path: String,
    query: Option<String>,
) -> Response {
    let start = Instant::now();
    let request = ProxyRequest::new(path, query);

    match forwarder.forward(&request).await {
        Ok((body, status)) => {
            metrics::record_request(forwarder.service(), status.as_u16(), start);
            (status, Json(body)).into_response()
        }
        Err(e) => {
            metrics::record_request(forwarder.service(), 500, start);
            e.into_response()
        }
    }
}

/// JSON 404 envelope; never an HTML error page.
async fn not_found(uri: Uri) -> Response {
    metrics::record_request("none", 404, Instant::now());
    GatewayError::RouteNotFound {
        path: uri.path().to_string(),
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_builds_from_default_config() {
        assert!(HttpServer::new(GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_server_rejects_empty_pool() {
        let mut config = GatewayConfig::default();
        config.pool.instances.clear();
        assert!(HttpServer::new(config).is_err());
    }
}
