//! Shared utilities for integration testing.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use music_gateway::config::GatewayConfig;
use music_gateway::http::HttpServer;
use music_gateway::lifecycle::Shutdown;
use music_gateway::selector::SelectionPolicy;

/// Hit counters for one mock upstream, split by method so tests can
/// distinguish liveness probes (HEAD) from fetch attempts (GET).
#[derive(Default)]
pub struct Hits {
    pub gets: AtomicU32,
    pub heads: AtomicU32,
    pub last_request_line: Mutex<String>,
}

impl Hits {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn get_count(&self) -> u32 {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn head_count(&self) -> u32 {
        self.heads.load(Ordering::SeqCst)
    }

    pub fn last_line(&self) -> String {
        self.last_request_line.lock().unwrap().clone()
    }
}

/// Start a mock upstream that answers every request with a fixed status,
/// content type, and body. Returns the bound address.
pub async fn start_mock_upstream(
    status: u16,
    content_type: &'static str,
    body: &'static str,
    hits: Arc<Hits>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let hits = hits.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 2048];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]).to_string();
                        let is_head = head.starts_with("HEAD");
                        if head.starts_with("GET") {
                            hits.gets.fetch_add(1, Ordering::SeqCst);
                        } else if is_head {
                            hits.heads.fetch_add(1, Ordering::SeqCst);
                        }
                        if let Some(line) = head.lines().next() {
                            *hits.last_request_line.lock().unwrap() = line.to_string();
                        }

                        // HEAD responses carry no body.
                        let payload = if is_head { "" } else { body };
                        let response = format!(
                            "HTTP/1.1 {status} Mock\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                            payload.len(),
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address with nothing listening on it (connection refused).
pub fn unreachable_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Base gateway config with short timeouts suitable for tests.
pub fn test_config(instances: Vec<String>, policy: SelectionPolicy) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.pool.instances = instances;
    config.pool.policy = policy;
    config.pool.probe.timeout_ms = 500;
    config.failover.attempt_timeout_ms = 1000;
    config.upstreams.timeout_ms = 1000;
    config
}

/// Spawn the gateway on an ephemeral port. The returned [`Shutdown`] must
/// be kept alive for the lifetime of the test.
pub async fn spawn_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config).expect("valid test config");
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Non-pooled client so each request opens a fresh connection.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
