//! Music API gateway library.
//!
//! A stateless HTTP gateway that fans client requests out to a rotating
//! pool of Piped API mirrors plus two fixed-origin services (Deezer,
//! LRCLIB) and relays JSON responses back unmodified.
//!
//! # Architecture Overview
//!
//! ```text
//!  Client ──▶ http (router, CORS, trace, timeout)
//!                │
//!                ├─ /piped/*  ──▶ proxy::failover ──▶ selector ──▶ pool
//!                │                      │                │
//!                │                      │                └─ health (probe)
//!                │                      └─ proxy::fetch (GET + JSON parse)
//!                │
//!                ├─ /deezer/* ──▶ proxy::passthrough ─┐
//!                ├─ /lrclib/* ──▶ proxy::passthrough ─┴─ proxy::fetch
//!                │
//!                └─ anything else ──▶ JSON 404 envelope
//! ```
//!
//! The only cross-request state is the pool's rotation cursor; everything
//! else lives and dies with a single inbound request.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pool;
pub mod proxy;
pub mod selector;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
