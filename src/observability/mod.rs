//! Observability subsystem.
//!
//! # Responsibilities
//! - Structured logging via `tracing` (logging.rs)
//! - Prometheus metrics exposition (metrics.rs)
//!
//! # Design Decisions
//! - Log level comes from config, overridable via RUST_LOG
//! - Metric updates are low-overhead counter/histogram macros; the
//!   exporter endpoint is opt-in

pub mod logging;
pub mod metrics;
