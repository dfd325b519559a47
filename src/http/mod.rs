//! HTTP front door subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, CORS / trace / timeout / request-id layers)
//!     → handler extracts ProxyRequest (wildcard path + raw query)
//!     → failover executor (piped) or passthrough forwarder (deezer, lrclib)
//!     → response.rs (JSON envelopes)
//! ```
//!
//! # Design Decisions
//! - Every route is mounted under both the root and an `/api` prefix to
//!   tolerate path rewriting by a hosting layer
//! - CORS headers are added outside all handlers so even 404s carry them
//! - OPTIONS short-circuits to 200 before any upstream work

pub mod response;
pub mod server;

pub use server::HttpServer;
