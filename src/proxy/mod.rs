//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (path + raw query)
//!     → request.rs (ProxyRequest descriptor, target URL building)
//!     → failover.rs (rotating pool: selector + bounded attempts)
//!       or passthrough.rs (fixed origin: single attempt)
//!     → fetch.rs (shared GET + JSON-parse primitive)
//!     → (body, upstream status) or a gateway error
//! ```
//!
//! # Design Decisions
//! - The failover executor and the passthrough forwarder share the
//!   URL-building and fetch primitives; only the retry/selection wrapper
//!   differs
//! - A 2xx response with a non-JSON body is a failed attempt, never relayed:
//!   clients expect structured data, and a stray HTML error page would break
//!   their parsers
//! - The attempt budget is the hard bound: at most `max_attempts` upstream
//!   calls per inbound request, whatever the selection policy does

pub mod failover;
pub mod fetch;
pub mod passthrough;
pub mod request;

pub use failover::{AttemptOutcome, FailoverExecutor};
pub use fetch::UpstreamError;
pub use passthrough::PassthroughForwarder;
pub use request::ProxyRequest;
