//! Liveness probing subsystem.
//!
//! # Data Flow
//! ```text
//! Selector asks "is this candidate alive?"
//!     → probe.rs (HEAD request to a cheap fixed endpoint, short timeout)
//!     → ProbeResult { reachable, elapsed }
//!     → Selector decides rotation; the prober never mutates pool state
//! ```
//!
//! # Design Decisions
//! - Probes are on-demand, not periodic: best-effort selection hints only
//! - Every failure mode (connect error, bad status, timeout) normalizes to
//!   `reachable = false`; probing never returns an error to the caller
//! - The hard liveness guarantee comes from the failover executor, not here

pub mod probe;

pub use probe::{ProbeResult, Prober};
