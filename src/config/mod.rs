//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize; defaults when absent)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared by value with all subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime reconfiguration
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Timeouts and the attempt budget are tuning parameters, exposed here
//!   rather than hard-coded at call sites

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{
    FailoverConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, PoolConfig, ProbeConfig,
    UpstreamConfig,
};
