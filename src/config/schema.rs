//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files, and every field has a default so a minimal (or absent) config
//! file still yields a runnable gateway.

use serde::{Deserialize, Serialize};

use crate::selector::SelectionPolicy;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, outer request timeout).
    pub listener: ListenerConfig,

    /// Rotating instance pool for the Piped service.
    pub pool: PoolConfig,

    /// Failover attempt budget and per-attempt timeout.
    pub failover: FailoverConfig,

    /// Fixed-origin services forwarded without retry.
    pub upstreams: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Outer deadline for one inbound request in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Rotating pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Ordered instance base URLs. Order defines the rotation sequence.
    pub instances: Vec<String>,

    /// How the selector picks an instance per attempt.
    pub policy: SelectionPolicy,

    /// Liveness probe settings (probe_then_rotate policy only).
    pub probe: ProbeConfig,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            instances: vec![
                "https://pipedapi.kavin.rocks".to_string(),
                "https://pipedapi.adminforge.de".to_string(),
                "https://api.piped.yt".to_string(),
                "https://piped-api.lunar.icu".to_string(),
                "https://pipedapi.drgns.space".to_string(),
            ],
            policy: SelectionPolicy::default(),
            probe: ProbeConfig::default(),
        }
    }
}

/// Liveness probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Cheap, side-effect-free endpoint used only as a liveness signal.
    pub path: String,

    /// Raw query string appended to the probe path.
    pub query: String,

    /// Probe timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            path: "/trending".to_string(),
            query: "region=KR".to_string(),
            timeout_ms: 1500,
        }
    }
}

/// Failover configuration for the rotating pool.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FailoverConfig {
    /// Maximum upstream calls per inbound request.
    pub max_attempts: u32,

    /// Per-attempt timeout in milliseconds.
    pub attempt_timeout_ms: u64,
}

impl Default for FailoverConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout_ms: 5000,
        }
    }
}

/// Fixed-origin upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Deezer API origin.
    pub deezer: String,

    /// LRCLIB origin.
    pub lrclib: String,

    /// Timeout for single-attempt forwards in milliseconds.
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            deezer: "https://api.deezer.com".to_string(),
            lrclib: "https://lrclib.net".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
