//! On-demand liveness probes against pool candidates.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ProbeConfig;
use crate::observability::metrics;
use crate::pool::Instance;
use crate::proxy::request::build_target;

/// Outcome of one probe. Produced and consumed within a single selection.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub instance: Arc<Instance>,
    pub reachable: bool,
    /// Informational only; not used for selection.
    pub elapsed: Duration,
}

/// Issues lightweight HEAD probes against candidate instances.
pub struct Prober {
    client: reqwest::Client,
    path: String,
    query: Option<String>,
    timeout: Duration,
}

impl Prober {
    pub fn new(client: reqwest::Client, config: &ProbeConfig) -> Self {
        let query = if config.query.is_empty() {
            None
        } else {
            Some(config.query.clone())
        };
        Self {
            client,
            path: config.path.clone(),
            query,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Probe a candidate instance.
    ///
    /// Connection failure, a non-success status, and timeout expiry all
    /// normalize to `reachable = false`.
    pub async fn probe(&self, instance: &Arc<Instance>) -> ProbeResult {
        let url = build_target(instance.base(), &self.path, self.query.as_deref());
        let started = Instant::now();

        let reachable = match self
            .client
            .head(&url)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => {
                let ok = response.status().is_success();
                if !ok {
                    tracing::debug!(
                        instance = %instance.host(),
                        status = %response.status(),
                        "Probe failed: non-success status"
                    );
                }
                ok
            }
            Err(e) => {
                tracing::debug!(instance = %instance.host(), error = %e, "Probe failed");
                false
            }
        };

        metrics::record_probe(instance.host(), reachable);

        ProbeResult {
            instance: instance.clone(),
            reachable,
            elapsed: started.elapsed(),
        }
    }
}
