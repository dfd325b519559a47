//! Instance selection subsystem.
//!
//! # Data Flow
//! ```text
//! Failover executor asks for "the instance to use now"
//!     → policy.rs (which strategy is configured)
//!     → static_first: instances[0], no probing
//!     → rotate: pool.next(), cursor advances per call
//!     → probe_then_rotate: probe candidates from the cursor, persist the
//!       first reachable index as the sticky cursor
//!     → random: uniform pick, no cursor, no probing
//! ```
//!
//! # Design Decisions
//! - One policy enum instead of per-policy code paths duplicated across
//!   server variants
//! - Selection never fails: with zero reachable instances the first
//!   configured instance is the fallback, and the failure surfaces at the
//!   subsequent call site
//! - Probing is decoupled from retry: the executor bounds attempts
//!   regardless of which policy picked the instance

pub mod policy;

pub use policy::SelectionPolicy;

use std::sync::Arc;

use rand::Rng;

use crate::health::Prober;
use crate::pool::{Instance, InstancePool};

/// Combines the pool and the prober under a configured selection policy.
pub struct InstanceSelector {
    pool: Arc<InstancePool>,
    prober: Prober,
    policy: SelectionPolicy,
}

impl InstanceSelector {
    pub fn new(pool: Arc<InstancePool>, prober: Prober, policy: SelectionPolicy) -> Self {
        Self {
            pool,
            prober,
            policy,
        }
    }

    pub fn pool(&self) -> &Arc<InstancePool> {
        &self.pool
    }

    /// Pick the instance to use for the next upstream attempt.
    pub async fn select(&self) -> Arc<Instance> {
        match self.policy {
            SelectionPolicy::StaticFirst => self.pool.get(0),
            SelectionPolicy::Rotate => self.pool.next(),
            SelectionPolicy::Random => {
                let index = rand::thread_rng().gen_range(0..self.pool.len());
                self.pool.get(index)
            }
            SelectionPolicy::ProbeThenRotate => self.probe_rotation().await,
        }
    }

    /// Rotate past an instance whose upstream call just failed, so the next
    /// selection starts at its successor instead of re-picking the sticky
    /// choice.
    pub fn note_failure(&self) {
        if self.policy == SelectionPolicy::ProbeThenRotate {
            self.pool.next();
        }
    }

    /// Probe up to `len` candidates in rotation order starting at the
    /// current cursor. The first reachable candidate becomes the sticky
    /// cursor. Ties break on rotation order, never randomized.
    async fn probe_rotation(&self) -> Arc<Instance> {
        let start = self.pool.cursor();
        for offset in 0..self.pool.len() {
            let index = (start + offset) % self.pool.len();
            let candidate = self.pool.get(index);
            let result = self.prober.probe(&candidate).await;
            if result.reachable {
                self.pool.set_cursor(index);
                tracing::debug!(
                    instance = %candidate.host(),
                    probes = offset + 1,
                    elapsed_ms = result.elapsed.as_millis() as u64,
                    "Selected reachable instance"
                );
                return candidate;
            }
        }

        // Last-resort fallback; the upstream call will surface the failure.
        tracing::warn!("No reachable instances, falling back to first configured");
        self.pool.get(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeConfig;

    fn selector_for(urls: &[&str], policy: SelectionPolicy) -> InstanceSelector {
        let instances = urls
            .iter()
            .map(|u| Arc::new(Instance::parse(u).unwrap()))
            .collect();
        let pool = Arc::new(InstancePool::new(instances).unwrap());
        let prober = Prober::new(reqwest::Client::new(), &ProbeConfig::default());
        InstanceSelector::new(pool, prober, policy)
    }

    #[tokio::test]
    async fn test_static_first_never_rotates() {
        let selector = selector_for(&["http://a.test", "http://b.test"], SelectionPolicy::StaticFirst);
        for _ in 0..3 {
            assert_eq!(selector.select().await.host(), "a.test");
        }
        assert_eq!(selector.pool().cursor(), 0);
    }

    #[tokio::test]
    async fn test_rotate_advances_per_call() {
        let selector = selector_for(&["http://a.test", "http://b.test"], SelectionPolicy::Rotate);
        assert_eq!(selector.select().await.host(), "a.test");
        assert_eq!(selector.select().await.host(), "b.test");
        assert_eq!(selector.select().await.host(), "a.test");
    }

    #[tokio::test]
    async fn test_random_stays_in_pool() {
        let selector = selector_for(&["http://a.test", "http://b.test"], SelectionPolicy::Random);
        for _ in 0..20 {
            let host = selector.select().await.host().to_string();
            assert!(host == "a.test" || host == "b.test");
        }
    }
}
