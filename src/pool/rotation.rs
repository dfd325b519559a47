//! Instance pool with an atomic rotation cursor.
//!
//! # Responsibilities
//! - Hold the ordered set of configured instances
//! - Advance the rotation cursor safely under concurrent requests
//! - Persist a sticky cursor position chosen by the selector

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::PoolConfig;
use crate::pool::instance::Instance;

/// Error returned when configuration yields no usable instances.
///
/// Surfaced at startup; the pool is never empty once constructed.
#[derive(Debug, thiserror::Error)]
#[error("instance pool is empty: at least one valid instance URL is required")]
pub struct EmptyPool;

/// Ordered set of instances plus the rotation cursor.
///
/// The cursor is the only cross-request mutable state in the gateway.
/// Concurrent increments never lose updates; exact fairness across tasks is
/// not required, only eventual even distribution.
#[derive(Debug)]
pub struct InstancePool {
    instances: Vec<Arc<Instance>>,
    cursor: AtomicUsize,
}

impl InstancePool {
    /// Create a pool from already-parsed instances.
    pub fn new(instances: Vec<Arc<Instance>>) -> Result<Self, EmptyPool> {
        if instances.is_empty() {
            return Err(EmptyPool);
        }
        Ok(Self {
            instances,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Build the pool from configuration.
    ///
    /// Unparseable or duplicate URLs are skipped with a warning; an empty
    /// result is fatal.
    pub fn from_config(config: &PoolConfig) -> Result<Self, EmptyPool> {
        let mut instances: Vec<Arc<Instance>> = Vec::new();
        for raw in &config.instances {
            match Instance::parse(raw) {
                Ok(instance) => {
                    if instances.iter().any(|i| **i == instance) {
                        tracing::warn!(url = %raw, "Duplicate instance URL, skipping");
                    } else {
                        instances.push(Arc::new(instance));
                    }
                }
                Err(e) => {
                    tracing::warn!(url = %raw, error = %e, "Invalid instance URL, skipping");
                }
            }
        }
        Self::new(instances)
    }

    /// Number of instances in the pool. Always at least 1.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// The instance at the current cursor without advancing it.
    pub fn current(&self) -> Arc<Instance> {
        self.get(self.cursor())
    }

    /// The instance at the current cursor, advancing the cursor by one.
    pub fn next(&self) -> Arc<Instance> {
        let raw = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.get(raw % self.instances.len())
    }

    /// The instance at `index mod len`.
    pub fn get(&self, index: usize) -> Arc<Instance> {
        self.instances[index % self.instances.len()].clone()
    }

    /// Current cursor position, normalized into `[0, len)`.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Relaxed) % self.instances.len()
    }

    /// Persist a sticky cursor position (probe-then-rotate selection).
    pub fn set_cursor(&self, index: usize) {
        self.cursor
            .store(index % self.instances.len(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;

    fn pool_of(n: usize) -> InstancePool {
        let instances = (0..n)
            .map(|i| Arc::new(Instance::parse(&format!("http://instance-{i}.test")).unwrap()))
            .collect();
        InstancePool::new(instances).unwrap()
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert!(InstancePool::new(Vec::new()).is_err());
    }

    #[test]
    fn test_next_rotates_in_order() {
        let pool = pool_of(3);
        let hosts: Vec<String> = (0..6).map(|_| pool.next().host().to_string()).collect();
        assert_eq!(
            hosts,
            vec![
                "instance-0.test",
                "instance-1.test",
                "instance-2.test",
                "instance-0.test",
                "instance-1.test",
                "instance-2.test",
            ]
        );
    }

    #[test]
    fn test_round_robin_multiset_property() {
        // N consecutive calls visit each instance exactly once.
        let pool = pool_of(5);
        pool.set_cursor(3);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..5 {
            *counts.entry(pool.next().host().to_string()).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), 5);
        assert!(counts.values().all(|&c| c == 1));
    }

    #[tokio::test]
    async fn test_concurrent_next_visits_evenly() {
        let pool = Arc::new(pool_of(4));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let pool = pool.clone();
            handles.push(tokio::spawn(async move {
                (0..100).map(|_| pool.next().host().to_string()).collect::<Vec<_>>()
            }));
        }
        let mut counts = std::collections::HashMap::new();
        for h in handles {
            for host in h.await.unwrap() {
                *counts.entry(host).or_insert(0u32) += 1;
            }
        }
        // 800 total calls over 4 instances: each seen exactly 200 times,
        // because every fetch_add yields a distinct cursor value.
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&c| c == 200));
    }

    #[test]
    fn test_set_cursor_is_sticky() {
        let pool = pool_of(3);
        pool.set_cursor(2);
        assert_eq!(pool.current().host(), "instance-2.test");
        assert_eq!(pool.next().host(), "instance-2.test");
        assert_eq!(pool.cursor(), 0);
    }

    #[test]
    fn test_from_config_skips_invalid_and_duplicates() {
        let config = PoolConfig {
            instances: vec![
                "https://a.test".into(),
                "not a url".into(),
                "https://a.test/".into(),
                "https://b.test".into(),
            ],
            ..PoolConfig::default()
        };
        let pool = InstancePool::from_config(&config).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_from_config_all_invalid_is_fatal() {
        let config = PoolConfig {
            instances: vec!["definitely not a url".into()],
            ..PoolConfig::default()
        };
        assert!(InstancePool::from_config(&config).is_err());
    }
}
