//! Selection policy configuration.

use serde::{Deserialize, Serialize};

/// How the selector picks an instance for each upstream attempt.
///
/// The observed deployment variants (always-first, round-robin,
/// probe-and-stick, random) are unified here as configuration rather than
/// duplicated code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Always the first configured instance; no probing. Lowest latency,
    /// no resilience from selection itself.
    StaticFirst,
    /// Plain round-robin; the cursor advances on every selection.
    Rotate,
    /// Probe candidates in rotation order and stick with the first
    /// reachable one until it fails again.
    #[default]
    ProbeThenRotate,
    /// Uniformly random instance per call; no cursor, no probing.
    Random,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_deserializes_snake_case() {
        let p: SelectionPolicy = serde_json::from_str("\"probe_then_rotate\"").unwrap();
        assert_eq!(p, SelectionPolicy::ProbeThenRotate);
        let p: SelectionPolicy = serde_json::from_str("\"static_first\"").unwrap();
        assert_eq!(p, SelectionPolicy::StaticFirst);
    }

    #[test]
    fn test_policy_default() {
        assert_eq!(SelectionPolicy::default(), SelectionPolicy::ProbeThenRotate);
    }
}
