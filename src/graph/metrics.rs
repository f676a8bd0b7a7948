//! Per-path metrics
//!
//! Pure functions over enumerated paths. Both fold the path left to right;
//! the order matters for callers that want per-prefix values even though
//! the operators commute.

use std::time::Duration;

use super::Edge;

/// Multiplicative retry factor along a path: the worst-case number of leaf
/// requests one root request can trigger. Each edge contributes
/// `1 + max_retries` attempts; an empty path yields 1.
pub fn retry_amplification_factor(path: &[Edge]) -> u64 {
    path.iter().fold(1u64, |factor, e| {
        factor.saturating_mul(u64::from(e.max_retries) + 1)
    })
}

/// Worst-case end-to-end latency along a path. Each edge contributes
/// `timeout × (1 + max_retries)`; an empty path yields zero. Saturates at
/// the maximum duration instead of overflowing.
pub fn worst_case_latency(path: &[Edge]) -> Duration {
    path.iter().fold(Duration::ZERO, |total, e| {
        total.saturating_add(e.timeout.saturating_mul(e.max_retries.saturating_add(1)))
    })
}
