//! Anti-pattern rules
//!
//! Every rule implements the same contract: inspect the graph, return
//! violations. Rules are stateless beyond the configuration they were
//! constructed with, never mutate the graph, and never fail — a rule that
//! cannot apply to the input produces no violations.

mod backoff_no_jitter;
mod e2e_timeout;
mod engine;
mod non_idempotent_retry;
mod retry_amplification;
mod retry_without_cb;
mod timeout_inversion;

pub use backoff_no_jitter::BackoffWithoutJitterRule;
pub use e2e_timeout::EndToEndTimeoutExceedRule;
pub use engine::{analyze, AnalysisConfig, RuleEngine};
pub use non_idempotent_retry::NonIdempotentRetryRule;
pub use retry_amplification::RetryAmplificationRule;
pub use retry_without_cb::RetryWithoutCircuitBreakerRule;
pub use timeout_inversion::TimeoutInversionRule;

use crate::graph::{CallGraph, Edge};
use crate::models::Violation;

/// The closed set of rule identifiers.
pub const TIMEOUT_INVERSION: &str = "timeout-inversion";
pub const RETRY_AMPLIFICATION: &str = "retry-amplification";
pub const NON_IDEMPOTENT_RETRY: &str = "non-idempotent-retry";
pub const RETRY_WITHOUT_CB: &str = "retry-without-cb";
pub const BACKOFF_NO_JITTER: &str = "backoff-no-jitter";
pub const E2E_TIMEOUT_EXCEED: &str = "e2e-timeout-exceed";

/// Trait for all anti-pattern rules.
pub trait Rule: Send + Sync {
    /// The rule identifier emitted on its violations.
    fn name(&self) -> &'static str;

    /// Evaluate the rule against a graph. Total: never fails, returns an
    /// empty list when the rule does not apply.
    fn check(&self, graph: &CallGraph) -> Vec<Violation>;
}

/// Ordered node names of an edge path: the first source followed by every
/// target.
pub(crate) fn path_nodes(path: &[Edge]) -> Vec<String> {
    let Some(first) = path.first() else {
        return Vec::new();
    };
    let mut nodes = Vec::with_capacity(path.len() + 1);
    nodes.push(first.source.clone());
    nodes.extend(path.iter().map(|e| e.target.clone()));
    nodes
}

/// Renderer hint naming the offending edge.
pub(crate) fn edge_hint(edge: &Edge) -> Option<String> {
    Some(format!("edge {}->{}", edge.source, edge.target))
}


#[cfg(test)]
mod tests {
    use super::test_support::{graph, EdgeSpec};
    use super::*;

    #[test]
    fn test_path_nodes_empty() {
        assert!(path_nodes(&[]).is_empty());
    }

    #[test]
    fn test_path_nodes_chain() {
        let g = graph(vec![
            EdgeSpec::default(),
            EdgeSpec {
                source: "B",
                target: "C",
                ..EdgeSpec::default()
            },
        ]);
        let paths = g.paths();
        assert_eq!(path_nodes(&paths[0]), vec!["A", "B", "C"]);
    }
}
