//! Backoff without jitter rule

use super::{edge_hint, Rule, BACKOFF_NO_JITTER};
use crate::graph::CallGraph;
use crate::models::{Severity, Violation};

/// Flags edges with a backoff strategy but no jitter. Synchronized retry
/// waves from many clients land on the dependency at the same instant.
#[derive(Debug, Default)]
pub struct BackoffWithoutJitterRule;

impl Rule for BackoffWithoutJitterRule {
    fn name(&self) -> &'static str {
        BACKOFF_NO_JITTER
    }

    fn check(&self, graph: &CallGraph) -> Vec<Violation> {
        let mut violations = Vec::new();
        for e in graph.all_edges() {
            if e.has_backoff && !e.backoff_jitter {
                violations.push(Violation {
                    rule: BACKOFF_NO_JITTER,
                    severity: Severity::Warning,
                    message: format!(
                        "{}->{} has backoff but no jitter (thundering herd risk)",
                        e.source, e.target
                    ),
                    path: vec![e.source.clone(), e.target.clone()],
                    source_hint: edge_hint(e),
                });
            }
        }
        violations
    }
}
