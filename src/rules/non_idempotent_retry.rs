//! Non-idempotent retry rule

use super::{edge_hint, Rule, NON_IDEMPOTENT_RETRY};
use crate::graph::CallGraph;
use crate::models::{Severity, Violation};

/// Flags edges that retry a call that is not safe to repeat. Replaying a
/// non-idempotent request can duplicate writes downstream.
#[derive(Debug, Default)]
pub struct NonIdempotentRetryRule;

impl Rule for NonIdempotentRetryRule {
    fn name(&self) -> &'static str {
        NON_IDEMPOTENT_RETRY
    }

    fn check(&self, graph: &CallGraph) -> Vec<Violation> {
        let mut violations = Vec::new();
        for e in graph.all_edges() {
            if e.max_retries > 0 && !e.idempotent {
                violations.push(Violation {
                    rule: NON_IDEMPOTENT_RETRY,
                    severity: Severity::Error,
                    message: format!(
                        "{}->{} retries {} times but is not idempotent",
                        e.source, e.target, e.max_retries
                    ),
                    path: vec![e.source.clone(), e.target.clone()],
                    source_hint: edge_hint(e),
                });
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{graph, has_rule, EdgeSpec};
    use super::*;

    #[test]
    fn test_non_idempotent_with_retries_triggers() {
        let g = graph(vec![EdgeSpec {
            max_retries: 2,
            idempotent: false,
            ..EdgeSpec::default()
        }]);
        let vs = NonIdempotentRetryRule.check(&g);
        assert!(has_rule(&vs, "non-idempotent-retry"));
        assert_eq!(vs[0].severity, Severity::Error);
        assert_eq!(vs[0].path, vec!["A", "B"]);
        assert_eq!(vs[0].message, "A->B retries 2 times but is not idempotent");
    }

    #[test]
    fn test_idempotent_with_retries_is_clean() {
        let g = graph(vec![EdgeSpec {
            max_retries: 2,
            idempotent: true,
            ..EdgeSpec::default()
        }]);
        assert!(NonIdempotentRetryRule.check(&g).is_empty());
    }

    #[test]
    fn test_non_idempotent_without_retries_is_clean() {
        let g = graph(vec![EdgeSpec {
            max_retries: 0,
            idempotent: false,
            ..EdgeSpec::default()
        }]);
        assert!(NonIdempotentRetryRule.check(&g).is_empty());
    }
}
