//! Retry without circuit breaker rule

use super::{edge_hint, Rule, RETRY_WITHOUT_CB};
use crate::graph::CallGraph;
use crate::models::{Severity, Violation};

/// Flags edges that retry without a circuit breaker. Retries against a
/// failing dependency keep hammering it; a breaker is what stops the
/// hammering once the dependency is clearly down.
#[derive(Debug, Default)]
pub struct RetryWithoutCircuitBreakerRule;

impl Rule for RetryWithoutCircuitBreakerRule {
    fn name(&self) -> &'static str {
        RETRY_WITHOUT_CB
    }

    fn check(&self, graph: &CallGraph) -> Vec<Violation> {
        let mut violations = Vec::new();
        for e in graph.all_edges() {
            if e.max_retries > 0 && !e.has_circuit_breaker {
                violations.push(Violation {
                    rule: RETRY_WITHOUT_CB,
                    severity: Severity::Warning,
                    message: format!(
                        "{}->{} has {} retries but no circuit breaker",
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
    fn test_retries_without_breaker_triggers() {
        let g = graph(vec![EdgeSpec {
            max_retries: 3,
            has_circuit_breaker: false,
            ..EdgeSpec::default()
        }]);
        let vs = RetryWithoutCircuitBreakerRule.check(&g);
        assert!(has_rule(&vs, "retry-without-cb"));
        assert_eq!(vs[0].severity, Severity::Warning);
        assert_eq!(vs[0].message, "A->B has 3 retries but no circuit breaker");
    }

    #[test]
    fn test_retries_with_breaker_is_clean() {
        let g = graph(vec![EdgeSpec {
            max_retries: 3,
            has_circuit_breaker: true,
            ..EdgeSpec::default()
        }]);
        assert!(RetryWithoutCircuitBreakerRule.check(&g).is_empty());
    }

    #[test]
    fn test_no_retries_without_breaker_is_clean() {
        let g = graph(vec![EdgeSpec {
            max_retries: 0,
            has_circuit_breaker: false,
            ..EdgeSpec::default()
        }]);
        assert!(RetryWithoutCircuitBreakerRule.check(&g).is_empty());
    }
}
