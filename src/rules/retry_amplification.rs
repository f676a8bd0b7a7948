//! Retry amplification rule
//!
//! A single upstream failure fans out multiplicatively through stacked
//! retry layers: two edges with three retries each already turn one request
//! into sixteen. Above roughly 10x, one bad deployment can flatten the
//! deepest dependency on its own.

use super::{path_nodes, Rule, RETRY_AMPLIFICATION};
use crate::graph::{retry_amplification_factor, CallGraph};
use crate::models::{Severity, Violation};

const DEFAULT_ERROR_THRESHOLD: u64 = 10;
const DEFAULT_WARNING_THRESHOLD: u64 = 5;

/// Checks the multiplicative retry factor of every enumerated path against
/// configurable thresholds. One violation per path, so raising a threshold
/// can only demote or remove findings.
#[derive(Debug)]
pub struct RetryAmplificationRule {
    pub error_threshold: u64,
    pub warning_threshold: u64,
}

impl Default for RetryAmplificationRule {
    fn default() -> Self {
        Self {
            error_threshold: DEFAULT_ERROR_THRESHOLD,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
        }
    }
}

impl RetryAmplificationRule {
    pub fn new(error_threshold: u64, warning_threshold: u64) -> Self {
        Self {
            error_threshold,
            warning_threshold,
        }
    }
}

impl Rule for RetryAmplificationRule {
    fn name(&self) -> &'static str {
        RETRY_AMPLIFICATION
    }

    fn check(&self, graph: &CallGraph) -> Vec<Violation> {
        let mut violations = Vec::new();
        for path in graph.paths() {
            let factor = retry_amplification_factor(&path);
            if factor > self.error_threshold {
                violations.push(Violation {
                    rule: RETRY_AMPLIFICATION,
                    severity: Severity::Error,
                    message: format!(
                        "retry amplification factor {} exceeds error threshold {}",
                        factor, self.error_threshold
                    ),
                    path: path_nodes(&path),
                    source_hint: None,
                });
            } else if factor > self.warning_threshold {
                violations.push(Violation {
                    rule: RETRY_AMPLIFICATION,
                    severity: Severity::Warning,
                    message: format!(
                        "retry amplification factor {} exceeds warning threshold {}",
                        factor, self.warning_threshold
                    ),
                    path: path_nodes(&path),
                    source_hint: None,
                });
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{graph, has_rule, has_severity, EdgeSpec};
    use super::*;

    fn chain(retries: &[i64]) -> CallGraph {
        let names = ["A", "B", "C", "D", "E", "F"];
        let specs = retries
            .iter()
            .enumerate()
            .map(|(i, &r)| EdgeSpec {
                source: names[i],
                target: names[i + 1],
                max_retries: r,
                ..EdgeSpec::default()
            })
            .collect();
        graph(specs)
    }

    #[test]
    fn test_factor_over_error_threshold() {
        // (1+3)*(1+3) = 16 > 10.
        let vs = RetryAmplificationRule::default().check(&chain(&[3, 3]));
        assert!(has_severity(&vs, "retry-amplification", Severity::Error));
        assert_eq!(vs[0].path, vec!["A", "B", "C"]);
        assert_eq!(
            vs[0].message,
            "retry amplification factor 16 exceeds error threshold 10"
        );
    }

    #[test]
    fn test_factor_between_thresholds_warns() {
        // (1+1)*(1+3) = 8: above 5, not above 10.
        let vs = RetryAmplificationRule::default().check(&chain(&[1, 3]));
        assert!(has_severity(&vs, "retry-amplification", Severity::Warning));
        assert!(!has_severity(&vs, "retry-amplification", Severity::Error));
    }

    #[test]
    fn test_factor_below_warning_is_clean() {
        // (1+1)*(1+1) = 4.
        let vs = RetryAmplificationRule::default().check(&chain(&[1, 1]));
        assert!(vs.is_empty());
    }

    #[test]
    fn test_deep_chain_is_error() {
        // Five edges with 2 retries each: 3^5 = 243.
        let vs = RetryAmplificationRule::default().check(&chain(&[2, 2, 2, 2, 2]));
        assert!(has_severity(&vs, "retry-amplification", Severity::Error));
        assert_eq!(vs[0].path, vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_custom_thresholds() {
        let vs = RetryAmplificationRule::new(3, 2).check(&chain(&[1, 1]));
        assert!(has_severity(&vs, "retry-amplification", Severity::Error));
    }

    #[test]
    fn test_raising_error_threshold_only_demotes() {
        let g = chain(&[3, 3]);
        let strict = RetryAmplificationRule::default().check(&g);
        let lax = RetryAmplificationRule::new(100, 5).check(&g);
        assert!(has_severity(&strict, "retry-amplification", Severity::Error));
        assert!(has_severity(&lax, "retry-amplification", Severity::Warning));
        assert!(!has_severity(&lax, "retry-amplification", Severity::Error));
        assert_eq!(strict.len(), lax.len());
    }

    #[test]
    fn test_one_violation_per_path() {
        // Diamond with heavy retries on every edge: two paths, two findings.
        let g = graph(vec![
            EdgeSpec {
                max_retries: 3,
                ..EdgeSpec::default()
            },
            EdgeSpec {
                target: "D",
                max_retries: 3,
                ..EdgeSpec::default()
            },
            EdgeSpec {
                source: "B",
                target: "C",
                max_retries: 3,
                ..EdgeSpec::default()
            },
            EdgeSpec {
                source: "D",
                target: "C",
                max_retries: 3,
                ..EdgeSpec::default()
            },
        ]);
        let vs = RetryAmplificationRule::default().check(&g);
        assert_eq!(vs.len(), 2);
        assert!(has_rule(&vs, "retry-amplification"));
    }
}
