//! End-to-end timeout budget rule

use std::time::Duration;

use super::{path_nodes, Rule, E2E_TIMEOUT_EXCEED};
use crate::graph::{worst_case_latency, CallGraph};
use crate::models::{Severity, Violation};
use crate::parsers::duration::format_duration;

/// Checks that the worst-case latency of every path fits inside the
/// system-wide entry timeout. If the per-hop worst cases already sum past
/// the SLA at the root, retries cannot possibly complete within budget.
///
/// A zero `entry_timeout` disables the rule.
#[derive(Debug, Default)]
pub struct EndToEndTimeoutExceedRule {
    pub entry_timeout: Duration,
}

impl EndToEndTimeoutExceedRule {
    pub fn new(entry_timeout: Duration) -> Self {
        Self { entry_timeout }
    }
}

impl Rule for EndToEndTimeoutExceedRule {
    fn name(&self) -> &'static str {
        E2E_TIMEOUT_EXCEED
    }

    fn check(&self, graph: &CallGraph) -> Vec<Violation> {
        if self.entry_timeout.is_zero() {
            return Vec::new();
        }
        let mut violations = Vec::new();
        for path in graph.paths() {
            let worst_case = worst_case_latency(&path);
            if worst_case > self.entry_timeout {
                violations.push(Violation {
                    rule: E2E_TIMEOUT_EXCEED,
                    severity: Severity::Error,
                    message: format!(
                        "worst-case latency {} exceeds entry timeout {}",
                        format_duration(worst_case),
                        format_duration(self.entry_timeout),
                    ),
                    path: path_nodes(&path),
                    source_hint: None,
                });
            }
        }
        violations
    }
}
