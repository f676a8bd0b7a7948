//! Timeout inversion rule
//!
//! An upstream call's timer must bound the downstream call it triggers.
//! When a downstream edge carries a longer timeout than the edge feeding
//! it, the upstream abandons the request while the downstream is still
//! busy: wasted capacity and confused clients.

use super::{edge_hint, Rule, TIMEOUT_INVERSION};
use crate::graph::CallGraph;
use crate::models::{Severity, Violation};
use crate::parsers::duration::format_duration;

/// Flags adjacent edge pairs where the downstream timeout exceeds the
/// upstream timeout. An upstream timeout of zero means "unspecified" and
/// suppresses the check.
#[derive(Debug, Default)]
pub struct TimeoutInversionRule;

impl Rule for TimeoutInversionRule {
    fn name(&self) -> &'static str {
        TIMEOUT_INVERSION
    }

    fn check(&self, graph: &CallGraph) -> Vec<Violation> {
        let mut violations = Vec::new();
        for e in graph.all_edges() {
            for d in graph.out_edges(&e.target) {
                if !e.timeout.is_zero() && d.timeout > e.timeout {
                    violations.push(Violation {
                        rule: TIMEOUT_INVERSION,
                        severity: Severity::Error,
                        message: format!(
                            "{}->{} timeout {} but {}->{} timeout {} (downstream > upstream)",
                            e.source,
                            e.target,
                            format_duration(e.timeout),
                            d.source,
                            d.target,
                            format_duration(d.timeout),
                        ),
                        path: vec![e.source.clone(), e.target.clone(), d.target.clone()],
                        source_hint: edge_hint(e),
                    });
                }
            }
        }
        violations
    }
}
