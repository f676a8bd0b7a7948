//! Rule execution engine
//!
//! Holds the registered rule set and evaluates it against a graph. Output
//! is the concatenation of each rule's violations in registration order;
//! within a rule, violations appear in that rule's traversal order. The
//! whole evaluation is a pure synchronous function of the graph.

use std::time::Duration;
use tracing::debug;

use super::{
    BackoffWithoutJitterRule, EndToEndTimeoutExceedRule, NonIdempotentRetryRule,
    RetryAmplificationRule, RetryWithoutCircuitBreakerRule, Rule, TimeoutInversionRule,
};
use crate::graph::{CallGraph, EdgeRecord, TopologyError};
use crate::models::Violation;

/// Caller-supplied knobs for the configurable rules.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub error_threshold: u64,
    pub warning_threshold: u64,
    /// Zero disables the end-to-end budget rule.
    pub entry_timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            error_threshold: 10,
            warning_threshold: 5,
            entry_timeout: Duration::ZERO,
        }
    }
}

/// Composes registered rules over a call graph.
#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine preloaded with the full rule set.
    pub fn with_default_rules(config: &AnalysisConfig) -> Self {
        let mut engine = Self::new();
        engine.register(Box::new(TimeoutInversionRule));
        engine.register(Box::new(RetryAmplificationRule::new(
            config.error_threshold,
            config.warning_threshold,
        )));
        engine.register(Box::new(NonIdempotentRetryRule));
        engine.register(Box::new(RetryWithoutCircuitBreakerRule));
        engine.register(Box::new(BackoffWithoutJitterRule));
        engine.register(Box::new(EndToEndTimeoutExceedRule::new(
            config.entry_timeout,
        )));
        engine
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate every registered rule. Infallible: rules that cannot apply
    /// contribute nothing.
    pub fn check(&self, graph: &CallGraph) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            let found = rule.check(graph);
            debug!(rule = rule.name(), count = found.len(), "rule evaluated");
            violations.extend(found);
        }
        violations
    }
}

/// Single-shot entry point: build a graph from boundary records and run the
/// default rule set over it. The only failure mode is malformed input.
#[allow(dead_code)] // Public API helper
pub fn analyze(
    records: Vec<EdgeRecord>,
    config: &AnalysisConfig,
) -> Result<Vec<Violation>, TopologyError> {
    let graph = CallGraph::build(records)?;
    Ok(RuleEngine::with_default_rules(config).check(&graph))
}
