//! Core data models for CascadeGuard
//!
//! These models cross the boundary between the analysis engine and the
//! renderers: every rule emits [`Violation`] records, and every reporter
//! consumes them unchanged.

use serde::Serialize;

/// Severity levels for violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single anti-pattern finding.
///
/// `rule` is one of the closed set of rule identifiers declared in
/// [`crate::rules`]. `path` is the ordered list of service names the finding
/// refers to (at least two for edge-local rules, the full chain for
/// path-global rules). `source_hint` points renderers at the offending edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hint: Option<String>,
}

/// Stable-sort violations by `(rule, path, message)` and drop exact
/// duplicates. The engine emits without this pass by default so callers can
/// count per-rule output; renderers that want canonical order opt in.
pub fn normalize_violations(mut violations: Vec<Violation>) -> Vec<Violation> {
    violations.sort_by(|a, b| {
        (a.rule, &a.path, &a.message).cmp(&(b.rule, &b.path, &b.message))
    });
    violations.dedup();
    violations
}
