//! JSON reporter
//!
//! Outputs the violation list as pretty-printed JSON for machine
//! consumption or piping to jq.

use crate::models::Violation;
use anyhow::Result;

/// Render violations as JSON
pub fn render(violations: &[Violation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(violations)?)
}
