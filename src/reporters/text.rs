//! Text (terminal) reporter

use crate::models::{Severity, Violation};
use anyhow::Result;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Severity colors
fn severity_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31m",   // Red
        Severity::Warning => "\x1b[33m", // Yellow
    }
}

fn severity_tag(severity: &Severity) -> &'static str {
    match severity {
        Severity::Error => "ERR ",
        Severity::Warning => "WARN",
    }
}

/// Render violations as a human-readable terminal report
pub fn render(violations: &[Violation]) -> Result<String> {
    let mut out = String::new();

    if violations.is_empty() {
        out.push_str("No issues found in service topology.\n");
        return Ok(out);
    }

    out.push_str(&format!(
        "{BOLD}Found {} issue(s):{RESET}\n\n",
        violations.len()
    ));

    for (i, v) in violations.iter().enumerate() {
        let color = severity_color(&v.severity);
        out.push_str(&format!(
            "{}. {color}[{}]{RESET}[{}] {}\n",
            i + 1,
            severity_tag(&v.severity),
            v.rule,
            v.message
        ));
        out.push_str(&format!("   Path: {}\n", v.path.join(" -> ")));
        if let Some(hint) = &v.source_hint {
            out.push_str(&format!("   {DIM}{hint}{RESET}\n"));
        }
        out.push('\n');
    }

    Ok(out)
}
