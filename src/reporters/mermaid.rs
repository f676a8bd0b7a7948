//! Mermaid topology reporter
//!
//! Emits a `graph LR` flowchart with one line per edge in input order,
//! labeled `timeout/retries`. Edges that appear as a consecutive
//! `(source, target)` pair in any violation path get a red `linkStyle`
//! directive. The output ends without a trailing newline.

use std::collections::HashSet;

use crate::graph::CallGraph;
use crate::models::Violation;
use crate::parsers::duration::format_duration;
use anyhow::Result;

pub fn render(graph: &CallGraph, violations: &[Violation]) -> Result<String> {
    let mut violating: HashSet<(&str, &str)> = HashSet::new();
    for v in violations {
        for pair in v.path.windows(2) {
            violating.insert((pair[0].as_str(), pair[1].as_str()));
        }
    }

    let mut lines = vec!["graph LR".to_string()];
    let mut red_indices = Vec::new();
    for (i, e) in graph.all_edges().enumerate() {
        lines.push(format!(
            "  {} -->|\"{}/{}\"| {}",
            e.source,
            format_duration(e.timeout),
            e.max_retries,
            e.target
        ));
        if violating.contains(&(e.source.as_str(), e.target.as_str())) {
            red_indices.push(i);
        }
    }
    for idx in red_indices {
        lines.push(format!("  linkStyle {idx} stroke:red"));
    }

    Ok(lines.join("\n"))
}
