//! Output reporters for analysis results
//!
//! Supported formats:
//! - `text` - terminal report with colors
//! - `json` - machine-readable violation list
//! - `sarif` - SARIF 2.1.0 for code-scanning integrations
//! - `mermaid` - topology flowchart with violating edges highlighted

mod json;
mod mermaid;
mod sarif;
mod text;

use crate::graph::CallGraph;
use crate::models::Violation;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Sarif,
    Mermaid,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, sarif, mermaid",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
            OutputFormat::Mermaid => write!(f, "mermaid"),
        }
    }
}

/// Render violations (and, for the diagram formats, the graph they came
/// from) in the requested format.
pub fn render(
    graph: &CallGraph,
    violations: &[Violation],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(violations),
        OutputFormat::Json => json::render(violations),
        OutputFormat::Sarif => sarif::render(violations),
        OutputFormat::Mermaid => mermaid::render(graph, violations),
    }
}
