//! SARIF 2.1.0 reporter for code-scanning integrations
//!
//! Generates SARIF (Static Analysis Results Interchange Format) output
//! compliant with OASIS SARIF 2.1.0. Every violation maps to one result;
//! an empty violation list still produces the run with an empty results
//! array. The document contains nothing run-dependent, so identical input
//! renders byte-identical output.

use crate::models::{Severity, Violation};
use anyhow::Result;
use serde::Serialize;

const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const DRIVER_NAME: &str = "CascadeGuard";

/// Map violation severity to SARIF level
fn severity_to_sarif_level(severity: &Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

#[derive(Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
struct SarifDriver {
    name: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: &'static str,
    level: &'static str,
    message: SarifMessage,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

/// Render violations as SARIF 2.1.0 JSON
pub fn render(violations: &[Violation]) -> Result<String> {
    let results: Vec<SarifResult> = violations
        .iter()
        .map(|v| SarifResult {
            rule_id: v.rule,
            level: severity_to_sarif_level(&v.severity),
            message: SarifMessage {
                text: v.message.clone(),
            },
        })
        .collect();

    let report = SarifReport {
        schema: SARIF_SCHEMA,
        version: SARIF_VERSION,
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver { name: DRIVER_NAME },
            },
            results,
        }],
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
