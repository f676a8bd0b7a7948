//! CLI surface and run orchestration
//!
//! Exit codes: 0 when the topology is clean, 1 when violations were
//! emitted, 2 on input errors (missing file, parse error, validation
//! failure).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::graph::CallGraph;
use crate::models::normalize_violations;
use crate::parsers::duration::parse_non_negative;
use crate::parsers::parse_topology;
use crate::reporters::{self, OutputFormat};
use crate::rules::{AnalysisConfig, RuleEngine};

/// CascadeGuard - static analyzer for service call topologies
///
/// Reads a declarative topology file and reports configurations known to
/// cause cascading failures: timeout inversion, retry amplification,
/// non-idempotent retries, unprotected retries, jitterless backoff, and
/// end-to-end budget overruns.
#[derive(Parser, Debug)]
#[command(name = "cascadeguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the topology YAML file
    pub topology: PathBuf,

    /// Output format: text, json, sarif, mermaid (or mmd)
    #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "sarif", "mermaid", "mmd"])]
    pub format: String,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// End-to-end budget at the path root, e.g. "10s" (0 disables the check)
    #[arg(long, default_value = "0")]
    pub entry_timeout: String,

    /// Amplification factor above which an error is reported
    #[arg(long, default_value_t = 10)]
    pub error_threshold: u64,

    /// Amplification factor above which a warning is reported
    #[arg(long, default_value_t = 5)]
    pub warning_threshold: u64,

    /// Sort violations and drop exact duplicates before rendering
    #[arg(long)]
    pub normalize: bool,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<ExitCode> {
    let entry_timeout = parse_non_negative(&cli.entry_timeout)
        .with_context(|| format!("--entry-timeout {:?}", cli.entry_timeout))?;
    let format = OutputFormat::from_str(&cli.format)?;

    let input = fs::read_to_string(&cli.topology)
        .with_context(|| format!("reading {}", cli.topology.display()))?;
    let topology = parse_topology(&input)
        .with_context(|| format!("parsing {}", cli.topology.display()))?;

    let graph = CallGraph::build_with_nodes(topology.edges, topology.nodes)?;
    info!(
        edges = graph.edge_count(),
        nodes = graph.node_names().len(),
        "topology loaded"
    );

    let config = AnalysisConfig {
        error_threshold: cli.error_threshold,
        warning_threshold: cli.warning_threshold,
        entry_timeout,
    };
    let engine = RuleEngine::with_default_rules(&config);
    info!(rules = engine.rule_count(), "running rule set");
    let mut violations = engine.check(&graph);
    if cli.normalize {
        violations = normalize_violations(violations);
    }

    let rendered = reporters::render(&graph, &violations, format)?;
    match &cli.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{rendered}"),
    }

    if violations.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
