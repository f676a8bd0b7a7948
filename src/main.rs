//! CascadeGuard - static analyzer for distributed-system call topologies
//!
//! Builds an in-memory call graph from a declarative topology file and
//! evaluates a composable rule set against it, reporting configurations
//! known to cause cascading failures.

mod cli;
mod graph;
mod models;
mod parsers;
mod reporters;
mod rules;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();
    match cli::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
