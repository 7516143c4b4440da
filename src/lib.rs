//! complygate: compliance gates for release and audit milestones.
//!
//! A set of independent, read-only checks that run in CI and fail the build
//! when required governance, control, or schema artifacts are missing or
//! incomplete.
//!
//! # Gates
//!
//! - `freeze`: every frozen contract artifact exists (all missing paths reported)
//! - `approvals`: impact decisions in the governance ledger carry finance/controls sign-off
//! - `schema`: the canonical event schema declares the envelope fields and exact event types
//! - `evidence.<family>`: control evidence documents contain their attestation snippets
//!
//! Each gate is also shipped as a zero-argument binary (`check-contract-freeze`,
//! `check-impact-approvals`, `validate-canonical-schema`,
//! `validate-sprint5-controls`, `validate-sprint6-controls`) that resolves
//! paths against the working directory.
//!
//! # Examples
//!
//! ```bash
//! # One gate
//! complygate schema
//!
//! # The whole pipeline, machine-readable
//! complygate --format json all
//!
//! # Against another checkout with a custom manifest
//! complygate --root ../ledger --config gates.toml freeze
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: documents, the artifact requirement model, reports, config
//! - [`gates`]: gate implementations and the pipeline registry

mod cli;
pub mod core;
pub mod gates;

pub use crate::core::error::GateError;

use crate::cli::{Cli, Command};
use crate::core::config::GatesConfig;
use crate::core::document::WorkspaceSource;
use crate::core::output::{self, Format};
use crate::core::logging;
use crate::gates::{Gate, Outcome};
use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::io::{self, IsTerminal};

/// Entry point of the `complygate` binary. Returns the process exit code.
pub fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("resolving current directory")?,
    };
    let config = match &cli.config {
        Some(path) => GatesConfig::load(path)
            .with_context(|| format!("loading gate config {}", path.display()))?,
        None => GatesConfig::embedded()?,
    };
    let source = WorkspaceSource::new(root);
    tracing::info!(root = %source.root().display(), "resolved repository root");

    let code = match cli.command {
        Command::Freeze => run_single(&Gate::Freeze, &source, &config, cli.format)?,
        Command::Approvals => run_single(&Gate::Approvals, &source, &config, cli.format)?,
        Command::Schema => run_single(&Gate::Schema, &source, &config, cli.format)?,
        Command::Evidence { family } => {
            config.evidence_family(&family)?;
            run_single(&Gate::Evidence(family), &source, &config, cli.format)?
        }
        Command::All => run_all(&source, &config, cli.format)?,
        Command::List => {
            list_gates(&config);
            0
        }
    };
    Ok(code)
}

/// Entry point of the standalone gate binaries: working directory as root,
/// embedded configuration, text output.
pub fn run_standalone(gate: Gate) -> i32 {
    let config = match GatesConfig::embedded() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };
    let source = WorkspaceSource::new(".");
    let outcome = gate.run(&source, &config);
    output::emit(&gate.name(), &outcome, Format::Text).unwrap_or(1)
}

fn run_single(
    gate: &Gate,
    source: &WorkspaceSource,
    config: &GatesConfig,
    format: Format,
) -> io::Result<i32> {
    let outcome = gate.run(source, config);
    output::emit(&gate.name(), &outcome, format)
}

fn run_all(source: &WorkspaceSource, config: &GatesConfig, format: Format) -> io::Result<i32> {
    let results = gates::run_pipeline(source, config);
    let (mut passed, mut failed, mut skipped) = (0u32, 0u32, 0u32);
    let mut failures = Vec::new();

    for (gate, outcome) in &results {
        let name = gate.name();
        match outcome {
            Outcome::Skipped => {
                skipped += 1;
                match format {
                    Format::Text => println!("{}: skipped (freeze check failed)", name),
                    Format::Json => println!(
                        "{}",
                        serde_json::json!({"gate": name, "passed": false, "skipped": true})
                    ),
                }
            }
            Outcome::Ran(result) => {
                if output::emit(&name, result, format)? == 0 {
                    passed += 1;
                } else {
                    failed += 1;
                    failures.push(name);
                }
            }
        }
    }

    match format {
        Format::Text => {
            println!(
                "gates: passed={} failed={} skipped={}",
                passed, failed, skipped
            );
            if !failures.is_empty() {
                println!(
                    "gates: failures {}: {}",
                    failures.len(),
                    output::failure_summary(&failures, 3)
                );
            }
        }
        Format::Json => println!(
            "{}",
            serde_json::json!({
                "summary": {"passed": passed, "failed": failed, "skipped": skipped}
            })
        ),
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

fn list_gates(config: &GatesConfig) {
    colored::control::set_override(io::stdout().is_terminal());
    for gate in gates::pipeline(config) {
        println!(
            "{:<18} {}",
            gate.name().bold(),
            gate.description(config).dimmed()
        );
    }
}
