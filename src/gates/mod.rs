//! Gate registry.
//!
//! Adding a gate: give it a module with a `run(source, config)` entry point
//! and a variant here. Pipeline order matters: freeze runs first because
//! every other gate re-opens artifacts it guarantees.

pub mod approvals;
pub mod evidence;
pub mod freeze;
pub mod schema;

use crate::core::config::GatesConfig;
use crate::core::document::DocumentSource;
use crate::core::error::GateError;
use crate::core::report::Report;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Freeze,
    Approvals,
    Schema,
    Evidence(String),
}

impl Gate {
    pub fn name(&self) -> String {
        match self {
            Gate::Freeze => freeze::GATE.to_string(),
            Gate::Approvals => approvals::GATE.to_string(),
            Gate::Schema => schema::GATE.to_string(),
            Gate::Evidence(family) => evidence::gate_name(family),
        }
    }

    pub fn description<'a>(&self, config: &'a GatesConfig) -> &'a str {
        match self {
            Gate::Freeze => &config.freeze.description,
            Gate::Approvals => &config.approvals.description,
            Gate::Schema => &config.schema.description,
            Gate::Evidence(family) => config
                .evidence_family(family)
                .map(|e| e.description.as_str())
                .unwrap_or_default(),
        }
    }

    pub fn run(
        &self,
        source: &dyn DocumentSource,
        config: &GatesConfig,
    ) -> Result<Report, GateError> {
        tracing::info!(gate = %self.name(), "running gate");
        match self {
            Gate::Freeze => freeze::run(source, &config.freeze),
            Gate::Approvals => approvals::run(source, &config.approvals),
            Gate::Schema => schema::run(source, &config.schema),
            Gate::Evidence(family) => evidence::run(source, config.evidence_family(family)?),
        }
    }
}

/// Every configured gate in pipeline order.
pub fn pipeline(config: &GatesConfig) -> Vec<Gate> {
    let mut gates = vec![Gate::Freeze, Gate::Approvals, Gate::Schema];
    gates.extend(
        config
            .evidence
            .iter()
            .map(|e| Gate::Evidence(e.family.clone())),
    );
    gates
}

#[derive(Debug)]
pub enum Outcome {
    Ran(Result<Report, GateError>),
    /// Not run because the freeze prerequisite failed.
    Skipped,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Ran(Ok(report)) if report.passed())
    }
}

/// Run the whole pipeline. A failing freeze gate skips everything after it;
/// otherwise each gate runs regardless of the others.
pub fn run_pipeline(source: &dyn DocumentSource, config: &GatesConfig) -> Vec<(Gate, Outcome)> {
    let mut results = Vec::new();
    let mut prerequisite_failed = false;
    for gate in pipeline(config) {
        if prerequisite_failed {
            tracing::info!(gate = %gate.name(), "skipped: freeze prerequisite failed");
            results.push((gate, Outcome::Skipped));
            continue;
        }
        let outcome = Outcome::Ran(gate.run(source, config));
        if gate == Gate::Freeze && !outcome.passed() {
            prerequisite_failed = true;
        }
        results.push((gate, outcome));
    }
    results
}
