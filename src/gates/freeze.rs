//! Contract freeze gate.
//!
//! Every path of the frozen release baseline must exist. All missing paths
//! are reported together; this gate runs first in the pipeline and the
//! others assume its artifacts are present.

use crate::core::config::FreezeConfig;
use crate::core::document::DocumentSource;
use crate::core::error::GateError;
use crate::core::report::Report;
use crate::core::requirement::{Requirement, Violation};

pub const GATE: &str = "freeze";
pub const HEADER: &str = "contract freeze check failed; missing files:";
pub const PASSED: &str = "contract freeze check passed";

pub fn requirements(config: &FreezeConfig) -> Vec<Requirement> {
    config
        .required_paths
        .iter()
        .map(|path| Requirement::Existence { path: path.clone() })
        .collect()
}

pub fn run(source: &dyn DocumentSource, config: &FreezeConfig) -> Result<Report, GateError> {
    let mut report = Report::new(GATE, PASSED).with_header(HEADER);
    for requirement in requirements(config) {
        for violation in requirement.evaluate(source)? {
            let line = match &violation {
                Violation::MissingArtifact { path } => path.clone(),
                other => other.to_string(),
            };
            report.fail(violation, line);
        }
    }
    tracing::info!(gate = GATE, passed = report.passed(), "gate evaluated");
    Ok(report)
}
