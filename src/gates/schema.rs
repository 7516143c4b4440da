//! Canonical event schema gate.
//!
//! Field coverage is checked before the event-type enum and the gate stops
//! at the first violated rule, so a schema broken both ways only reports
//! its missing fields.

use crate::core::config::SchemaConfig;
use crate::core::document::DocumentSource;
use crate::core::error::GateError;
use crate::core::report::Report;
use crate::core::requirement::{Requirement, Violation};

pub const GATE: &str = "schema";
pub const PASSED: &str = "canonical schema check passed";

/// In evaluation order.
pub fn requirements(config: &SchemaConfig) -> Vec<Requirement> {
    vec![
        Requirement::FieldCoverage {
            path: config.path.clone(),
            expected: config.required_fields.clone(),
        },
        Requirement::EnumEquality {
            path: config.path.clone(),
            pointer: config.enum_pointer.clone(),
            field: config.enum_field.clone(),
            expected: config.event_types.clone(),
        },
    ]
}

pub fn run(source: &dyn DocumentSource, config: &SchemaConfig) -> Result<Report, GateError> {
    let Some(doc) = source.load(&config.path)? else {
        let violation = Violation::MissingArtifact {
            path: config.path.clone(),
        };
        let line = config.missing_message.clone();
        return Ok(Report::new(GATE, PASSED).failed_with(violation, line));
    };
    let mut report = Report::new(GATE, PASSED);
    report.record(&doc);

    for requirement in requirements(config) {
        if let Some(violation) = requirement.evaluate_document(&doc)?.into_iter().next() {
            let line = violation.to_string();
            report.fail(violation, line);
            break;
        }
    }
    tracing::info!(gate = GATE, passed = report.passed(), "gate evaluated");
    Ok(report)
}
