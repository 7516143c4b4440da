//! Control evidence gates.
//!
//! One gate per configured family. Documents are checked in configured
//! order and the gate stops at the first problem found, so a failing run
//! reports exactly one line.

use crate::core::config::EvidenceConfig;
use crate::core::document::DocumentSource;
use crate::core::error::GateError;
use crate::core::report::Report;
use crate::core::requirement::{Requirement, Violation};

pub fn gate_name(family: &str) -> String {
    format!("evidence.{}", family)
}

pub fn passed_line(family: &str) -> String {
    format!("{} controls evidence check passed", family)
}

/// Requirements for one document, in evaluation order.
pub fn document_requirements(
    config: &EvidenceConfig,
    path: &str,
    snippets: &[String],
) -> Vec<Requirement> {
    let mut out = Vec::new();
    if let Some(marker) = &config.forbidden_marker {
        out.push(Requirement::SnippetAbsence {
            path: path.to_string(),
            marker: marker.text.clone(),
            label: marker.label.clone(),
        });
    }
    out.push(Requirement::SnippetPresence {
        path: path.to_string(),
        snippets: snippets.to_vec(),
    });
    out
}

fn render(violation: &Violation) -> String {
    match violation {
        Violation::MissingArtifact { path } => {
            format!("missing required control artifact: {}", path)
        }
        other => other.to_string(),
    }
}

pub fn run(source: &dyn DocumentSource, config: &EvidenceConfig) -> Result<Report, GateError> {
    let mut report = Report::new(gate_name(&config.family), passed_line(&config.family));

    for entry in &config.documents {
        let Some(doc) = source.load(&entry.path)? else {
            let violation = Violation::MissingArtifact {
                path: entry.path.clone(),
            };
            let line = render(&violation);
            return Ok(report.failed_with(violation, line));
        };
        report.record(&doc);

        for requirement in document_requirements(config, &entry.path, &entry.snippets) {
            if let Some(violation) = requirement.evaluate_document(&doc)?.into_iter().next() {
                let line = render(&violation);
                return Ok(report.failed_with(violation, line));
            }
        }
    }
    tracing::info!(gate = %report.gate(), "gate evaluated");
    Ok(report)
}
