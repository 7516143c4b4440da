//! Impact approval gate.
//!
//! Reads the governance decision ledger and checks, per decision, that a
//! financial impact carries finance approval and a control impact carries
//! controls approval. Every violation across the ledger is reported.

use crate::core::config::ApprovalsConfig;
use crate::core::document::DocumentSource;
use crate::core::error::GateError;
use crate::core::report::Report;
use crate::core::requirement::{self, Approval, Violation};
use serde_json::Value;

pub const GATE: &str = "approvals";
pub const HEADER: &str = "impact approval check failed:";
pub const PASSED: &str = "impact approval check passed";
pub const UNKNOWN_ID: &str = "unknown";

/// One ledger record. Flags are read with JSON truthiness, so a missing
/// flag is `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub id: String,
    pub financial_impact: bool,
    pub control_impact: bool,
    pub finance_approved: bool,
    pub controls_approved: bool,
}

impl Decision {
    pub fn from_value(value: &Value) -> Option<Self> {
        let record = value.as_object()?;
        let id = match record.get("id") {
            None | Some(Value::Null) => UNKNOWN_ID.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(true)) => "True".to_string(),
            Some(Value::Bool(false)) => "False".to_string(),
            Some(other) => other.to_string(),
        };
        let flag = |key: &str| truthy(record.get(key));
        Some(Self {
            id,
            financial_impact: flag("financial_impact"),
            control_impact: flag("control_impact"),
            finance_approved: flag("finance_approved"),
            controls_approved: flag("controls_approved"),
        })
    }

    /// Finance first, then controls.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        if self.financial_impact && !self.finance_approved {
            out.push(Violation::ApprovalMissing {
                decision: self.id.clone(),
                approval: Approval::Finance,
            });
        }
        if self.control_impact && !self.controls_approved {
            out.push(Violation::ApprovalMissing {
                decision: self.id.clone(),
                approval: Approval::Controls,
            });
        }
        out
    }
}

pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Decisions in ledger order. An absent `decisions` key is an empty ledger.
pub fn decisions(path: &str, ledger: &Value) -> Result<Vec<Decision>, GateError> {
    let Some(list) = ledger.get("decisions") else {
        return Ok(Vec::new());
    };
    let items = list
        .as_array()
        .ok_or_else(|| GateError::malformed(path, "'decisions' must be a list"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Decision::from_value(item).ok_or_else(|| {
                GateError::malformed(path, format!("decision #{} is not an object", i))
            })
        })
        .collect()
}

pub fn run(source: &dyn DocumentSource, config: &ApprovalsConfig) -> Result<Report, GateError> {
    let Some(doc) = source.load(&config.ledger)? else {
        // Reported bare: a missing ledger has its own exit line, not a list entry.
        let violation = Violation::MissingArtifact {
            path: config.ledger.clone(),
        };
        let line = violation.to_string();
        return Ok(Report::new(GATE, PASSED).failed_with(violation, line));
    };
    let mut report = Report::new(GATE, PASSED).with_header(HEADER);
    report.record(&doc);

    let ledger = requirement::parse_object(&doc)?;
    let decisions = decisions(&doc.path, &ledger)?;
    tracing::debug!(count = decisions.len(), "ledger decisions");
    for decision in &decisions {
        for violation in decision.violations() {
            let line = violation.to_string();
            report.fail(violation, line);
        }
    }
    tracing::info!(gate = GATE, passed = report.passed(), "gate evaluated");
    Ok(report)
}
