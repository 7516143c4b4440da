//! Output rendering shared by the gate binaries and the unified CLI.

use crate::core::error::GateError;
use crate::core::report::Report;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// `a, b, c (+2 more)`: the first `shown` names of a failure list.
pub fn failure_summary(names: &[String], shown: usize) -> String {
    let head = names
        .iter()
        .take(shown)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    match names.len().saturating_sub(shown) {
        0 => head,
        hidden => format!("{} (+{} more)", head, hidden),
    }
}

/// JSON object for a gate that stopped on a fatal error.
pub fn error_json(gate: &str, err: &GateError) -> serde_json::Value {
    serde_json::json!({
        "gate": gate,
        "passed": false,
        "error": {
            "kind": err.kind(),
            "message": err.to_string(),
        },
    })
}

/// Print a gate outcome in the requested format and return its exit code.
pub fn emit(gate: &str, outcome: &Result<Report, GateError>, format: Format) -> io::Result<i32> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    emit_to(gate, outcome, format, &mut out, &mut err)
}

pub fn emit_to(
    gate: &str,
    outcome: &Result<Report, GateError>,
    format: Format,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<i32> {
    match (outcome, format) {
        (Ok(report), Format::Text) => {
            report.write_text(out, err)?;
            Ok(report.exit_code())
        }
        (Ok(report), Format::Json) => {
            writeln!(out, "{}", report.to_json())?;
            Ok(report.exit_code())
        }
        (Err(e), Format::Text) => {
            writeln!(err, "{}", e)?;
            Ok(1)
        }
        (Err(e), Format::Json) => {
            writeln!(out, "{}", error_json(gate, e))?;
            Ok(1)
        }
    }
}
