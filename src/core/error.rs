use std::io;
use thiserror::Error;

/// Fatal conditions that stop a gate before it can produce a report.
///
/// Findings (missing files, missing snippets, ...) are not errors; they are
/// [`Violation`](crate::core::requirement::Violation)s carried by a
/// [`Report`](crate::core::report::Report).
#[derive(Error, Debug)]
pub enum GateError {
    #[error("malformed {path}: {reason}")]
    MalformedDocument { path: String, reason: String },
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Unknown gate: {0}")]
    UnknownGate(String),
}

impl GateError {
    pub fn malformed(path: &str, reason: impl Into<String>) -> Self {
        GateError::MalformedDocument {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable snake_case tag used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            GateError::MalformedDocument { .. } => "malformed_document",
            GateError::Io { .. } => "io",
            GateError::Config(_) => "config",
            GateError::UnknownGate(_) => "unknown_gate",
        }
    }
}
