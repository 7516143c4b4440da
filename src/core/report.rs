//! Per-invocation gate reports.

use crate::core::document::Document;
use crate::core::requirement::Violation;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    #[serde(flatten)]
    pub violation: Violation,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDigest {
    pub path: String,
    pub sha256: String,
}

/// Ordered failures plus the lines a gate prints for them.
///
/// A report with no entries is a pass. Text rendering puts the success line
/// on stdout and everything else on stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    gate: String,
    success_line: String,
    header: Option<String>,
    entries: Vec<ReportEntry>,
    documents: Vec<DocumentDigest>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RenderedText {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl Report {
    pub fn new(gate: impl Into<String>, success_line: impl Into<String>) -> Self {
        Self {
            gate: gate.into(),
            success_line: success_line.into(),
            header: None,
            entries: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Line printed above the detail lines when the report fails.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn gate(&self) -> &str {
        &self.gate
    }

    pub fn fail(&mut self, violation: Violation, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(gate = %self.gate, kind = violation.kind(), %message, "violation");
        self.entries.push(ReportEntry { violation, message });
    }

    pub fn failed_with(mut self, violation: Violation, message: impl Into<String>) -> Self {
        self.fail(violation, message);
        self
    }

    pub fn record(&mut self, doc: &Document) {
        self.documents.push(DocumentDigest {
            path: doc.path.clone(),
            sha256: doc.sha256(),
        });
    }

    pub fn passed(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.entries.iter().map(|e| &e.violation)
    }

    pub fn documents(&self) -> &[DocumentDigest] {
        &self.documents
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }

    pub fn render_text(&self) -> RenderedText {
        let mut out = RenderedText::default();
        if self.passed() {
            out.stdout.push(self.success_line.clone());
            return out;
        }
        match &self.header {
            Some(header) => {
                out.stderr.push(header.clone());
                out.stderr
                    .extend(self.entries.iter().map(|e| format!("- {}", e.message)));
            }
            None => out
                .stderr
                .extend(self.entries.iter().map(|e| e.message.clone())),
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "gate": self.gate,
            "passed": self.passed(),
            "failures": self.entries,
            "documents": self.documents,
        })
    }

    pub fn write_text(&self, stdout: &mut dyn Write, stderr: &mut dyn Write) -> io::Result<()> {
        let rendered = self.render_text();
        for line in &rendered.stdout {
            writeln!(stdout, "{}", line)?;
        }
        for line in &rendered.stderr {
            writeln!(stderr, "{}", line)?;
        }
        Ok(())
    }
}
