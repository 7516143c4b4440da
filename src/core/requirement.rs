//! Artifact requirement model.
//!
//! A [`Requirement`] declares what must hold for one document. Evaluating it
//! against a [`DocumentSource`] yields zero or more [`Violation`]s; only
//! [`Requirement::SnippetPresence`] can yield more than one, and it always
//! reports every missing snippet rather than stopping at the first.
//!
//! Whether a gate accumulates violations or aborts on the first one is the
//! gate's decision, not the model's.

use crate::core::document::{Document, DocumentKind, DocumentSource};
use crate::core::error::GateError;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Approval {
    Finance,
    Controls,
}

impl fmt::Display for Approval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Approval::Finance => write!(f, "finance"),
            Approval::Controls => write!(f, "controls"),
        }
    }
}

/// A single finding against a document.
///
/// The `Display` form is the stable diagnostic line that CI consumers grep
/// for. `MissingArtifact` is rendered by each gate with its own wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    MissingArtifact {
        path: String,
    },
    IncompleteFields {
        path: String,
        missing: Vec<String>,
    },
    EnumMismatch {
        path: String,
        field: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
    MissingSnippet {
        path: String,
        snippet: String,
    },
    ForbiddenMarkerPresent {
        path: String,
        marker: String,
        label: String,
    },
    ApprovalMissing {
        decision: String,
        approval: Approval,
    },
}

impl Violation {
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::MissingArtifact { .. } => "missing_artifact",
            Violation::IncompleteFields { .. } => "incomplete_fields",
            Violation::EnumMismatch { .. } => "enum_mismatch",
            Violation::MissingSnippet { .. } => "missing_snippet",
            Violation::ForbiddenMarkerPresent { .. } => "forbidden_marker_present",
            Violation::ApprovalMissing { .. } => "approval_missing",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingArtifact { path } => write!(f, "missing {}", path),
            Violation::IncompleteFields { missing, .. } => {
                write!(f, "schema required fields missing: {}", quoted_list(missing))
            }
            Violation::EnumMismatch {
                field,
                expected,
                actual,
                ..
            } => write!(
                f,
                "{} enum mismatch: expected {}, got {}",
                field,
                quoted_list(expected),
                quoted_list(actual)
            ),
            Violation::MissingSnippet { path, snippet } => {
                write!(f, "missing required snippet '{}' in {}", snippet, path)
            }
            Violation::ForbiddenMarkerPresent { path, label, .. } => {
                write!(f, "{} detected in {}", label, path)
            }
            Violation::ApprovalMissing { decision, approval } => {
                write!(f, "{}: {} approval missing", decision, approval)
            }
        }
    }
}

/// Renders `['a', 'b']`, the list form existing log scrapers match on.
fn quoted_list(items: &[String]) -> String {
    let inner = items
        .iter()
        .map(|s| quoted(s))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", inner)
}

/// Single quotes unless the item holds a `'` and no `"`.
fn quoted(item: &str) -> String {
    let quote = if item.contains('\'') && !item.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(item.len() + 2);
    out.push(quote);
    for c in item.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Existence {
        path: String,
    },
    FieldCoverage {
        path: String,
        expected: BTreeSet<String>,
    },
    EnumEquality {
        path: String,
        /// JSON pointer to the enumerated list, e.g. `/properties/event_type/enum`.
        pointer: String,
        /// Field name used in diagnostics.
        field: String,
        expected: BTreeSet<String>,
    },
    SnippetPresence {
        path: String,
        snippets: Vec<String>,
    },
    SnippetAbsence {
        path: String,
        marker: String,
        label: String,
    },
}

impl Requirement {
    pub fn path(&self) -> &str {
        match self {
            Requirement::Existence { path }
            | Requirement::FieldCoverage { path, .. }
            | Requirement::EnumEquality { path, .. }
            | Requirement::SnippetPresence { path, .. }
            | Requirement::SnippetAbsence { path, .. } => path,
        }
    }

    /// Evaluate against `source`. A content requirement whose document is
    /// absent yields `MissingArtifact`.
    pub fn evaluate(&self, source: &dyn DocumentSource) -> Result<Vec<Violation>, GateError> {
        if let Requirement::Existence { path } = self {
            tracing::debug!(path = %path, "evaluating existence");
            return Ok(check_existence(source, path).into_iter().collect());
        }
        match source.load(self.path())? {
            Some(doc) => self.evaluate_document(&doc),
            None => Ok(vec![Violation::MissingArtifact {
                path: self.path().to_string(),
            }]),
        }
    }

    /// Evaluate against a document the caller already loaded.
    pub fn evaluate_document(&self, doc: &Document) -> Result<Vec<Violation>, GateError> {
        tracing::debug!(path = %doc.path, requirement = ?self, "evaluating requirement");
        let found = match self {
            Requirement::Existence { .. } => None,
            Requirement::FieldCoverage { expected, .. } => {
                check_field_coverage(&doc.path, &parse_object(doc)?, expected)
            }
            Requirement::EnumEquality {
                pointer,
                field,
                expected,
                ..
            } => check_enum_equality(&doc.path, &parse_object(doc)?, pointer, field, expected),
            Requirement::SnippetPresence { snippets, .. } => {
                return Ok(check_snippets_present(doc, snippets));
            }
            Requirement::SnippetAbsence { marker, label, .. } => {
                check_marker_absent(doc, marker, label)
            }
        };
        Ok(found.into_iter().collect())
    }
}

/// Structured documents must be a JSON object at the top level.
pub fn parse_object(doc: &Document) -> Result<Value, GateError> {
    if doc.kind != DocumentKind::Structured {
        return Err(GateError::malformed(&doc.path, "expected a .json document"));
    }
    let value = doc.parse_json()?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(GateError::malformed(&doc.path, "expected a JSON object"))
    }
}

pub fn check_existence(source: &dyn DocumentSource, path: &str) -> Option<Violation> {
    if source.exists(path) {
        None
    } else {
        Some(Violation::MissingArtifact {
            path: path.to_string(),
        })
    }
}

/// String members of the array at `pointer`; anything else reads as empty.
pub fn string_set(value: &Value, pointer: &str) -> BTreeSet<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// `expected − declared(/required)`; extra declared fields are fine.
pub fn check_field_coverage(
    path: &str,
    value: &Value,
    expected: &BTreeSet<String>,
) -> Option<Violation> {
    let declared = string_set(value, "/required");
    let missing: Vec<String> = expected.difference(&declared).cloned().collect();
    if missing.is_empty() {
        None
    } else {
        Some(Violation::IncompleteFields {
            path: path.to_string(),
            missing,
        })
    }
}

/// Exact set equality; neither subset nor superset passes.
pub fn check_enum_equality(
    path: &str,
    value: &Value,
    pointer: &str,
    field: &str,
    expected: &BTreeSet<String>,
) -> Option<Violation> {
    let actual = string_set(value, pointer);
    if &actual == expected {
        None
    } else {
        Some(Violation::EnumMismatch {
            path: path.to_string(),
            field: field.to_string(),
            expected: expected.iter().cloned().collect(),
            actual: actual.into_iter().collect(),
        })
    }
}

/// Every missing snippet, in configured order.
pub fn check_snippets_present(doc: &Document, snippets: &[String]) -> Vec<Violation> {
    snippets
        .iter()
        .filter(|s| !doc.contains(s))
        .map(|s| Violation::MissingSnippet {
            path: doc.path.clone(),
            snippet: s.clone(),
        })
        .collect()
}

pub fn check_marker_absent(doc: &Document, marker: &str, label: &str) -> Option<Violation> {
    if doc.contains(marker) {
        Some(Violation::ForbiddenMarkerPresent {
            path: doc.path.clone(),
            marker: marker.to_string(),
            label: label.to_string(),
        })
    } else {
        None
    }
}
