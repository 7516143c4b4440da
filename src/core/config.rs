//! Gate configuration.
//!
//! Every manifest and expected set lives here as data rather than in the
//! gate code. The embedded `assets/gates.toml` is the default; the unified
//! CLI can swap in another file with `--config`.

use crate::core::assets;
use crate::core::error::GateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatesConfig {
    pub freeze: FreezeConfig,
    pub approvals: ApprovalsConfig,
    pub schema: SchemaConfig,
    #[serde(default)]
    pub evidence: Vec<EvidenceConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FreezeConfig {
    #[serde(default)]
    pub description: String,
    pub required_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApprovalsConfig {
    #[serde(default)]
    pub description: String,
    pub ledger: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default)]
    pub description: String,
    pub path: String,
    #[serde(default = "default_schema_missing_message")]
    pub missing_message: String,
    pub required_fields: BTreeSet<String>,
    #[serde(default = "default_enum_field")]
    pub enum_field: String,
    #[serde(default = "default_enum_pointer")]
    pub enum_pointer: String,
    pub event_types: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceConfig {
    pub family: String,
    #[serde(default)]
    pub description: String,
    /// Only the more mature gates declare one.
    #[serde(default)]
    pub forbidden_marker: Option<ForbiddenMarker>,
    pub documents: Vec<EvidenceDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForbiddenMarker {
    pub text: String,
    #[serde(default = "default_marker_label")]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceDocument {
    pub path: String,
    pub snippets: Vec<String>,
}

fn default_schema_missing_message() -> String {
    "canonical schema missing".to_string()
}

fn default_enum_field() -> String {
    "event_type".to_string()
}

fn default_enum_pointer() -> String {
    "/properties/event_type/enum".to_string()
}

fn default_marker_label() -> String {
    "explicit FAIL status".to_string()
}

impl GatesConfig {
    /// The configuration compiled into the binary.
    pub fn embedded() -> Result<Self, GateError> {
        let content = assets::get_asset(assets::DEFAULT_GATES).ok_or_else(|| {
            GateError::Config(format!("embedded {} not found", assets::DEFAULT_GATES))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn load(path: &Path) -> Result<Self, GateError> {
        let content = fs::read_to_string(path).map_err(|source| GateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, GateError> {
        let config: GatesConfig =
            toml::from_str(content).map_err(|e| GateError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GateError> {
        if self.freeze.required_paths.is_empty() {
            return Err(GateError::Config(
                "freeze.required_paths must not be empty".into(),
            ));
        }
        if self.approvals.ledger.trim().is_empty() {
            return Err(GateError::Config("approvals.ledger must be set".into()));
        }
        if self.schema.required_fields.is_empty() {
            return Err(GateError::Config(
                "schema.required_fields must not be empty".into(),
            ));
        }
        if self.schema.event_types.is_empty() {
            return Err(GateError::Config(
                "schema.event_types must not be empty".into(),
            ));
        }
        if !self.schema.enum_pointer.starts_with('/') {
            return Err(GateError::Config(format!(
                "schema.enum_pointer must be a JSON pointer, got '{}'",
                self.schema.enum_pointer
            )));
        }

        let mut seen = BTreeSet::new();
        for family in &self.evidence {
            if !seen.insert(family.family.as_str()) {
                return Err(GateError::Config(format!(
                    "duplicate evidence family '{}'",
                    family.family
                )));
            }
            if family.documents.is_empty() {
                return Err(GateError::Config(format!(
                    "evidence family '{}' has no documents",
                    family.family
                )));
            }
            if let Some(doc) = family.documents.iter().find(|d| d.snippets.is_empty()) {
                return Err(GateError::Config(format!(
                    "evidence family '{}': {} has no snippets",
                    family.family, doc.path
                )));
            }
        }
        Ok(())
    }

    pub fn evidence_family(&self, family: &str) -> Result<&EvidenceConfig, GateError> {
        self.evidence
            .iter()
            .find(|e| e.family == family)
            .ok_or_else(|| GateError::UnknownGate(format!("evidence {}", family)))
    }
}
