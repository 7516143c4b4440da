//! Documents and the sources they are read from.
//!
//! Gates never touch the filesystem directly. They ask a [`DocumentSource`]
//! for artifacts by repository-relative path, which keeps every check
//! testable against an in-memory corpus.

use crate::core::error::GateError;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// JSON; parsed into a loosely-typed value.
    Structured,
    /// Markdown or anything else; scanned as an opaque string.
    FreeText,
}

impl DocumentKind {
    pub fn for_path(path: &str) -> Self {
        if path.ends_with(".json") {
            DocumentKind::Structured
        } else {
            DocumentKind::FreeText
        }
    }
}

/// An immutable artifact addressed by a relative path.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: String,
    pub kind: DocumentKind,
    pub content: String,
}

impl Document {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let kind = DocumentKind::for_path(&path);
        Self {
            path,
            kind,
            content: content.into(),
        }
    }

    /// Parse the content as JSON. Unknown keys are kept but never inspected.
    pub fn parse_json(&self) -> Result<serde_json::Value, GateError> {
        serde_json::from_str(&self.content)
            .map_err(|e| GateError::malformed(&self.path, e.to_string()))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.content.contains(needle)
    }

    pub fn sha256(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.content.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Read-only access to the artifacts a gate inspects.
pub trait DocumentSource {
    /// True when `path` resolves to an existing entry (file or directory).
    fn exists(&self, path: &str) -> bool;

    /// Load `path`. `Ok(None)` means the artifact is absent.
    fn load(&self, path: &str) -> Result<Option<Document>, GateError>;
}

/// Documents resolved against a directory on disk, normally the repository root.
#[derive(Debug, Clone)]
pub struct WorkspaceSource {
    root: PathBuf,
}

impl WorkspaceSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl DocumentSource for WorkspaceSource {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn load(&self, path: &str) -> Result<Option<Document>, GateError> {
        let full = self.resolve(path);
        match fs::read_to_string(&full) {
            Ok(content) => {
                tracing::debug!(path = %path, bytes = content.len(), "loaded document");
                Ok(Some(Document::new(path, content)))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GateError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}

/// In-memory corpus keyed by relative path.
///
/// Directory existence is derived from the stored paths, so `exists("controls")`
/// holds once any `controls/...` document is inserted.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    docs: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, content: &str) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: &str, content: &str) {
        self.docs.insert(path.to_string(), content.to_string());
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.docs.remove(path)
    }
}

impl DocumentSource for MemorySource {
    fn exists(&self, path: &str) -> bool {
        if self.docs.contains_key(path) {
            return true;
        }
        let prefix = format!("{}/", path.trim_end_matches('/'));
        self.docs.keys().any(|k| k.starts_with(&prefix))
    }

    fn load(&self, path: &str) -> Result<Option<Document>, GateError> {
        Ok(self.docs.get(path).map(|c| Document::new(path, c.as_str())))
    }
}
