//! Citation key lookup against the literature notes directory.

use crate::frontmatter::{parse_metadata, NoteMetadata};
use crate::models::Diagnostic;
use std::collections::HashMap;
use std::fs;
use std::mem;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Fields a literature note is expected to carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["author", "title", "year"];

/// Why a citation key could not be resolved.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Literature note not found: @{key}")]
    NotFound { key: String, path: PathBuf },

    #[error("Not a literature note: @{key}")]
    InvalidCategory {
        key: String,
        path: PathBuf,
        found: Option<String>,
    },

    #[error("Failed to process citation @{key}: {source}")]
    ParseFailure {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::NotFound { .. } => "citation.not_found",
            ResolveError::InvalidCategory { .. } => "citation.invalid_category",
            ResolveError::ParseFailure { .. } => "citation.read_failed",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            ResolveError::NotFound { key, .. }
            | ResolveError::InvalidCategory { key, .. }
            | ResolveError::ParseFailure { key, .. } => key,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ResolveError::NotFound { path, .. }
            | ResolveError::InvalidCategory { path, .. }
            | ResolveError::ParseFailure { path, .. } => path,
        }
    }

    fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::warning(self.code(), self.to_string())
            .with_citekey(self.key())
            .with_source(self.path().to_string_lossy())
    }
}

/// Resolves citation keys to note metadata for a single page.
///
/// Every outcome, including failures, is cached by key so a note is read at
/// most once per page.
#[derive(Debug)]
pub struct NoteResolver<'a> {
    root: &'a Path,
    category: &'a str,
    cache: HashMap<String, Option<NoteMetadata>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> NoteResolver<'a> {
    pub fn new(root: &'a Path, category: &'a str) -> Self {
        Self {
            root,
            category,
            cache: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Path of the note backing `key`.
    pub fn note_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("@{key}.md"))
    }

    /// Resolve a key, returning `None` when the token must be left untouched.
    pub fn resolve(&mut self, key: &str) -> Option<&NoteMetadata> {
        if !self.cache.contains_key(key) {
            let outcome = match self.load(key) {
                Ok(metadata) => {
                    self.check_required(key, &metadata);
                    Some(metadata)
                }
                Err(err) => {
                    warn!("{}", err);
                    self.diagnostics.push(err.to_diagnostic());
                    None
                }
            };
            self.cache.insert(key.to_string(), outcome);
        }

        self.cache.get(key).and_then(Option::as_ref)
    }

    /// Read and validate the note for `key` without touching the cache.
    pub fn load(&self, key: &str) -> Result<NoteMetadata, ResolveError> {
        let path = self.note_path(key);

        if !path.exists() {
            return Err(ResolveError::NotFound {
                key: key.to_string(),
                path,
            });
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) => {
                return Err(ResolveError::ParseFailure {
                    key: key.to_string(),
                    path,
                    source,
                })
            }
        };

        let metadata = parse_metadata(&content);

        if metadata.get("category") != Some(self.category) {
            return Err(ResolveError::InvalidCategory {
                key: key.to_string(),
                found: metadata.get("category").map(str::to_string),
                path,
            });
        }

        Ok(metadata)
    }

    /// Take accumulated diagnostics (clearing the internal buffer).
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }

    fn check_required(&mut self, key: &str, metadata: &NoteMetadata) {
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !metadata.has(field))
            .collect();

        if missing.is_empty() {
            return;
        }

        let message = format!("Missing metadata in @{}: {}", key, missing.join(", "));
        warn!("{}", message);
        self.diagnostics.push(
            Diagnostic::warning("citation.missing_fields", message)
                .with_citekey(key)
                .with_source(self.note_path(key).to_string_lossy()),
        );
    }
}
