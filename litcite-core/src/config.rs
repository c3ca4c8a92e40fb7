//! Configuration parsing and management.

use crate::citations::CitationSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CATEGORY: &str = "literaturenote";
pub const DEFAULT_LINK_PREFIX: &str = "Literature Notes/";
pub const DEFAULT_HEADING: &str = "References";
pub const DEFAULT_NOTES_DIR: &str = "Literature Notes";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the litcite.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `@key.md` literature notes
    #[serde(default)]
    pub notes_dir: Option<PathBuf>,

    /// Site docs directory; when `notes_dir` is unset the notes live in
    /// `Literature Notes/` two levels above it
    #[serde(default)]
    pub docs_dir: Option<PathBuf>,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default = "default_link_prefix")]
    pub link_prefix: String,

    #[serde(default = "default_heading")]
    pub heading: String,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_link_prefix() -> String {
    DEFAULT_LINK_PREFIX.to_string()
}

fn default_heading() -> String {
    DEFAULT_HEADING.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: None,
            docs_dir: None,
            category: default_category(),
            link_prefix: default_link_prefix(),
            heading: default_heading(),
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let mut config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&contents)?
        };

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Override the notes directory; relative paths resolve like `notes_dir`
    pub fn set_notes_dir(&mut self, dir: PathBuf) {
        self.notes_dir = Some(dir);
    }

    /// Directory that citation keys are resolved against
    pub fn notes_root(&self) -> PathBuf {
        if let Some(dir) = &self.notes_dir {
            return self.resolve_path(dir);
        }

        if let Some(docs) = &self.docs_dir {
            let docs = self.resolve_path(docs);
            let vault_root = docs.parent().and_then(Path::parent).unwrap_or(docs.as_path());
            return vault_root.join(DEFAULT_NOTES_DIR);
        }

        self.resolve_path(Path::new(DEFAULT_NOTES_DIR))
    }

    /// Settings for a citation processor built from this config
    pub fn citation_settings(&self) -> CitationSettings {
        CitationSettings {
            notes_root: self.notes_root(),
            category: self.category.clone(),
            link_prefix: self.link_prefix.clone(),
            heading: self.heading.clone(),
        }
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}
