//! CLI command implementations.

pub mod check;
pub mod render;

pub use check::check_pages;
pub use render::render_page;

use anyhow::{Context, Result};
use litcite_core::{CitationProcessor, Config};
use std::path::Path;

const DEFAULT_CONFIG: &str = "litcite.yml";

/// Load configuration and build a processor, applying a notes override.
///
/// An explicit config path must exist; the default `litcite.yml` is optional.
pub(crate) fn load_processor(
    config_path: Option<&Path>,
    notes: Option<&Path>,
) -> Result<CitationProcessor> {
    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("Loading config from {:?}", path);
            Config::from_file(path).context("Failed to load configuration")?
        }
        None if Path::new(DEFAULT_CONFIG).exists() => {
            tracing::debug!("Loading config from {}", DEFAULT_CONFIG);
            Config::from_file(DEFAULT_CONFIG).context("Failed to load configuration")?
        }
        None => Config::default(),
    };

    if let Some(dir) = notes {
        let dir = std::env::current_dir()
            .context("Failed to determine working directory")?
            .join(dir);
        config.set_notes_dir(dir);
    }

    let settings = config.citation_settings();
    if !settings.notes_root.is_dir() {
        tracing::warn!(
            "Literature notes directory {:?} does not exist",
            settings.notes_root
        );
    }

    CitationProcessor::new(settings).context("Failed to build citation processor")
}
