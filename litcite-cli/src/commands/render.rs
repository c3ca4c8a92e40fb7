//! Render command implementation.

use super::load_processor;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Rewrite citations in one page, writing to `output` or stdout.
pub fn render_page(
    config_path: Option<&Path>,
    page: &Path,
    notes: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let processor = load_processor(config_path, notes)?;

    let markdown =
        fs::read_to_string(page).with_context(|| format!("Failed to read page {:?}", page))?;
    let processed = processor.process(&markdown);

    match output {
        Some(path) => {
            fs::write(path, &processed.markdown)
                .with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("✓ Output written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(processed.markdown.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
