//! Check citations across pages and emit diagnostics.

use super::load_processor;
use anyhow::{Context, Result};
use litcite_core::{Diagnostic, DiagnosticSeverity};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Serialize)]
struct CheckSummary<'a> {
    pages: usize,
    citations: usize,
    warnings: usize,
    errors: usize,
    diagnostics: &'a [Diagnostic],
}

/// Process pages without writing output and report citation problems.
pub fn check_pages(
    config_path: Option<&Path>,
    path: &Path,
    notes: Option<&Path>,
    json: bool,
) -> Result<()> {
    let processor = load_processor(config_path, notes)?;
    let pages = discover_pages(path)?;

    let mut citations = 0;
    let mut diagnostics = Vec::new();

    for page in &pages {
        let markdown =
            fs::read_to_string(page).with_context(|| format!("Failed to read page {:?}", page))?;
        let processed = processor.process(&markdown);

        tracing::debug!(
            "{:?}: {} citation(s), {} diagnostic(s)",
            page,
            processed.references.len(),
            processed.diagnostics.len()
        );

        citations += processed.references.len();
        let page_name = page.to_string_lossy().into_owned();
        diagnostics.extend(
            processed
                .diagnostics
                .into_iter()
                .map(|diag| diag.with_page(page_name.clone())),
        );
    }

    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Warning)
        .count();
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Error)
        .count();

    let summary = CheckSummary {
        pages: pages.len(),
        citations,
        warnings,
        errors,
        diagnostics: &diagnostics,
    };

    if json {
        let payload = serde_json::to_string_pretty(&summary)?;
        println!("{}", payload);
    } else {
        println!(
            "Check complete: {} pages, {} citations, {} errors, {} warnings",
            summary.pages, citations, errors, warnings
        );
        for diag in &diagnostics {
            let page = diag
                .page
                .as_deref()
                .map(|s| format!(" ({})", s))
                .unwrap_or_default();
            println!("- {:?} {}{}: {}", diag.severity, diag.code, page, diag.message);
        }
    }

    Ok(())
}

/// A single page, or every `.md` file below a directory in sorted order.
fn discover_pages(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("No such page or directory: {:?}", path);
    }

    let mut pages: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        .map(|e| e.into_path())
        .collect();
    pages.sort();

    tracing::info!("Found {} markdown files", pages.len());
    Ok(pages)
}
