//! Inline citation rewriting and reference list rendering.
//!
//! Converts:
//!
//! - `[[@key]]` → `<sup id="cite-ref-1-1"><a href="#cite-1">[1]</a></sup>`
//! - `[[@key|text]]` → `text<sup id="cite-ref-1-1"><a href="#cite-1">[1]</a></sup>`
//!
//! and appends a References section with back-links to every occurrence.

use crate::config::{DEFAULT_CATEGORY, DEFAULT_HEADING, DEFAULT_LINK_PREFIX};
use crate::format::format_citation;
use crate::models::Diagnostic;
use crate::resolver::NoteResolver;
use crate::tracker::{anchor_id, CitationRecord, CitationTracker, Occurrence};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Invalid citation link prefix {prefix:?}: {source}")]
    InvalidPrefix {
        prefix: String,
        #[source]
        source: regex::Error,
    },
}

/// Settings for one [`CitationProcessor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationSettings {
    /// Directory holding `@key.md` notes
    pub notes_root: PathBuf,
    /// Required value of a note's `category` field
    pub category: String,
    /// Path segment an upstream link rewrite may insert after `[[`
    pub link_prefix: String,
    /// Heading of the appended reference section
    pub heading: String,
}

impl CitationSettings {
    pub fn new(notes_root: impl Into<PathBuf>) -> Self {
        Self {
            notes_root: notes_root.into(),
            category: DEFAULT_CATEGORY.to_string(),
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            heading: DEFAULT_HEADING.to_string(),
        }
    }
}

/// Result of processing one page.
#[derive(Debug, Clone)]
pub struct ProcessedPage {
    pub markdown: String,
    /// Resolved citations in numbering order
    pub references: Vec<CitationRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Rewrites citation tokens on pages.
///
/// The processor itself holds no per-page state and can be reused; every
/// call to [`CitationProcessor::process`] numbers citations from scratch.
#[derive(Debug, Clone)]
pub struct CitationProcessor {
    settings: CitationSettings,
    pattern: Regex,
}

impl CitationProcessor {
    pub fn new(settings: CitationSettings) -> Result<Self, ProcessorError> {
        let pattern =
            token_pattern(&settings.link_prefix).map_err(|source| ProcessorError::InvalidPrefix {
                prefix: settings.link_prefix.clone(),
                source,
            })?;
        Ok(Self { settings, pattern })
    }

    /// Process one page.
    ///
    /// Lookup failures never abort processing: the offending token is left
    /// as written and a diagnostic is recorded.
    pub fn process(&self, markdown: &str) -> ProcessedPage {
        let mut page = PageContext::new(&self.settings.notes_root, &self.settings.category);

        // Pass one: resolve every token in document order and fix numbering
        let matches: Vec<TokenMatch<'_>> = self
            .pattern
            .captures_iter(markdown)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let key = caps.get(1)?.as_str();
                Some(TokenMatch {
                    span: full.range(),
                    display: caps.get(2).map(|m| m.as_str()),
                    occurrence: page.cite(key),
                })
            })
            .collect();

        // Pass two: substitute using the final numbering
        let mut output = String::with_capacity(markdown.len());
        let mut last_end = 0;
        for token in &matches {
            output.push_str(&markdown[last_end..token.span.start]);
            match token.occurrence {
                Some(occurrence) => output.push_str(&render_inline(token.display, occurrence)),
                None => output.push_str(&markdown[token.span.clone()]),
            }
            last_end = token.span.end;
        }
        output.push_str(&markdown[last_end..]);

        let (references, diagnostics) = page.finish();

        if let Some(section) = render_references(&self.settings.heading, &references) {
            output.push_str(&section);
            info!("Processed {} citation(s)", references.len());
        } else {
            debug!("No citations resolved on page");
        }

        ProcessedPage {
            markdown: output,
            references,
            diagnostics,
        }
    }
}

/// Process citations on a page with default settings.
///
/// # Example
///
/// ```no_run
/// use litcite_core::process_citations;
/// use std::path::Path;
///
/// let markdown = process_citations("As shown in [[@smith2020]].", Path::new("Literature Notes"));
/// println!("{markdown}");
/// ```
pub fn process_citations(markdown: &str, notes_root: &Path) -> String {
    let processor = CitationProcessor {
        settings: CitationSettings::new(notes_root),
        pattern: DEFAULT_TOKEN_RE.clone(),
    };
    processor.process(markdown).markdown
}

/// Per-page state: resolver cache plus numbering.
struct PageContext<'a> {
    resolver: NoteResolver<'a>,
    tracker: CitationTracker,
}

impl<'a> PageContext<'a> {
    fn new(notes_root: &'a Path, category: &'a str) -> Self {
        Self {
            resolver: NoteResolver::new(notes_root, category),
            tracker: CitationTracker::new(),
        }
    }

    fn cite(&mut self, key: &str) -> Option<Occurrence> {
        let metadata = self.resolver.resolve(key)?;
        Some(self.tracker.record(key, || format_citation(metadata)))
    }

    fn finish(mut self) -> (Vec<CitationRecord>, Vec<Diagnostic>) {
        let diagnostics = self.resolver.take_diagnostics();
        (self.tracker.into_records(), diagnostics)
    }
}

struct TokenMatch<'a> {
    span: Range<usize>,
    display: Option<&'a str>,
    occurrence: Option<Occurrence>,
}

fn render_inline(display: Option<&str>, occurrence: Occurrence) -> String {
    format!(
        r##"{display}<sup id="{anchor}"><a href="#{target}">[{number}]</a></sup>"##,
        display = display.unwrap_or_default(),
        anchor = occurrence.anchor_id(),
        target = occurrence.target_id(),
        number = occurrence.number,
    )
}

/// Render the reference section appended to a page.
///
/// Returns `None` when there is nothing to list.
pub fn render_references(heading: &str, references: &[CitationRecord]) -> Option<String> {
    if references.is_empty() {
        return None;
    }

    let mut section = format!("\n\n---\n\n## {heading}\n\n");
    for cite in references {
        let back_links = (1..=cite.occurrences)
            .map(|index| {
                let id = anchor_id(cite.number, index);
                if cite.occurrences > 1 {
                    format!(r##"<a href="#{id}">↩<sup>{index}</sup></a>"##)
                } else {
                    format!(r##"<a href="#{id}">↩</a>"##)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        section.push_str(&format!(
            r#"<span id="{}">[{}]</span> {} {}"#,
            cite.target_id(),
            cite.number,
            cite.text,
            back_links
        ));
        section.push_str("\n\n");
    }

    Some(section)
}

fn token_pattern(link_prefix: &str) -> Result<Regex, regex::Error> {
    let prefix = if link_prefix.is_empty() {
        String::new()
    } else {
        format!("(?:{})?", regex::escape(link_prefix))
    };
    Regex::new(&format!(r"\[\[{prefix}@([^\]|]+)(?:\|([^\]]+))?\]\]"))
}

static DEFAULT_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| token_pattern(DEFAULT_LINK_PREFIX).expect("valid citation regex"));
