//! # litcite-core
//!
//! Citation engine for markdown pages backed by literature notes.
//!
//! A page cites a note with `[[@key]]` or `[[@key|display text]]`. Each
//! resolved key gets a footnote number in order of first appearance, every
//! occurrence becomes an anchored superscript link, and a back-linked
//! reference list is appended to the page.

pub mod citations;
pub mod config;
pub mod format;
pub mod frontmatter;
pub mod models;
pub mod resolver;
pub mod tracker;

pub use citations::{
    process_citations, CitationProcessor, CitationSettings, ProcessedPage, ProcessorError,
};
pub use config::{Config, ConfigError};
pub use frontmatter::{parse_metadata, FieldValue, NoteMetadata};
pub use models::{Diagnostic, DiagnosticSeverity};
pub use resolver::{NoteResolver, ResolveError};
pub use tracker::{CitationRecord, CitationTracker, Occurrence};
