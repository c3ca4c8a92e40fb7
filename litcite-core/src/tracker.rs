//! Footnote numbering and per-occurrence anchors.

use serde::Serialize;
use std::collections::HashMap;

/// Id of the reference-list entry for a citation number.
pub fn target_id(number: usize) -> String {
    format!("cite-{number}")
}

/// Id of one inline occurrence, shared by its back-link.
pub fn anchor_id(number: usize, index: usize) -> String {
    format!("cite-ref-{number}-{index}")
}

/// One resolved citation on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationRecord {
    pub key: String,
    /// 1-based footnote number
    pub number: usize,
    /// Formatted reference text
    pub text: String,
    /// Number of inline occurrences substituted on the page
    pub occurrences: usize,
}

impl CitationRecord {
    pub fn target_id(&self) -> String {
        target_id(self.number)
    }

    /// Anchor ids of every occurrence, in document order.
    pub fn anchor_ids(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.occurrences).map(move |index| anchor_id(self.number, index))
    }
}

/// A single inline occurrence of a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub number: usize,
    /// 1-based index among occurrences of the same key
    pub index: usize,
}

impl Occurrence {
    pub fn anchor_id(&self) -> String {
        anchor_id(self.number, self.index)
    }

    pub fn target_id(&self) -> String {
        target_id(self.number)
    }
}

/// Assigns numbers in first-appearance order and counts occurrences.
#[derive(Debug, Default)]
pub struct CitationTracker {
    records: Vec<CitationRecord>,
    index: HashMap<String, usize>,
}

impl CitationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one occurrence of `key`.
    ///
    /// `format` runs only on the first occurrence; its text is fixed from then on.
    pub fn record<F>(&mut self, key: &str, format: F) -> Occurrence
    where
        F: FnOnce() -> String,
    {
        if let Some(&slot) = self.index.get(key) {
            let record = &mut self.records[slot];
            record.occurrences += 1;
            return Occurrence {
                number: record.number,
                index: record.occurrences,
            };
        }

        let number = self.records.len() + 1;
        self.index.insert(key.to_string(), self.records.len());
        self.records.push(CitationRecord {
            key: key.to_string(),
            number,
            text: format(),
            occurrences: 1,
        });

        Occurrence { number, index: 1 }
    }

    pub fn get(&self, key: &str) -> Option<&CitationRecord> {
        self.index.get(key).map(|&slot| &self.records[slot])
    }

    /// Records in first-appearance order.
    pub fn records(&self) -> &[CitationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CitationRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
