//! Metadata parsing for literature notes.
//!
//! Notes carry a flat header delimited by `---` lines:
//!
//! ```text
//! ---
//! category: literaturenote
//! author: ["Smith, John", "Doe, Jane"]
//! title: "A Study"
//! year: 2020
//! ---
//! ```
//!
//! Only `key: value` lines are understood. Inline list literals of the
//! [`LIST_FIELDS`] and YAML block lists are collected into
//! [`FieldValue::List`]; everything else stays a scalar. Nothing nests.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

const DELIMITER: &str = "---";

/// Fields whose inline `[...]` values are read as lists of quoted names.
/// Every other field keeps its value as written.
pub const LIST_FIELDS: [&str; 1] = ["author"];

static QUOTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)""#).expect("valid quoted string regex"));

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

/// Parsed metadata block of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMetadata {
    fields: HashMap<String, FieldValue>,
}

impl NoteMetadata {
    /// Scalar value of a field. List-valued fields have no scalar form.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.fields.get(key)? {
            FieldValue::Scalar(value) => Some(value.as_str()),
            FieldValue::List(_) => None,
        }
    }

    /// Scalar value of a field, or `None` when absent or blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    /// Items of a list field.
    ///
    /// A non-empty scalar is read as a one-item list.
    pub fn list(&self, key: &str) -> Vec<&str> {
        match self.fields.get(key) {
            Some(FieldValue::List(items)) => items.iter().map(String::as_str).collect(),
            Some(FieldValue::Scalar(value)) if !value.trim().is_empty() => vec![value.as_str()],
            _ => Vec::new(),
        }
    }

    /// True when the field exists and carries a non-blank value.
    pub fn has(&self, key: &str) -> bool {
        match self.fields.get(key) {
            Some(FieldValue::Scalar(value)) => !value.trim().is_empty(),
            Some(FieldValue::List(items)) => !items.is_empty(),
            None => false,
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Parse the leading metadata block of a note.
///
/// Returns empty metadata when the text does not start with `---` or the
/// block is never closed.
///
/// # Example
///
/// ```
/// use litcite_core::frontmatter::parse_metadata;
///
/// let note = "---\ntitle: \"A Study\"\nauthor: [\"Smith, John\"]\n---\nBody\n";
/// let meta = parse_metadata(note);
/// assert_eq!(meta.get("title"), Some("A Study"));
/// assert_eq!(meta.list("author"), vec!["Smith, John"]);
/// ```
pub fn parse_metadata(content: &str) -> NoteMetadata {
    if !content.starts_with(DELIMITER) {
        return NoteMetadata::default();
    }

    let mut lines = content.lines();
    lines.next();

    let mut block = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.trim_end() == DELIMITER {
            closed = true;
            break;
        }
        block.push(line);
    }

    if !closed {
        return NoteMetadata::default();
    }

    let mut metadata = NoteMetadata::default();
    // Key whose value was left empty, so following `- item` lines belong to it
    let mut open_list: Option<String> = None;

    for line in block {
        let trimmed = line.trim();

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix('-')) {
            if let Some(key) = &open_list {
                let item = strip_quotes(item.trim()).to_string();
                match metadata.fields.get_mut(key) {
                    Some(FieldValue::List(items)) => items.push(item),
                    _ => {
                        metadata
                            .fields
                            .insert(key.clone(), FieldValue::List(vec![item]));
                    }
                }
                continue;
            }
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = strip_quotes(key.trim()).to_string();
        let value = value.trim();

        if value.is_empty() {
            open_list = Some(key.clone());
        } else {
            open_list = None;
        }

        let value = parse_value(&key, value);
        metadata.fields.insert(key, value);
    }

    metadata
}

fn parse_value(key: &str, raw: &str) -> FieldValue {
    let value = strip_quotes(raw);

    if LIST_FIELDS.contains(&key) && value.starts_with('[') && value.ends_with(']') {
        let items = QUOTED_RE
            .captures_iter(value)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect();
        return FieldValue::List(items);
    }

    FieldValue::Scalar(value.to_string())
}

/// Remove one matching pair of surrounding quote characters.
fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}
