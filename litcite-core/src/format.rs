//! Reference string formatting.
//!
//! One fixed style: `F. Last, G. Last, and H. Last, Title, Journal (Year), DOI: link.`

use crate::frontmatter::NoteMetadata;

const UNKNOWN_AUTHOR: &str = "Unknown Author";
const UNTITLED: &str = "Untitled";
const NO_DATE: &str = "n.d.";

/// Format one author name.
///
/// `"Last, First"` becomes `"F. Last"`; names without a comma are kept as-is.
/// Returns `None` for names that are empty after trimming.
pub fn format_author(name: &str) -> Option<String> {
    let name = name.trim().trim_matches(',').trim();
    if name.is_empty() {
        return None;
    }

    let Some((last, first)) = name.split_once(',') else {
        return Some(name.to_string());
    };

    let last = last.trim();
    match first.trim().chars().next() {
        Some(initial) => Some(format!("{initial}. {last}")),
        None => Some(last.to_string()),
    }
}

/// Join author names: `A`, `A and B`, or `A, B, and C`.
pub fn format_authors<S: AsRef<str>>(authors: &[S]) -> String {
    let names: Vec<String> = authors
        .iter()
        .filter_map(|name| format_author(name.as_ref()))
        .collect();

    match names.as_slice() {
        [] => UNKNOWN_AUTHOR.to_string(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// Render note metadata into a single reference string.
pub fn format_citation(metadata: &NoteMetadata) -> String {
    let authors = format_authors(&metadata.list("author"));
    let title = metadata.non_empty("title").unwrap_or(UNTITLED);
    let year = metadata.non_empty("year").unwrap_or(NO_DATE);

    let mut citation = format!("{authors}, {title}");

    if let Some(journal) = metadata.non_empty("journal") {
        citation.push_str(", ");
        citation.push_str(journal);
    }

    citation.push_str(&format!(" ({year})"));

    if let Some(doi) = metadata.non_empty("DOI") {
        citation.push_str(&format!(", DOI: [{doi}](https://doi.org/{doi})"));
    }

    citation.push('.');
    citation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse_metadata;

    #[test]
    fn test_no_authors() {
        let empty: [&str; 0] = [];
        assert_eq!(format_authors(&empty), "Unknown Author");
        assert_eq!(format_authors(&["  ", ","]), "Unknown Author");
    }

    #[test]
    fn test_single_author() {
        assert_eq!(format_authors(&["Smith, John"]), "J. Smith");
    }

    #[test]
    fn test_two_authors() {
        assert_eq!(
            format_authors(&["Smith, John", "Doe, Jane"]),
            "J. Smith and J. Doe"
        );
    }

    #[test]
    fn test_oxford_comma() {
        assert_eq!(
            format_authors(&["Smith, John", "Doe, Jane", "Roe, Richard"]),
            "J. Smith, J. Doe, and R. Roe"
        );
        assert_eq!(
            format_authors(&["Smith, John", "Doe, Jane", "Roe, Richard", "Poe, Edgar"]),
            "J. Smith, J. Doe, R. Roe, and E. Poe"
        );
    }

    #[test]
    fn test_name_without_comma_kept() {
        assert_eq!(format_authors(&["CERN Collaboration"]), "CERN Collaboration");
        assert_eq!(
            format_authors(&["Plato", "Curie, Marie"]),
            "Plato and M. Curie"
        );
    }

    #[test]
    fn test_missing_given_name_keeps_last_name() {
        assert_eq!(format_author("Euclid, "), Some("Euclid".to_string()));
        assert_eq!(format_author("Ångström, Anders"), Some("A. Ångström".to_string()));
    }

    #[test]
    fn test_minimal_citation() {
        let meta = parse_metadata(
            "---\ncategory: literaturenote\nauthor: [\"Smith, John\"]\ntitle: \"A Study\"\nyear: \"2020\"\n---\n",
        );
        assert_eq!(format_citation(&meta), "J. Smith, A Study (2020).");
    }

    #[test]
    fn test_full_citation() {
        let meta = parse_metadata(
            r#"---
author: ["Smith, John", "Doe, Jane"]
title: Spin Waves
year: 2019
journal: Phys. Rev. Lett.
DOI: 10.1103/PhysRevLett.1.2
---
"#,
        );
        assert_eq!(
            format_citation(&meta),
            "J. Smith and J. Doe, Spin Waves, Phys. Rev. Lett. (2019), DOI: [10.1103/PhysRevLett.1.2](https://doi.org/10.1103/PhysRevLett.1.2)."
        );
    }

    #[test]
    fn test_bracketed_title_and_quoted_author_list() {
        let meta = parse_metadata(
            "---\nauthor: '[\"Smith, John\", \"Doe, Jane\"]'\ntitle: [Review] Spin Waves [2]\nyear: 2020\n---\n",
        );
        assert_eq!(
            format_citation(&meta),
            "J. Smith and J. Doe, [Review] Spin Waves [2] (2020)."
        );
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let meta = parse_metadata("---\ncategory: literaturenote\njournal:\n---\n");
        assert_eq!(format_citation(&meta), "Unknown Author, Untitled (n.d.).");
    }
}
