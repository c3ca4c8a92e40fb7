//! End-to-end tests for page processing against a notes directory.

use litcite_core::{CitationProcessor, Config, DiagnosticSeverity};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn write_note(root: &Path, key: &str, authors: &str, title: &str, year: &str) {
    let body = format!(
        "---\ncategory: literaturenote\nauthor: {authors}\ntitle: \"{title}\"\nyear: \"{year}\"\n---\n\n# {title}\n"
    );
    fs::write(root.join(format!("@{key}.md")), body).unwrap();
}

/// Vault laid out the way a site build sees it: notes next to `Website/docs`.
fn vault() -> TempDir {
    let dir = tempdir().unwrap();
    let notes = dir.path().join("Literature Notes");
    fs::create_dir_all(&notes).unwrap();
    fs::create_dir_all(dir.path().join("Website/docs")).unwrap();

    write_note(&notes, "smith2020", r#"["Smith, John"]"#, "A Study", "2020");
    write_note(
        &notes,
        "doe2018",
        r#"["Doe, Jane", "Roe, Richard", "Poe, Edgar"]"#,
        "Three Authors",
        "2018",
    );
    write_note(&notes, "lee2015", r#"["Lee, Ann", "Kim, Bo"]"#, "Pairs", "2015");
    fs::write(notes.join("@draft.md"), "---\ncategory: fleeting\n---\n").unwrap();

    fs::write(dir.path().join("litcite.yml"), "docs_dir: Website/docs\n").unwrap();
    dir
}

fn processor(dir: &TempDir) -> CitationProcessor {
    let config = Config::from_file(dir.path().join("litcite.yml")).unwrap();
    CitationProcessor::new(config.citation_settings()).unwrap()
}

#[test]
fn test_single_citation_markup() {
    let dir = vault();
    let page = processor(&dir).process("[[@smith2020]]");

    assert!(page
        .markdown
        .starts_with(r##"<sup id="cite-ref-1-1"><a href="#cite-1">[1]</a></sup>"##));
    assert!(page.markdown.contains(
        r##"<span id="cite-1">[1]</span> J. Smith, A Study (2020). <a href="#cite-ref-1-1">↩</a>"##
    ));
}

#[test]
fn test_reference_entries_match_distinct_resolved_keys() {
    let dir = vault();
    let input = "\
Intro [[@doe2018]] and [[Literature Notes/@smith2020|Smith]].

More on [[@doe2018|the trio]], a [[@missing]] key, a [[@draft]] note,
and pairs [[@lee2015]]. Again [[@smith2020]] and [[@doe2018]].
";
    let page = processor(&dir).process(input);

    let keys: Vec<&str> = page.references.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["doe2018", "smith2020", "lee2015"]);

    let numbers: Vec<usize> = page.references.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let entries = page.markdown.matches("<span id=\"cite-").count();
    assert_eq!(entries, 3);

    // Unresolved tokens survive verbatim
    assert!(page.markdown.contains("a [[@missing]] key, a [[@draft]] note,"));
    assert!(!page.markdown.contains("[[@doe2018"));
    assert!(!page.markdown.contains("[[@smith2020"));
    assert!(!page.markdown.contains("@smith2020]]"));

    assert!(page
        .markdown
        .contains("J. Doe, R. Roe, and E. Poe, Three Authors (2018)."));
    assert!(page.markdown.contains("A. Lee and B. Kim, Pairs (2015)."));

    assert!(page
        .diagnostics
        .iter()
        .all(|d| d.severity == DiagnosticSeverity::Warning));
    assert_eq!(page.diagnostics.len(), 2);
}

#[test]
fn test_every_occurrence_has_one_anchor_and_one_backlink() {
    let dir = vault();
    let page = processor(&dir).process("[[@doe2018]] [[@smith2020]] [[@doe2018]] [[@doe2018|x]]");

    let doe = &page.references[0];
    assert_eq!(doe.occurrences, 3);

    let mut seen = HashSet::new();
    for record in &page.references {
        for id in record.anchor_ids() {
            assert!(seen.insert(id.clone()), "anchor {id} repeated");
            let inline = format!(r#"<sup id="{id}">"#);
            let back = format!(r##"<a href="#{id}">"##);
            assert_eq!(page.markdown.matches(&inline).count(), 1);
            assert_eq!(page.markdown.matches(&back).count(), 1);
        }
    }
    assert_eq!(seen.len(), 4);

    assert!(page.markdown.contains(
        r##"<a href="#cite-ref-1-1">↩<sup>1</sup></a> <a href="#cite-ref-1-2">↩<sup>2</sup></a> <a href="#cite-ref-1-3">↩<sup>3</sup></a>"##
    ));
}

#[test]
fn test_display_text_is_kept_per_occurrence() {
    let dir = vault();
    let page = processor(&dir).process("[[@smith2020|first]] / [[@smith2020|second]]");

    assert!(page.markdown.starts_with(
        r##"first<sup id="cite-ref-1-1"><a href="#cite-1">[1]</a></sup> / second<sup id="cite-ref-1-2"><a href="#cite-1">[1]</a></sup>"##
    ));
}

#[test]
fn test_pages_do_not_share_numbering() {
    let dir = vault();
    let processor = processor(&dir);

    let first = processor.process("[[@smith2020]] [[@lee2015]]");
    let second = processor.process("[[@lee2015]]");

    assert_eq!(first.references[1].key, "lee2015");
    assert_eq!(first.references[1].number, 2);
    assert_eq!(second.references[0].number, 1);
    assert_eq!(second.references[0].occurrences, 1);
}

#[test]
fn test_page_with_only_missing_citation_is_unchanged() {
    let dir = vault();
    let input = "Nothing to see [[@nobody2000]].\n";
    let page = processor(&dir).process(input);

    assert_eq!(page.markdown, input);
    assert!(!page.markdown.contains("## References"));
}
