//! Shared test utilities for the cv-builder test suite.
//!
//! Small builders for documents and sections, extractors that panic with a
//! clear message when a section has the wrong shape, and an order assertion.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let doc = doc_with_sections(vec![
//!     text_section("summary", "Summary", "Hello"),
//!     list_section("awards", &["a", "b"]),
//! ]);
//!
//! assert_eq!(list_items(find_section(&doc, "awards")), ["a", "b"]);
//! assert_section_order(&doc, &["summary", "awards"]);
//! ```

use crate::model::{Entry, Id, ResumeDocument, Section, SectionBody, Skill};

// =========================================================================
// Builders
// =========================================================================

/// A document with an empty header and the given sections.
pub fn doc_with_sections(sections: Vec<Section>) -> ResumeDocument {
    ResumeDocument {
        sections,
        ..ResumeDocument::default()
    }
}

pub fn text_section(id: &str, title: &str, content: &str) -> Section {
    Section::new(
        id,
        title,
        SectionBody::Text {
            content: content.to_string(),
        },
    )
}

/// A list section titled after its id.
pub fn list_section(id: &str, items: &[&str]) -> Section {
    Section::new(
        id,
        id,
        SectionBody::List {
            items: items.iter().map(|s| s.to_string()).collect(),
        },
    )
}

/// A skills section titled after its id.
pub fn skills_section(id: &str, pairs: &[(&str, &str)]) -> Section {
    Section::new(
        id,
        id,
        SectionBody::Skills {
            list: pairs
                .iter()
                .map(|(label, value)| Skill::new(*label, *value))
                .collect(),
        },
    )
}

/// An entries section titled after its id.
pub fn entries_section(id: &str, entries: Vec<Entry>) -> Section {
    Section::new(id, id, SectionBody::Entries { entries })
}

/// An entry with only an id and a title.
pub fn entry(id: &str, title: &str) -> Entry {
    Entry {
        id: Id::new(id),
        title: title.to_string(),
        ..Entry::default()
    }
}

// =========================================================================
// Lookups and extractors: panic with a clear message on miss
// =========================================================================

/// Find a section by id. Panics if not found.
pub fn find_section<'a>(doc: &'a ResumeDocument, id: &str) -> &'a Section {
    doc.sections
        .iter()
        .find(|s| s.id.as_str() == id)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = doc.sections.iter().map(|s| s.id.as_str()).collect();
            panic!("section '{id}' not found. Available: {ids:?}")
        })
}

/// Items of a list section. Panics on any other kind.
pub fn list_items(section: &Section) -> Vec<String> {
    match &section.body {
        SectionBody::List { items } => items.clone(),
        other => panic!(
            "section '{}' is {}, expected list",
            section.id,
            other.type_name()
        ),
    }
}

/// Entries of an entries section. Panics on any other kind.
pub fn entries_of(section: &Section) -> &[Entry] {
    match &section.body {
        SectionBody::Entries { entries } => entries,
        other => panic!(
            "section '{}' is {}, expected entries",
            section.id,
            other.type_name()
        ),
    }
}

/// Skill pairs of a skills section as `(label, value)`. Panics on any other kind.
pub fn skill_pairs(section: &Section) -> Vec<(&str, &str)> {
    match &section.body {
        SectionBody::Skills { list } => list
            .iter()
            .map(|s| (s.label.as_str(), s.value.as_str()))
            .collect(),
        other => panic!(
            "section '{}' is {}, expected skills",
            section.id,
            other.type_name()
        ),
    }
}

// =========================================================================
// Order assertions
// =========================================================================

/// Assert the document's section ids, in order.
pub fn assert_section_order(doc: &ResumeDocument, expected: &[&str]) {
    let actual: Vec<&str> = doc.sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(actual, expected, "section order mismatch");
}
