//! Text output for the editing session.
//!
//! # Outline Display
//!
//! The editor panel is shown as an outline: personal info first, then one
//! header line per section in display order. Expanded sections carry their
//! editor form indented underneath; the grabbed section during a drag is
//! marked `(moving)`.
//!
//! ```text
//! Personal Information
//!     fullName: Jane Doe
//!     title: Backend Engineer
//!     email: jane.doe@example.com
//!     contact: jane.doe@example.com | Lisbon, Portugal
//!
//! Sections
//! 001 ▾ Professional Summary [text] summary
//!         Section Title: Professional Summary
//!         Content: Backend engineer with six years…
//! 002 ▸ Experience [entries] experience (moving)
//! 003 ▸ Skills [skills] skills
//! ```
//!
//! # Architecture
//!
//! Every `format_*` function returns `Vec<String>` (or a single `String`) and
//! does no I/O, so the layout is testable on its own. [`write_lines`] is the
//! only function that touches a writer.

use crate::editors;
use crate::preview;
use crate::model::{Id, PersonalField, PersonalInfo, ResumeDocument, Section};
use crate::reorder::DragState;
use std::io::{self, Write};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line of one section in the outline.
///
/// ```text
/// 002 ▸ Experience [entries] experience
/// ```
fn section_header(index: usize, section: &Section, expanded: bool, dimmed: bool) -> String {
    let marker = if expanded { "▾" } else { "▸" };
    let mut line = format!(
        "{} {} {} [{}] {}",
        format_index(index),
        marker,
        section.title,
        section.body.type_name(),
        section.id
    );
    if dimmed {
        line.push_str(" (moving)");
    }
    line
}

/// Personal info block: every field, set or not, then the contact line as
/// the preview prints it.
pub fn format_personal_info(info: &PersonalInfo) -> Vec<String> {
    let mut lines = vec!["Personal Information".to_string()];
    for field in PersonalField::ALL {
        lines.push(format!("{}{}: {}", indent(1), field, info.get(field)));
    }
    lines.push(format!(
        "{}contact: {}",
        indent(1),
        preview::contact_line_text(info)
    ));
    lines
}

/// The full outline.
///
/// `order` is the display order (the projected order while dragging); ids
/// with no matching section are skipped.
pub fn format_outline(
    doc: &ResumeDocument,
    order: &[Id],
    is_expanded: impl Fn(&Id) -> bool,
    is_dimmed: impl Fn(&Id) -> bool,
) -> Vec<String> {
    let mut lines = format_personal_info(&doc.personal_info);
    lines.push(String::new());
    lines.push("Sections".to_string());

    if order.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }

    let sections = order.iter().filter_map(|id| doc.section(id));
    for (i, section) in sections.enumerate() {
        let expanded = is_expanded(&section.id);
        lines.push(section_header(i + 1, section, expanded, is_dimmed(&section.id)));
        if expanded {
            for line in editors::form_lines(section) {
                lines.push(format!("{}{}", indent(2), line));
            }
        }
    }

    lines
}

/// One-line description of an in-progress drag, if any.
pub fn format_drag_status(state: &DragState) -> Option<String> {
    match state {
        DragState::Idle => None,
        DragState::Dragging {
            active,
            over: Some(over),
        } => Some(format!("Dragging {active} over {over}")),
        DragState::Dragging { active, over: None } => {
            Some(format!("Dragging {active} (no drop target)"))
        }
    }
}

/// Confirmation that the preview was printed.
pub fn format_printed(path: &Path, bytes: usize) -> String {
    format!("Printed preview → {} ({} bytes)", path.display(), bytes)
}

/// Write lines to `out`, one per line.
pub fn write_lines(out: &mut dyn Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn personal_info_lists_every_field() {
        let info = PersonalInfo {
            full_name: "Ada".to_string(),
            ..PersonalInfo::default()
        };
        let lines = format_personal_info(&info);
        assert_eq!(lines.len(), 1 + PersonalField::ALL.len() + 1);
        assert_eq!(lines[1], "    fullName: Ada");
        assert_eq!(lines[2], "    title: ");
        assert_eq!(lines.last().unwrap(), "    contact: ");
    }

    #[test]
    fn personal_info_ends_with_contact_line() {
        let info = PersonalInfo {
            email: "ada@example.com".to_string(),
            location: "London".to_string(),
            github: Some("ada".to_string()),
            ..PersonalInfo::default()
        };
        let lines = format_personal_info(&info);
        assert_eq!(
            lines.last().unwrap(),
            "    contact: ada@example.com | London | ada"
        );
    }

    #[test]
    fn outline_collapsed_sections_are_one_line_each() {
        let doc = doc_with_sections(vec![
            text_section("a", "Alpha", "x"),
            list_section("b", &["1", "2"]),
        ]);
        let lines = format_outline(&doc, &doc.section_ids(), |_| false, |_| false);
        let tail: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .skip_while(|l| *l != "Sections")
            .collect();
        assert_eq!(tail, ["Sections", "001 ▸ Alpha [text] a", "002 ▸ b [list] b"]);
    }

    #[test]
    fn outline_expanded_section_shows_form() {
        let doc = doc_with_sections(vec![list_section("b", &["one"])]);
        let b = Id::new("b");
        let lines = format_outline(&doc, &doc.section_ids(), |id| *id == b, |_| false);
        assert!(lines.contains(&"001 ▾ b [list] b".to_string()));
        assert!(lines.contains(&"        Section Title: b".to_string()));
        assert!(lines.contains(&"        0. one".to_string()));
    }

    #[test]
    fn outline_follows_given_order_and_marks_moving() {
        let doc = doc_with_sections(vec![
            text_section("a", "Alpha", ""),
            text_section("b", "Beta", ""),
        ]);
        let order = vec![Id::new("b"), Id::new("a")];
        let a = Id::new("a");
        let lines = format_outline(&doc, &order, |_| false, |id| *id == a);
        let headers: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|l| l.starts_with('0'))
            .collect();
        assert_eq!(headers, ["001 ▸ Beta [text] b", "002 ▸ Alpha [text] a (moving)"]);
    }

    #[test]
    fn outline_without_sections() {
        let doc = ResumeDocument::default();
        let lines = format_outline(&doc, &[], |_| false, |_| false);
        assert_eq!(lines.last().map(String::as_str), Some("    (none)"));
    }

    #[test]
    fn drag_status_lines() {
        assert_eq!(format_drag_status(&DragState::Idle), None);
        let dragging = DragState::Dragging {
            active: Id::new("a"),
            over: Some(Id::new("b")),
        };
        assert_eq!(format_drag_status(&dragging).as_deref(), Some("Dragging a over b"));
    }

    #[test]
    fn write_lines_terminates_each_line() {
        let mut buf = Vec::new();
        write_lines(&mut buf, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a\nb\n");
    }
}
