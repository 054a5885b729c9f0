//! Per-variant section editors.
//!
//! Every field the editing surface exposes maps to one [`SectionEdit`].
//! [`apply`] takes the current [`Section`] and an edit and returns the new,
//! complete section. The input is never touched, so committing the result is
//! a wholesale replace (see [`crate::ops::edit_section`]).
//!
//! ## Repeatable Sub-Elements
//!
//! List items, skill rows, entries, and entry bullets can each be added and
//! removed independently. Removal is by index (or by entry id) and closes the
//! gap: removing index `i` moves everything after it down by one.
//!
//! ## Entry Dates
//!
//! Edits to `startDate`, `endDate`, or the current-position flag re-derive the
//! entry's display `date` via [`crate::dates::derive_display`]. Once an entry
//! has a start date, its `date` belongs to the derivation and a raw
//! [`SectionEdit::SetEntryDate`] is refused with [`EditError::DerivedDate`].

use crate::dates;
use crate::ids::{self, IdSource};
use crate::model::{Entry, Id, Section, SectionBody, SectionKind, Skill};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no section with id '{0}'")]
    SectionNotFound(Id),
    #[error("section '{section}' has no entry with id '{entry}'")]
    EntryNotFound { section: Id, entry: Id },
    #[error("index {index} out of range for {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("section '{section}' is not a {expected} section")]
    WrongKind { section: Id, expected: SectionKind },
    #[error("entry '{entry}' uses structured dates; its date is derived")]
    DerivedDate { entry: Id },
}

/// A single field-level change to one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionEdit {
    SetTitle(String),
    /// Text sections (and raw HTML sections loaded from a seed).
    SetContent(String),

    AddItem,
    SetItem { index: usize, value: String },
    RemoveItem { index: usize },

    AddSkill,
    SetSkillLabel { index: usize, value: String },
    SetSkillValue { index: usize, value: String },
    RemoveSkill { index: usize },

    AddEntry,
    RemoveEntry { entry: Id },
    SetEntryTitle { entry: Id, value: String },
    SetEntrySubtitle { entry: Id, value: String },
    SetEntryDate { entry: Id, value: String },
    SetStartDate { entry: Id, value: Option<String> },
    SetEndDate { entry: Id, value: Option<String> },
    SetCurrent { entry: Id, current: bool },

    AddBullet { entry: Id },
    SetBullet { entry: Id, index: usize, value: String },
    RemoveBullet { entry: Id, index: usize },
}

/// Placeholder text for newly added sub-elements.
pub const NEW_ITEM: &str = "New item";
pub const NEW_SKILL_LABEL: &str = "New Category";
pub const NEW_ENTRY_TITLE: &str = "New Entry";
pub const NEW_BULLET: &str = "New point";

/// Apply one edit, producing the new section.
pub fn apply(
    section: &Section,
    edit: &SectionEdit,
    id_source: &mut dyn IdSource,
) -> Result<Section, EditError> {
    let mut next = section.clone();
    let section_id = &section.id;

    match edit {
        SectionEdit::SetTitle(title) => next.title.clone_from(title),
        SectionEdit::SetContent(value) => match &mut next.body {
            SectionBody::Text { content } | SectionBody::CustomHtml { content } => {
                content.clone_from(value);
            }
            _ => return Err(wrong_kind(section_id, SectionKind::Text)),
        },

        SectionEdit::AddItem => items_mut(section_id, &mut next.body)?.push(NEW_ITEM.to_string()),
        SectionEdit::SetItem { index, value } => {
            let items = items_mut(section_id, &mut next.body)?;
            *slot(items, *index)? = value.clone();
        }
        SectionEdit::RemoveItem { index } => {
            remove_at(items_mut(section_id, &mut next.body)?, *index)?;
        }

        SectionEdit::AddSkill => {
            skills_mut(section_id, &mut next.body)?.push(Skill::new(NEW_SKILL_LABEL, ""));
        }
        SectionEdit::SetSkillLabel { index, value } => {
            let skills = skills_mut(section_id, &mut next.body)?;
            slot(skills, *index)?.label.clone_from(value);
        }
        SectionEdit::SetSkillValue { index, value } => {
            let skills = skills_mut(section_id, &mut next.body)?;
            slot(skills, *index)?.value.clone_from(value);
        }
        SectionEdit::RemoveSkill { index } => {
            remove_at(skills_mut(section_id, &mut next.body)?, *index)?;
        }

        SectionEdit::AddEntry => {
            let entries = entries_mut(section_id, &mut next.body)?;
            let id = ids::mint_unique(id_source, None, |candidate| {
                entries.iter().any(|e| &e.id == candidate)
            });
            entries.push(Entry {
                id,
                title: NEW_ENTRY_TITLE.to_string(),
                ..Entry::default()
            });
        }
        SectionEdit::RemoveEntry { entry } => {
            let entries = entries_mut(section_id, &mut next.body)?;
            let before = entries.len();
            entries.retain(|e| &e.id != entry);
            if entries.len() == before {
                return Err(entry_not_found(section_id, entry));
            }
        }
        SectionEdit::SetEntryTitle { entry, value } => {
            entry_mut(section_id, &mut next.body, entry)?.title.clone_from(value);
        }
        SectionEdit::SetEntrySubtitle { entry, value } => {
            entry_mut(section_id, &mut next.body, entry)?.subtitle.clone_from(value);
        }
        SectionEdit::SetEntryDate { entry, value } => {
            let target = entry_mut(section_id, &mut next.body, entry)?;
            if target.uses_structured_dates() {
                return Err(EditError::DerivedDate {
                    entry: entry.clone(),
                });
            }
            target.date.clone_from(value);
        }
        SectionEdit::SetStartDate { entry, value } => {
            let target = entry_mut(section_id, &mut next.body, entry)?;
            target.start_date = non_empty(value.as_deref());
            rederive_date(target);
        }
        SectionEdit::SetEndDate { entry, value } => {
            let target = entry_mut(section_id, &mut next.body, entry)?;
            target.end_date = non_empty(value.as_deref());
            rederive_date(target);
        }
        SectionEdit::SetCurrent { entry, current } => {
            let target = entry_mut(section_id, &mut next.body, entry)?;
            target.is_current = *current;
            rederive_date(target);
        }

        SectionEdit::AddBullet { entry } => {
            entry_mut(section_id, &mut next.body, entry)?
                .description
                .push(NEW_BULLET.to_string());
        }
        SectionEdit::SetBullet { entry, index, value } => {
            let target = entry_mut(section_id, &mut next.body, entry)?;
            *slot(&mut target.description, *index)? = value.clone();
        }
        SectionEdit::RemoveBullet { entry, index } => {
            let target = entry_mut(section_id, &mut next.body, entry)?;
            remove_at(&mut target.description, *index)?;
        }
    }

    Ok(next)
}

/// Recompute `date` from the structured fields; keeps the old value without a start date.
fn rederive_date(entry: &mut Entry) {
    if let Some(date) = dates::derive_display(
        entry.start_date.as_deref(),
        entry.end_date.as_deref(),
        entry.is_current,
    ) {
        entry.date = date;
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn wrong_kind(section: &Id, expected: SectionKind) -> EditError {
    EditError::WrongKind {
        section: section.clone(),
        expected,
    }
}

fn entry_not_found(section: &Id, entry: &Id) -> EditError {
    EditError::EntryNotFound {
        section: section.clone(),
        entry: entry.clone(),
    }
}

fn items_mut<'a>(section: &Id, body: &'a mut SectionBody) -> Result<&'a mut Vec<String>, EditError> {
    match body {
        SectionBody::List { items } => Ok(items),
        _ => Err(wrong_kind(section, SectionKind::List)),
    }
}

fn skills_mut<'a>(section: &Id, body: &'a mut SectionBody) -> Result<&'a mut Vec<Skill>, EditError> {
    match body {
        SectionBody::Skills { list } => Ok(list),
        _ => Err(wrong_kind(section, SectionKind::Skills)),
    }
}

fn entries_mut<'a>(section: &Id, body: &'a mut SectionBody) -> Result<&'a mut Vec<Entry>, EditError> {
    match body {
        SectionBody::Entries { entries } => Ok(entries),
        _ => Err(wrong_kind(section, SectionKind::Entries)),
    }
}

fn entry_mut<'a>(
    section: &Id,
    body: &'a mut SectionBody,
    entry: &Id,
) -> Result<&'a mut Entry, EditError> {
    entries_mut(section, body)?
        .iter_mut()
        .find(|e| &e.id == entry)
        .ok_or_else(|| entry_not_found(section, entry))
}

fn slot<T>(items: &mut [T], index: usize) -> Result<&mut T, EditError> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(EditError::IndexOutOfRange { index, len })
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Result<T, EditError> {
    if index >= items.len() {
        return Err(EditError::IndexOutOfRange {
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

// ============================================================================
// Form display
// ============================================================================

/// Lines of the editing form for one section: its title field followed by
/// the variant's fields, each sub-element prefixed with the index or id the
/// edit commands address it by.
///
/// ```text
/// Section Title: Experience
/// [1] Acme Corp
///     Subtitle: Engineer
///     Start: 2020-06  End: -  Current: yes  (Jun 2020 - Present)
///     0. Shipped the thing
/// ```
pub fn form_lines(section: &Section) -> Vec<String> {
    let mut lines = vec![format!("Section Title: {}", section.title)];

    match &section.body {
        SectionBody::Text { content } => lines.push(format!("Content: {content}")),
        SectionBody::CustomHtml { content } => {
            lines.push(format!("HTML ({} bytes, not editable)", content.len()));
        }
        SectionBody::List { items } => {
            for (i, item) in items.iter().enumerate() {
                lines.push(format!("{i}. {item}"));
            }
        }
        SectionBody::Skills { list } => {
            for (i, skill) in list.iter().enumerate() {
                lines.push(format!("{i}. Category: {}", skill.label));
                lines.push(format!("   Skills: {}", skill.value));
            }
        }
        SectionBody::Entries { entries } => {
            for entry in entries {
                lines.push(format!("[{}] {}", entry.id, entry.title));
                lines.push(format!("    Subtitle: {}", entry.subtitle));
                if entry.uses_structured_dates() {
                    lines.push(format!(
                        "    Start: {}  End: {}  Current: {}  ({})",
                        entry.start_date.as_deref().unwrap_or("-"),
                        entry.end_date.as_deref().unwrap_or("-"),
                        if entry.is_current { "yes" } else { "no" },
                        entry.date,
                    ));
                } else {
                    lines.push(format!("    Date: {}", entry.date));
                }
                for (i, bullet) in entry.description.iter().enumerate() {
                    lines.push(format!("    {i}. {bullet}"));
                }
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::test_helpers::*;

    fn ids() -> SequentialIds {
        SequentialIds::starting_at(100)
    }

    #[test]
    fn set_title_leaves_original_untouched() {
        let section = text_section("summary", "Summary", "Hello");
        let edited = apply(&section, &SectionEdit::SetTitle("Profile".into()), &mut ids()).unwrap();
        assert_eq!(edited.title, "Profile");
        assert_eq!(section.title, "Summary");
    }

    #[test]
    fn set_content_on_text() {
        let section = text_section("summary", "Summary", "Hello");
        let edited = apply(&section, &SectionEdit::SetContent("Bye".into()), &mut ids()).unwrap();
        assert_eq!(edited.body, SectionBody::Text { content: "Bye".into() });
    }

    #[test]
    fn set_content_on_list_is_wrong_kind() {
        let section = list_section("awards", &["a"]);
        let err = apply(&section, &SectionEdit::SetContent("x".into()), &mut ids()).unwrap_err();
        assert_eq!(
            err,
            EditError::WrongKind {
                section: Id::new("awards"),
                expected: SectionKind::Text
            }
        );
    }

    #[test]
    fn list_items_add_set_remove() {
        let section = list_section("awards", &["a", "b", "c"]);
        let added = apply(&section, &SectionEdit::AddItem, &mut ids()).unwrap();
        assert_eq!(list_items(&added), ["a", "b", "c", NEW_ITEM]);

        let set = apply(
            &section,
            &SectionEdit::SetItem {
                index: 2,
                value: "z".into(),
            },
            &mut ids(),
        )
        .unwrap();
        assert_eq!(list_items(&set), ["a", "b", "z"]);

        let removed = apply(&section, &SectionEdit::RemoveItem { index: 0 }, &mut ids()).unwrap();
        assert_eq!(list_items(&removed), ["b", "c"]);
    }

    #[test]
    fn remove_item_out_of_range() {
        let section = list_section("awards", &["a"]);
        let err = apply(&section, &SectionEdit::RemoveItem { index: 1 }, &mut ids()).unwrap_err();
        assert_eq!(err, EditError::IndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn skills_add_and_edit() {
        let section = skills_section("skills", &[("Rust", "async")]);
        let added = apply(&section, &SectionEdit::AddSkill, &mut ids()).unwrap();
        let edited = apply(
            &added,
            &SectionEdit::SetSkillValue {
                index: 1,
                value: "tokio".into(),
            },
            &mut ids(),
        )
        .unwrap();
        let edited = apply(
            &edited,
            &SectionEdit::SetSkillLabel {
                index: 0,
                value: "Languages".into(),
            },
            &mut ids(),
        )
        .unwrap();

        let SectionBody::Skills { list } = &edited.body else {
            panic!("expected skills body");
        };
        assert_eq!(list[0], Skill::new("Languages", "async"));
        assert_eq!(list[1], Skill::new(NEW_SKILL_LABEL, "tokio"));
    }

    #[test]
    fn remove_skill_shifts_rows() {
        let section = skills_section("skills", &[("a", "1"), ("b", "2"), ("c", "3")]);
        let edited = apply(&section, &SectionEdit::RemoveSkill { index: 1 }, &mut ids()).unwrap();
        let SectionBody::Skills { list } = &edited.body else {
            panic!("expected skills body");
        };
        let labels: Vec<&str> = list.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["a", "c"]);
    }

    #[test]
    fn add_entry_mints_fresh_id() {
        let section = entries_section("work", vec![entry("100", "Existing")]);
        let edited = apply(&section, &SectionEdit::AddEntry, &mut ids()).unwrap();
        let added = &entries_of(&edited)[1];
        assert_eq!(added.id, Id::new("101"));
        assert_eq!(added.title, NEW_ENTRY_TITLE);
        assert!(added.description.is_empty());
    }

    #[test]
    fn remove_unknown_entry_is_not_found() {
        let section = entries_section("work", vec![entry("1", "Job")]);
        let err = apply(
            &section,
            &SectionEdit::RemoveEntry { entry: Id::new("9") },
            &mut ids(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EditError::EntryNotFound {
                section: Id::new("work"),
                entry: Id::new("9")
            }
        );
    }

    #[test]
    fn bullet_removal_shifts() {
        let mut job = entry("1", "Job");
        job.description = vec!["a".into(), "b".into(), "c".into()];
        let section = entries_section("work", vec![job]);

        let edited = apply(
            &section,
            &SectionEdit::RemoveBullet {
                entry: Id::new("1"),
                index: 1,
            },
            &mut ids(),
        )
        .unwrap();
        assert_eq!(entries_of(&edited)[0].description, ["a", "c"]);
    }

    #[test]
    fn bullets_add_and_set() {
        let section = entries_section("work", vec![entry("1", "Job")]);
        let added = apply(
            &section,
            &SectionEdit::AddBullet { entry: Id::new("1") },
            &mut ids(),
        )
        .unwrap();
        let set = apply(
            &added,
            &SectionEdit::SetBullet {
                entry: Id::new("1"),
                index: 0,
                value: "Led the team".into(),
            },
            &mut ids(),
        )
        .unwrap();
        assert_eq!(entries_of(&added)[0].description, [NEW_BULLET]);
        assert_eq!(entries_of(&set)[0].description, ["Led the team"]);
    }

    #[test]
    fn structured_dates_derive_display() {
        let section = entries_section("work", vec![entry("1", "Job")]);
        let id = Id::new("1");

        let start = apply(
            &section,
            &SectionEdit::SetStartDate {
                entry: id.clone(),
                value: Some("2020-06".into()),
            },
            &mut ids(),
        )
        .unwrap();
        let end = apply(
            &start,
            &SectionEdit::SetEndDate {
                entry: id.clone(),
                value: Some("2023-01".into()),
            },
            &mut ids(),
        )
        .unwrap();
        assert_eq!(entries_of(&end)[0].date, "Jun 2020 - Jan 2023");

        let current = apply(
            &end,
            &SectionEdit::SetCurrent {
                entry: id,
                current: true,
            },
            &mut ids(),
        )
        .unwrap();
        assert_eq!(entries_of(&current)[0].date, "Jun 2020 - Present");
    }

    #[test]
    fn end_date_without_start_keeps_manual_date() {
        let mut job = entry("1", "Job");
        job.date = "Summer 2019".into();
        let section = entries_section("work", vec![job]);

        let edited = apply(
            &section,
            &SectionEdit::SetEndDate {
                entry: Id::new("1"),
                value: Some("2019-09".into()),
            },
            &mut ids(),
        )
        .unwrap();
        let updated = &entries_of(&edited)[0];
        assert_eq!(updated.date, "Summer 2019");
        assert_eq!(updated.end_date.as_deref(), Some("2019-09"));
    }

    #[test]
    fn raw_date_refused_once_structured() {
        let mut job = entry("1", "Job");
        job.start_date = Some("2020-01".into());
        let section = entries_section("work", vec![job]);

        let err = apply(
            &section,
            &SectionEdit::SetEntryDate {
                entry: Id::new("1"),
                value: "whenever".into(),
            },
            &mut ids(),
        )
        .unwrap_err();
        assert_eq!(err, EditError::DerivedDate { entry: Id::new("1") });
    }

    #[test]
    fn raw_date_allowed_without_structured_dates() {
        let section = entries_section("work", vec![entry("1", "Job")]);
        let edited = apply(
            &section,
            &SectionEdit::SetEntryDate {
                entry: Id::new("1"),
                value: "2018 - 2019".into(),
            },
            &mut ids(),
        )
        .unwrap();
        assert_eq!(entries_of(&edited)[0].date, "2018 - 2019");
    }

    #[test]
    fn clearing_start_date_stops_derivation() {
        let mut job = entry("1", "Job");
        job.start_date = Some("2020-01".into());
        job.date = "Jan 2020 - Present".into();
        let section = entries_section("work", vec![job]);

        let cleared = apply(
            &section,
            &SectionEdit::SetStartDate {
                entry: Id::new("1"),
                value: Some(String::new()),
            },
            &mut ids(),
        )
        .unwrap();
        let updated = &entries_of(&cleared)[0];
        assert_eq!(updated.start_date, None);
        assert_eq!(updated.date, "Jan 2020 - Present");
    }

    #[test]
    fn form_lines_show_addressable_indices() {
        let section = list_section("awards", &["first", "second"]);
        let lines = form_lines(&section);
        assert_eq!(lines, ["Section Title: awards", "0. first", "1. second"]);
    }
}
