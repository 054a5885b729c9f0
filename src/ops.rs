//! Document mutations.
//!
//! Every operation here takes the current [`ResumeDocument`] by reference and
//! returns a new one. The input is never modified, which is what lets the
//! host detect a change by comparing snapshots.
//!
//! ## Lenient and Strict Forms
//!
//! The editing surface treats "not found" as a silent no-op: a stale id from
//! a previous frame should not interrupt the user. Those are the plain
//! functions ([`update_section`], [`edit_section`], ...), which log the miss
//! at `debug` level and hand back an unchanged copy.
//!
//! Each has a `try_*` counterpart that reports the miss as an [`EditError`]
//! instead. The plain forms are thin wrappers over the strict ones.

use crate::editors::{self, EditError, SectionEdit};
use crate::ids::{self, IdSource};
use crate::model::{Id, PersonalField, ResumeDocument, Section, SectionKind};
use tracing::debug;

/// Prefix of minted section ids (`section-<millis>`).
pub const SECTION_ID_PREFIX: &str = "section";

/// Title given to newly added sections.
pub const NEW_SECTION_TITLE: &str = "New Section";

/// Prompt shown before a section is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this section?";

/// A blocking yes/no question put to the user.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Replace one personal-info field.
pub fn set_personal_field(doc: &ResumeDocument, field: PersonalField, value: &str) -> ResumeDocument {
    ResumeDocument {
        personal_info: doc.personal_info.with_field(field, value),
        sections: doc.sections.clone(),
    }
}

/// Append a section of `kind` with placeholder content and a fresh id.
///
/// Returns the new document and the id, so the caller can expand the new
/// section in its view.
pub fn add_section(
    doc: &ResumeDocument,
    kind: SectionKind,
    id_source: &mut dyn IdSource,
) -> (ResumeDocument, Id) {
    let id = ids::mint_unique(id_source, Some(SECTION_ID_PREFIX), |candidate| {
        doc.contains_section(candidate)
    });
    let mut sections = doc.sections.clone();
    sections.push(Section::new(id.clone(), NEW_SECTION_TITLE, kind.default_body()));
    let next = ResumeDocument {
        personal_info: doc.personal_info.clone(),
        sections,
    };
    (next, id)
}

/// Replace every section whose id matches with `section`.
pub fn try_update_section(
    doc: &ResumeDocument,
    id: &Id,
    section: &Section,
) -> Result<ResumeDocument, EditError> {
    if !doc.contains_section(id) {
        return Err(EditError::SectionNotFound(id.clone()));
    }
    Ok(ResumeDocument {
        personal_info: doc.personal_info.clone(),
        sections: doc
            .sections
            .iter()
            .map(|s| if &s.id == id { section.clone() } else { s.clone() })
            .collect(),
    })
}

/// [`try_update_section`], ignoring an unknown id.
pub fn update_section(doc: &ResumeDocument, id: &Id, section: &Section) -> ResumeDocument {
    lenient(doc, try_update_section(doc, id, section))
}

/// Remove a section after asking `confirm`.
///
/// A declined confirmation returns an unchanged copy. An unknown id is an
/// error and no question is asked.
pub fn try_delete_section(
    doc: &ResumeDocument,
    id: &Id,
    confirm: &mut dyn Confirm,
) -> Result<ResumeDocument, EditError> {
    if !doc.contains_section(id) {
        return Err(EditError::SectionNotFound(id.clone()));
    }
    if !confirm.confirm(DELETE_PROMPT) {
        debug!(section = %id, "delete declined");
        return Ok(doc.clone());
    }
    Ok(ResumeDocument {
        personal_info: doc.personal_info.clone(),
        sections: doc.sections.iter().filter(|s| &s.id != id).cloned().collect(),
    })
}

/// [`try_delete_section`], ignoring an unknown id.
pub fn delete_section(doc: &ResumeDocument, id: &Id, confirm: &mut dyn Confirm) -> ResumeDocument {
    lenient(doc, try_delete_section(doc, id, confirm))
}

/// Move section `from` to the index currently held by `to`.
///
/// Sections in between shift by one toward the vacated slot. Moving a section
/// onto itself returns an identical order.
pub fn try_reorder_sections(
    doc: &ResumeDocument,
    from: &Id,
    to: &Id,
) -> Result<ResumeDocument, EditError> {
    let old_index = doc
        .position(from)
        .ok_or_else(|| EditError::SectionNotFound(from.clone()))?;
    let new_index = doc
        .position(to)
        .ok_or_else(|| EditError::SectionNotFound(to.clone()))?;

    let mut sections = doc.sections.clone();
    array_move(&mut sections, old_index, new_index);
    Ok(ResumeDocument {
        personal_info: doc.personal_info.clone(),
        sections,
    })
}

/// [`try_reorder_sections`], ignoring unknown ids.
pub fn reorder_sections(doc: &ResumeDocument, from: &Id, to: &Id) -> ResumeDocument {
    lenient(doc, try_reorder_sections(doc, from, to))
}

/// Apply a variant edit to section `id` and commit it through [`try_update_section`].
pub fn try_edit_section(
    doc: &ResumeDocument,
    id: &Id,
    edit: &SectionEdit,
    id_source: &mut dyn IdSource,
) -> Result<ResumeDocument, EditError> {
    let current = doc
        .section(id)
        .ok_or_else(|| EditError::SectionNotFound(id.clone()))?;
    let edited = editors::apply(current, edit, id_source)?;
    try_update_section(doc, id, &edited)
}

/// [`try_edit_section`], ignoring misses of any kind.
pub fn edit_section(
    doc: &ResumeDocument,
    id: &Id,
    edit: &SectionEdit,
    id_source: &mut dyn IdSource,
) -> ResumeDocument {
    lenient(doc, try_edit_section(doc, id, edit, id_source))
}

/// Move the element at `from` so it ends up at index `to`.
pub(crate) fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

fn lenient(doc: &ResumeDocument, result: Result<ResumeDocument, EditError>) -> ResumeDocument {
    result.unwrap_or_else(|err| {
        debug!(%err, "edit ignored");
        doc.clone()
    })
}
