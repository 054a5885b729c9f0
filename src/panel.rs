//! The editor panel.
//!
//! Composes the personal-info fields, the per-section editors and the drag
//! controller into one surface. The panel never owns the document: every
//! change is computed from the store's current snapshot and committed through
//! [`Store::set`]. What the panel does own is view state, namely which
//! sections are expanded and the drag in progress. None of it ever leaks into
//! the document.
//!
//! ## Layout
//!
//! For pointer-style drags the panel lays its sections out in line units,
//! matching the outline produced by [`crate::output::format_outline`]: a
//! collapsed section is one line tall, an expanded one adds a line per form
//! row. [`EditorPanel::drop_targets`] turns that layout into the rectangles
//! the drag controller's closest-center rule works on.

use crate::editors::{self, EditError, SectionEdit};
use crate::ids::{ClockIds, IdSource};
use crate::model::{Id, PersonalField, ResumeDocument, SectionKind};
use crate::ops::{self, Confirm};
use crate::output;
use crate::reorder::{DragController, DropTarget, ReorderRequest};
use crate::store::Store;
use std::collections::BTreeMap;
use tracing::debug;

/// Lines above the first section header in the outline: the personal info
/// block with its contact line, a blank line and the `Sections` heading.
const OUTLINE_PREAMBLE: usize = 1 + PersonalField::ALL.len() + 1 + 2;

pub struct EditorPanel {
    expanded: BTreeMap<Id, bool>,
    drag: DragController,
    id_source: Box<dyn IdSource>,
}

impl Default for EditorPanel {
    fn default() -> Self {
        Self::new(Box::new(ClockIds::default()))
    }
}

impl EditorPanel {
    pub fn new(id_source: Box<dyn IdSource>) -> Self {
        Self {
            expanded: BTreeMap::new(),
            drag: DragController::new(),
            id_source,
        }
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    // ------------------------------------------------------------------
    // Expansion
    // ------------------------------------------------------------------

    pub fn is_expanded(&self, id: &Id) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// Flip a section open or closed. Returns the new state, or `None` for an
    /// id not in `doc`.
    pub fn toggle(&mut self, doc: &ResumeDocument, id: &Id) -> Option<bool> {
        if !doc.contains_section(id) {
            return None;
        }
        let open = !self.is_expanded(id);
        self.expanded.insert(id.clone(), open);
        Some(open)
    }

    // ------------------------------------------------------------------
    // Document edits
    // ------------------------------------------------------------------

    pub fn set_personal_field(&mut self, store: &mut Store, field: PersonalField, value: &str) -> bool {
        store.set(|doc| ops::set_personal_field(doc, field, value))
    }

    /// Append a section and open it.
    pub fn add_section(&mut self, store: &mut Store, kind: SectionKind) -> Id {
        let (next, id) = ops::add_section(store.snapshot(), kind, self.id_source.as_mut());
        store.set(|_| next);
        self.expanded.insert(id.clone(), true);
        debug!(section = %id, %kind, "section added");
        id
    }

    /// Apply one field-level edit. `Ok(false)` means the edit left the
    /// section as it was.
    pub fn edit(&mut self, store: &mut Store, id: &Id, edit: &SectionEdit) -> Result<bool, EditError> {
        let next = ops::try_edit_section(store.snapshot(), id, edit, self.id_source.as_mut())?;
        Ok(store.set(|_| next))
    }

    /// Delete after confirmation. `Ok(false)` means the user declined.
    pub fn delete_section(
        &mut self,
        store: &mut Store,
        id: &Id,
        confirm: &mut dyn Confirm,
    ) -> Result<bool, EditError> {
        let next = ops::try_delete_section(store.snapshot(), id, confirm)?;
        let deleted = store.set(|_| next);
        if deleted {
            self.expanded.remove(id);
        }
        Ok(deleted)
    }

    /// Move `from` to `to`'s slot without a drag. Unknown ids are ignored.
    pub fn move_section(&mut self, store: &mut Store, from: &Id, to: &Id) -> bool {
        store.set(|doc| ops::reorder_sections(doc, from, to))
    }

    // ------------------------------------------------------------------
    // Drag and drop
    // ------------------------------------------------------------------

    /// Grab a section. Fails for unknown ids and while another drag is active.
    pub fn begin_drag(&mut self, doc: &ResumeDocument, id: &Id) -> bool {
        doc.contains_section(id) && self.drag.grab(id.clone())
    }

    /// Point the drag at `target` directly; `None` is "off every section".
    pub fn drag_over(&mut self, doc: &ResumeDocument, target: Option<&Id>) {
        let target = target.filter(|id| doc.contains_section(id)).cloned();
        self.drag.set_over(target);
    }

    /// Track a pointer at outline line `y`.
    pub fn drag_hover(&mut self, doc: &ResumeDocument, y: f64) -> Option<Id> {
        let targets = self.drop_targets(doc);
        self.drag.hover(y, &targets).cloned()
    }

    /// Keyboard drag: move the drop target `delta` slots.
    pub fn drag_nudge(&mut self, doc: &ResumeDocument, delta: isize) {
        self.drag.nudge(delta, &doc.section_ids());
    }

    /// Drop and commit the move, if there is one.
    pub fn end_drag(&mut self, store: &mut Store) -> Option<ReorderRequest> {
        let request = self.drag.release()?;
        store.set(|doc| ops::reorder_sections(doc, &request.from, &request.to));
        Some(request)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// One rectangle per section, in outline line units.
    pub fn drop_targets(&self, doc: &ResumeDocument) -> Vec<DropTarget> {
        let mut top = OUTLINE_PREAMBLE as f64;
        doc.sections
            .iter()
            .map(|section| {
                let mut height = 1.0;
                if self.is_expanded(&section.id) {
                    height += editors::form_lines(section).len() as f64;
                }
                let target = DropTarget::new(section.id.clone(), top, height);
                top += height;
                target
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    /// The outline in projected order, plus the drag status while dragging.
    pub fn render(&self, doc: &ResumeDocument) -> Vec<String> {
        let order = self.drag.projected_order(&doc.section_ids());
        let mut lines = output::format_outline(
            doc,
            &order,
            |id| self.is_expanded(id),
            |id| self.drag.is_dimmed(id),
        );
        if let Some(status) = output::format_drag_status(self.drag.state()) {
            lines.push(String::new());
            lines.push(status);
        }
        lines
    }
}
