//! The single live document and its setter.
//!
//! The host owns exactly one [`Store`]. Editors never hold the document; they
//! hand [`Store::set`] a function from the previous snapshot to the next one,
//! the same shape every operation in [`crate::ops`] has. The revision counter
//! only moves when the new snapshot differs, which is how the preview knows
//! it has to re-render.

use crate::model::ResumeDocument;

#[derive(Debug)]
pub struct Store {
    current: ResumeDocument,
    revision: u64,
}

impl Store {
    pub fn new(initial: ResumeDocument) -> Self {
        Self {
            current: initial,
            revision: 0,
        }
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> &ResumeDocument {
        &self.current
    }

    /// Incremented once per change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the document with `update(previous)`. Returns whether it changed.
    pub fn set(&mut self, update: impl FnOnce(&ResumeDocument) -> ResumeDocument) -> bool {
        let next = update(&self.current);
        if next == self.current {
            return false;
        }
        self.current = next;
        self.revision += 1;
        true
    }
}
