//! # CV Builder
//!
//! A résumé builder: structured personal info plus an ordered list of typed
//! sections, edited through an editor panel, with a print-ready HTML preview
//! derived from the current document on every change. Export is "print the
//! preview": the page is written out as HTML and the browser's print-to-PDF
//! does the rest.
//!
//! # Architecture: One Document, One Setter
//!
//! ```text
//!            ┌──────────────┐   set(|prev| next)   ┌─────────┐
//!  input ──▶ │ EditorPanel  │ ───────────────────▶ │  Store  │
//!            │ (view state) │                      │ (doc)   │
//!            └──────────────┘                      └────┬────┘
//!                                                       │ snapshot
//!                                                       ▼
//!                                               ┌──────────────┐
//!                                               │   preview    │ ──▶ print
//!                                               └──────────────┘
//! ```
//!
//! The [`store::Store`] holds the only mutable document. The
//! [`panel::EditorPanel`] never keeps a copy; every change it makes is a
//! function from the previous snapshot to the next one, built from the pure
//! operations in [`ops`]. The [`preview`] re-derives the whole page from the
//! latest snapshot, so there is nothing to invalidate.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | The document: `PersonalInfo`, `Section` with its typed `SectionBody`, `Entry`, `Skill` |
//! | [`dates`] | Year-month parsing and the `Jun 2020 - Present` display rule |
//! | [`ids`] | Clock-based id minting with collision re-minting |
//! | [`editors`] | Field-level edits per section type, and the textual editor form |
//! | [`ops`] | Document operations: lenient forms and strict `try_*` forms |
//! | [`reorder`] | Drag-and-drop state machine with closest-center targeting |
//! | [`store`] | The single live document and its setter |
//! | [`panel`] | Editor panel: expansion state, drag wiring, outline view |
//! | [`preview`] | Print-ready HTML rendering with Maud |
//! | [`config`] | `cv.toml` loading, validation, merging, and theme CSS |
//! | [`shell`] | Interactive session, confirmation prompt, print facility |
//! | [`output`] | Text formatting for the session |
//! | [`sample`] | The built-in starting résumé |
//!
//! # Design Decisions
//!
//! ## Replace on Mutate
//!
//! Every operation takes `&ResumeDocument` and returns a new document. A
//! section edit produces a whole new `Section` that replaces the old one by
//! id. Nothing is patched in place, so the store can tell whether anything
//! changed by comparing snapshots, and a declined or missed edit is simply
//! an unchanged copy.
//!
//! ## Sections as a Sum Type
//!
//! A section's content is one [`model::SectionBody`] variant. A list section
//! cannot carry entries and an entries section cannot carry a paragraph; the
//! editors match on the variant and report [`editors::EditError::WrongKind`]
//! instead of guessing. On the wire the variant is the `type` field next to
//! the section's `id` and `title`.
//!
//! ## Lenient and Strict Operations
//!
//! The plain operations ignore unknown ids and out-of-range indices, which is
//! what an editor surface wants when a stale click lands on a section that is
//! already gone. Each one has a `try_*` twin that reports the miss as an
//! [`editors::EditError`]. The interactive session uses the strict forms so
//! typos are reported.
//!
//! ## View State Stays in the Panel
//!
//! Which sections are expanded and what is being dragged are properties of
//! the editor, not of the résumé. They live in the panel and never reach the
//! document, so printing and serializing see only content.

pub mod config;
pub mod dates;
pub mod editors;
pub mod ids;
pub mod model;
pub mod ops;
pub mod output;
pub mod panel;
pub mod preview;
pub mod reorder;
pub mod sample;
pub mod shell;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
