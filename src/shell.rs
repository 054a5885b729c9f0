//! The host shell: one live document, the editor panel, and the print action.
//!
//! A [`Session`] owns the [`Store`] and wires everything to a line-oriented
//! terminal. Each input line is one command, parsed with clap so every command
//! gets argument checking and `help` for free:
//!
//! ```text
//! > add list
//! added section-1718000000000
//! > item set section-1718000000000 0 "Open source maintainer"
//! > drag experience
//! > down
//! > drop
//! moved experience → skills
//! > print
//! Printed preview → resume.html (5121 bytes)
//! ```
//!
//! Delete asks for confirmation on the same input stream; anything but `y`
//! or `yes` declines. Edits that miss (unknown section, wrong section type,
//! index out of range) are reported and leave the document untouched.

use crate::config::CvConfig;
use crate::editors::SectionEdit;
use crate::model::{Id, PersonalField, ResumeDocument, SectionKind};
use crate::output;
use crate::panel::EditorPanel;
use crate::preview;
use crate::sample;
use crate::store::Store;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid seed {path}: {source}")]
    Seed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The host's print facility.
pub trait Printer {
    /// Hand off a rendered page. Returns where it went.
    fn print(&mut self, html: &str) -> Result<PathBuf, ShellError>;
}

/// Writes the page to a file, ready for the browser's print-to-PDF.
#[derive(Debug, Clone)]
pub struct FilePrinter {
    path: PathBuf,
}

impl FilePrinter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Printer for FilePrinter {
    fn print(&mut self, html: &str) -> Result<PathBuf, ShellError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, html)?;
        info!(path = %self.path.display(), bytes = html.len(), "preview printed");
        Ok(self.path.clone())
    }
}

/// The starting document: a JSON seed file, or the built-in sample.
pub fn load_seed(path: Option<&Path>) -> Result<ResumeDocument, ShellError> {
    let Some(path) = path else {
        return Ok(sample::sample_document());
    };
    let raw = std::fs::read_to_string(path)?;
    let doc = serde_json::from_str(&raw).map_err(|source| ShellError::Seed {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "seed loaded");
    Ok(doc)
}

// ============================================================================
// Command grammar
// ============================================================================

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the editor outline
    Show,
    /// Set a personal-info field (empty clears optional fields)
    Set {
        field: PersonalField,
        #[arg(default_value = "")]
        value: String,
    },
    /// Append a section of the given type
    Add { kind: SectionKind },
    /// Expand or collapse a section's editor
    Toggle { id: Id },
    /// Rename a section
    Title { id: Id, title: String },
    /// Replace a text section's content
    Content { id: Id, text: String },
    /// Edit a list section
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },
    /// Edit a skills section
    Skill {
        #[command(subcommand)]
        action: SkillAction,
    },
    /// Edit an entries section
    Entry {
        #[command(subcommand)]
        action: EntryAction,
    },
    /// Edit an entry's bullet points
    Bullet {
        #[command(subcommand)]
        action: BulletAction,
    },
    /// Delete a section (asks first)
    Delete { id: Id },
    /// Move a section to another section's position
    Move { from: Id, to: Id },
    /// Grab a section to reorder it
    Drag { id: Id },
    /// Set the drop target (omit to clear it)
    Over { id: Option<Id> },
    /// Point at an outline line while dragging
    Hover { line: f64 },
    /// Move the drop target up one slot
    Up,
    /// Move the drop target down one slot
    Down,
    /// Drop the grabbed section
    Drop,
    /// Abandon the drag
    Cancel,
    /// Write the preview HTML to the terminal
    Html,
    /// Print the preview
    Print,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum ItemAction {
    Add { section: Id },
    Set { section: Id, index: usize, value: String },
    Remove { section: Id, index: usize },
}

#[derive(Subcommand, Debug)]
enum SkillAction {
    Add { section: Id },
    Label { section: Id, index: usize, value: String },
    Value { section: Id, index: usize, value: String },
    Remove { section: Id, index: usize },
}

#[derive(Subcommand, Debug)]
enum EntryAction {
    Add { section: Id },
    Remove { section: Id, entry: Id },
    Title { section: Id, entry: Id, value: String },
    Subtitle { section: Id, entry: Id, value: String },
    /// Free-form date, for entries without structured dates
    Date { section: Id, entry: Id, value: String },
    /// Start month as YYYY-MM (omit to clear)
    Start { section: Id, entry: Id, value: Option<String> },
    /// End month as YYYY-MM (omit to clear)
    End { section: Id, entry: Id, value: Option<String> },
    /// Mark the entry as ongoing or not
    Current {
        section: Id,
        entry: Id,
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        value: bool,
    },
}

#[derive(Subcommand, Debug)]
enum BulletAction {
    Add { section: Id, entry: Id },
    Set { section: Id, entry: Id, index: usize, value: String },
    Remove { section: Id, entry: Id, index: usize },
}

impl ItemAction {
    fn into_edit(self) -> (Id, SectionEdit) {
        match self {
            ItemAction::Add { section } => (section, SectionEdit::AddItem),
            ItemAction::Set { section, index, value } => (section, SectionEdit::SetItem { index, value }),
            ItemAction::Remove { section, index } => (section, SectionEdit::RemoveItem { index }),
        }
    }
}

impl SkillAction {
    fn into_edit(self) -> (Id, SectionEdit) {
        match self {
            SkillAction::Add { section } => (section, SectionEdit::AddSkill),
            SkillAction::Label { section, index, value } => {
                (section, SectionEdit::SetSkillLabel { index, value })
            }
            SkillAction::Value { section, index, value } => {
                (section, SectionEdit::SetSkillValue { index, value })
            }
            SkillAction::Remove { section, index } => (section, SectionEdit::RemoveSkill { index }),
        }
    }
}

impl EntryAction {
    fn into_edit(self) -> (Id, SectionEdit) {
        match self {
            EntryAction::Add { section } => (section, SectionEdit::AddEntry),
            EntryAction::Remove { section, entry } => (section, SectionEdit::RemoveEntry { entry }),
            EntryAction::Title { section, entry, value } => {
                (section, SectionEdit::SetEntryTitle { entry, value })
            }
            EntryAction::Subtitle { section, entry, value } => {
                (section, SectionEdit::SetEntrySubtitle { entry, value })
            }
            EntryAction::Date { section, entry, value } => {
                (section, SectionEdit::SetEntryDate { entry, value })
            }
            EntryAction::Start { section, entry, value } => {
                (section, SectionEdit::SetStartDate { entry, value })
            }
            EntryAction::End { section, entry, value } => {
                (section, SectionEdit::SetEndDate { entry, value })
            }
            EntryAction::Current { section, entry, value } => {
                (section, SectionEdit::SetCurrent { entry, current: value })
            }
        }
    }
}

impl BulletAction {
    fn into_edit(self) -> (Id, SectionEdit) {
        match self {
            BulletAction::Add { section, entry } => (section, SectionEdit::AddBullet { entry }),
            BulletAction::Set { section, entry, index, value } => {
                (section, SectionEdit::SetBullet { entry, index, value })
            }
            BulletAction::Remove { section, entry, index } => {
                (section, SectionEdit::RemoveBullet { entry, index })
            }
        }
    }
}

/// Split a command line into words. Single or double quotes group words;
/// inside double quotes `\"` and `\\` are escapes.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => current.push(escaped),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err("unterminated double quote".to_string()),
                        },
                        Some(other) => current.push(other),
                        None => return Err("unterminated double quote".to_string()),
                    }
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(other) => current.push(other),
                        None => return Err("unterminated single quote".to_string()),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

// ============================================================================
// Session
// ============================================================================

/// Whether the session keeps reading after a command.
enum Flow {
    Continue,
    Quit,
}

pub struct Session<P: Printer> {
    store: Store,
    panel: EditorPanel,
    config: CvConfig,
    printer: P,
}

impl<P: Printer> Session<P> {
    pub fn new(doc: ResumeDocument, config: CvConfig, printer: P) -> Self {
        Self::with_panel(doc, config, printer, EditorPanel::default())
    }

    pub fn with_panel(doc: ResumeDocument, config: CvConfig, printer: P, panel: EditorPanel) -> Self {
        Self {
            store: Store::new(doc),
            panel,
            config,
            printer,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn panel(&self) -> &EditorPanel {
        &self.panel
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// The print-ready page for the current snapshot.
    pub fn render_preview(&self) -> String {
        preview::render_document(self.store.snapshot(), &self.config).into_string()
    }

    /// Read commands from `input` until `quit` or end of input.
    pub fn run(&mut self, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(), ShellError> {
        output::write_lines(out, &self.panel.render(self.store.snapshot()))?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            let words = match split_words(line.trim()) {
                Ok(words) if words.is_empty() => continue,
                Ok(words) => words,
                Err(msg) => {
                    writeln!(out, "error: {msg}")?;
                    continue;
                }
            };

            let command = match Line::try_parse_from(&words) {
                Ok(parsed) => parsed.command,
                Err(err) => {
                    write!(out, "{err}")?;
                    continue;
                }
            };
            debug!(?command, "command");

            if let Flow::Quit = self.execute(command, input, out)? {
                break;
            }
        }
        Ok(())
    }

    fn execute(
        &mut self,
        command: Command,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<Flow, ShellError> {
        let store = &mut self.store;
        let panel = &mut self.panel;

        match command {
            Command::Show => output::write_lines(out, &panel.render(store.snapshot()))?,
            Command::Set { field, value } => {
                report_changed(out, panel.set_personal_field(store, field, &value))?;
            }
            Command::Add { kind } => {
                let id = panel.add_section(store, kind);
                writeln!(out, "added {id}")?;
            }
            Command::Toggle { id } => match panel.toggle(store.snapshot(), &id) {
                Some(true) => writeln!(out, "expanded {id}")?,
                Some(false) => writeln!(out, "collapsed {id}")?,
                None => writeln!(out, "error: no section with id '{id}'")?,
            },
            Command::Title { id, title } => {
                self.apply_edit(out, &id, SectionEdit::SetTitle(title))?;
            }
            Command::Content { id, text } => {
                self.apply_edit(out, &id, SectionEdit::SetContent(text))?;
            }
            Command::Item { action } => {
                let (id, edit) = action.into_edit();
                self.apply_edit(out, &id, edit)?;
            }
            Command::Skill { action } => {
                let (id, edit) = action.into_edit();
                self.apply_edit(out, &id, edit)?;
            }
            Command::Entry { action } => {
                let (id, edit) = action.into_edit();
                self.apply_edit(out, &id, edit)?;
            }
            Command::Bullet { action } => {
                let (id, edit) = action.into_edit();
                self.apply_edit(out, &id, edit)?;
            }
            Command::Delete { id } => {
                let mut confirm = |prompt: &str| ask(input, out, prompt);
                match panel.delete_section(store, &id, &mut confirm) {
                    Ok(true) => writeln!(out, "deleted {id}")?,
                    Ok(false) => writeln!(out, "kept {id}")?,
                    Err(err) => writeln!(out, "error: {err}")?,
                }
            }
            Command::Move { from, to } => {
                report_changed(out, panel.move_section(store, &from, &to))?;
            }
            Command::Drag { id } => {
                if !panel.begin_drag(store.snapshot(), &id) {
                    writeln!(out, "error: cannot grab '{id}'")?;
                }
                write_drag_status(out, panel)?;
            }
            Command::Over { id } => {
                panel.drag_over(store.snapshot(), id.as_ref());
                write_drag_status(out, panel)?;
            }
            Command::Hover { line } => {
                panel.drag_hover(store.snapshot(), line);
                write_drag_status(out, panel)?;
            }
            Command::Up => {
                panel.drag_nudge(store.snapshot(), -1);
                write_drag_status(out, panel)?;
            }
            Command::Down => {
                panel.drag_nudge(store.snapshot(), 1);
                write_drag_status(out, panel)?;
            }
            Command::Drop => match panel.end_drag(store) {
                Some(request) => writeln!(out, "moved {} → {}", request.from, request.to)?,
                None => writeln!(out, "unchanged")?,
            },
            Command::Cancel => {
                panel.cancel_drag();
                writeln!(out, "drag cancelled")?;
            }
            Command::Html => writeln!(out, "{}", self.render_preview())?,
            Command::Print => {
                let html = self.render_preview();
                let path = self.printer.print(&html)?;
                writeln!(out, "{}", output::format_printed(&path, html.len()))?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn apply_edit(&mut self, out: &mut dyn Write, id: &Id, edit: SectionEdit) -> io::Result<()> {
        match self.panel.edit(&mut self.store, id, &edit) {
            Ok(changed) => report_changed(out, changed),
            Err(err) => writeln!(out, "error: {err}"),
        }
    }
}

fn report_changed(out: &mut dyn Write, changed: bool) -> io::Result<()> {
    writeln!(out, "{}", if changed { "ok" } else { "unchanged" })
}

fn write_drag_status(out: &mut dyn Write, panel: &EditorPanel) -> io::Result<()> {
    match output::format_drag_status(panel.drag().state()) {
        Some(status) => writeln!(out, "{status}"),
        None => Ok(()),
    }
}

/// Ask a yes/no question on the session's own streams. Defaults to no.
fn ask(input: &mut dyn BufRead, out: &mut dyn Write, prompt: &str) -> bool {
    let mut answer = String::new();
    let asked = write!(out, "{prompt} [y/N] ")
        .and_then(|()| out.flush())
        .and_then(|()| input.read_line(&mut answer));
    match asked {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(err) => {
            debug!(%err, "confirmation failed, treating as no");
            false
        }
    }
}
