//! The résumé document model.
//!
//! A [`ResumeDocument`] is personal info plus an ordered list of typed
//! [`Section`]s. These are plain values: nothing in this crate mutates a live
//! document in place. Every edit in [`crate::ops`] builds a new document from
//! the previous one, so two snapshots can always be compared for change.
//!
//! ## JSON Shape
//!
//! Documents serialize with camelCase keys and a `type` discriminator on each
//! section, which is the shape seed files use:
//!
//! ```json
//! {
//!   "personalInfo": { "fullName": "Jane Doe", "email": "jane@example.com" },
//!   "sections": [
//!     { "id": "summary", "title": "Summary", "type": "text", "content": "..." },
//!     { "id": "skills", "title": "Skills", "type": "skills",
//!       "list": [{ "label": "Languages", "value": "Rust, Go" }] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a section, or of an entry within its section.
///
/// Seeds may carry integer ids (`"id": 1`); those are accepted and kept as
/// their decimal string. Ids always serialize as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Id(s),
            RawId::Signed(n) => Id(n.to_string()),
            RawId::Unsigned(n) => Id(n.to_string()),
        })
    }
}

/// Contact and identity details shown in the page header.
///
/// No field is validated. The optional fields are `None` when cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub email: String,
    pub phone: String,
    pub location: String,
    /// LinkedIn display text, e.g. `linkedin.com/in/jane`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    /// GitHub display text, e.g. `github.com/jane`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

/// One editable field of [`PersonalInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    FullName,
    Title,
    Email,
    Phone,
    Location,
    Linkedin,
    LinkedinUrl,
    Github,
    GithubUrl,
}

impl PersonalField {
    pub const ALL: [PersonalField; 9] = [
        PersonalField::FullName,
        PersonalField::Title,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Linkedin,
        PersonalField::LinkedinUrl,
        PersonalField::Github,
        PersonalField::GithubUrl,
    ];

    /// The field's key as it appears in JSON.
    pub fn key(self) -> &'static str {
        match self {
            PersonalField::FullName => "fullName",
            PersonalField::Title => "title",
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::Location => "location",
            PersonalField::Linkedin => "linkedin",
            PersonalField::LinkedinUrl => "linkedinUrl",
            PersonalField::Github => "github",
            PersonalField::GithubUrl => "githubUrl",
        }
    }
}

impl fmt::Display for PersonalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PersonalField {
    type Err = String;

    /// Accepts the JSON key case-insensitively, with or without dashes
    /// (`fullName`, `full-name`, `fullname`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace(['-', '_'], "").to_ascii_lowercase();
        PersonalField::ALL
            .into_iter()
            .find(|field| field.key().to_ascii_lowercase() == wanted)
            .ok_or_else(|| {
                let keys: Vec<&str> = PersonalField::ALL.iter().map(|f| f.key()).collect();
                format!("unknown field '{s}', expected one of: {}", keys.join(", "))
            })
    }
}

impl PersonalInfo {
    /// Current value of a field, empty when unset.
    pub fn get(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::FullName => &self.full_name,
            PersonalField::Title => self.title.as_deref().unwrap_or_default(),
            PersonalField::Email => &self.email,
            PersonalField::Phone => &self.phone,
            PersonalField::Location => &self.location,
            PersonalField::Linkedin => self.linkedin.as_deref().unwrap_or_default(),
            PersonalField::LinkedinUrl => self.linkedin_url.as_deref().unwrap_or_default(),
            PersonalField::Github => self.github.as_deref().unwrap_or_default(),
            PersonalField::GithubUrl => self.github_url.as_deref().unwrap_or_default(),
        }
    }

    /// A copy with one field replaced. An empty value clears optional fields.
    pub fn with_field(&self, field: PersonalField, value: &str) -> PersonalInfo {
        let optional = || (!value.is_empty()).then(|| value.to_string());
        let mut next = self.clone();
        match field {
            PersonalField::FullName => next.full_name = value.to_string(),
            PersonalField::Title => next.title = optional(),
            PersonalField::Email => next.email = value.to_string(),
            PersonalField::Phone => next.phone = value.to_string(),
            PersonalField::Location => next.location = value.to_string(),
            PersonalField::Linkedin => next.linkedin = optional(),
            PersonalField::LinkedinUrl => next.linkedin_url = optional(),
            PersonalField::Github => next.github = optional(),
            PersonalField::GithubUrl => next.github_url = optional(),
        }
        next
    }
}

/// A titled block of the résumé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: Id,
    /// Shown both in the editor header and on the rendered page.
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

/// Variant payload of a [`Section`], tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionBody {
    /// Free-form paragraph.
    Text { content: String },
    /// Bullet list; order is meaningful.
    List { items: Vec<String> },
    /// Dated records such as jobs or degrees.
    Entries { entries: Vec<Entry> },
    /// Label/value pairs.
    Skills { list: Vec<Skill> },
    /// Raw markup, rendered without escaping. Never produced by the editor.
    CustomHtml { content: String },
}

/// The section kinds the editor can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Text,
    List,
    Entries,
    Skills,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Text,
        SectionKind::List,
        SectionKind::Entries,
        SectionKind::Skills,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Text => "text",
            SectionKind::List => "list",
            SectionKind::Entries => "entries",
            SectionKind::Skills => "skills",
        }
    }

    /// Body of a freshly added section of this kind.
    pub fn default_body(self) -> SectionBody {
        match self {
            SectionKind::Text => SectionBody::Text {
                content: "New text content...".to_string(),
            },
            SectionKind::List => SectionBody::List {
                items: vec!["New item".to_string()],
            },
            SectionKind::Entries => SectionBody::Entries {
                entries: Vec::new(),
            },
            SectionKind::Skills => SectionBody::Skills {
                list: vec![Skill::new("Skill", "Details")],
            },
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown section type '{s}', expected text, list, entries or skills"))
    }
}

impl SectionBody {
    /// The editable kind of this body; `None` for raw HTML.
    pub fn kind(&self) -> Option<SectionKind> {
        match self {
            SectionBody::Text { .. } => Some(SectionKind::Text),
            SectionBody::List { .. } => Some(SectionKind::List),
            SectionBody::Entries { .. } => Some(SectionKind::Entries),
            SectionBody::Skills { .. } => Some(SectionKind::Skills),
            SectionBody::CustomHtml { .. } => None,
        }
    }

    /// The `type` tag as written in JSON.
    pub fn type_name(&self) -> &'static str {
        match self.kind() {
            Some(kind) => kind.name(),
            None => "custom_html",
        }
    }
}

impl Section {
    pub fn new(id: impl Into<Id>, title: impl Into<String>, body: SectionBody) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body,
        }
    }

    /// Look up an entry by id. Always `None` for non-entries sections.
    pub fn entry(&self, id: &Id) -> Option<&Entry> {
        match &self.body {
            SectionBody::Entries { entries } => entries.iter().find(|e| &e.id == id),
            _ => None,
        }
    }
}

/// A dated record inside an `entries` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entry {
    pub id: Id,
    pub title: String,
    pub subtitle: String,
    /// Display string. Derived from the structured dates once `start_date` is set.
    pub date: String,
    /// ISO year-month, e.g. `2020-06`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_current: bool,
    pub description: Vec<String>,
}

impl Entry {
    /// Whether `date` is derived from the structured date fields.
    pub fn uses_structured_dates(&self) -> bool {
        self.start_date.is_some()
    }
}

/// One label/value row of a `skills` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub label: String,
    pub value: String,
}

impl Skill {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The whole résumé: the single source of truth for editor and preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ResumeDocument {
    /// Index of the first section with this id.
    pub fn position(&self, id: &Id) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    pub fn section(&self, id: &Id) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn contains_section(&self, id: &Id) -> bool {
        self.position(id).is_some()
    }

    /// Section ids in document order.
    pub fn section_ids(&self) -> Vec<Id> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }
}
