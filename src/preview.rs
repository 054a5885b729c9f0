//! Print-ready HTML preview.
//!
//! A pure projection of a [`ResumeDocument`]: the whole page is re-derived
//! from the latest snapshot on every change, with no cached intermediate
//! state. Nothing here can mutate the document.
//!
//! ## Page Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 Jane Doe                    │  h1
//! │             Backend Engineer                │  p.job-title (optional)
//! │  ✉ jane@… | ☎ +1 555… | ⌖ Lisbon | in …     │  div.contact-info
//! │                                             │
//! │  EXPERIENCE ─────────────────────────────── │  div.section-header
//! │  Northwind, Senior Engineer   Jun 2021 - …  │  div.entry
//! │   • Led the rewrite…                        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The contact line only carries fields that are set, joined by a `|`
//! separator with none at either end.
//!
//! ## Skills Sections
//!
//! A skills section whose id is listed in `preview.inline_skill_sections`
//! (by default just `languages`) renders as one comma-joined line of
//! `label (value)`. Any other skills section gets one `label: value` row per
//! pair.
//!
//! ## Raw HTML
//!
//! `custom_html` sections are emitted verbatim via [`PreEscaped`]. This is the
//! one place interpolated text is not escaped; whatever produces that content
//! is responsible for making it safe. Everything else goes through Maud's
//! escaping.

use crate::config::{self, CvConfig, PreviewConfig};
use crate::model::{Entry, PersonalInfo, ResumeDocument, Section, SectionBody, Skill};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/preview.css");

/// One item of the header's contact line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem<'a> {
    /// Icon classes from the configured icon stylesheet.
    pub icon: &'static str,
    pub text: &'a str,
    pub href: Option<String>,
    /// Opens in a new tab.
    pub external: bool,
}

/// Contact items in display order, skipping empty fields.
pub fn contact_items(info: &PersonalInfo) -> Vec<ContactItem<'_>> {
    let link_target = |url: &Option<String>| {
        Some(
            url.as_deref()
                .filter(|u| !u.is_empty())
                .unwrap_or("#")
                .to_string(),
        )
    };

    let candidates = [
        ContactItem {
            icon: "far fa-envelope",
            text: &info.email,
            href: Some(format!("mailto:{}", info.email)),
            external: false,
        },
        ContactItem {
            icon: "fas fa-phone",
            text: &info.phone,
            href: None,
            external: false,
        },
        ContactItem {
            icon: "fas fa-map-marker-alt",
            text: &info.location,
            href: None,
            external: false,
        },
        ContactItem {
            icon: "fab fa-linkedin",
            text: info.linkedin.as_deref().unwrap_or_default(),
            href: link_target(&info.linkedin_url),
            external: true,
        },
        ContactItem {
            icon: "fab fa-github",
            text: info.github.as_deref().unwrap_or_default(),
            href: link_target(&info.github_url),
            external: true,
        },
    ];

    candidates
        .into_iter()
        .filter(|item| !item.text.is_empty())
        .collect()
}

/// The contact line as plain text: `a | b | c`.
pub fn contact_line_text(info: &PersonalInfo) -> String {
    contact_items(info)
        .iter()
        .map(|item| item.text)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Renders a complete HTML document around the page, ready to print.
pub fn render_document(doc: &ResumeDocument, config: &CvConfig) -> Markup {
    let css = format!("{}\n\n{}", config::generate_theme_css(config), CSS_STATIC);
    let title = if doc.personal_info.full_name.is_empty() {
        "Résumé"
    } else {
        doc.personal_info.full_name.as_str()
    };
    let icon_stylesheet = config
        .preview
        .show_icons
        .then_some(config.preview.icon_stylesheet.as_str());

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if let Some(href) = icon_stylesheet {
                    link rel="stylesheet" href=(href);
                }
                style { (PreEscaped(css)) }
            }
            body {
                (render_page(doc, &config.preview))
            }
        }
    }
}

/// Renders the page itself: header followed by every section in order.
pub fn render_page(doc: &ResumeDocument, preview: &PreviewConfig) -> Markup {
    html! {
        div.page id="resume-preview" {
            (render_header(&doc.personal_info, preview))
            @for section in &doc.sections {
                (render_section(section, preview))
            }
        }
    }
}

fn render_header(info: &PersonalInfo, preview: &PreviewConfig) -> Markup {
    let contacts = contact_items(info);
    let job_title = info.title.as_deref().filter(|t| !t.is_empty());

    html! {
        header {
            h1 { (info.full_name) }
            @if let Some(title) = job_title {
                p.job-title { (title) }
            }
            div.contact-info {
                @for (idx, item) in contacts.iter().enumerate() {
                    @if idx > 0 {
                        span.separator { "|" }
                    }
                    span.contact-item {
                        @if preview.show_icons {
                            i class=(item.icon) {}
                            " "
                        }
                        @if let Some(href) = &item.href {
                            a href=(href)
                                target=[item.external.then_some("_blank")]
                                rel=[item.external.then_some("noreferrer")] {
                                (item.text)
                            }
                        } @else {
                            (item.text)
                        }
                    }
                }
            }
        }
    }
}

fn render_section(section: &Section, preview: &PreviewConfig) -> Markup {
    html! {
        div.section {
            div.section-header {
                div.section-title { (section.title) }
                div.line {}
            }
            (render_body(section, preview))
        }
    }
}

fn render_body(section: &Section, preview: &PreviewConfig) -> Markup {
    match &section.body {
        SectionBody::Text { content } => html! {
            div.content { (content) }
        },
        SectionBody::List { items } => html! {
            ul {
                @for item in items {
                    li { (item) }
                }
            }
        },
        SectionBody::Entries { entries } => html! {
            @for entry in entries {
                (render_entry(entry))
            }
        },
        SectionBody::Skills { list } if preview.is_inline_skills(section.id.as_str()) => {
            render_inline_skills(list)
        }
        SectionBody::Skills { list } => html! {
            @for skill in list {
                div.skill-item {
                    span.skill-label { (skill.label) ":" }
                    " "
                    (skill.value)
                }
            }
        },
        SectionBody::CustomHtml { content } => html! {
            div.custom-html { (PreEscaped(content)) }
        },
    }
}

/// Title and subtitle on the left, date right-aligned, bullets below.
fn render_entry(entry: &Entry) -> Markup {
    let has_subtitle = !entry.subtitle.is_empty();

    html! {
        div.entry {
            div.entry-header {
                div {
                    span.entry-title {
                        (entry.title)
                        @if has_subtitle { "," }
                    }
                    @if has_subtitle {
                        span.entry-subtitle { " " (entry.subtitle) }
                    }
                }
                @if !entry.date.is_empty() {
                    div.date { (entry.date) }
                }
            }
            @if !entry.description.is_empty() {
                ul {
                    @for bullet in &entry.description {
                        li { (bullet) }
                    }
                }
            }
        }
    }
}

/// `English (Native), Portuguese (Fluent)`
fn render_inline_skills(list: &[Skill]) -> Markup {
    html! {
        div.languages-inline {
            @for (idx, skill) in list.iter().enumerate() {
                span.language-item {
                    span.skill-label { (skill.label) }
                    @if !skill.value.is_empty() {
                        span.skill-value { " (" (skill.value) ")" }
                    }
                    @if idx + 1 < list.len() {
                        span.separator { ", " }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
