//! Preview and export configuration.
//!
//! Handles loading, validating, and merging `cv.toml`. Stock defaults are the
//! base layer; a user file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [page]
//! size = "A4"               # "A4" or "Letter"
//! margin = "14mm"           # Printed page margin (CSS length)
//!
//! [theme]
//! font_family = "'Helvetica Neue', Arial, sans-serif"
//! font_size = "10.5pt"
//! text = "#222222"
//! text_muted = "#555555"
//! accent = "#1f3a5f"        # Section titles and rules
//! link = "#1f3a5f"
//!
//! [preview]
//! inline_skill_sections = ["languages"]  # Skills sections rendered as one comma-joined line
//! show_icons = true
//! icon_stylesheet = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"
//! zoom = 1.0                # On-screen scale; printing always uses 1.0
//!
//! [export]
//! output = "resume.html"    # Where `print` writes the rendered page
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `cv.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CvConfig {
    /// Printed page geometry.
    pub page: PageConfig,
    /// Typography and colors.
    pub theme: ThemeConfig,
    /// How sections are projected into the preview.
    pub preview: PreviewConfig,
    /// Where exports go.
    pub export: ExportConfig,
}

impl CvConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.25..=4.0).contains(&self.preview.zoom) {
            return Err(ConfigError::Validation(
                "preview.zoom must be between 0.25 and 4.0".into(),
            ));
        }
        if self.export.output.trim().is_empty() {
            return Err(ConfigError::Validation(
                "export.output must not be empty".into(),
            ));
        }
        if self.page.margin.trim().is_empty() {
            return Err(ConfigError::Validation(
                "page.margin must not be empty".into(),
            ));
        }
        // These land verbatim inside the `<style>` element.
        let css_values = [
            ("page.margin", &self.page.margin),
            ("theme.font_family", &self.theme.font_family),
            ("theme.font_size", &self.theme.font_size),
            ("theme.text", &self.theme.text),
            ("theme.text_muted", &self.theme.text_muted),
            ("theme.accent", &self.theme.accent),
            ("theme.link", &self.theme.link),
        ];
        if let Some((key, _)) = css_values.iter().find(|(_, value)| value.contains('<')) {
            return Err(ConfigError::Validation(format!(
                "{key} must not contain '<'"
            )));
        }
        Ok(())
    }
}

/// Paper size for the `@page` rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    pub fn css(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "letter",
        }
    }

    /// Page width as a CSS length, for the on-screen sheet.
    pub fn width(self) -> &'static str {
        match self {
            PageSize::A4 => "210mm",
            PageSize::Letter => "8.5in",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub size: PageSize,
    /// Printed page margin (CSS length).
    pub margin: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: "14mm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub font_family: String,
    pub font_size: String,
    pub text: String,
    /// Secondary text: job titles, dates, contact line.
    pub text_muted: String,
    /// Section titles and their rules.
    pub accent: String,
    pub link: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            font_family: "'Helvetica Neue', Arial, sans-serif".to_string(),
            font_size: "10.5pt".to_string(),
            text: "#222222".to_string(),
            text_muted: "#555555".to_string(),
            accent: "#1f3a5f".to_string(),
            link: "#1f3a5f".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Ids of skills sections rendered inline as `label (value), ...`.
    pub inline_skill_sections: Vec<String>,
    /// Render an icon in front of each contact item.
    pub show_icons: bool,
    /// Stylesheet providing the icon classes. Linked only when icons are on.
    pub icon_stylesheet: String,
    /// On-screen scale of the page. Printing ignores it.
    pub zoom: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            inline_skill_sections: vec!["languages".to_string()],
            show_icons: true,
            icon_stylesheet:
                "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"
                    .to_string(),
            zoom: 1.0,
        }
    }
}

impl PreviewConfig {
    pub fn is_inline_skills(&self, section_id: &str) -> bool {
        self.inline_skill_sections.iter().any(|id| id == section_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Where the print action writes the rendered page.
    pub output: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: "resume.html".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(CvConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<CvConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CvConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`.
///
/// A missing file yields the stock defaults. A file that exists but does not
/// parse, or has unknown keys, is an error.
pub fn load_config(path: &Path) -> Result<CvConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `cv.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# cv-builder Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Printed page
# ---------------------------------------------------------------------------
[page]
# Paper size: "A4" or "Letter".
size = "A4"

# Page margin when printing (CSS length).
margin = "14mm"

# ---------------------------------------------------------------------------
# Typography and colors
# ---------------------------------------------------------------------------
[theme]
font_family = "'Helvetica Neue', Arial, sans-serif"
font_size = "10.5pt"
text = "#222222"
text_muted = "#555555"    # Job titles, dates, contact line
accent = "#1f3a5f"        # Section titles and rules
link = "#1f3a5f"

# ---------------------------------------------------------------------------
# Preview
# ---------------------------------------------------------------------------
[preview]
# Skills sections (by id) rendered as a single line: "English (Native), ..."
# All other skills sections get one "Label: value" row per pair.
inline_skill_sections = ["languages"]

# Icons in front of contact items, and the stylesheet that provides them.
show_icons = true
icon_stylesheet = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"

# On-screen scale of the page (0.25 - 4.0). Printing always uses 1.0.
zoom = 1.0

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# Where the `print` command writes the rendered page.
output = "resume.html"
"##
}

/// Generate CSS custom properties and the `@page` rule from config.
pub fn generate_theme_css(config: &CvConfig) -> String {
    format!(
        r#":root {{
    --font-family: {font_family};
    --font-size: {font_size};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --color-link: {link};
    --page-width: {page_width};
    --page-margin: {margin};
    --zoom: {zoom};
}}

@page {{
    size: {page_size};
    margin: {margin};
}}"#,
        font_family = config.theme.font_family,
        font_size = config.theme.font_size,
        text = config.theme.text,
        text_muted = config.theme.text_muted,
        accent = config.theme.accent,
        link = config.theme.link,
        page_width = config.page.size.width(),
        page_size = config.page.size.css(),
        margin = config.page.margin,
        zoom = config.preview.zoom,
    )
}
