//! Entry date display.
//!
//! Entries can carry structured dates (`startDate`, `endDate` as ISO
//! year-months, plus an `isCurrent` flag). Whenever one of those changes, the
//! display string is re-derived:
//!
//! ```text
//! 2020-06 .. 2023-01            →  "Jun 2020 - Jan 2023"
//! 2020-06 .. (current)          →  "Jun 2020 - Present"
//! 2020-06 .. (no end)           →  "Jun 2020 - Present"
//! (no start)                    →  previous display string kept
//! ```
//!
//! The derivation is a pure function of its three inputs.

use jiff::civil::Date;

/// Shown in place of the end date for ongoing positions.
pub const PRESENT: &str = "Present";

/// Parse an ISO year-month (`2020-06`). Full dates (`2020-06-15`) are accepted too.
pub fn parse_year_month(value: &str) -> Option<Date> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Date>()
        .ok()
        .or_else(|| format!("{trimmed}-01").parse::<Date>().ok())
}

/// Render a year-month as abbreviated month and four-digit year (`Jun 2020`).
///
/// Values that are not a year-month are returned trimmed but otherwise as typed.
pub fn format_year_month(value: &str) -> String {
    match parse_year_month(value) {
        Some(date) => date.strftime("%b %Y").to_string(),
        None => value.trim().to_string(),
    }
}

/// Derive the display string, or `None` when there is no start date.
pub fn derive_display(start: Option<&str>, end: Option<&str>, is_current: bool) -> Option<String> {
    let start = start.map(str::trim).filter(|s| !s.is_empty())?;
    let end = match end.map(str::trim).filter(|e| !e.is_empty()) {
        Some(end) if !is_current => format_year_month(end),
        _ => PRESENT.to_string(),
    };
    Some(format!("{} - {end}", format_year_month(start)))
}
