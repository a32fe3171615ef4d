pub mod post;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Maximum title length, in characters.
pub const TITLE_MAX: usize = 255;

/// Per-field validation errors collected while checking a submitted form.
///
/// Kept as ordered `(field, message)` pairs; templates look messages up by
/// field name to render them inline next to the widget.
#[derive(Debug, Default)]
pub struct FormErrors {
    errors: Vec<(&'static str, String)>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    /// First error message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

/// Treat whitespace-only input as missing.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Whether an HTML checkbox was ticked. Browsers send `on` for a checked
/// box and omit the field entirely otherwise.
pub fn checkbox_checked(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("on" | "true" | "1"))
}

/// Parse a `datetime-local` input value as a UTC timestamp.
///
/// Browsers send `YYYY-MM-DDTHH:MM`, with seconds only when the control
/// was stepped down to them.
pub fn parse_datetime_local(value: &str) -> Option<DateTime<Utc>> {
    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value.trim(), f).ok())
        .map(|naive| naive.and_utc())
}

/// Validate a trimmed, required title field.
pub fn validate_title(title: Option<&str>, errors: &mut FormErrors) -> Option<String> {
    match non_blank(title) {
        None => {
            errors.add("title", "Title is required");
            None
        }
        Some(t) if t.chars().count() > TITLE_MAX => {
            errors.add("title", format!("Title must be at most {TITLE_MAX} characters"));
            None
        }
        Some(t) => Some(t.to_string()),
    }
}

/// Validate a required free-text field.
pub fn validate_text(text: Option<&str>, errors: &mut FormErrors) -> Option<String> {
    match non_blank(text) {
        None => {
            errors.add("text", "Text is required");
            None
        }
        Some(t) => Some(t.to_string()),
    }
}
