use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{FormErrors, checkbox_checked, non_blank, parse_datetime_local, validate_text, validate_title};

/// Raw payload of the quick create form.
///
/// Every field is optional so a partial submission still deserializes and
/// the entered values can be echoed back into the re-rendered form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct QuickPostForm {
    pub title: Option<String>,
    pub text: Option<String>,
    pub is_active: Option<String>,
    pub created_at: Option<String>,
}

/// A quick-form submission that passed validation.
#[derive(Debug, PartialEq)]
pub struct NewQuickPost {
    pub title: String,
    pub text: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl QuickPostForm {
    pub fn validate(&self) -> Result<NewQuickPost, FormErrors> {
        let mut errors = FormErrors::default();

        let title = validate_title(self.title.as_deref(), &mut errors);
        let text = validate_text(self.text.as_deref(), &mut errors);

        // The checkbox itself is required on this form: an unticked box
        // arrives as an absent field and fails validation.
        let is_active = checkbox_checked(self.is_active.as_deref());
        if !is_active {
            errors.add("is_active", "This field must be checked");
        }

        let created_at = match non_blank(self.created_at.as_deref()) {
            None => {
                errors.add("created_at", "Create date is required");
                None
            }
            Some(raw) => match parse_datetime_local(raw) {
                None => {
                    errors.add("created_at", "Enter a valid date and time");
                    None
                }
                Some(dt) => Some(dt),
            },
        };

        match (title, text, created_at) {
            (Some(title), Some(text), Some(created_at)) if errors.is_empty() => Ok(NewQuickPost {
                title,
                text,
                is_active,
                created_at,
            }),
            _ => Err(errors),
        }
    }

    // Template accessors: echo previously entered values back into widgets.

    pub fn title_value(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn text_value(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn created_at_value(&self) -> &str {
        self.created_at.as_deref().unwrap_or("")
    }

    pub fn is_checked(&self) -> bool {
        checkbox_checked(self.is_active.as_deref())
    }
}

/// Raw payload of the compose form, collected field by field from the
/// multipart body. The banner file is carried separately by the handler.
#[derive(Debug, Default, Clone)]
pub struct ComposePostForm {
    pub title: Option<String>,
    pub text: Option<String>,
    pub is_active: Option<String>,
    pub category: Option<String>,
    pub document: Option<String>,
    pub authors: Vec<String>,
}

/// Compose-form fields that passed pure validation. Referential checks
/// (do the chosen category/document/authors exist?) happen in the handler.
#[derive(Debug, PartialEq)]
pub struct ComposeFields {
    pub title: String,
    pub text: String,
    pub is_active: bool,
    pub category_id: Option<i32>,
    pub document_id: Option<i32>,
    pub author_ids: Vec<i32>,
}

impl ComposePostForm {
    pub fn validate(&self) -> Result<ComposeFields, FormErrors> {
        let mut errors = FormErrors::default();

        let title = validate_title(self.title.as_deref(), &mut errors);
        let text = validate_text(self.text.as_deref(), &mut errors);

        // Optional on this form; an absent checkbox means a draft post.
        let is_active = checkbox_checked(self.is_active.as_deref());

        let category_id = match non_blank(self.category.as_deref()) {
            None => {
                errors.add("category", "Category is required");
                None
            }
            Some(raw) => match raw.parse::<i32>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("category", "Select a valid category");
                    None
                }
            },
        };

        let document_id = match non_blank(self.document.as_deref()) {
            None => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("document", "Select a valid document");
                    None
                }
            },
        };

        let mut author_ids = Vec::new();
        for raw in self.authors.iter().filter_map(|a| non_blank(Some(a))) {
            match raw.parse::<i32>() {
                Ok(id) if !author_ids.contains(&id) => author_ids.push(id),
                Ok(_) => {} // Duplicate selection, keep the first.
                Err(_) => errors.add("authors", "Select valid authors"),
            }
        }
        if author_ids.is_empty() && errors.get("authors").is_none() {
            errors.add("authors", "Choose at least one author");
        }

        match (title, text, category_id) {
            (Some(title), Some(text), Some(category_id)) if errors.is_empty() => {
                Ok(ComposeFields {
                    title,
                    text,
                    is_active,
                    category_id: Some(category_id),
                    document_id,
                    author_ids,
                })
            }
            _ => Err(errors),
        }
    }

    // Template accessors.

    pub fn title_value(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn text_value(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn is_checked(&self) -> bool {
        checkbox_checked(self.is_active.as_deref())
    }

    pub fn category_selected(&self, id: i32) -> bool {
        selected_id(self.category.as_deref()) == Some(id)
    }

    pub fn document_selected(&self, id: i32) -> bool {
        selected_id(self.document.as_deref()) == Some(id)
    }

    pub fn author_selected(&self, id: i32) -> bool {
        self.authors
            .iter()
            .any(|raw| selected_id(Some(raw)) == Some(id))
    }
}

fn selected_id(raw: Option<&str>) -> Option<i32> {
    non_blank(raw).and_then(|s| s.parse().ok())
}
