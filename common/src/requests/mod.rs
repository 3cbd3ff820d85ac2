use crate::error::{MAX_CATEGORY_CHARS, MAX_TITLE_CHARS, ValidationError};
use crate::model::place_holder::FieldKind;
use crate::model::template::TemplateDraft;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Title given to a saved document when the client sends none.
pub const DEFAULT_DOCUMENT_TITLE: &str = "contract";

#[derive(Deserialize, Debug, Clone)]
/// Payload for creating or updating a template.
pub struct SaveTemplateRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldKind>,
}

impl SaveTemplateRequest {
    /// Trims the text fields and checks they are present and within bounds.
    pub fn validate(&self) -> Result<TemplateDraft, ValidationError> {
        let title = self.title.trim();
        let category = self.category.trim();
        let content = self.content.trim();

        if title.is_empty() || category.is_empty() || content.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(ValidationError::TooLong {
                field: "Template title",
                max: MAX_TITLE_CHARS,
            });
        }
        if category.chars().count() > MAX_CATEGORY_CHARS {
            return Err(ValidationError::TooLong {
                field: "Category name",
                max: MAX_CATEGORY_CHARS,
            });
        }

        Ok(TemplateDraft {
            title: title.to_string(),
            category: category.to_string(),
            content: content.to_string(),
            fields: self.fields.clone(),
        })
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
/// Form submission for previewing a filled template.
///
/// `values` holds one entry per placeholder plus optional `{name}_currency`
/// companions for currency fields.
pub struct GenerateRequest {
    #[serde(default)]
    pub values: HashMap<String, String>,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
/// Request to render and store a previewed document.
pub struct SaveDocumentRequest {
    pub template_id: i64,
    #[serde(default = "default_document_title")]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

fn default_document_title() -> String {
    DEFAULT_DOCUMENT_TITLE.to_string()
}
