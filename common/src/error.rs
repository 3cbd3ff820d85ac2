//! Validation failures surfaced back to the person filling a form.
//!
//! Every variant carries enough context to re-display the form with a precise,
//! human-readable message. None of them imply any state was mutated.

use thiserror::Error;

/// Maximum length, in characters, of a template title.
pub const MAX_TITLE_CHARS: usize = 200;
/// Maximum length, in characters, of a template category.
pub const MAX_CATEGORY_CHARS: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required template field was blank after trimming.
    #[error("All fields are required!")]
    MissingFields,

    /// A field exceeded its length bound.
    #[error("{field} must be {max} characters or less!")]
    TooLong { field: &'static str, max: usize },

    /// A date placeholder received something other than `YYYY-MM-DD`.
    #[error("Invalid date format for {}. Please use a valid date.", humanize(.0))]
    InvalidDate(String),

    /// A currency placeholder received something that is not a number.
    #[error("Invalid number format for {}. Please enter a valid number.", humanize(.0))]
    InvalidNumber(String),
}

impl ValidationError {
    /// The placeholder name the failure belongs to, when it is about a variable.
    pub fn variable(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidDate(name) | ValidationError::InvalidNumber(name) => {
                Some(name)
            }
            _ => None,
        }
    }
}

/// Turns a placeholder name into a form label: underscores become spaces and each
/// word starts with a capital letter (`due_date` -> `Due Date`).
pub fn humanize(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut inside_word = false;
    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if inside_word {
                label.extend(ch.to_lowercase());
            } else {
                label.extend(ch.to_uppercase());
            }
            inside_word = true;
        } else {
            label.push(ch);
            inside_word = false;
        }
    }
    label
}
