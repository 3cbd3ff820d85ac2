use serde::{Deserialize, Serialize};

/// How a placeholder's raw input is interpreted before substitution.
///
/// Templates may declare a kind per placeholder; undeclared names fall back to
/// [`crate::field::classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Passed through unchanged.
    Plain,
    /// `YYYY-MM-DD` input, rendered as `Month DD, YYYY`.
    Date,
    /// Numeric input prefixed with a currency symbol.
    Currency {
        /// Symbol used when the form does not send a `{name}_currency` companion.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        symbol: Option<String>,
    },
}

/// A form field derived from one placeholder of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceHolder {
    /// The placeholder name exactly as written between the braces.
    pub name: String,
    /// Human-readable label (`due_date` -> `Due Date`).
    pub label: String,
    pub kind: FieldKind,
}
