//! Field interpretation: turning raw form input into the text substituted for a
//! placeholder.
//!
//! Each placeholder has a [`FieldKind`]. A template may declare it explicitly;
//! otherwise it is guessed from the placeholder name by [`classify`]:
//!
//! - names containing `date` are dates (`2025-03-14` becomes `March 14, 2025`),
//! - names containing one of [`CURRENCY_KEYWORDS`] are amounts (`1500` becomes `$1500`),
//! - everything else is plain text.
//!
//! The guess only looks at the name, so `payment_method` is treated as an amount.
//! Templates that hit this declare the field as `Plain`.

use crate::error::ValidationError;
use crate::model::place_holder::FieldKind;
use crate::model::variable::Variable;
use crate::placeholder;
use chrono::NaiveDate;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Substrings that mark a placeholder name as a currency amount.
pub const CURRENCY_KEYWORDS: [&str; 7] = [
    "amount", "price", "fee", "cost", "salary", "rent", "payment",
];

/// Symbol used when neither the form nor the template supplies one.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

const CURRENCY_COMPANION_SUFFIX: &str = "_currency";
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const DATE_OUTPUT_FORMAT: &str = "%B %d, %Y";

/// Guesses the kind of a placeholder from its name alone.
pub fn classify(name: &str) -> FieldKind {
    let lowered = name.to_lowercase();
    if lowered.contains("date") {
        FieldKind::Date
    } else if CURRENCY_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        FieldKind::Currency { symbol: None }
    } else {
        FieldKind::Plain
    }
}

/// The declared kind of `name`, or the name-based guess when nothing is declared.
pub fn kind_for(name: &str, declared: &BTreeMap<String, FieldKind>) -> FieldKind {
    declared
        .get(name)
        .cloned()
        .unwrap_or_else(|| classify(name))
}

/// Name of the form input carrying the currency symbol for `name`.
pub fn currency_companion(name: &str) -> String {
    format!("{name}{CURRENCY_COMPANION_SUFFIX}")
}

/// Converts one raw input into its final text.
///
/// `inputs` is the whole submitted form; only currency fields look at it, for their
/// `{name}_currency` companion. Empty input is always accepted and yields an empty
/// value.
///
/// Dates must be `YYYY-MM-DD` with a four-digit year. Amounts must be finite numbers:
/// `nan`, `inf` and `infinity` parse as `f64` but are rejected.
pub fn resolve(
    name: &str,
    raw: &str,
    kind: &FieldKind,
    inputs: &HashMap<String, String>,
) -> Result<String, ValidationError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    match kind {
        FieldKind::Plain => Ok(raw.to_string()),
        FieldKind::Date => parse_date(raw)
            .map(|date| date.format(DATE_OUTPUT_FORMAT).to_string())
            .ok_or_else(|| ValidationError::InvalidDate(name.to_string())),
        FieldKind::Currency { symbol } => {
            let numeral = raw.trim();
            match numeral.parse::<f64>() {
                Ok(n) if n.is_finite() => {
                    let symbol = inputs
                        .get(&currency_companion(name))
                        .map(String::as_str)
                        .filter(|s| !s.is_empty())
                        .or(symbol.as_deref())
                        .unwrap_or(DEFAULT_CURRENCY_SYMBOL);
                    Ok(format!("{symbol}{numeral}"))
                }
                _ => Err(ValidationError::InvalidNumber(name.to_string())),
            }
        }
    }
}

/// Parses `YYYY-MM-DD`. chrono's `%Y` also takes a sign and more than four digits,
/// so the year is checked by hand first.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let four_digit_year = bytes.len() > 4
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-';
    if !four_digit_year {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT).ok()
}

/// Resolves every name in order, stopping at the first invalid input.
///
/// A name with no submitted input is treated as empty.
pub fn resolve_all(
    names: &[String],
    inputs: &HashMap<String, String>,
    declared: &BTreeMap<String, FieldKind>,
) -> Result<Vec<Variable>, ValidationError> {
    let mut variables = Vec::with_capacity(names.len());
    for name in names {
        let raw = inputs.get(name).map(String::as_str).unwrap_or_default();
        let kind = kind_for(name, declared);
        let value = resolve(name, raw, &kind, inputs)?;
        debug!("resolved field '{}' as {:?}", name, kind);
        variables.push(Variable {
            name: name.clone(),
            raw: raw.to_string(),
            value,
        });
    }
    Ok(variables)
}

/// A template body with every placeholder resolved and substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledTemplate {
    pub content: String,
    pub variables: Vec<Variable>,
}

impl FilledTemplate {
    /// The final value of each variable, keyed by placeholder name.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.variables
            .iter()
            .map(|v| (v.name.clone(), v.value.clone()))
            .collect()
    }
}

/// Extracts, resolves and substitutes in one go.
pub fn fill_template(
    body: &str,
    inputs: &HashMap<String, String>,
    declared: &BTreeMap<String, FieldKind>,
) -> Result<FilledTemplate, ValidationError> {
    let names = placeholder::extract(body);
    let variables = resolve_all(&names, inputs, declared)?;
    let content = placeholder::substitute(
        body,
        variables.iter().map(|v| (v.name.as_str(), v.value.as_str())),
    );
    Ok(FilledTemplate { content, variables })
}
