//! Placeholder extraction and substitution.
//!
//! A placeholder is a `{name}` token inside a template body. The first `}` after a
//! `{` closes the token and names never contain braces, so `{a{b}` holds the single
//! placeholder `b`. An empty token `{}` is not a placeholder: it is never extracted
//! and never substituted, so it stays in the output as literal text.

use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern compiles"));

/// Returns the distinct placeholder names of `body` in first-seen order.
pub fn extract(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PLACEHOLDER_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Replaces every `{name}` in `body` with the value supplied for `name`.
///
/// Tokens without a supplied value are left untouched. The body is scanned once, so
/// a value that itself looks like a placeholder is copied verbatim and never
/// expanded, not even by another entry of `values`.
pub fn substitute<I, K, V>(body: &str, values: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let lookup: HashMap<String, String> = values
        .into_iter()
        .filter(|(name, _)| !name.as_ref().is_empty())
        .map(|(name, value)| (name.as_ref().to_string(), value.as_ref().to_string()))
        .collect();

    if lookup.is_empty() {
        return body.to_string();
    }

    PLACEHOLDER_RE
        .replace_all(body, |caps: &Captures| match lookup.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
