use serde::{Deserialize, Serialize};

/// A placeholder paired with what the user typed and what ends up in the document.
///
/// Variables only live for the duration of a request; documents keep the final
/// values as a plain name -> value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub raw: String,
    pub value: String,
}
