use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filename stem used when a title has no usable characters.
const FALLBACK_FILENAME_STEM: &str = "contract";
/// How much of the external identifier goes into the PDF filename.
const FILENAME_ID_CHARS: usize = 8;
/// Longest title-derived stem, in bytes; keeps the full name under the 255-byte limit
/// of common filesystems.
const MAX_FILENAME_STEM_BYTES: usize = 200;

/// A filled-in, rendered and stored document.
///
/// `template_id` is informational only: the template may have been edited or removed
/// since, and the document stays valid because it keeps its own filled text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub id: i64,
    /// Stable external identifier (UUID v4).
    pub uuid: String,
    pub template_id: i64,
    pub title: String,
    pub filled_content: String,
    /// `data:image/...` URI of the captured signature, if any.
    pub signature_data: Option<String>,
    /// Final value of each placeholder, for re-display.
    pub variables: Option<BTreeMap<String, String>>,
    pub pdf_filename: String,
    pub created_at: DateTime<Utc>,
}

/// Everything needed to insert a [`GeneratedDocument`]; the store assigns the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub uuid: String,
    pub template_id: i64,
    pub title: String,
    pub filled_content: String,
    pub signature_data: Option<String>,
    pub variables: Option<BTreeMap<String, String>>,
    pub pdf_filename: String,
}

impl NewDocument {
    /// Builds the PDF filename for a document: the title reduced to letters, digits,
    /// `-` and `_` (spaces become `_`), then the first characters of `uuid`.
    ///
    /// Long titles are cut on a character boundary to at most
    /// [`MAX_FILENAME_STEM_BYTES`] bytes.
    pub fn pdf_filename_for(title: &str, uuid: &str) -> String {
        let mut stem = String::new();
        for c in title
            .chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
            .map(|c| if c == ' ' { '_' } else { c })
        {
            if stem.len() + c.len_utf8() > MAX_FILENAME_STEM_BYTES {
                break;
            }
            stem.push(c);
        }
        let stem = if stem.trim_matches('_').is_empty() {
            FALLBACK_FILENAME_STEM
        } else {
            stem.as_str()
        };
        let short_id: String = uuid.chars().take(FILENAME_ID_CHARS).collect();
        format!("{stem}_{short_id}.pdf")
    }
}

/// The result of filling a template, shown before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPreview {
    pub template_id: i64,
    pub title: String,
    pub content: String,
    pub variables: BTreeMap<String, String>,
    /// The signature as it will be embedded; invalid payloads are already dropped.
    pub signature: Option<String>,
}
