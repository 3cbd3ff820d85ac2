//! Signature payloads captured by the signing pad.
//!
//! A signature travels as a `data:image/...;base64,...` URI. Anything else is
//! treated as "no signature" rather than as an error.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::warn;

const DATA_URI_PREFIX: &str = "data:image/";

/// A decoded signature image together with the URI it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureImage {
    data_uri: String,
    bytes: Vec<u8>,
}

impl SignatureImage {
    /// Parses a data URI, returning `None` for anything that is not a base64 image.
    pub fn from_data_uri(value: &str) -> Option<Self> {
        if !value.starts_with(DATA_URI_PREFIX) {
            return None;
        }
        let Some((_, payload)) = value.split_once(',') else {
            warn!("Dropping signature without a data section");
            return None;
        };
        match BASE64.decode(payload.trim()) {
            Ok(bytes) if !bytes.is_empty() => Some(SignatureImage {
                data_uri: value.to_string(),
                bytes,
            }),
            Ok(_) => {
                warn!("Dropping empty signature image");
                None
            }
            Err(e) => {
                warn!("Dropping signature with undecodable payload: {}", e);
                None
            }
        }
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Keeps a submitted signature only if it is a usable image.
pub fn accept(value: Option<&str>) -> Option<SignatureImage> {
    value
        .filter(|v| !v.is_empty())
        .and_then(SignatureImage::from_data_uri)
}
