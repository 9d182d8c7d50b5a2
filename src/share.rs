//! Compact, reversible encoding of editor state for URL fragments.
//!
//! SYSTEM CONTEXT
//! ==============
//! The editor mirrors its text (and, once the user drags nodes, their
//! positions) into the page URL so a link reproduces the diagram. The payload
//! is JSON compressed with LZ-string into URL-safe-enough base64, the same
//! scheme browser builds use, so links round-trip between them.
//!
//! Older links carried the outline text alone with no JSON wrapper. Decoding
//! accepts any JSON object with a string `text` and otherwise treats the whole
//! payload as text. Malformed optional fields are dropped, never the text.

#[cfg(test)]
#[path = "share_test.rs"]
mod tests;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::reconcile::PositionMap;

/// Error returned by [`decode`] and [`encode`].
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("share hash is empty")]
    Empty,
    #[error("share hash is not valid LZ-compressed base64")]
    Decompress,
    #[error("share payload is not valid UTF-16: {0}")]
    Utf16(#[from] std::string::FromUtf16Error),
    #[error("failed to serialize share state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Editor state carried in a share link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareState {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<PositionMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_manual_layout: Option<bool>,
}

impl ShareState {
    /// State holding only outline text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into(), positions: None, has_manual_layout: None }
    }

    /// Whether the user has positioned nodes by hand.
    #[must_use]
    pub fn manual_layout(&self) -> bool {
        self.has_manual_layout.unwrap_or(false)
    }
}

/// Encode a share state into a URL fragment payload (without the `#`).
///
/// # Errors
///
/// Returns [`ShareError::Serialize`] if the state cannot be serialized; with
/// finite positions this does not happen.
pub fn encode(state: &ShareState) -> Result<String, ShareError> {
    let json = serde_json::to_string(state)?;
    Ok(lz_str::compress_to_base64(json.as_str()))
}

/// Decode a URL fragment payload. A leading `#` is ignored.
///
/// # Errors
///
/// Returns [`ShareError::Empty`] for an empty hash and
/// [`ShareError::Decompress`] / [`ShareError::Utf16`] when the payload is not
/// a valid encoding.
pub fn decode(hash: &str) -> Result<ShareState, ShareError> {
    let hash = hash.trim();
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    if hash.is_empty() {
        return Err(ShareError::Empty);
    }

    let wide = lz_str::decompress_from_base64(hash).ok_or(ShareError::Decompress)?;
    let payload = String::from_utf16(&wide)?;
    if payload.is_empty() {
        return Err(ShareError::Decompress);
    }

    Ok(match serde_json::from_str::<Value>(&payload) {
        Ok(Value::Object(mut fields)) => match fields.remove("text") {
            Some(Value::String(text)) => ShareState {
                text,
                positions: optional_field(&mut fields, "positions"),
                has_manual_layout: optional_field(&mut fields, "hasManualLayout"),
            },
            _ => ShareState::from_text(payload),
        },
        _ => ShareState::from_text(payload),
    })
}

/// Take `key` from a decoded state object. A malformed value is logged and
/// dropped so the outline text still loads.
fn optional_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.remove(key)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(field = key, error = %e, "ignoring malformed share state field");
            None
        }
    }
}

/// Decode a URL fragment payload, falling back to `default_text` when the
/// hash is empty or cannot be decoded.
#[must_use]
pub fn decode_or(hash: &str, default_text: &str) -> ShareState {
    match decode(hash) {
        Ok(state) => state,
        Err(ShareError::Empty) => ShareState::from_text(default_text),
        Err(e) => {
            tracing::warn!(error = %e, "failed to decode share hash; using default text");
            ShareState::from_text(default_text)
        }
    }
}
