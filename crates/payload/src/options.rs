//! Encoder configuration.

use serde::{Deserialize, Serialize};

use enumviz_buffers::MAX_STR_LEN;

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_ELEMENTS};

/// What to do when a single element fails to serialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Replace the element with a placeholder and keep going.
    #[default]
    Placeholder,
    /// Fail the whole encode.
    Abort,
}

/// Knobs for [`PayloadEncoder`](crate::PayloadEncoder).
///
/// Every field has a default, so a host can load a partial JSON document:
///
/// ```
/// use enumviz_payload::{EncoderOptions, ErrorPolicy};
///
/// let opts = EncoderOptions::from_json(r#"{"max_elements": 10, "on_error": "abort"}"#).unwrap();
/// assert_eq!(opts.max_elements, 10);
/// assert_eq!(opts.on_error, ErrorPolicy::Abort);
/// assert_eq!(opts.max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Elements (or rows) beyond this count are dropped and the payload is
    /// marked truncated. The encoder caps it at
    /// [`MAX_DECODED_ENTRIES`](crate::MAX_DECODED_ENTRIES) so every payload
    /// it writes stays decodable.
    pub max_elements: usize,
    /// Maximum nesting of structured element values.
    pub max_depth: usize,
    pub on_error: ErrorPolicy,
    /// Longest canonical text of a single element, column name or text body,
    /// in bytes. Capped at the wire's `u32` length prefix.
    pub max_text_bytes: usize,
    /// Language attached to text payloads, e.g. `"SQL"` or `"JSON"`.
    pub language_hint: Option<String>,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            max_elements: DEFAULT_MAX_ELEMENTS,
            max_depth: DEFAULT_MAX_DEPTH,
            on_error: ErrorPolicy::Placeholder,
            max_text_bytes: MAX_STR_LEN,
            language_hint: None,
        }
    }
}

impl EncoderOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn with_max_text_bytes(mut self, max_text_bytes: usize) -> Self {
        self.max_text_bytes = max_text_bytes;
        self
    }

    pub fn with_language_hint(mut self, language: impl Into<String>) -> Self {
        self.language_hint = Some(language.into());
        self
    }
}
