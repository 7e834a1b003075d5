//! Host-side configuration.

use enumviz_payload::MAX_DECODED_ENTRIES;
use serde::{Deserialize, Serialize};

/// Settings for a [`VisualizerSession`](crate::VisualizerSession).
///
/// ```
/// use enumviz_visualizer::VisualizerOptions;
///
/// let opts = VisualizerOptions::from_json(r#"{"warm_up_language_services": false}"#).unwrap();
/// assert!(!opts.warm_up_language_services);
/// assert!(opts.notify_truncation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerOptions {
    /// Start language services in the background for text surfaces whose
    /// language supports them.
    pub warm_up_language_services: bool,
    /// Add an informational notification when the payload was truncated.
    pub notify_truncation: bool,
    /// Upper bound on any count declared in an incoming payload.
    pub max_decoded_entries: usize,
}

impl Default for VisualizerOptions {
    fn default() -> Self {
        Self {
            warm_up_language_services: true,
            notify_truncation: true,
            max_decoded_entries: MAX_DECODED_ENTRIES,
        }
    }
}

impl VisualizerOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
