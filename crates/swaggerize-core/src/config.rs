//! Configuration for document conversion.

use serde::{Deserialize, Serialize};

/// Media type whose schema a response keeps when none is configured.
pub const DEFAULT_RESPONSE_MEDIA_TYPE: &str = "application/json";

/// Options for document conversion.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `response-media-type`, `max-depth`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConvertOptions {
    /// Media type whose schema is lifted out of each response's `content`.
    /// Default: `application/json`.
    pub response_media_type: String,
    /// Maximum traversal depth for recursive walks (stack overflow guard).
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            response_media_type: DEFAULT_RESPONSE_MEDIA_TYPE.to_string(),
            max_depth: 256,
        }
    }
}
