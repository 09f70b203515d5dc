//! Pass 0: Version Marker
//!
//! Replaces the root `openapi` marker with `swagger: "2.0"`, keeping its
//! position in the root mapping. A missing `openapi` key is a fault: the
//! document is not OpenAPI 3.

use serde_json::Value;

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::passes::pass_result::PassResult;
use crate::schema_utils::{into_object, replace_key};

/// Version marker written to converted documents.
pub const SWAGGER_VERSION: &str = "2.0";

/// Rewrite the root version marker.
pub fn rewrite_version(document: Value, _config: &ConvertOptions) -> Result<PassResult, ConvertError> {
    let root = into_object(document, "#")?;

    let version = root
        .get("openapi")
        .ok_or_else(|| ConvertError::missing_key("#", "openapi"))?;
    match version.as_str() {
        Some(v) if v.starts_with("3.") => tracing::debug!(from = v, "rewriting version marker"),
        _ => tracing::warn!(%version, "openapi marker is not a 3.x version, converting anyway"),
    }

    let root = replace_key(root, "openapi", "swagger", Value::from(SWAGGER_VERSION));
    Ok(PassResult::document_only(Value::Object(root)))
}
