//! # swaggerize-core
//!
//! Convert OpenAPI 3.0 documents into equivalent Swagger 2.0 documents.
//!
//! The document is treated as a generic tree (`serde_json::Value`, key order
//! preserved) and rewritten by a fixed sequence of passes:
//!
//! | Pass | Module | Rewrite |
//! |------|--------|---------|
//! | 0 | [`passes::p0_version`] | `openapi` → `swagger: "2.0"` |
//! | 1 | [`passes::p1_request_body`] | `requestBody` → body parameter, query schema flattening |
//! | 2 | [`passes::p2_responses`] | response `content` → `schema` |
//! | 3 | [`passes::p3_parameters`] | parameter schema flattening, `(in, name)` dedup |
//! | 4 | [`passes::p4_definitions`] | `components.schemas` → `definitions`, `$ref` remapping |
//! | 5 | [`passes::p5_cleanup`] | strip leftover OpenAPI 3.0 fields |
//!
//! ```
//! use serde_json::json;
//! use swaggerize_core::{convert, ConvertOptions};
//!
//! let doc = json!({
//!     "openapi": "3.0.0",
//!     "paths": {},
//!     "components": { "schemas": { "Id": { "type": "string", "nullable": true } } }
//! });
//! let result = convert(doc, &ConvertOptions::default()).unwrap();
//! assert_eq!(result.document["swagger"], "2.0");
//! assert_eq!(result.document["definitions"]["Id"]["type"], json!(["string", "null"]));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub(crate) mod normalize;
pub mod passes;
pub mod schema_utils;
pub mod warning;

use std::fs;
use std::path::Path;

use serde_json::Value;

pub use config::ConvertOptions;
pub use document::{dump_document, load_document, OutputFormat};
pub use error::ConvertError;
pub use schema_utils::{build_path, escape_pointer_segment};
pub use warning::{ConversionWarning, WarningKind};

use normalize::{normalize_schema, NormalizeContext};
use passes::{p0_version, p1_request_body, p2_responses, p3_parameters, p4_definitions, p5_cleanup};

/// Result of converting a document.
#[derive(Debug)]
pub struct ConvertResult {
    /// The Swagger 2.0 document.
    pub document: Value,
    /// Lossy rewrites performed along the way, in pass order.
    pub warnings: Vec<ConversionWarning>,
}

/// Convert an OpenAPI 3.0 document tree into a Swagger 2.0 document tree.
///
/// The tree is moved through every pass and returned rewritten. Absent
/// optional structures are skipped; a missing `openapi` or `paths` key, or a
/// node of the wrong shape, aborts the conversion.
pub fn convert(document: Value, options: &ConvertOptions) -> Result<ConvertResult, ConvertError> {
    let mut warnings = Vec::new();

    tracing::debug!("pass 0: version marker");
    let document = p0_version::rewrite_version(document, options)?.merge_into(&mut warnings);

    tracing::debug!("pass 1: request bodies");
    let document =
        p1_request_body::convert_request_bodies(document, options)?.merge_into(&mut warnings);

    tracing::debug!("pass 2: responses");
    let document = p2_responses::flatten_responses(document, options)?.merge_into(&mut warnings);

    tracing::debug!("pass 3: parameters");
    let document = p3_parameters::rewrite_parameters(document, options)?.merge_into(&mut warnings);

    tracing::debug!("pass 4: definitions");
    let document = p4_definitions::remap_definitions(document, options)?.merge_into(&mut warnings);

    tracing::debug!("pass 5: cleanup");
    let document = p5_cleanup::strip_openapi3_fields(document, options)?.merge_into(&mut warnings);

    tracing::debug!(warnings = warnings.len(), "conversion complete");
    Ok(ConvertResult { document, warnings })
}

/// Normalize a single schema node with default options.
///
/// Drops `writeOnly`, re-encodes `nullable` into `type`, collapses `a|b`
/// union types and deduplicates `required`, recursively.
pub fn process_schema(schema: Value) -> Result<Value, ConvertError> {
    let config = ConvertOptions::default();
    let mut warnings = Vec::new();
    let mut ctx = NormalizeContext {
        config: &config,
        warnings: &mut warnings,
    };
    normalize_schema(schema, "#", &mut ctx)
}

/// Read `input_path`, convert it, and write the result to `output_path`.
///
/// The output format follows the output path's extension (see
/// [`OutputFormat::from_path`]). Nothing is written if any step fails.
pub fn convert_file(
    input_path: &str,
    output_path: &str,
    options: &ConvertOptions,
) -> Result<Vec<ConversionWarning>, ConvertError> {
    let text = fs::read_to_string(input_path).map_err(|source| ConvertError::Io {
        path: input_path.to_string(),
        source,
    })?;
    let result = convert(load_document(&text)?, options)?;
    let rendered = dump_document(&result.document, OutputFormat::from_path(Path::new(output_path)))?;
    fs::write(output_path, rendered).map_err(|source| ConvertError::Io {
        path: output_path.to_string(),
        source,
    })?;
    Ok(result.warnings)
}
