//! Pass 4: Definitions and Reference Remapping
//!
//! 1. `components.schemas` moves to a root `definitions` mapping (taking the
//!    position `components` had); the rest of `components` is discarded.
//! 2. Every `$ref` string starting with `#/components/schemas/` anywhere in the
//!    document is rewritten to `#/definitions/`. Other refs are left verbatim.
//! 3. Each definition is run through the schema normalizer.

use serde_json::{Map, Value};

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::normalize::{normalize_schema, NormalizeContext};
use crate::passes::pass_result::PassResult;
use crate::schema_utils::{build_path, expect_object_mut, into_object, replace_key};
use crate::warning::{ConversionWarning, WarningKind};

/// Ref prefix of shared schemas in OpenAPI 3.0.
pub const COMPONENTS_SCHEMAS_PREFIX: &str = "#/components/schemas/";
/// Ref prefix of shared schemas in Swagger 2.0.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Relocate shared schemas, rewrite refs and normalize definitions.
pub fn remap_definitions(
    document: Value,
    config: &ConvertOptions,
) -> Result<PassResult, ConvertError> {
    let mut warnings = Vec::new();

    let mut document = relocate_schemas(document, &mut warnings)?;

    let rewritten = rewrite_refs(&mut document, "#", 0, config)?;
    tracing::debug!(rewritten, "component schema refs rewritten");

    normalize_definitions(&mut document, config, &mut warnings)?;

    Ok(PassResult::with_warnings(document, warnings))
}

/// Move `components.schemas` to `definitions` and drop `components`.
fn relocate_schemas(
    document: Value,
    warnings: &mut Vec<ConversionWarning>,
) -> Result<Value, ConvertError> {
    let mut root = into_object(document, "#")?;
    let Some(components) = root.get_mut("components") else {
        return Ok(Value::Object(root));
    };
    let components = expect_object_mut(components, "#/components")?;

    let schemas = components
        .shift_remove("schemas")
        .unwrap_or_else(|| Value::Object(Map::new()));
    for section in components.keys() {
        tracing::debug!(%section, "components section has no Swagger 2.0 counterpart, discarding");
        warnings.push(ConversionWarning::new(
            build_path("#/components", &[section]),
            WarningKind::ComponentsSectionDiscarded {
                section: section.clone(),
            },
        ));
    }

    Ok(Value::Object(replace_key(root, "components", "definitions", schemas)))
}

/// Rewrite component schema refs in place. Returns the number rewritten.
fn rewrite_refs(
    value: &mut Value,
    path: &str,
    depth: usize,
    config: &ConvertOptions,
) -> Result<usize, ConvertError> {
    if depth > config.max_depth {
        return Err(ConvertError::RecursionDepthExceeded {
            path: path.to_string(),
            max_depth: config.max_depth,
        });
    }

    let mut rewritten = 0;
    match value {
        Value::Object(obj) => {
            for (key, child) in obj.iter_mut() {
                if key == "$ref" {
                    if let Value::String(reference) = child {
                        if let Some(name) = reference.strip_prefix(COMPONENTS_SCHEMAS_PREFIX) {
                            let remapped = format!("{DEFINITIONS_PREFIX}{name}");
                            *reference = remapped;
                            rewritten += 1;
                        }
                        continue;
                    }
                }
                rewritten += rewrite_refs(child, &build_path(path, &[key]), depth + 1, config)?;
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                rewritten += rewrite_refs(item, &build_path(path, &[&i.to_string()]), depth + 1, config)?;
            }
        }
        _ => {}
    }
    Ok(rewritten)
}

/// Run every top-level definition through the schema normalizer.
fn normalize_definitions(
    document: &mut Value,
    config: &ConvertOptions,
    warnings: &mut Vec<ConversionWarning>,
) -> Result<(), ConvertError> {
    let root = expect_object_mut(document, "#")?;
    let Some(definitions) = root.get_mut("definitions") else {
        return Ok(());
    };
    let definitions = expect_object_mut(definitions, "#/definitions")?;

    let mut ctx = NormalizeContext { config, warnings };
    for (name, definition) in definitions.iter_mut() {
        let path = build_path("#/definitions", &[name]);
        *definition = normalize_schema(definition.take(), &path, &mut ctx)?;
    }
    Ok(())
}
