//! Schema normalization: rewrites OpenAPI 3.0 schema idioms into their
//! Swagger 2.0 spelling.
//!
//! Applied recursively to every mapping and sequence below the starting node:
//!
//! 1. `writeOnly` is dropped.
//! 2. `nullable` is removed. When the node's own `type` is one of the six base
//!    types it becomes `[<type>, "null"]`; any other `type` (or none) is left
//!    alone.
//! 3. A string `type` containing `|` keeps only its first trimmed member.
//! 4. Children are normalized.
//! 5. A `required` sequence is deduplicated, first occurrence wins.
//!
//! The walk is keyword-agnostic: every value of every mapping is treated as a
//! potential schema, so the normalizer is safe to run over `properties`
//! maps, `allOf` lists and plain annotation values alike.

use serde_json::{Map, Value};

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::schema_utils::build_path;
use crate::warning::{ConversionWarning, WarningKind};

/// Types that have a `[<type>, "null"]` spelling.
const BASE_TYPES: &[&str] = &["string", "integer", "number", "boolean", "array", "object"];

/// Shared traversal context, reducing argument count.
pub(crate) struct NormalizeContext<'a> {
    pub config: &'a ConvertOptions,
    pub warnings: &'a mut Vec<ConversionWarning>,
}

/// Normalize `schema`, located at `path`, recording lossy rewrites.
pub(crate) fn normalize_schema(
    schema: Value,
    path: &str,
    ctx: &mut NormalizeContext<'_>,
) -> Result<Value, ConvertError> {
    walk(schema, path, 0, ctx)
}

fn walk(
    node: Value,
    path: &str,
    depth: usize,
    ctx: &mut NormalizeContext<'_>,
) -> Result<Value, ConvertError> {
    if depth > ctx.config.max_depth {
        return Err(ConvertError::RecursionDepthExceeded {
            path: path.to_string(),
            max_depth: ctx.config.max_depth,
        });
    }

    match node {
        Value::Object(mut obj) => {
            obj.shift_remove("writeOnly");
            if obj.shift_remove("nullable").is_some() {
                expand_nullable(&mut obj, path, ctx);
            }
            collapse_union_type(&mut obj, path, ctx);

            for (key, child) in obj.iter_mut() {
                let child_path = build_path(path, &[key]);
                *child = walk(child.take(), &child_path, depth + 1, ctx)?;
            }

            dedupe_required(&mut obj);
            Ok(Value::Object(obj))
        }
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| walk(item, &build_path(path, &[&i.to_string()]), depth + 1, ctx))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        scalar => Ok(scalar),
    }
}

/// Re-encode a removed `nullable` into `type`, if `type` is a base type.
fn expand_nullable(obj: &mut Map<String, Value>, path: &str, ctx: &mut NormalizeContext<'_>) {
    match obj.get("type") {
        Some(Value::String(t)) if BASE_TYPES.contains(&t.as_str()) => {
            let pair = Value::Array(vec![Value::String(t.clone()), Value::from("null")]);
            obj.insert("type".to_string(), pair);
        }
        other => {
            let schema_type = other.map(|t| match t {
                Value::String(s) => s.clone(),
                v => v.to_string(),
            });
            tracing::debug!(path, ?schema_type, "nullable dropped without type substitution");
            ctx.warnings.push(ConversionWarning::new(
                path,
                WarningKind::NullableDropped { schema_type },
            ));
        }
    }
}

/// Collapse `"a|b"` to `"a"`.
fn collapse_union_type(obj: &mut Map<String, Value>, path: &str, ctx: &mut NormalizeContext<'_>) {
    let Some(Value::String(t)) = obj.get_mut("type") else {
        return;
    };
    let Some((first, _)) = t.split_once('|') else {
        return;
    };

    let kept = first.trim().to_string();
    let original = std::mem::replace(t, kept.clone());
    tracing::debug!(path, %original, %kept, "union type collapsed");
    ctx.warnings.push(ConversionWarning::new(
        path,
        WarningKind::UnionTypeCollapsed { original, kept },
    ));
}

/// Deduplicate a `required` sequence, preserving first-occurrence order.
fn dedupe_required(obj: &mut Map<String, Value>) {
    let Some(Value::Array(required)) = obj.get_mut("required") else {
        return;
    };
    let mut unique: Vec<Value> = Vec::with_capacity(required.len());
    for name in required.drain(..) {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    *required = unique;
}

// ===========================================================================
// Tests
// ===========================================================================
