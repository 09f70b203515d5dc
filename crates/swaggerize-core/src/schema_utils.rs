//! Shared document utilities for path construction and structural access.
//!
//! Provides three concerns used across all conversion passes:
//! 1. **JSON Pointer escaping** (RFC 6901) for keys with `/` or `~`, which
//!    every path template (`/pets/{id}`) contains
//! 2. **Typed node access** that turns shape mismatches into
//!    [`ConvertError::TypeMismatch`] instead of panics
//! 3. **Operation iteration** over `paths.*.*`

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::error::ConvertError;

// ---------------------------------------------------------------------------
// JSON Pointer escaping (RFC 6901)
// ---------------------------------------------------------------------------

/// Escape a single path segment per RFC 6901.
///
/// - `~` → `~0`
/// - `/` → `~1`
///
/// Returns `Cow::Borrowed` when no escaping is needed (the common case).
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') || segment.contains('/') {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Build a JSON Pointer path by appending segments to a parent path.
///
/// Each segment is escaped per RFC 6901 before joining.
///
/// # Example
/// ```
/// use swaggerize_core::build_path;
/// assert_eq!(build_path("#/paths", &["/pets/{id}", "get"]), "#/paths/~1pets~1{id}/get");
/// ```
pub fn build_path(parent: &str, segments: &[&str]) -> String {
    let mut path = parent.to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&escape_pointer_segment(segment));
    }
    path
}

// ---------------------------------------------------------------------------
// Typed node access
// ---------------------------------------------------------------------------

/// Human-readable name of a node's shape, used in error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

fn mismatch(path: &str, expected: &'static str, found: &Value) -> ConvertError {
    ConvertError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: kind_name(found),
    }
}

/// Borrow a node as a mapping or fail with a type mismatch at `path`.
pub fn expect_object_mut<'a>(
    value: &'a mut Value,
    path: &str,
) -> Result<&'a mut Map<String, Value>, ConvertError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(mismatch(path, "mapping", other)),
    }
}

/// Borrow a node as a sequence or fail with a type mismatch at `path`.
pub fn expect_array_mut<'a>(
    value: &'a mut Value,
    path: &str,
) -> Result<&'a mut Vec<Value>, ConvertError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(mismatch(path, "sequence", other)),
    }
}

/// Take ownership of a node as a mapping or fail with a type mismatch at `path`.
pub fn into_object(value: Value, path: &str) -> Result<Map<String, Value>, ConvertError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(mismatch(path, "mapping", &other)),
    }
}

/// Rebuild `map` with `old` replaced by `new: value` at the same position.
///
/// Any pre-existing `new` entry is discarded. When `old` is absent the new
/// entry is appended.
pub fn replace_key(map: Map<String, Value>, old: &str, new: &str, value: Value) -> Map<String, Value> {
    let mut value = Some(value);
    let mut result = Map::with_capacity(map.len());
    for (key, existing) in map {
        if key == old {
            if let Some(v) = value.take() {
                result.insert(new.to_string(), v);
            }
        } else if key != new {
            result.insert(key, existing);
        }
    }
    if let Some(v) = value {
        result.insert(new.to_string(), v);
    }
    result
}

// ---------------------------------------------------------------------------
// Operation iteration
// ---------------------------------------------------------------------------

/// Visit every operation under `paths`, i.e. each mapping-valued entry of
/// each path item.
///
/// `paths` must exist and be a mapping, and every path item must be a
/// mapping. Non-mapping entries inside a path item (path-level
/// `parameters`, `summary`, `servers`) are not operations and are skipped.
///
/// The visitor receives the operation and its JSON Pointer path.
pub fn for_each_operation<F>(document: &mut Value, mut visit: F) -> Result<(), ConvertError>
where
    F: FnMut(&mut Map<String, Value>, &str) -> Result<(), ConvertError>,
{
    let root = expect_object_mut(document, "#")?;
    let paths = root
        .get_mut("paths")
        .ok_or_else(|| ConvertError::missing_key("#", "paths"))?;
    let paths = expect_object_mut(paths, "#/paths")?;

    for (route, item) in paths.iter_mut() {
        let item_path = build_path("#/paths", &[route]);
        let item = expect_object_mut(item, &item_path)?;
        for (method, operation) in item.iter_mut() {
            if let Value::Object(operation) = operation {
                visit(operation, &build_path(&item_path, &[method]))?;
            }
        }
    }

    Ok(())
}
