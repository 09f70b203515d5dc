//! Load and dump collaborators: text ⇄ document tree.
//!
//! Documents are read as YAML (JSON input is detected and parsed with
//! `serde_json` directly) and written as block-style YAML or pretty JSON.
//! Mapping key order survives both directions.
//!
//! YAML is first loaded as a `serde_yaml::Value` so merge keys (`<<: *base`)
//! can be resolved before the tree is handed to the passes.

use std::path::Path;

use serde_json::{Map, Value};
use serde_yaml::Value as YamlValue;

use crate::error::ConvertError;
use crate::schema_utils::build_path;

/// Serialization format of a converted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// JSON for `.json` paths, YAML for everything else.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Parse a YAML or JSON document into a tree.
pub fn load_document(text: &str) -> Result<Value, ConvertError> {
    if text.trim_start().starts_with('{') {
        return Ok(serde_json::from_str(text)?);
    }
    let mut yaml: YamlValue = serde_yaml::from_str(text)?;
    yaml.apply_merge()?;
    yaml_to_tree(yaml, "#")
}

/// Convert a merged YAML tree into a document tree.
///
/// Scalar mapping keys are stringified, so `200:` becomes `"200"`. Tags are
/// dropped in favor of the tagged value.
fn yaml_to_tree(node: YamlValue, path: &str) -> Result<Value, ConvertError> {
    let tree = match node {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => yaml_number(&n),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| yaml_to_tree(item, &build_path(path, &[&i.to_string()])))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = mapping_key(key, path)?;
                let child = yaml_to_tree(value, &build_path(path, &[&key]))?;
                map.insert(key, child);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => {
            let tagged = *tagged;
            yaml_to_tree(tagged.value, path)?
        }
    };
    Ok(tree)
}

// Non-finite floats (`.nan`, `.inf`) have no JSON form.
fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn mapping_key(key: YamlValue, path: &str) -> Result<String, ConvertError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => {
            let tagged = *tagged;
            mapping_key(tagged.value, path)
        }
        YamlValue::Sequence(_) => Err(ConvertError::TypeMismatch {
            path: path.to_string(),
            expected: "scalar key",
            found: "sequence",
        }),
        YamlValue::Mapping(_) => Err(ConvertError::TypeMismatch {
            path: path.to_string(),
            expected: "scalar key",
            found: "mapping",
        }),
    }
}

/// Render a tree in the given format, newline-terminated.
pub fn dump_document(document: &Value, format: OutputFormat) -> Result<String, ConvertError> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(document)?),
        OutputFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(document)?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}
