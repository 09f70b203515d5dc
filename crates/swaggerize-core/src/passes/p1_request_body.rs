//! Pass 1: Request Body → Body Parameter
//!
//! Swagger 2.0 has no `requestBody`; the payload is a parameter located
//! `in: body`. For every operation:
//!
//! 1. `requestBody.content` contributes its **first** media type entry (in
//!    document order) as `{in: body, name: body, required, schema}`, appended
//!    to `parameters`. `requestBody` is then removed whether or not it had
//!    content.
//! 2. `in: query` parameters with a nested `schema` have that schema's fields
//!    spliced into the parameter itself.
//! 3. Only the first `in: body` parameter survives.

use serde_json::{Map, Value};

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::normalize::{normalize_schema, NormalizeContext};
use crate::passes::pass_result::PassResult;
use crate::schema_utils::{build_path, expect_array_mut, expect_object_mut, for_each_operation, into_object};
use crate::warning::{ConversionWarning, WarningKind};

/// Name given to the synthesized body parameter.
const BODY_PARAMETER_NAME: &str = "body";

/// Convert every operation's `requestBody` into a body parameter.
pub fn convert_request_bodies(
    document: Value,
    config: &ConvertOptions,
) -> Result<PassResult, ConvertError> {
    let mut document = document;
    let mut warnings = Vec::new();
    for_each_operation(&mut document, |operation, path| {
        let mut ctx = NormalizeContext {
            config,
            warnings: &mut warnings,
        };
        convert_operation(operation, path, &mut ctx)
    })?;
    Ok(PassResult::with_warnings(document, warnings))
}

/// Rewrite a single operation in place.
pub(crate) fn convert_operation(
    operation: &mut Map<String, Value>,
    path: &str,
    ctx: &mut NormalizeContext<'_>,
) -> Result<(), ConvertError> {
    if let Some(request_body) = operation.shift_remove("requestBody") {
        let body_path = build_path(path, &["requestBody"]);
        match body_parameter(request_body, &body_path, ctx)? {
            Some(parameter) => {
                let parameters = operation
                    .entry("parameters")
                    .or_insert_with(|| Value::Array(Vec::new()));
                expect_array_mut(parameters, &build_path(path, &["parameters"]))?.push(parameter);
            }
            None => {
                tracing::debug!(path = %body_path, "requestBody without content removed");
                ctx.warnings
                    .push(ConversionWarning::new(body_path, WarningKind::RequestBodyDropped));
            }
        }
    }

    let Some(parameters) = operation.get_mut("parameters") else {
        return Ok(());
    };
    let params_path = build_path(path, &["parameters"]);
    let parameters = expect_array_mut(parameters, &params_path)?;

    for (i, parameter) in parameters.iter_mut().enumerate() {
        let param_path = build_path(&params_path, &[&i.to_string()]);
        let parameter = expect_object_mut(parameter, &param_path)?;
        if location(parameter) == Some("query") {
            flatten_parameter_schema(parameter, &param_path, ctx)?;
        }
    }

    keep_first_body_parameter(parameters, &params_path, ctx.warnings);
    Ok(())
}

/// Build the body parameter for a `requestBody`, or `None` when it carries no
/// media type entry (e.g. a `$ref` to `components/requestBodies`).
fn body_parameter(
    request_body: Value,
    path: &str,
    ctx: &mut NormalizeContext<'_>,
) -> Result<Option<Value>, ConvertError> {
    let mut request_body = into_object(request_body, path)?;
    let Some(content) = request_body.shift_remove("content") else {
        return Ok(None);
    };
    let content_path = build_path(path, &["content"]);
    let mut media_types = into_object(content, &content_path)?.into_iter();

    let Some((media_type, entry)) = media_types.next() else {
        return Ok(None);
    };
    let entry_path = build_path(&content_path, &[&media_type]);
    let mut entry = into_object(entry, &entry_path)?;

    for (ignored, _) in media_types {
        tracing::debug!(path = %content_path, kept = %media_type, %ignored, "extra request media type ignored");
        ctx.warnings.push(ConversionWarning::new(
            build_path(&content_path, &[&ignored]),
            WarningKind::MediaTypeIgnored {
                media_type: ignored,
            },
        ));
    }

    let schema = entry
        .shift_remove("schema")
        .unwrap_or_else(|| Value::Object(Map::new()));
    let schema = normalize_schema(schema, &build_path(&entry_path, &["schema"]), ctx)?;
    let required = request_body
        .shift_remove("required")
        .unwrap_or(Value::Bool(false));

    let mut parameter = Map::new();
    parameter.insert("in".to_string(), Value::from("body"));
    parameter.insert("name".to_string(), Value::from(BODY_PARAMETER_NAME));
    parameter.insert("required".to_string(), required);
    parameter.insert("schema".to_string(), schema);
    Ok(Some(Value::Object(parameter)))
}

/// A parameter's `in` value, if it is a string.
pub(crate) fn location(parameter: &Map<String, Value>) -> Option<&str> {
    parameter.get("in").and_then(Value::as_str)
}

/// Splice a parameter's nested `schema` fields into the parameter itself.
///
/// Existing keys are overwritten in place; new keys are appended.
pub(crate) fn flatten_parameter_schema(
    parameter: &mut Map<String, Value>,
    path: &str,
    ctx: &mut NormalizeContext<'_>,
) -> Result<(), ConvertError> {
    let Some(schema) = parameter.shift_remove("schema") else {
        return Ok(());
    };
    let schema_path = build_path(path, &["schema"]);
    let schema = normalize_schema(schema, &schema_path, ctx)?;
    for (key, value) in into_object(schema, &schema_path)? {
        parameter.insert(key, value);
    }
    // A schema that itself had a `schema` key must not reintroduce one.
    parameter.shift_remove("schema");
    Ok(())
}

/// Drop every `in: body` parameter after the first.
fn keep_first_body_parameter(
    parameters: &mut Vec<Value>,
    path: &str,
    warnings: &mut Vec<ConversionWarning>,
) {
    let mut seen_body = false;
    let mut index = 0;
    parameters.retain(|parameter| {
        let is_body = parameter.get("in").and_then(Value::as_str) == Some("body");
        let keep = !is_body || !seen_body;
        if is_body && keep {
            seen_body = true;
        }
        if !keep {
            let param_path = build_path(path, &[&index.to_string()]);
            tracing::debug!(path = %param_path, "extra body parameter removed");
            warnings.push(ConversionWarning::new(param_path, WarningKind::BodyParameterDropped));
        }
        index += 1;
        keep
    });
}

// ===========================================================================
// Tests
// ===========================================================================
