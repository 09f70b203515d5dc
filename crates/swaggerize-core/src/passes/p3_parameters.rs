//! Pass 3: Parameter Flattening and Deduplication
//!
//! Two sweeps over every operation's `parameters`:
//!
//! 1. Any parameter still holding a nested `schema` has it spliced into the
//!    parameter object, whatever its location. Pass 1 only handled `in: query`.
//!    `in: body` parameters are the exception: Swagger 2.0 requires their
//!    payload under `schema`, so it is normalized in place instead.
//! 2. Parameters are deduplicated on `(in, name)`, first occurrence wins.
//!    An absent field counts as a value of its own, so at most one parameter
//!    without `in` and `name` (e.g. a `$ref` parameter) survives.

use serde_json::{Map, Value};

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::normalize::{normalize_schema, NormalizeContext};
use crate::passes::p1_request_body::{flatten_parameter_schema, location};
use crate::passes::pass_result::PassResult;
use crate::schema_utils::{build_path, expect_array_mut, expect_object_mut, for_each_operation};
use crate::warning::{ConversionWarning, WarningKind};

/// Identity of a parameter for deduplication: its `(in, name)` pair.
///
/// `$ref` parameters carry neither field, so they all share `(None, None)`.
type ParameterKey<'a> = (Option<&'a Value>, Option<&'a Value>);

fn parameter_key(parameter: &Value) -> ParameterKey<'_> {
    (parameter.get("in"), parameter.get("name"))
}

/// Flatten remaining parameter schemas, then deduplicate parameters.
pub fn rewrite_parameters(
    document: Value,
    config: &ConvertOptions,
) -> Result<PassResult, ConvertError> {
    let mut document = document;
    let mut warnings = Vec::new();

    for_each_operation(&mut document, |operation, path| {
        let Some(parameters) = operation.get_mut("parameters") else {
            return Ok(());
        };
        let params_path = build_path(path, &["parameters"]);
        let parameters = expect_array_mut(parameters, &params_path)?;

        let mut ctx = NormalizeContext {
            config,
            warnings: &mut warnings,
        };
        for (i, parameter) in parameters.iter_mut().enumerate() {
            let param_path = build_path(&params_path, &[&i.to_string()]);
            let parameter = expect_object_mut(parameter, &param_path)?;
            if location(parameter) == Some("body") {
                normalize_body_schema(parameter, &param_path, &mut ctx)?;
            } else {
                flatten_parameter_schema(parameter, &param_path, &mut ctx)?;
            }
        }
        Ok(())
    })?;

    for_each_operation(&mut document, |operation, path| {
        if let Some(parameters) = operation.get_mut("parameters") {
            let params_path = build_path(path, &["parameters"]);
            let parameters = expect_array_mut(parameters, &params_path)?;
            dedupe_parameters(parameters, &params_path, &mut warnings);
        }
        Ok(())
    })?;

    Ok(PassResult::with_warnings(document, warnings))
}

/// Normalize a body parameter's `schema` without lifting it out.
fn normalize_body_schema(
    parameter: &mut Map<String, Value>,
    path: &str,
    ctx: &mut NormalizeContext<'_>,
) -> Result<(), ConvertError> {
    if let Some(schema) = parameter.get_mut("schema") {
        let schema_path = build_path(path, &["schema"]);
        *schema = normalize_schema(schema.take(), &schema_path, ctx)?;
    }
    Ok(())
}

/// Keep the first parameter for each distinct key, preserving order.
fn dedupe_parameters(
    parameters: &mut Vec<Value>,
    path: &str,
    warnings: &mut Vec<ConversionWarning>,
) {
    let keep: Vec<bool> = {
        let mut seen: Vec<ParameterKey<'_>> = Vec::with_capacity(parameters.len());
        parameters
            .iter()
            .map(|parameter| {
                let key = parameter_key(parameter);
                if seen.contains(&key) {
                    false
                } else {
                    seen.push(key);
                    true
                }
            })
            .collect()
    };

    for (i, parameter) in parameters.iter().enumerate() {
        if keep[i] {
            continue;
        }
        let as_string = |key: &str| parameter.get(key).and_then(Value::as_str).map(str::to_string);
        let param_path = build_path(path, &[&i.to_string()]);
        tracing::debug!(path = %param_path, "duplicate parameter removed");
        warnings.push(ConversionWarning::new(
            param_path,
            WarningKind::DuplicateParameterRemoved {
                location: as_string("in"),
                name: as_string("name"),
            },
        ));
    }

    let mut flags = keep.into_iter();
    parameters.retain(|_| flags.next().unwrap_or(true));
}
