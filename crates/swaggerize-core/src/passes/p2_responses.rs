//! Pass 2: Response Content Flattening
//!
//! Swagger 2.0 responses carry a single `schema` instead of a `content` map
//! keyed by media type. For every response with `content`, the schema under
//! the configured media type (default `application/json`) is normalized and
//! attached as `schema`; a missing media type or schema yields `{}`. Other
//! media types are discarded.

use serde_json::{Map, Value};

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::normalize::{normalize_schema, NormalizeContext};
use crate::passes::pass_result::PassResult;
use crate::schema_utils::{build_path, expect_object_mut, for_each_operation, into_object};
use crate::warning::{ConversionWarning, WarningKind};

/// Flatten `content` into `schema` on every operation response.
pub fn flatten_responses(
    document: Value,
    config: &ConvertOptions,
) -> Result<PassResult, ConvertError> {
    let mut document = document;
    let mut warnings = Vec::new();
    for_each_operation(&mut document, |operation, path| {
        let Some(responses) = operation.get_mut("responses") else {
            return Ok(());
        };
        let responses_path = build_path(path, &["responses"]);
        let responses = expect_object_mut(responses, &responses_path)?;

        let mut ctx = NormalizeContext {
            config,
            warnings: &mut warnings,
        };
        for (status, response) in responses.iter_mut() {
            let response_path = build_path(&responses_path, &[status]);
            let response = expect_object_mut(response, &response_path)?;
            flatten_response(response, &response_path, &mut ctx)?;
        }
        Ok(())
    })?;
    Ok(PassResult::with_warnings(document, warnings))
}

fn flatten_response(
    response: &mut Map<String, Value>,
    path: &str,
    ctx: &mut NormalizeContext<'_>,
) -> Result<(), ConvertError> {
    let Some(content) = response.shift_remove("content") else {
        return Ok(());
    };
    let content_path = build_path(path, &["content"]);
    let mut content = into_object(content, &content_path)?;

    let config = ctx.config;
    let media_type = config.response_media_type.as_str();
    let media_path = build_path(&content_path, &[media_type]);
    let schema = match content.shift_remove(media_type) {
        Some(entry) => into_object(entry, &media_path)?
            .shift_remove("schema")
            .unwrap_or_else(|| Value::Object(Map::new())),
        None => Value::Object(Map::new()),
    };

    for ignored in content.into_iter().map(|(k, _)| k) {
        tracing::debug!(path = %content_path, %ignored, "response media type ignored");
        ctx.warnings.push(ConversionWarning::new(
            build_path(&content_path, &[&ignored]),
            WarningKind::MediaTypeIgnored {
                media_type: ignored,
            },
        ));
    }

    let schema = normalize_schema(schema, &build_path(&media_path, &["schema"]), ctx)?;
    response.insert("schema".to_string(), schema);
    Ok(())
}
