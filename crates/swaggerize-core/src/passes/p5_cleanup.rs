//! Pass 5: Legacy Field Cleanup
//!
//! Strips OpenAPI 3.0-only fields that earlier passes may have left behind:
//! root `components`, per-operation `requestBody` and the non-standard `body`
//! field, and per-response `content`.

use serde_json::Value;

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::passes::pass_result::PassResult;
use crate::schema_utils::{build_path, expect_object_mut, for_each_operation};
use crate::warning::{ConversionWarning, WarningKind};

/// Remove leftover OpenAPI 3.0 fields.
pub fn strip_openapi3_fields(
    document: Value,
    _config: &ConvertOptions,
) -> Result<PassResult, ConvertError> {
    let mut document = document;
    let mut warnings = Vec::new();

    if expect_object_mut(&mut document, "#")?
        .shift_remove("components")
        .is_some()
    {
        tracing::debug!("stray components removed");
    }

    for_each_operation(&mut document, |operation, path| {
        operation.shift_remove("requestBody");
        if operation.shift_remove("body").is_some() {
            let body_path = build_path(path, &["body"]);
            tracing::debug!(path = %body_path, "non-standard body field removed");
            warnings.push(ConversionWarning::new(body_path, WarningKind::BodyFieldRemoved));
        }

        if let Some(responses) = operation.get_mut("responses") {
            let responses_path = build_path(path, &["responses"]);
            let responses = expect_object_mut(responses, &responses_path)?;
            for (status, response) in responses.iter_mut() {
                let response_path = build_path(&responses_path, &[status]);
                expect_object_mut(response, &response_path)?.shift_remove("content");
            }
        }
        Ok(())
    })?;

    Ok(PassResult::with_warnings(document, warnings))
}
