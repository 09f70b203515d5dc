//! Warning records for lossy rewrites performed during conversion.
//!
//! Swagger 2.0 cannot express everything OpenAPI 3.0 can. Whenever a pass
//! discards information it records a [`ConversionWarning`] so callers can see
//! what was lost. Warnings never influence the converted document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single lossy rewrite, located by JSON Pointer into the input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionWarning {
    /// Location of the rewritten node (e.g. `#/paths/~1pets/get/requestBody`).
    pub path: String,
    /// Classification of the rewrite.
    pub kind: WarningKind,
}

/// Classification of conversion warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WarningKind {
    /// A `a|b` union type was collapsed to its first member.
    UnionTypeCollapsed { original: String, kept: String },
    /// `nullable` was removed without a type-list substitution because the
    /// schema's `type` was absent or not a base type.
    NullableDropped { schema_type: Option<String> },
    /// A media type entry that does not survive into Swagger 2.0.
    MediaTypeIgnored { media_type: String },
    /// A `requestBody` without usable `content` was removed.
    RequestBodyDropped,
    /// A body parameter after the first one was removed.
    BodyParameterDropped,
    /// A parameter sharing `(in, name)` with an earlier one was removed.
    DuplicateParameterRemoved {
        location: Option<String>,
        name: Option<String>,
    },
    /// A `components` section other than `schemas` was discarded.
    ComponentsSectionDiscarded { section: String },
    /// A non-standard per-operation `body` field was removed.
    BodyFieldRemoved,
}

impl ConversionWarning {
    pub fn new(path: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.path)?;
        match &self.kind {
            WarningKind::UnionTypeCollapsed { original, kept } => {
                write!(f, "union type `{original}` collapsed to `{kept}`")
            }
            WarningKind::NullableDropped { schema_type } => match schema_type {
                Some(t) => write!(f, "`nullable` dropped, type `{t}` has no null form"),
                None => write!(f, "`nullable` dropped from schema without a type"),
            },
            WarningKind::MediaTypeIgnored { media_type } => {
                write!(f, "media type `{media_type}` ignored")
            }
            WarningKind::RequestBodyDropped => {
                write!(f, "requestBody without content removed")
            }
            WarningKind::BodyParameterDropped => write!(f, "extra body parameter removed"),
            WarningKind::DuplicateParameterRemoved { location, name } => write!(
                f,
                "duplicate parameter (in: {}, name: {}) removed",
                location.as_deref().unwrap_or("-"),
                name.as_deref().unwrap_or("-")
            ),
            WarningKind::ComponentsSectionDiscarded { section } => {
                write!(f, "components section `{section}` discarded")
            }
            WarningKind::BodyFieldRemoved => write!(f, "non-standard `body` field removed"),
        }
    }
}
