//! Shared result type for conversion passes.
//!
//! Every pass returns a `PassResult` containing the rewritten document and the
//! lossy-rewrite warnings produced during the pass.

use serde_json::Value;

use crate::warning::ConversionWarning;

/// Unified result of a single conversion pass.
#[derive(Debug)]
pub struct PassResult {
    /// The rewritten document.
    pub document: Value,
    /// Lossy rewrites recorded by this pass.
    pub warnings: Vec<ConversionWarning>,
}

impl PassResult {
    /// Create a result with only a document (nothing lost).
    pub fn document_only(document: Value) -> Self {
        Self {
            document,
            warnings: Vec::new(),
        }
    }

    /// Create a result with a document and warnings.
    pub fn with_warnings(document: Value, warnings: Vec<ConversionWarning>) -> Self {
        Self { document, warnings }
    }

    /// Merge this pass's warnings into an accumulator.
    ///
    /// Consumes `self` and returns the document for the next pass in the
    /// pipeline.
    pub fn merge_into(self, warnings: &mut Vec<ConversionWarning>) -> Value {
        warnings.extend(self.warnings);
        self.document
    }
}
