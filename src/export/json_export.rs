//! JSON persistence for evidence documents.
//!
//! Writing is the one fatal boundary in the pipeline: if the bundle or the
//! summary cannot be written, the run produced nothing useful, so the error
//! carries the target path and cause for the invoker to retry.

use std::path::Path;

use serde::Serialize;

use crate::bundle::EvidenceBundle;
use crate::error::{EvidenceError, EvidenceResult};

/// Serialize a document to pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> EvidenceResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| EvidenceError::serialization_error(format!("JSON serialization failed: {}", e)))
}

/// Write a structured document to durable storage.
pub fn write_document<T: Serialize>(path: &Path, value: &T) -> EvidenceResult<()> {
    let json = to_json(value)?;
    std::fs::write(path, json)
        .map_err(|e| EvidenceError::persistence_error(path.display().to_string(), e.to_string()))
}

/// Load an evidence bundle document from disk.
pub fn read_bundle(path: &Path) -> EvidenceResult<EvidenceBundle> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| EvidenceError::persistence_error(path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| {
        EvidenceError::serialization_error(format!(
            "cannot parse bundle '{}': {}",
            path.display(),
            e
        ))
    })
}
