//! Schema validation for evidence bundles.

use super::{BundleSummary, EvidenceBundle};
use crate::error::{EvidenceError, EvidenceResult};
use crate::proof::ProofType;

/// The only supported bundle document version.
pub const CURRENT_BUNDLE_VERSION: &str = "1.0";

/// Validate an evidence bundle against the schema constraints.
///
/// Checks:
/// - `version` must be `"1.0"`
/// - `generated_at` and `framework_id` must be non-empty
/// - At least one proof must be present
/// - Every proof key must name a known proof type matching the record inside
/// - Every proof must carry a non-empty timestamp and a non-empty assertion set
/// - Summary counts must partition the proofs exactly and match a fresh
///   derivation
pub fn validate_bundle(bundle: &EvidenceBundle) -> EvidenceResult<()> {
    if bundle.version != CURRENT_BUNDLE_VERSION {
        return Err(EvidenceError::invalid_bundle(format!(
            "Unsupported bundle version '{}', expected '{}'",
            bundle.version, CURRENT_BUNDLE_VERSION
        )));
    }

    if bundle.generated_at.is_empty() {
        return Err(EvidenceError::invalid_bundle(
            "generated_at must not be empty",
        ));
    }

    if bundle.framework_id.is_empty() {
        return Err(EvidenceError::invalid_bundle(
            "framework_id must not be empty",
        ));
    }

    if bundle.proofs.is_empty() {
        return Err(EvidenceError::invalid_bundle(
            "Bundle must contain at least one proof",
        ));
    }

    for (key, record) in &bundle.proofs {
        let known = ProofType::from_name(key);
        if known != Some(record.proof_type) {
            return Err(EvidenceError::invalid_bundle(format!(
                "Proof key '{}' does not match its record type '{}'",
                key, record.proof_type
            )));
        }

        if record.timestamp.is_empty() {
            return Err(EvidenceError::invalid_bundle(format!(
                "Proof '{}' has an empty timestamp",
                key
            )));
        }

        if record.assertions.is_empty() {
            return Err(EvidenceError::invalid_bundle(format!(
                "Proof '{}' has no assertions",
                key
            )));
        }
    }

    let derived = BundleSummary::derive(&bundle.proofs);
    if bundle.summary != derived {
        return Err(EvidenceError::invalid_bundle(format!(
            "Summary is stale: stored {:?}, derived {:?}",
            bundle.summary, derived
        )));
    }

    Ok(())
}
