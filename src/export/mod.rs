//! Bundle persistence and artifact packaging.

pub mod archive;
pub mod json_export;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bundle::EvidenceBundle;
use crate::proof::Verdict;

pub use archive::{package, ArtifactEntry, ArtifactManifest};

/// File name of the main bundle document.
pub const BUNDLE_FILE_NAME: &str = "audit_evidence_bundle.json";

/// File name of the flat summary document.
pub const SUMMARY_FILE_NAME: &str = "evidence_summary.json";

/// Standalone proof documents that may sit beside the bundle from earlier
/// single-proof runs; packaged when present, skipped when not.
pub const SIBLING_PROOF_FILES: [&str; 2] =
    ["data_residency_proof.json", "network_corridor_proof.json"];

/// Flat, auditor-facing summary of one bundle.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SummaryDocument {
    pub generated_at: String,
    pub framework_id: String,
    pub version: String,
    /// Overall verdict per proof type name.
    pub proof_verdicts: BTreeMap<String, Verdict>,
    pub total_proofs: usize,
    pub passed: usize,
    pub failed: usize,
    pub unknown: usize,
    pub status: Verdict,
}

/// Derive the flat summary document from a finalized bundle.
pub fn summary_document(bundle: &EvidenceBundle) -> SummaryDocument {
    SummaryDocument {
        generated_at: bundle.generated_at.clone(),
        framework_id: bundle.framework_id.clone(),
        version: bundle.version.clone(),
        proof_verdicts: bundle
            .proofs
            .iter()
            .map(|(name, record)| (name.clone(), record.overall))
            .collect(),
        total_proofs: bundle.summary.total_proofs,
        passed: bundle.summary.passed,
        failed: bundle.summary.failed,
        unknown: bundle.summary.unknown,
        status: bundle.summary.status,
    }
}

/// The artifact names one run hands to the packaging step: bundle file,
/// summary document, and any sibling proof documents. Existence is checked by
/// [`package`], not here.
pub fn artifact_candidates(out_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![out_dir.join(BUNDLE_FILE_NAME), out_dir.join(SUMMARY_FILE_NAME)];
    for sibling in SIBLING_PROOF_FILES {
        candidates.push(out_dir.join(sibling));
    }
    candidates
}
