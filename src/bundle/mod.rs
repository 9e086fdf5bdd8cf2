//! Evidence bundle structure and derived summary.

pub mod assembler;
pub mod schema;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::proof::{ProofRecord, Verdict};

pub use assembler::BundleAssembler;

/// The complete evidence bundle for one generation run. Write-once: each run
/// produces a fresh bundle with a fresh timestamp.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EvidenceBundle {
    /// RFC 3339 timestamp of when the bundle was generated.
    pub generated_at: String,
    /// Regulatory framework identifier (e.g. "APPI").
    pub framework_id: String,
    /// Bundle document version.
    pub version: String,
    /// Proof records keyed by proof type name; key-ordered on serialization.
    pub proofs: BTreeMap<String, ProofRecord>,
    /// Derived aggregate, recomputed from `proofs` at finalization.
    pub summary: BundleSummary,
}

/// Aggregate compliance summary over all proofs in a bundle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    pub total_proofs: usize,
    pub passed: usize,
    pub failed: usize,
    pub unknown: usize,
    /// `Pass` only if every proof passed. A confirmed failure outranks an
    /// unverifiable proof, so `Fail` wins over `Unknown`.
    pub status: Verdict,
}

impl BundleSummary {
    /// Derive the summary from the current proof mapping. Counts partition
    /// exactly: every proof lands in exactly one of passed/failed/unknown.
    pub fn derive(proofs: &BTreeMap<String, ProofRecord>) -> Self {
        let passed = proofs
            .values()
            .filter(|p| p.overall == Verdict::Pass)
            .count();
        let failed = proofs
            .values()
            .filter(|p| p.overall == Verdict::Fail)
            .count();
        let unknown = proofs
            .values()
            .filter(|p| p.overall == Verdict::Unknown)
            .count();

        let status = if failed > 0 {
            Verdict::Fail
        } else if unknown > 0 {
            Verdict::Unknown
        } else {
            Verdict::Pass
        };

        Self {
            total_proofs: proofs.len(),
            passed,
            failed,
            unknown,
            status,
        }
    }
}
