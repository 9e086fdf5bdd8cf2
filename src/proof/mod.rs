//! Proof types, proof records, and the per-proof generation pipeline.
//!
//! Each proof type is one named category of compliance evidence with a fixed
//! fetch plan (which resource categories, in which regions). Generation runs
//! fetch -> normalize -> assert and yields an immutable [`ProofRecord`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assertions;
use crate::normalize::{normalize, ResourceRecord};
use crate::profiles::FrameworkProfile;
use crate::provider::{ProviderClient, ProviderResponse, Region, ResourceCategory};

/// The closed, versioned set of proof types.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProofType {
    DataResidency,
    NetworkCorridor,
    ChangeTrail,
    EdgeSecurity,
    FlowLogs,
}

impl ProofType {
    /// All proof types in bundle generation order.
    pub const ALL: [ProofType; 5] = [
        ProofType::DataResidency,
        ProofType::NetworkCorridor,
        ProofType::ChangeTrail,
        ProofType::EdgeSecurity,
        ProofType::FlowLogs,
    ];

    /// Stable snake_case name used as the bundle key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataResidency => "data_residency",
            Self::NetworkCorridor => "network_corridor",
            Self::ChangeTrail => "change_trail",
            Self::EdgeSecurity => "edge_security",
            Self::FlowLogs => "flow_logs",
        }
    }

    /// Look up a proof type by its bundle key.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == name)
    }

    /// The `(category, region)` fetches this proof needs under `profile`.
    pub fn fetch_plan(&self, profile: &FrameworkProfile) -> Vec<(ResourceCategory, Region)> {
        let both = [
            profile.designated_region.clone(),
            profile.other_region.clone(),
        ];
        match self {
            Self::DataResidency => cross(
                &[ResourceCategory::DbInstances, ResourceCategory::DbSnapshots],
                &both,
            ),
            Self::NetworkCorridor => cross(
                &[
                    ResourceCategory::TransitGateways,
                    ResourceCategory::PeeringAttachments,
                    ResourceCategory::VpcPeerings,
                ],
                &both,
            ),
            Self::ChangeTrail => cross(
                &[ResourceCategory::TrailEvents],
                &[profile.designated_region.clone()],
            ),
            Self::EdgeSecurity => cross(
                &[
                    ResourceCategory::EdgeDistributions,
                    ResourceCategory::WebAclRules,
                ],
                &[profile.edge_region.clone()],
            ),
            Self::FlowLogs => cross(&[ResourceCategory::FlowLogs], &both),
        }
    }
}

impl fmt::Display for ProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn cross(categories: &[ResourceCategory], regions: &[Region]) -> Vec<(ResourceCategory, Region)> {
    let mut plan = Vec::with_capacity(categories.len() * regions.len());
    for category in categories {
        for region in regions {
            plan.push((*category, region.clone()));
        }
    }
    plan
}

/// Aggregate verdict of a proof or of the whole bundle.
///
/// `Unknown` is reserved for unverifiable input and is never merged into
/// `Pass` or `Fail`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
    Unknown,
}

/// A fetch that could not be completed, kept as an explicit "could not
/// verify" flag alongside the evidence it should have produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UnavailableFetch {
    pub category: ResourceCategory,
    pub region: Region,
    pub reason: String,
}

/// Normalized evidence collected for one proof: records grouped per region,
/// plus the fetches that came back unavailable.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EvidenceSet {
    pub by_region: BTreeMap<Region, Vec<ResourceRecord>>,
    pub unavailable: Vec<UnavailableFetch>,
}

impl EvidenceSet {
    /// Records listed in `region`; empty when the region was never scoped.
    pub fn records_in(&self, region: &Region) -> &[ResourceRecord] {
        self.by_region.get(region).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Records across all scoped regions.
    pub fn all_records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.by_region.values().flatten()
    }

    /// True when at least one fetch could not be completed.
    pub fn has_unavailable(&self) -> bool {
        !self.unavailable.is_empty()
    }
}

/// One proof's evidence and verdicts. Immutable once produced; owned by the
/// bundle assembler after creation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProofRecord {
    pub proof_type: ProofType,
    /// RFC 3339 generation timestamp.
    pub timestamp: String,
    /// Normalized evidence per region.
    pub evidence: BTreeMap<Region, Vec<ResourceRecord>>,
    /// Fetches that could not be verified.
    pub unavailable: Vec<UnavailableFetch>,
    /// Named boolean predicate results.
    pub assertions: BTreeMap<String, bool>,
    /// Aggregated verdict: AND of all assertions, or `Unknown` if any fetch
    /// was unavailable.
    pub overall: Verdict,
}

/// Generate one proof: fetch every planned listing, normalize, assert.
///
/// Never fails: an unavailable fetch lands in `unavailable` and forces the
/// overall verdict to `Unknown`.
pub fn generate(
    proof_type: ProofType,
    provider: &dyn ProviderClient,
    profile: &FrameworkProfile,
) -> ProofRecord {
    let mut set = EvidenceSet::default();

    for (category, region) in proof_type.fetch_plan(profile) {
        match provider.list(category, &region) {
            ProviderResponse::Available(items) => {
                debug!(proof = %proof_type, category = %category, region = %region,
                       count = items.len(), "listing fetched");
                let records = set.by_region.entry(region.clone()).or_default();
                for raw in &items {
                    records.push(normalize(category, &region, raw));
                }
            }
            ProviderResponse::Unavailable { reason } => {
                warn!(proof = %proof_type, category = %category, region = %region,
                      "listing unavailable: {}", reason);
                // The region still appears in the evidence map so the record
                // shape is uniform for the auditor.
                set.by_region.entry(region.clone()).or_default();
                set.unavailable.push(UnavailableFetch {
                    category,
                    region,
                    reason,
                });
            }
        }
    }

    let assessment = assertions::evaluate(proof_type, &set, profile);

    ProofRecord {
        proof_type,
        timestamp: chrono::Utc::now().to_rfc3339(),
        evidence: set.by_region,
        unavailable: set.unavailable,
        assertions: assessment.assertions,
        overall: assessment.overall,
    }
}
