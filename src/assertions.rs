//! Named boolean compliance predicates per proof type.
//!
//! Each function evaluates one predicate over normalized evidence and takes
//! the minimum arguments needed so it can be unit-tested in isolation. The
//! per-proof composition lives in [`evaluate`]: the overall verdict is the
//! AND of all predicates, except that any unavailable fetch forces `Unknown`
//! so "could not check" is never read as "compliant" or "violating".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::normalize::ResourceRecord;
use crate::profiles::FrameworkProfile;
use crate::proof::{EvidenceSet, ProofType, Verdict};
use crate::provider::Region;

/// The assertion names and overall verdict for one proof.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProofAssessment {
    pub assertions: BTreeMap<String, bool>,
    pub overall: Verdict,
}

// ---------------------------------------------------------------------------
// Data residency predicates
// ---------------------------------------------------------------------------

/// True iff the designated region lists at least one database instance.
pub fn presence_in_designated_region(set: &EvidenceSet, designated: &Region) -> bool {
    set.records_in(designated)
        .iter()
        .any(|r| matches!(r, ResourceRecord::DbInstance { .. }))
}

/// True iff the other region lists no database instances.
pub fn absence_in_other_region(set: &EvidenceSet, other: &Region) -> bool {
    !set.records_in(other)
        .iter()
        .any(|r| matches!(r, ResourceRecord::DbInstance { .. }))
}

/// True iff the other region lists no database snapshots (backups must not
/// leave the designated region either).
pub fn snapshots_absent_in_other_region(set: &EvidenceSet, other: &Region) -> bool {
    !set.records_in(other)
        .iter()
        .any(|r| matches!(r, ResourceRecord::DbSnapshot { .. }))
}

// ---------------------------------------------------------------------------
// Network corridor predicates
// ---------------------------------------------------------------------------

/// True iff `region` lists at least one transit gateway.
pub fn region_has_gateway(set: &EvidenceSet, region: &Region) -> bool {
    set.records_in(region)
        .iter()
        .any(|r| matches!(r, ResourceRecord::TransitGateway { .. }))
}

/// True iff at least one cross-region peering link is in an active state.
pub fn peering_link_active(set: &EvidenceSet) -> bool {
    set.all_records().any(|r| match r {
        ResourceRecord::PeeringAttachment { state, .. } => state == "available" || state == "active",
        _ => false,
    })
}

/// True iff no direct peering connection exists in any scoped region (the
/// forbidden path that would bypass the gateway corridor).
pub fn no_direct_peering(set: &EvidenceSet) -> bool {
    !set.all_records()
        .any(|r| matches!(r, ResourceRecord::VpcPeering { .. }))
}

// ---------------------------------------------------------------------------
// Change trail predicates
// ---------------------------------------------------------------------------

/// True iff the management trail recorded at least one event.
pub fn events_recorded(set: &EvidenceSet) -> bool {
    set.all_records()
        .any(|r| matches!(r, ResourceRecord::TrailEvent { .. }))
}

/// True iff every recorded event carries a principal name.
pub fn events_attributed(set: &EvidenceSet) -> bool {
    set.all_records().all(|r| match r {
        ResourceRecord::TrailEvent { username, .. } => !username.is_empty(),
        _ => true,
    })
}

// ---------------------------------------------------------------------------
// Edge security predicates
// ---------------------------------------------------------------------------

/// True iff at least one edge distribution is listed.
pub fn distribution_present(set: &EvidenceSet) -> bool {
    set.all_records()
        .any(|r| matches!(r, ResourceRecord::EdgeDistribution { .. }))
}

/// True iff at least one edge distribution carries a traffic filter
/// attachment identifier.
pub fn traffic_filter_attached(set: &EvidenceSet) -> bool {
    set.all_records().any(|r| match r {
        ResourceRecord::EdgeDistribution { web_acl_id, .. } => !web_acl_id.is_empty(),
        _ => false,
    })
}

// ---------------------------------------------------------------------------
// Flow log predicates
// ---------------------------------------------------------------------------

/// True iff any flow log capture is configured in a scoped region.
pub fn capture_configured(set: &EvidenceSet) -> bool {
    set.all_records()
        .any(|r| matches!(r, ResourceRecord::FlowLog { .. }))
}

/// True iff at least one configured capture is active.
pub fn capture_active(set: &EvidenceSet) -> bool {
    set.all_records().any(|r| match r {
        ResourceRecord::FlowLog { status, .. } => status == "ACTIVE",
        _ => false,
    })
}

/// Evaluate the fixed predicate set for `proof_type` over `set`.
pub fn evaluate(
    proof_type: ProofType,
    set: &EvidenceSet,
    profile: &FrameworkProfile,
) -> ProofAssessment {
    let designated = &profile.designated_region;
    let other = &profile.other_region;

    let named: Vec<(&str, bool)> = match proof_type {
        ProofType::DataResidency => vec![
            (
                "presence_in_designated_region",
                presence_in_designated_region(set, designated),
            ),
            ("absence_in_other_region", absence_in_other_region(set, other)),
            (
                "snapshots_absent_in_other_region",
                snapshots_absent_in_other_region(set, other),
            ),
        ],
        ProofType::NetworkCorridor => vec![
            (
                "designated_region_has_gateway",
                region_has_gateway(set, designated),
            ),
            ("other_region_has_gateway", region_has_gateway(set, other)),
            ("peering_link_active", peering_link_active(set)),
            ("no_direct_peering", no_direct_peering(set)),
        ],
        ProofType::ChangeTrail => vec![
            ("events_recorded", events_recorded(set)),
            ("events_attributed", events_attributed(set)),
        ],
        ProofType::EdgeSecurity => vec![
            ("distribution_present", distribution_present(set)),
            ("traffic_filter_attached", traffic_filter_attached(set)),
        ],
        ProofType::FlowLogs => vec![
            ("capture_configured", capture_configured(set)),
            ("capture_active", capture_active(set)),
        ],
    };

    let assertions: BTreeMap<String, bool> = named
        .into_iter()
        .map(|(name, passed)| (name.to_string(), passed))
        .collect();

    // UNKNOWN propagates: one unavailable input category forces the whole
    // proof to UNKNOWN even if every predicate evaluated cleanly.
    let overall = if set.has_unavailable() {
        Verdict::Unknown
    } else if assertions.values().all(|passed| *passed) {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    ProofAssessment { assertions, overall }
}
