//! Provider client abstraction for read-only resource listings.
//!
//! Every fetch is a single best-effort call scoped to one `(category, region)`
//! pair. A failed call is reported in-band as [`ProviderResponse::Unavailable`]
//! rather than as an error: downstream code treats it as an empty list plus an
//! explicit "could not verify" flag, so an auditor can distinguish "zero
//! resources, confirmed" from "could not check".

pub mod snapshot;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use snapshot::SnapshotProvider;

/// A raw, provider-native resource description. Shape varies per provider;
/// only the normalizer interprets it.
pub type RawResource = serde_json::Value;

/// An opaque region identifier scoping a provider query (e.g. "ap-northeast-1").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Region(pub String);

impl Region {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The closed set of resource categories the pipeline can list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    /// Managed database instances.
    DbInstances,
    /// Database snapshots (backup location evidence).
    DbSnapshots,
    /// Change-log events from the management trail.
    TrailEvents,
    /// Edge distribution configurations.
    EdgeDistributions,
    /// Web traffic filter rule sets attached at the edge.
    WebAclRules,
    /// Network flow log configurations.
    FlowLogs,
    /// Inter-region transit gateways.
    TransitGateways,
    /// Inter-region gateway peering links.
    PeeringAttachments,
    /// Direct network peering connections (the forbidden path).
    VpcPeerings,
}

impl ResourceCategory {
    /// Stable snake_case name, used for snapshot file stems and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DbInstances => "db_instances",
            Self::DbSnapshots => "db_snapshots",
            Self::TrailEvents => "trail_events",
            Self::EdgeDistributions => "edge_distributions",
            Self::WebAclRules => "web_acl_rules",
            Self::FlowLogs => "flow_logs",
            Self::TransitGateways => "transit_gateways",
            Self::PeeringAttachments => "peering_attachments",
            Self::VpcPeerings => "vpc_peerings",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single category/region listing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    /// The listing completed; the list may legitimately be empty.
    Available(Vec<RawResource>),
    /// The listing could not be completed (timeout, permission, not found).
    /// Contained at the call site; never propagated as an error.
    Unavailable { reason: String },
}

/// Uniform interface to heterogeneous resource-listing operations.
///
/// Implementations must be strictly read-only and must convert any transport
/// failure into `Unavailable` instead of panicking or returning `Err`. The
/// region is an explicit argument on every call; implementations must not
/// hold ambient per-region session state.
pub trait ProviderClient {
    fn list(&self, category: ResourceCategory, region: &Region) -> ProviderResponse;
}

/// In-memory provider backed by a fixed response map.
///
/// Unconfigured `(category, region)` pairs answer `Unavailable`, matching the
/// behavior of a live provider that rejects an unknown query.
#[derive(Default)]
pub struct StaticProvider {
    responses: HashMap<(ResourceCategory, Region), ProviderResponse>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a successful listing for a category/region pair.
    pub fn with_listing(
        mut self,
        category: ResourceCategory,
        region: impl Into<Region>,
        items: Vec<RawResource>,
    ) -> Self {
        self.responses
            .insert((category, region.into()), ProviderResponse::Available(items));
        self
    }

    /// Register an unavailable response for a category/region pair.
    pub fn with_unavailable(
        mut self,
        category: ResourceCategory,
        region: impl Into<Region>,
        reason: impl Into<String>,
    ) -> Self {
        self.responses.insert(
            (category, region.into()),
            ProviderResponse::Unavailable {
                reason: reason.into(),
            },
        );
        self
    }
}

impl ProviderClient for StaticProvider {
    fn list(&self, category: ResourceCategory, region: &Region) -> ProviderResponse {
        match self.responses.get(&(category, region.clone())) {
            Some(response) => response.clone(),
            None => ProviderResponse::Unavailable {
                reason: format!("no listing configured for {} in {}", category, region),
            },
        }
    }
}
