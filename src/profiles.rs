//! Predefined compliance framework profiles.

use serde::{Deserialize, Serialize};

use crate::provider::Region;

/// A framework profile pins the regulatory framework identifier and the
/// region scoping for every proof: where regulated data must reside
/// (`designated_region`), where it must be absent (`other_region`), and the
/// scope used for edge-distribution listings (`edge_region`).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FrameworkProfile {
    /// Profile name (e.g. "appi").
    pub name: String,
    /// Framework identifier stamped into the bundle (e.g. "APPI").
    pub framework_id: String,
    /// Bundle document version.
    pub version: String,
    /// Human-readable description.
    pub description: String,
    /// Region where regulated data is expected to reside.
    pub designated_region: Region,
    /// Region where regulated data must be absent.
    pub other_region: Region,
    /// Region scope for edge distribution and traffic filter listings.
    pub edge_region: Region,
}

/// APPI profile: personal data pinned to Tokyo, checked absent in São Paulo.
pub fn appi_profile() -> FrameworkProfile {
    FrameworkProfile {
        name: "appi".to_string(),
        framework_id: "APPI".to_string(),
        version: "1.0".to_string(),
        description: "APPI (Act on the Protection of Personal Information) \
                      evidence profile: regulated data resides in ap-northeast-1 \
                      only, with a transit-gateway-only corridor to sa-east-1."
            .to_string(),
        designated_region: Region::from("ap-northeast-1"),
        other_region: Region::from("sa-east-1"),
        edge_region: Region::from("us-east-1"),
    }
}

/// Look up a profile by name.
pub fn profile_by_name(name: &str) -> Option<FrameworkProfile> {
    match name {
        "appi" => Some(appi_profile()),
        _ => None,
    }
}
