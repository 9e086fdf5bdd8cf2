//! Normalization of raw provider records into canonical per-category shapes.
//!
//! `normalize` is pure and total: every canonical field is populated, falling
//! back to a documented default when the source field is missing, and unknown
//! raw fields are dropped. This isolates the assertion engine from the raw
//! provider schema.

use serde::{Deserialize, Serialize};

use crate::provider::{RawResource, Region, ResourceCategory};

/// A category-specific normalized resource fact.
///
/// Internally tagged so a mixed per-region record list in the bundle document
/// stays self-describing for the auditor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceRecord {
    /// A managed database instance. Defaults: empty strings, flags false,
    /// engine "unknown".
    DbInstance {
        id: String,
        region: String,
        az: String,
        endpoint: String,
        multi_az: bool,
        encrypted: bool,
        engine: String,
    },
    /// A database snapshot. `created` defaults to "".
    DbSnapshot {
        snapshot_id: String,
        region: String,
        encrypted: bool,
        created: String,
    },
    /// A management-trail change event. All fields default to "".
    TrailEvent {
        event_name: String,
        event_time: String,
        username: String,
        source_ip: String,
        resource_name: String,
    },
    /// An edge distribution configuration. `web_acl_id` is "" when no traffic
    /// filter is attached.
    EdgeDistribution {
        distribution_id: String,
        domain_name: String,
        status: String,
        enabled: bool,
        web_acl_id: String,
        logging_enabled: bool,
        log_bucket: String,
    },
    /// A web traffic filter rule set.
    WebAcl { name: String, id: String, arn: String },
    /// A flow log configuration. Defaults mirror the provider's implicit
    /// values: destination "CloudWatch", traffic type "ALL", status "UNKNOWN".
    FlowLog {
        flow_log_id: String,
        resource_type: String,
        resource_id: String,
        log_destination: String,
        traffic_type: String,
        status: String,
        region: String,
    },
    /// An inter-region transit gateway.
    TransitGateway {
        tgw_id: String,
        state: String,
        description: String,
    },
    /// An inter-region gateway peering link.
    PeeringAttachment {
        attachment_id: String,
        state: String,
        local_tgw: String,
        peer_tgw: String,
        peer_region: String,
        requester_region: String,
    },
    /// A direct peering connection (forbidden path evidence).
    VpcPeering { peering_id: String, status: String },
}

/// Normalize one raw provider record for `category` listed in `region`.
pub fn normalize(category: ResourceCategory, region: &Region, raw: &RawResource) -> ResourceRecord {
    match category {
        ResourceCategory::DbInstances => ResourceRecord::DbInstance {
            id: str_at(raw, "DBInstanceIdentifier"),
            region: region.to_string(),
            az: str_at(raw, "AvailabilityZone"),
            endpoint: str_path(raw, &["Endpoint", "Address"]),
            multi_az: bool_at(raw, "MultiAZ"),
            encrypted: bool_at(raw, "StorageEncrypted"),
            engine: str_at_or(raw, "Engine", "unknown"),
        },
        ResourceCategory::DbSnapshots => ResourceRecord::DbSnapshot {
            snapshot_id: str_at(raw, "DBSnapshotIdentifier"),
            region: region.to_string(),
            encrypted: bool_at(raw, "Encrypted"),
            created: str_at(raw, "SnapshotCreateTime"),
        },
        ResourceCategory::TrailEvents => ResourceRecord::TrailEvent {
            event_name: str_at(raw, "EventName"),
            event_time: str_at(raw, "EventTime"),
            username: str_at(raw, "Username"),
            source_ip: str_at(raw, "SourceIPAddress"),
            resource_name: first_resource_name(raw),
        },
        ResourceCategory::EdgeDistributions => ResourceRecord::EdgeDistribution {
            distribution_id: str_at(raw, "Id"),
            domain_name: str_at(raw, "DomainName"),
            status: str_at(raw, "Status"),
            enabled: bool_at(raw, "Enabled"),
            web_acl_id: str_at(raw, "WebACLId"),
            logging_enabled: bool_path(raw, &["Logging", "Enabled"]),
            log_bucket: str_path(raw, &["Logging", "Bucket"]),
        },
        ResourceCategory::WebAclRules => ResourceRecord::WebAcl {
            name: str_at(raw, "Name"),
            id: str_at(raw, "Id"),
            arn: str_at(raw, "ARN"),
        },
        ResourceCategory::FlowLogs => ResourceRecord::FlowLog {
            flow_log_id: str_at(raw, "FlowLogId"),
            resource_type: str_at(raw, "ResourceType"),
            resource_id: str_at(raw, "ResourceId"),
            log_destination: str_at_or(raw, "LogDestination", "CloudWatch"),
            traffic_type: str_at_or(raw, "TrafficType", "ALL"),
            status: str_at_or(raw, "FlowLogStatus", "UNKNOWN"),
            region: region.to_string(),
        },
        ResourceCategory::TransitGateways => ResourceRecord::TransitGateway {
            tgw_id: str_at(raw, "TransitGatewayId"),
            state: str_at(raw, "State"),
            description: str_at(raw, "Description"),
        },
        ResourceCategory::PeeringAttachments => ResourceRecord::PeeringAttachment {
            attachment_id: str_at(raw, "TransitGatewayAttachmentId"),
            state: str_at(raw, "State"),
            local_tgw: str_at(raw, "TransitGatewayId"),
            peer_tgw: str_path(raw, &["AccepterTgwInfo", "TransitGatewayId"]),
            peer_region: str_path(raw, &["AccepterTgwInfo", "Region"]),
            requester_region: str_path(raw, &["RequesterTgwInfo", "Region"]),
        },
        ResourceCategory::VpcPeerings => ResourceRecord::VpcPeering {
            peering_id: str_at(raw, "VpcPeeringConnectionId"),
            status: str_path(raw, &["Status", "Code"]),
        },
    }
}

fn str_at(raw: &RawResource, key: &str) -> String {
    str_at_or(raw, key, "")
}

fn str_at_or(raw: &RawResource, key: &str, default: &str) -> String {
    match raw.get(key).and_then(|v| v.as_str()) {
        Some(s) => s.to_string(),
        None => default.to_string(),
    }
}

fn str_path(raw: &RawResource, path: &[&str]) -> String {
    let mut value = raw;
    for key in path {
        match value.get(key) {
            Some(v) => value = v,
            None => return String::new(),
        }
    }
    value.as_str().unwrap_or_default().to_string()
}

fn bool_at(raw: &RawResource, key: &str) -> bool {
    raw.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

fn bool_path(raw: &RawResource, path: &[&str]) -> bool {
    let mut value = raw;
    for key in path {
        match value.get(key) {
            Some(v) => value = v,
            None => return false,
        }
    }
    value.as_bool().unwrap_or(false)
}

fn first_resource_name(raw: &RawResource) -> String {
    raw.get("Resources")
        .and_then(|v| v.as_array())
        .and_then(|a| a.first())
        .and_then(|r| r.get("ResourceName"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}
