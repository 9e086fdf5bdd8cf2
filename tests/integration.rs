//! Integration tests for the evidence pipeline.
//!
//! These tests exercise the full flow: fetch listings, normalize, assert,
//! assemble the bundle, persist it, and package the archive.

use std::collections::BTreeMap;
use std::fs::File;

use serde_json::json;

use audit_evidence::bundle::schema::validate_bundle;
use audit_evidence::bundle::{BundleAssembler, BundleSummary};
use audit_evidence::export::{self, json_export};
use audit_evidence::normalize::{normalize, ResourceRecord};
use audit_evidence::profiles::appi_profile;
use audit_evidence::proof::{self, ProofType, Verdict};
use audit_evidence::provider::{
    ProviderClient, ProviderResponse, Region, ResourceCategory, SnapshotProvider, StaticProvider,
};
use zip::ZipArchive;

const TOKYO: &str = "ap-northeast-1";
const SAOPAULO: &str = "sa-east-1";
const EDGE: &str = "us-east-1";

/// Helper: a provider where every listing is present and compliant.
fn compliant_provider() -> StaticProvider {
    StaticProvider::new()
        .with_listing(
            ResourceCategory::DbInstances,
            TOKYO,
            vec![json!({
                "DBInstanceIdentifier": "liberdade-db",
                "AvailabilityZone": "ap-northeast-1a",
                "Endpoint": {"Address": "liberdade-db.example"},
                "MultiAZ": true,
                "StorageEncrypted": true,
                "Engine": "postgres"
            })],
        )
        .with_listing(ResourceCategory::DbInstances, SAOPAULO, vec![])
        .with_listing(
            ResourceCategory::DbSnapshots,
            TOKYO,
            vec![json!({"DBSnapshotIdentifier": "snap-1", "Encrypted": true})],
        )
        .with_listing(ResourceCategory::DbSnapshots, SAOPAULO, vec![])
        .with_listing(
            ResourceCategory::TransitGateways,
            TOKYO,
            vec![json!({"TransitGatewayId": "tgw-tokyo", "State": "available"})],
        )
        .with_listing(
            ResourceCategory::TransitGateways,
            SAOPAULO,
            vec![json!({"TransitGatewayId": "tgw-sp", "State": "available"})],
        )
        .with_listing(
            ResourceCategory::PeeringAttachments,
            TOKYO,
            vec![json!({
                "TransitGatewayAttachmentId": "tgw-attach-1",
                "State": "available",
                "TransitGatewayId": "tgw-tokyo",
                "AccepterTgwInfo": {"TransitGatewayId": "tgw-sp", "Region": SAOPAULO},
                "RequesterTgwInfo": {"Region": TOKYO}
            })],
        )
        .with_listing(ResourceCategory::PeeringAttachments, SAOPAULO, vec![])
        .with_listing(ResourceCategory::VpcPeerings, TOKYO, vec![])
        .with_listing(ResourceCategory::VpcPeerings, SAOPAULO, vec![])
        .with_listing(
            ResourceCategory::TrailEvents,
            TOKYO,
            vec![json!({
                "EventName": "CreateDBInstance",
                "EventTime": "2026-08-28T10:00:00Z",
                "Username": "ops-admin",
                "SourceIPAddress": "203.0.113.5",
                "Resources": [{"ResourceName": "liberdade-db"}]
            })],
        )
        .with_listing(
            ResourceCategory::EdgeDistributions,
            EDGE,
            vec![json!({
                "Id": "E123",
                "DomainName": "dxxx.cloudfront.net",
                "Status": "Deployed",
                "Enabled": true,
                "WebACLId": "arn:aws:wafv2:acl/app",
                "Logging": {"Enabled": true, "Bucket": "edge-logs"}
            })],
        )
        .with_listing(
            ResourceCategory::WebAclRules,
            EDGE,
            vec![json!({"Name": "app-acl", "Id": "acl-1", "ARN": "arn:aws:wafv2:acl/app"})],
        )
        .with_listing(
            ResourceCategory::FlowLogs,
            TOKYO,
            vec![json!({"FlowLogId": "fl-1", "ResourceType": "VPC", "ResourceId": "vpc-1", "FlowLogStatus": "ACTIVE"})],
        )
        .with_listing(
            ResourceCategory::FlowLogs,
            SAOPAULO,
            vec![json!({"FlowLogId": "fl-2", "ResourceType": "VPC", "ResourceId": "vpc-2", "FlowLogStatus": "ACTIVE"})],
        )
}

#[test]
fn test_full_compliant_run() {
    let provider = compliant_provider();
    let bundle = BundleAssembler::new(&provider, appi_profile()).run();

    validate_bundle(&bundle).unwrap();

    assert_eq!(bundle.framework_id, "APPI");
    assert_eq!(bundle.proofs.len(), 5);
    for proof_type in ProofType::ALL {
        let record = &bundle.proofs[proof_type.as_str()];
        assert_eq!(record.overall, Verdict::Pass, "proof {}", proof_type);
        assert!(record.unavailable.is_empty());
    }
    assert_eq!(bundle.summary.status, Verdict::Pass);
    assert_eq!(bundle.summary.passed, 5);
}

#[test]
fn test_residency_scenario_pass_then_fail() {
    // Designated region has one database, other region has none: PASS.
    let provider = compliant_provider();
    let record = proof::generate(ProofType::DataResidency, &provider, &appi_profile());
    assert_eq!(record.assertions["presence_in_designated_region"], true);
    assert_eq!(record.assertions["absence_in_other_region"], true);
    assert_eq!(record.overall, Verdict::Pass);

    // A stray database appears in the other region: same assertions, FAIL.
    let provider = compliant_provider().with_listing(
        ResourceCategory::DbInstances,
        SAOPAULO,
        vec![json!({"DBInstanceIdentifier": "stray-db"})],
    );
    let record = proof::generate(ProofType::DataResidency, &provider, &appi_profile());
    assert_eq!(record.assertions["presence_in_designated_region"], true);
    assert_eq!(record.assertions["absence_in_other_region"], false);
    assert_eq!(record.overall, Verdict::Fail);
}

#[test]
fn test_unavailable_link_fetch_makes_corridor_unknown_and_bundle_non_pass() {
    let provider = compliant_provider().with_unavailable(
        ResourceCategory::PeeringAttachments,
        TOKYO,
        "request timed out",
    );
    let bundle = BundleAssembler::new(&provider, appi_profile()).run();

    let corridor = &bundle.proofs["network_corridor"];
    assert_eq!(corridor.overall, Verdict::Unknown);
    assert_eq!(corridor.unavailable.len(), 1);
    assert_eq!(
        corridor.unavailable[0].category,
        ResourceCategory::PeeringAttachments
    );

    // Every other proof still passes, yet the bundle is not PASS.
    assert_eq!(bundle.summary.passed, 4);
    assert_eq!(bundle.summary.unknown, 1);
    assert_eq!(bundle.summary.failed, 0);
    assert_eq!(bundle.summary.status, Verdict::Unknown);
    validate_bundle(&bundle).unwrap();
}

#[test]
fn test_unavailable_is_never_pass_or_fail_for_any_category() {
    let profile = appi_profile();
    for proof_type in ProofType::ALL {
        for (category, region) in proof_type.fetch_plan(&profile) {
            let provider =
                compliant_provider().with_unavailable(category, region.clone(), "denied");
            let record = proof::generate(proof_type, &provider, &profile);
            assert_eq!(
                record.overall,
                Verdict::Unknown,
                "proof {} with {} unavailable in {}",
                proof_type,
                category,
                region
            );
        }
    }
}

#[test]
fn test_overall_matches_assertion_conjunction_when_fully_available() {
    let provider = compliant_provider().with_listing(
        ResourceCategory::VpcPeerings,
        SAOPAULO,
        vec![json!({"VpcPeeringConnectionId": "pcx-1", "Status": {"Code": "active"}})],
    );
    let bundle = BundleAssembler::new(&provider, appi_profile()).run();

    for record in bundle.proofs.values() {
        assert!(record.unavailable.is_empty());
        let conjunction = record.assertions.values().all(|p| *p);
        let expected = if conjunction { Verdict::Pass } else { Verdict::Fail };
        assert_eq!(record.overall, expected, "proof {}", record.proof_type);
    }
    assert_eq!(bundle.proofs["network_corridor"].overall, Verdict::Fail);
    assert_eq!(bundle.summary.status, Verdict::Fail);
}

#[test]
fn test_summary_counts_partition_proofs() {
    let provider = compliant_provider()
        .with_listing(
            ResourceCategory::DbInstances,
            SAOPAULO,
            vec![json!({"DBInstanceIdentifier": "stray"})],
        )
        .with_unavailable(ResourceCategory::TrailEvents, TOKYO, "denied");
    let bundle = BundleAssembler::new(&provider, appi_profile()).run();

    let s = &bundle.summary;
    assert_eq!(s.total_proofs, bundle.proofs.len());
    assert_eq!(s.passed + s.failed + s.unknown, s.total_proofs);
    assert_eq!(s.failed, 1);
    assert_eq!(s.unknown, 1);
    // A confirmed violation outranks an unverifiable proof.
    assert_eq!(s.status, Verdict::Fail);
    assert_eq!(BundleSummary::derive(&bundle.proofs), *s);
}

#[test]
fn test_normalization_idempotent_across_pipeline() {
    let raw = json!({
        "DBInstanceIdentifier": "liberdade-db",
        "Endpoint": {"Address": "liberdade-db.example"},
        "StorageEncrypted": true
    });
    let region = Region::from(TOKYO);
    let first = normalize(ResourceCategory::DbInstances, &region, &raw);
    let second = normalize(ResourceCategory::DbInstances, &region, &raw);
    assert_eq!(first, second);
}

#[test]
fn test_snapshot_provider_end_to_end_with_missing_listings() {
    let dir = tempfile::tempdir().unwrap();
    // Only the flow log listings exist on disk; everything else is absent.
    std::fs::write(
        dir.path().join("flow_logs_ap-northeast-1.json"),
        serde_json::to_string(&vec![
            json!({"FlowLogId": "fl-1", "FlowLogStatus": "ACTIVE"}),
        ])
        .unwrap(),
    )
    .unwrap();
    std::fs::write(dir.path().join("flow_logs_sa-east-1.json"), "[]").unwrap();

    let provider = SnapshotProvider::new(dir.path());
    let bundle = BundleAssembler::new(&provider, appi_profile()).run();

    assert_eq!(bundle.proofs["flow_logs"].overall, Verdict::Pass);
    for proof_type in [
        ProofType::DataResidency,
        ProofType::NetworkCorridor,
        ProofType::ChangeTrail,
        ProofType::EdgeSecurity,
    ] {
        assert_eq!(
            bundle.proofs[proof_type.as_str()].overall,
            Verdict::Unknown,
            "proof {}",
            proof_type
        );
    }
    assert_eq!(bundle.summary.status, Verdict::Unknown);
}

#[test]
fn test_persist_and_package_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path();

    let provider = compliant_provider();
    let bundle = BundleAssembler::new(&provider, appi_profile()).run();

    json_export::write_document(&out.join(export::BUNDLE_FILE_NAME), &bundle).unwrap();
    let summary = export::summary_document(&bundle);
    json_export::write_document(&out.join(export::SUMMARY_FILE_NAME), &summary).unwrap();

    // One sibling proof document present, one absent.
    let residency = proof::generate(ProofType::DataResidency, &provider, &appi_profile());
    json_export::write_document(&out.join("data_residency_proof.json"), &residency).unwrap();

    let archive_path = out.join("audit_evidence_bundle.zip");
    let manifest = export::package(&archive_path, &export::artifact_candidates(out)).unwrap();

    let names: Vec<&str> = manifest.entries.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            export::BUNDLE_FILE_NAME,
            export::SUMMARY_FILE_NAME,
            "data_residency_proof.json"
        ]
    );

    let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 3);
    assert!(archive.by_name("network_corridor_proof.json").is_err());
}

#[test]
fn test_bundle_document_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(export::BUNDLE_FILE_NAME);

    let provider = compliant_provider();
    let bundle = BundleAssembler::new(&provider, appi_profile()).run();
    json_export::write_document(&path, &bundle).unwrap();

    let loaded = json_export::read_bundle(&path).unwrap();
    validate_bundle(&loaded).unwrap();
    assert_eq!(loaded.generated_at, bundle.generated_at);
    assert_eq!(loaded.summary, bundle.summary);
    assert_eq!(loaded.proofs.len(), bundle.proofs.len());

    let verdicts: BTreeMap<&String, Verdict> = loaded
        .proofs
        .iter()
        .map(|(name, record)| (name, record.overall))
        .collect();
    assert!(verdicts.values().all(|v| *v == Verdict::Pass));
}

#[test]
fn test_empty_listing_is_verified_absence_not_unknown() {
    // The forbidden-path category returns an empty, confirmed listing. This
    // must read as compliant absence, not as "could not check".
    let provider = compliant_provider();
    let response = provider.list(ResourceCategory::VpcPeerings, &Region::from(SAOPAULO));
    assert_eq!(response, ProviderResponse::Available(vec![]));

    let record = proof::generate(ProofType::NetworkCorridor, &provider, &appi_profile());
    assert_eq!(record.assertions["no_direct_peering"], true);
    assert_eq!(record.overall, Verdict::Pass);
}

#[test]
fn test_normalized_records_appear_under_their_region() {
    let provider = compliant_provider();
    let record = proof::generate(ProofType::DataResidency, &provider, &appi_profile());

    let tokyo_records = &record.evidence[&Region::from(TOKYO)];
    assert!(tokyo_records.iter().any(|r| matches!(
        r,
        ResourceRecord::DbInstance { id, encrypted: true, .. } if id == "liberdade-db"
    )));
    assert!(record.evidence[&Region::from(SAOPAULO)].is_empty());
}
