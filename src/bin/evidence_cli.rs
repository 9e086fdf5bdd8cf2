//! CLI for audit evidence generation.
//!
//! Subcommands:
//! - `generate`: Run every proof, write the bundle and summary, package the archive.
//! - `proof`: Generate a single proof document.
//! - `verify`: Load a bundle file and validate it against the schema.
//!
//! Exit codes: 0 = compliant, 1 = non-compliant or unverifiable, 2 = error.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use audit_evidence::bundle::schema::validate_bundle;
use audit_evidence::bundle::BundleAssembler;
use audit_evidence::export::{self, json_export};
use audit_evidence::profiles::{profile_by_name, FrameworkProfile};
use audit_evidence::proof::{self, ProofType, Verdict};
use audit_evidence::provider::{Region, SnapshotProvider};

#[derive(Parser)]
#[command(name = "audit-evidence", about = "Compliance evidence bundle toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the full evidence bundle, summary, and archive.
    Generate {
        /// Directory of provider listing snapshots.
        #[arg(long)]
        snapshots: PathBuf,
        /// Output directory for the bundle, summary, and archive.
        #[arg(long)]
        out: PathBuf,
        /// Framework profile name.
        #[arg(long, default_value = "appi")]
        profile: String,
        /// Override the designated region.
        #[arg(long)]
        designated_region: Option<String>,
        /// Override the other (must-be-absent) region.
        #[arg(long)]
        other_region: Option<String>,
        /// Override the edge listing scope.
        #[arg(long)]
        edge_region: Option<String>,
    },
    /// Generate one proof document.
    Proof {
        /// Directory of provider listing snapshots.
        #[arg(long)]
        snapshots: PathBuf,
        /// Proof type name (e.g. data_residency, network_corridor).
        #[arg(long = "type")]
        proof_type: String,
        /// Output file; defaults to <type>_proof.json in the current directory.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Framework profile name.
        #[arg(long, default_value = "appi")]
        profile: String,
    },
    /// Validate a previously generated bundle file.
    Verify {
        /// Path to the bundle JSON file.
        bundle: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Generate {
            snapshots,
            out,
            profile,
            designated_region,
            other_region,
            edge_region,
        } => run_generate(
            &snapshots,
            &out,
            &profile,
            designated_region,
            other_region,
            edge_region,
        ),
        Commands::Proof {
            snapshots,
            proof_type,
            out,
            profile,
        } => run_proof(&snapshots, &proof_type, out.as_deref(), &profile),
        Commands::Verify { bundle } => run_verify(&bundle),
    };

    process::exit(exit_code);
}

fn load_profile(
    name: &str,
    designated: Option<String>,
    other: Option<String>,
    edge: Option<String>,
) -> Option<FrameworkProfile> {
    let mut profile = profile_by_name(name)?;
    if let Some(region) = designated {
        profile.designated_region = Region::new(region);
    }
    if let Some(region) = other {
        profile.other_region = Region::new(region);
    }
    if let Some(region) = edge {
        profile.edge_region = Region::new(region);
    }
    Some(profile)
}

fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail | Verdict::Unknown => 1,
    }
}

fn run_generate(
    snapshots: &Path,
    out: &Path,
    profile_name: &str,
    designated: Option<String>,
    other: Option<String>,
    edge: Option<String>,
) -> i32 {
    let profile = match load_profile(profile_name, designated, other, edge) {
        Some(p) => p,
        None => {
            eprintln!("Error: unknown profile '{}'. Use 'appi'.", profile_name);
            return 2;
        }
    };

    if let Err(e) = std::fs::create_dir_all(out) {
        eprintln!("Error: cannot create output directory '{}': {}", out.display(), e);
        return 2;
    }

    let provider = SnapshotProvider::new(snapshots);
    let bundle = BundleAssembler::new(&provider, profile).run();

    if let Err(e) = validate_bundle(&bundle) {
        eprintln!("Error: generated bundle failed validation: {}", e);
        return 2;
    }

    let bundle_path = out.join(export::BUNDLE_FILE_NAME);
    if let Err(e) = json_export::write_document(&bundle_path, &bundle) {
        eprintln!("Error: {}", e);
        return 2;
    }

    let summary = export::summary_document(&bundle);
    let summary_path = out.join(export::SUMMARY_FILE_NAME);
    if let Err(e) = json_export::write_document(&summary_path, &summary) {
        eprintln!("Error: {}", e);
        return 2;
    }

    let archive_name = format!(
        "audit_evidence_bundle_{}.zip",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    let archive_path = out.join(archive_name);
    let manifest = match export::package(&archive_path, &export::artifact_candidates(out)) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    match json_export::to_json(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot serialize summary: {}", e);
            return 2;
        }
    }
    eprintln!("Bundle written to {}", bundle_path.display());
    eprintln!(
        "Archive {} contains {} file(s)",
        manifest.archive,
        manifest.entries.len()
    );

    verdict_exit_code(bundle.summary.status)
}

fn run_proof(snapshots: &Path, type_name: &str, out: Option<&Path>, profile_name: &str) -> i32 {
    let profile = match profile_by_name(profile_name) {
        Some(p) => p,
        None => {
            eprintln!("Error: unknown profile '{}'. Use 'appi'.", profile_name);
            return 2;
        }
    };

    let proof_type = match ProofType::from_name(type_name) {
        Some(t) => t,
        None => {
            eprintln!(
                "Error: unknown proof type '{}'. Known: {}",
                type_name,
                ProofType::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            return 2;
        }
    };

    let provider = SnapshotProvider::new(snapshots);
    let record = proof::generate(proof_type, &provider, &profile);

    let default_path = PathBuf::from(format!("{}_proof.json", proof_type.as_str()));
    let out_path = out.unwrap_or(&default_path);
    if let Err(e) = json_export::write_document(out_path, &record) {
        eprintln!("Error: {}", e);
        return 2;
    }

    eprintln!(
        "Proof '{}' written to {} (overall {:?})",
        proof_type,
        out_path.display(),
        record.overall
    );
    verdict_exit_code(record.overall)
}

fn run_verify(bundle_path: &Path) -> i32 {
    let bundle = match json_export::read_bundle(bundle_path) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    if let Err(e) = validate_bundle(&bundle) {
        eprintln!("Error: bundle invalid: {}", e);
        return 2;
    }

    let summary = export::summary_document(&bundle);
    match json_export::to_json(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot serialize summary: {}", e);
            return 2;
        }
    }

    verdict_exit_code(bundle.summary.status)
}
