//! Archive packaging for the evidence artifacts.
//!
//! The archive contains exactly the candidate files that exist at packaging
//! time; a missing optional file is an absence, not an error. Every included
//! file gets an integrity entry (size, SHA-256) in the returned manifest.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use zip::write::FileOptions;
use zip::CompressionMethod;

use crate::error::{EvidenceError, EvidenceResult};

/// Integrity record for one file included in the archive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub file_name: String,
    pub size_bytes: u64,
    pub sha256: String,
}

/// Manifest of what actually went into the archive.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ArtifactManifest {
    pub archive: String,
    pub entries: Vec<ArtifactEntry>,
}

/// Create a compressed archive at `archive_path` containing every candidate
/// that exists on disk, skipping the rest.
pub fn package(archive_path: &Path, candidates: &[PathBuf]) -> EvidenceResult<ArtifactManifest> {
    let archive_display = archive_path.display().to_string();
    let file = File::create(archive_path)
        .map_err(|e| EvidenceError::packaging_error(archive_display.clone(), e.to_string()))?;

    let mut writer = zip::ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut entries = Vec::new();

    for candidate in candidates {
        if !candidate.is_file() {
            debug!(path = %candidate.display(), "candidate absent, skipped");
            continue;
        }

        let file_name = candidate
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = std::fs::read(candidate)
            .map_err(|e| EvidenceError::packaging_error(archive_display.clone(), e.to_string()))?;

        writer
            .start_file(file_name.as_str(), options)
            .map_err(|e| EvidenceError::packaging_error(archive_display.clone(), e.to_string()))?;
        writer
            .write_all(&data)
            .map_err(|e| EvidenceError::packaging_error(archive_display.clone(), e.to_string()))?;

        entries.push(ArtifactEntry {
            file_name,
            size_bytes: data.len() as u64,
            sha256: hex::encode(Sha256::digest(&data)),
        });
    }

    writer
        .finish()
        .map_err(|e| EvidenceError::packaging_error(archive_display.clone(), e.to_string()))?;

    info!(archive = %archive_display, files = entries.len(), "archive packaged");
    Ok(ArtifactManifest {
        archive: archive_display,
        entries,
    })
}
