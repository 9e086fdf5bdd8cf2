//! File-backed provider reading exported listing snapshots from a directory.
//!
//! Each `(category, region)` listing lives in `<dir>/<category>_<region>.json`
//! as a JSON array of raw provider records. A missing or unreadable file maps
//! to `Unavailable`, which exercises the same contract a live transport
//! failure would.

use std::path::PathBuf;

use tracing::warn;

use super::{ProviderClient, ProviderResponse, RawResource, Region, ResourceCategory};

/// Provider client backed by a directory of listing snapshot files.
pub struct SnapshotProvider {
    dir: PathBuf,
}

impl SnapshotProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn listing_path(&self, category: ResourceCategory, region: &Region) -> PathBuf {
        self.dir.join(format!("{}_{}.json", category.as_str(), region))
    }
}

impl ProviderClient for SnapshotProvider {
    fn list(&self, category: ResourceCategory, region: &Region) -> ProviderResponse {
        let path = self.listing_path(category, region);

        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    category = %category,
                    region = %region,
                    "listing snapshot unreadable: {}",
                    e
                );
                return ProviderResponse::Unavailable {
                    reason: format!("cannot read '{}': {}", path.display(), e),
                };
            }
        };

        match serde_json::from_str::<Vec<RawResource>>(&contents) {
            Ok(items) => ProviderResponse::Available(items),
            Err(e) => {
                warn!(
                    category = %category,
                    region = %region,
                    "listing snapshot malformed: {}",
                    e
                );
                ProviderResponse::Unavailable {
                    reason: format!("malformed listing '{}': {}", path.display(), e),
                }
            }
        }
    }
}
