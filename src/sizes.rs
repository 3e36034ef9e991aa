//! Size records and snapshot persistence
//!
//! A snapshot is the JSON mapping produced by the `measure` command (or by a
//! compatible external reporter): build-output path → raw/gzip/brotli byte
//! counts. Two snapshots, one per branch, are the inputs to a diff.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AssetDeltaError;

/// Measured byte counts for a single build-output file
///
/// Produced once per file by the measurement step and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRecord {
    /// Uncompressed size in bytes
    pub raw: u64,
    /// Gzip-compressed size in bytes
    pub gzip: u64,
    /// Brotli-compressed size in bytes
    pub brotli: u64,
}

/// Mapping from file path (or normalized key) to its size record
///
/// Sorted iteration keeps the chunk-merge last-write-wins behavior in
/// [`crate::normalize::normalize`] deterministic; beyond that, key order
/// carries no meaning.
pub type SizeMapping = BTreeMap<String, SizeRecord>;

/// Load a size snapshot from a JSON file
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or does not
/// parse as a path → `{raw, gzip, brotli}` mapping.
pub fn load_snapshot(path: &Path) -> Result<SizeMapping, AssetDeltaError> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            AssetDeltaError::FileNotFound {
                path: path.to_path_buf(),
                operation: "loading size snapshot".to_string(),
            }
        } else {
            AssetDeltaError::Io {
                context: format!("reading snapshot {}", path.display()),
                source,
            }
        }
    })?;

    serde_json::from_str(&contents).map_err(|source| AssetDeltaError::InvalidSnapshot {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a size snapshot as pretty-printed JSON
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn save_snapshot(path: &Path, mapping: &SizeMapping) -> Result<(), AssetDeltaError> {
    let json = serde_json::to_string_pretty(mapping).map_err(|source| {
        AssetDeltaError::InvalidSnapshot {
            path: path.to_path_buf(),
            source,
        }
    })?;

    std::fs::write(path, json).map_err(|source| AssetDeltaError::Io {
        context: format!("writing snapshot {}", path.display()),
        source,
    })
}
