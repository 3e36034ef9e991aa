//! Built-asset size measurement
//!
//! Scans a build output directory for JS/CSS assets and measures each file
//! three ways: raw bytes, gzip at maximum compression (level 9), and brotli
//! at quality 11. The thresholds match the reporter this tool replaces, so
//! snapshots stay comparable across the two.

use std::io::Write;
use std::path::{Path, PathBuf};

use brotli::enc::BrotliEncoderParams;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use walkdir::WalkDir;

use crate::error::AssetDeltaError;
use crate::sizes::{SizeMapping, SizeRecord};

/// Directory under the project root that holds built assets
pub const ASSET_DIR: &str = "dist/assets";

/// File extensions included in a measurement
pub const ASSET_EXTENSIONS: &[&str] = &["js", "css"];

/// Measure the raw, gzip, and brotli sizes of a byte buffer
///
/// # Examples
///
/// ```
/// use asset_delta::measure::measure_bytes;
///
/// let record = measure_bytes(b"const answer = 42;\n").unwrap();
/// assert_eq!(record.raw, 19);
/// assert!(record.gzip > 0 && record.brotli > 0);
/// ```
///
/// # Errors
///
/// Returns an error if either compressor fails, which for in-memory buffers
/// indicates an internal bug rather than an environmental problem.
pub fn measure_bytes(data: &[u8]) -> Result<SizeRecord, AssetDeltaError> {
    let io_err = |source| AssetDeltaError::Io {
        context: "compressing asset contents".to_string(),
        source,
    };

    let mut gz = GzEncoder::new(Vec::new(), Compression::best());
    gz.write_all(data).map_err(io_err)?;
    let gzipped = gz.finish().map_err(io_err)?;

    let mut params = BrotliEncoderParams::default();
    params.quality = 11;
    let mut brotlied = Vec::new();
    brotli::BrotliCompress(&mut std::io::Cursor::new(data), &mut brotlied, &params)
        .map_err(io_err)?;

    Ok(SizeRecord {
        raw: data.len() as u64,
        gzip: gzipped.len() as u64,
        brotli: brotlied.len() as u64,
    })
}

/// Scans a project's build output and measures every JS/CSS asset
#[derive(Debug)]
pub struct AssetScanner {
    root: PathBuf,
}

impl AssetScanner {
    /// Create a scanner rooted at a project directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scan `<root>/dist/assets` and produce a size mapping
    ///
    /// Keys are paths relative to the project root with `/` separators, so
    /// they line up with the patterns the normalizer expects
    /// (`dist/assets/app.<hash>.css`). Non-asset files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeltaError::AssetsDirMissing`] when `dist/assets` does
    /// not exist, and an I/O error if a file cannot be read.
    pub fn scan(&self) -> Result<SizeMapping, AssetDeltaError> {
        let assets_dir = self.root.join(ASSET_DIR);
        if !assets_dir.is_dir() {
            return Err(AssetDeltaError::AssetsDirMissing { path: assets_dir });
        }

        let mut mapping = SizeMapping::new();

        for entry in WalkDir::new(&assets_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| AssetDeltaError::Io {
                context: format!("scanning {}", assets_dir.display()),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let is_asset = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ASSET_EXTENSIONS.contains(&ext));
            if !is_asset {
                debug!("skipping non-asset file {}", path.display());
                continue;
            }

            let data = std::fs::read(path).map_err(|source| AssetDeltaError::Io {
                context: format!("reading {}", path.display()),
                source,
            })?;

            mapping.insert(self.key_for(path), measure_bytes(&data)?);
        }

        Ok(mapping)
    }

    /// Relative, slash-separated snapshot key for an asset path
    fn key_for(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
