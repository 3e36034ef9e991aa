//! Fingerprint normalization for hashed build-artifact filenames
//!
//! Bundlers embed a content hash in output filenames for cache busting, so
//! the "same" logical asset gets a different name on every build. Before two
//! builds can be compared, raw paths are mapped into a stable key space:
//! chunk files merge into one synthetic `chunk.<a>+<b>+...js` key, and plain
//! assets have their hash segment stripped.
//!
//! Normalization never fails; paths matching no known pattern are logged and
//! dropped. Note that the output keys themselves match neither pattern, so
//! normalizing an already-normalized mapping empties it.

use std::sync::OnceLock;

use log::info;
use regex::Regex;

use crate::sizes::{SizeMapping, SizeRecord};

/// Compiled filename patterns (cached for reuse across calls)
static CHUNK_RE: OnceLock<Regex> = OnceLock::new();
static ASSET_RE: OnceLock<Regex> = OnceLock::new();

fn chunk_re() -> &'static Regex {
    CHUNK_RE.get_or_init(|| {
        Regex::new(r"chunk\.([\w-]+)\.\w{20}\.js").expect("chunk pattern is valid")
    })
}

fn asset_re() -> &'static Regex {
    ASSET_RE.get_or_init(|| {
        Regex::new(r"dist/assets/([\w-]+)(?:\.\w{20})?(\.\w+)").expect("asset pattern is valid")
    })
}

/// Classification of a raw build-output path
///
/// Matchers are evaluated in priority order: the chunk pattern wins over the
/// plain-asset pattern, and the first match ends classification for that
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetKey {
    /// One or more `chunk.<token>.<20-char-hash>.js` segments; carries the
    /// matched tokens in order of appearance
    Chunk(Vec<String>),
    /// A `dist/assets/<name>.<optional 20-char-hash>.<ext>` asset; carries
    /// the hash-stripped `<name><ext>` key
    Plain(String),
}

/// Classify a single build-output path
///
/// Returns `None` when the path matches neither pattern.
///
/// # Examples
///
/// ```
/// use asset_delta::normalize::{classify, AssetKey};
///
/// let key = classify("dist/assets/app.ab12cd34ef56ab12cd34.css");
/// assert_eq!(key, Some(AssetKey::Plain("app.css".to_string())));
///
/// let key = classify("dist/assets/chunk.vendors.ab12cd34ef56ab12cd34.js");
/// assert_eq!(key, Some(AssetKey::Chunk(vec!["vendors".to_string()])));
///
/// assert_eq!(classify("dist/robots.txt"), None);
/// ```
pub fn classify(path: &str) -> Option<AssetKey> {
    let tokens: Vec<String> = chunk_re()
        .captures_iter(path)
        .map(|cap| cap[1].to_string())
        .collect();
    if !tokens.is_empty() {
        return Some(AssetKey::Chunk(tokens));
    }

    asset_re()
        .captures(path)
        .map(|cap| AssetKey::Plain(format!("{}{}", &cap[1], &cap[2])))
}

/// Map a raw size mapping into a stable, hash-independent key space
///
/// Chunk tokens found anywhere in the mapping merge into a single synthetic
/// `chunk.<t1>+<t2>+....js` key carrying the record of the last
/// chunk-matching path processed. Tokens are not deduplicated and records
/// are not summed; last write wins. Paths matching neither pattern are
/// logged and excluded.
///
/// This function never fails; it only narrows.
pub fn normalize(raw: &SizeMapping) -> SizeMapping {
    let mut normalized = SizeMapping::new();
    let mut chunk_tokens: Vec<String> = Vec::new();
    let mut chunk_record: Option<SizeRecord> = None;

    for (path, record) in raw {
        match classify(path) {
            Some(AssetKey::Chunk(tokens)) => {
                chunk_tokens.extend(tokens);
                chunk_record = Some(*record);
            }
            Some(AssetKey::Plain(key)) => {
                normalized.insert(key, *record);
            }
            None => {
                info!("Ignoring file {path} as it does not match known asset file pattern");
            }
        }
    }

    if let Some(record) = chunk_record {
        normalized.insert(format!("chunk.{}.js", chunk_tokens.join("+")), record);
    }

    normalized
}
