//! Per-file size diffing between two normalized mappings

use std::collections::BTreeMap;

use serde::Serialize;

use crate::sizes::{SizeMapping, SizeRecord};

/// Size change for one normalized key
///
/// For a file present in both builds the three metric fields are signed
/// deltas (comparison minus base) and `absolute` carries the comparison
/// branch's measured sizes. For a file new in the comparison build the
/// metric fields carry the absolute sizes directly and `absolute` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    /// Raw size delta in bytes (absolute size for new files)
    pub raw: i64,
    /// Gzip size delta in bytes (absolute size for new files)
    pub gzip: i64,
    /// Brotli size delta in bytes (absolute size for new files)
    pub brotli: i64,
    /// Comparison branch's measured sizes; present only for files that also
    /// exist in the base build
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute: Option<SizeRecord>,
}

/// Mapping from normalized key to its size change
pub type DiffMapping = BTreeMap<String, DiffRecord>;

fn delta(comparison: u64, base: u64) -> i64 {
    comparison as i64 - base as i64
}

/// Diff two normalized size mappings
///
/// Every key of `comparison` produces exactly one entry. Keys present only
/// in `base` (deleted files) produce none; the original tool never reported
/// deletions and that gap is preserved here.
///
/// # Examples
///
/// ```
/// use asset_delta::diff::diff_sizes;
/// use asset_delta::sizes::{SizeMapping, SizeRecord};
///
/// let mut base = SizeMapping::new();
/// base.insert("app.css".to_string(), SizeRecord { raw: 100, gzip: 50, brotli: 40 });
/// let mut comparison = SizeMapping::new();
/// comparison.insert("app.css".to_string(), SizeRecord { raw: 120, gzip: 55, brotli: 42 });
///
/// let diff = diff_sizes(&base, &comparison);
/// assert_eq!(diff["app.css"].raw, 20);
/// assert_eq!(diff["app.css"].absolute.unwrap().raw, 120);
/// ```
pub fn diff_sizes(base: &SizeMapping, comparison: &SizeMapping) -> DiffMapping {
    let mut diff = DiffMapping::new();

    for (key, new_size) in comparison {
        let record = match base.get(key) {
            None => DiffRecord {
                raw: new_size.raw as i64,
                gzip: new_size.gzip as i64,
                brotli: new_size.brotli as i64,
                absolute: None,
            },
            Some(origin_size) => DiffRecord {
                raw: delta(new_size.raw, origin_size.raw),
                gzip: delta(new_size.gzip, origin_size.gzip),
                brotli: delta(new_size.brotli, origin_size.brotli),
                absolute: Some(*new_size),
            },
        };
        diff.insert(key.clone(), record);
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw: u64, gzip: u64, brotli: u64) -> SizeRecord {
        SizeRecord { raw, gzip, brotli }
    }

    #[test]
    fn test_new_file_carries_absolute_sizes_without_absolute_field() {
        let base = SizeMapping::new();
        let mut comparison = SizeMapping::new();
        comparison.insert("app.css".to_string(), record(100, 50, 40));

        let diff = diff_sizes(&base, &comparison);

        let entry = &diff["app.css"];
        assert_eq!((entry.raw, entry.gzip, entry.brotli), (100, 50, 40));
        assert_eq!(entry.absolute, None);
    }

    #[test]
    fn test_changed_file_carries_signed_deltas_and_absolute() {
        let mut base = SizeMapping::new();
        base.insert("app.css".to_string(), record(100, 50, 40));
        let mut comparison = SizeMapping::new();
        comparison.insert("app.css".to_string(), record(120, 55, 42));

        let diff = diff_sizes(&base, &comparison);

        let entry = &diff["app.css"];
        assert_eq!((entry.raw, entry.gzip, entry.brotli), (20, 5, 2));
        assert_eq!(entry.absolute, Some(record(120, 55, 42)));
    }

    #[test]
    fn test_shrunk_file_produces_negative_deltas() {
        let mut base = SizeMapping::new();
        base.insert("vendor.js".to_string(), record(1000, 400, 350));
        let mut comparison = SizeMapping::new();
        comparison.insert("vendor.js".to_string(), record(800, 350, 300));

        let diff = diff_sizes(&base, &comparison);

        let entry = &diff["vendor.js"];
        assert_eq!((entry.raw, entry.gzip, entry.brotli), (-200, -50, -50));
    }

    #[test]
    fn test_unchanged_file_produces_zero_deltas_with_absolute() {
        let mut base = SizeMapping::new();
        base.insert("app.js".to_string(), record(500, 200, 180));
        let comparison = base.clone();

        let diff = diff_sizes(&base, &comparison);

        let entry = &diff["app.js"];
        assert_eq!((entry.raw, entry.gzip, entry.brotli), (0, 0, 0));
        assert_eq!(entry.absolute, Some(record(500, 200, 180)));
    }

    #[test]
    fn test_base_only_keys_are_omitted() {
        let mut base = SizeMapping::new();
        base.insert("deleted.css".to_string(), record(100, 50, 40));
        base.insert("kept.js".to_string(), record(10, 5, 4));
        let mut comparison = SizeMapping::new();
        comparison.insert("kept.js".to_string(), record(10, 5, 4));

        let diff = diff_sizes(&base, &comparison);

        assert_eq!(diff.len(), 1);
        assert!(!diff.contains_key("deleted.css"));
    }

    #[test]
    fn test_every_comparison_key_appears_in_diff() {
        let mut base = SizeMapping::new();
        base.insert("a.js".to_string(), record(1, 1, 1));
        let mut comparison = SizeMapping::new();
        comparison.insert("a.js".to_string(), record(2, 2, 2));
        comparison.insert("b.js".to_string(), record(3, 3, 3));
        comparison.insert("c.css".to_string(), record(4, 4, 4));

        let diff = diff_sizes(&base, &comparison);

        for key in comparison.keys() {
            assert!(diff.contains_key(key), "missing diff entry for {key}");
        }
    }

    #[test]
    fn test_diff_json_omits_absent_absolute_field() {
        let base = SizeMapping::new();
        let mut comparison = SizeMapping::new();
        comparison.insert("new.js".to_string(), record(10, 5, 4));

        let diff = diff_sizes(&base, &comparison);
        let json = serde_json::to_string(&diff).unwrap();

        assert!(!json.contains("absolute"));
    }
}
