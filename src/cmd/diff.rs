//! Diff command implementation
//!
//! Handles `asset-delta diff`: load two size snapshots, normalize their
//! keys, diff them, and print the Markdown report (or the raw diff mapping
//! as JSON).

use std::path::Path;

use anyhow::Result;

use crate::diff::{diff_sizes, DiffMapping};
use crate::normalize::normalize;
use crate::report::render_report;
use crate::sizes;

/// Compute the normalized diff between two snapshot files
///
/// # Errors
///
/// Returns an error if either snapshot cannot be loaded.
pub fn load_diff(base: &str, comparison: &str) -> Result<DiffMapping> {
    let base_sizes = sizes::load_snapshot(Path::new(base))?;
    let comparison_sizes = sizes::load_snapshot(Path::new(comparison))?;

    Ok(diff_sizes(
        &normalize(&base_sizes),
        &normalize(&comparison_sizes),
    ))
}

/// Diff two snapshots and print the report
///
/// # Examples
///
/// ```no_run
/// use asset_delta::cmd::diff::cmd_diff;
///
/// cmd_diff("base.json", "head.json", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if either snapshot cannot be loaded.
pub fn cmd_diff(base: &str, comparison: &str, json: bool) -> Result<()> {
    let diff = load_diff(base, comparison)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        println!("{}", render_report(&diff));
    }

    Ok(())
}
