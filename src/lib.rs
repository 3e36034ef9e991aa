#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! asset-delta library
//!
//! Core functionality for diffing built JS/CSS asset sizes between a base
//! branch and a pull-request branch. Usable programmatically in addition to
//! the CLI interface.
//!
//! The pipeline is three pure functions: normalize each branch's measured
//! sizes into a hash-independent key space, diff the two mappings, render
//! the result as a Markdown report.
//!
//! # Example
//!
//! ```
//! use asset_delta::diff::diff_sizes;
//! use asset_delta::normalize::normalize;
//! use asset_delta::report::render_report;
//! use asset_delta::sizes::{SizeMapping, SizeRecord};
//!
//! let mut base = SizeMapping::new();
//! base.insert(
//!     "dist/assets/app.ab12cd34ef56ab12cd34.css".to_string(),
//!     SizeRecord { raw: 100, gzip: 50, brotli: 40 },
//! );
//!
//! // A rebuild changes the fingerprint but not the logical asset
//! let mut head = SizeMapping::new();
//! head.insert(
//!     "dist/assets/app.98fe76dc54ba98fe76dc.css".to_string(),
//!     SizeRecord { raw: 120, gzip: 55, brotli: 42 },
//! );
//!
//! let diff = diff_sizes(&normalize(&base), &normalize(&head));
//! assert_eq!(diff["app.css"].raw, 20);
//!
//! let report = render_report(&diff);
//! assert!(report.contains("Files that got Bigger 🚨:"));
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Per-file size diffing between two builds
pub mod diff;
/// Error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// GitHub pull-request lookup and comment posting
pub mod github;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Package-manager install planning
pub mod install;
/// Built-asset scanning and compressed-size measurement
pub mod measure;
/// Fingerprint normalization for hashed filenames
pub mod normalize;
/// Markdown report rendering
pub mod report;
/// Size records and snapshot persistence
pub mod sizes;
