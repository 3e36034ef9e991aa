//! Command handlers for the asset-delta CLI
//!
//! Each submodule handles a specific CLI command.

pub mod comment;
pub mod completions;
pub mod diff;
pub mod measure;

pub use comment::cmd_comment;
pub use completions::cmd_completions;
pub use diff::cmd_diff;
pub use measure::cmd_measure;
