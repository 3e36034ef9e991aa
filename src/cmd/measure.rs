//! Measure command implementation
//!
//! Handles `asset-delta measure`: optionally install dependencies and run
//! the project build, then scan dist/assets and emit a size snapshot.

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::error::AssetDeltaError;
use crate::fmt::{CHART, CHECKMARK, HAMMER, WRENCH};
use crate::infra::{CommandExecutor, RealCommandExecutor, RealFileSystem};
use crate::install;
use crate::measure::AssetScanner;
use crate::sizes;

/// Measure built assets and write or print a size snapshot
///
/// # Examples
///
/// ```no_run
/// use asset_delta::cmd::measure::cmd_measure;
///
/// // Measure an already-built project and write base.json
/// cmd_measure(".", Some("base.json"), false, None)?;
///
/// // Install, build, then measure
/// cmd_measure(".", Some("head.json"), true, Some("yarn build"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if an install or build step fails, dist/assets is
/// missing, or the snapshot cannot be written.
pub fn cmd_measure(
    root: &str,
    output: Option<&str>,
    install: bool,
    build: Option<&str>,
) -> Result<()> {
    let root = Path::new(root);
    let executor = RealCommandExecutor;

    if install {
        let plan = install::plan_install(root, &RealFileSystem, &executor)?;
        eprintln!(
            "{} Installing dependencies: {}",
            WRENCH,
            style(plan.command_line()).bold()
        );
        install::run_install(&plan, root, &executor)?;
    }

    if let Some(build_cmd) = build {
        run_build(build_cmd, root, &executor)?;
    }

    eprintln!("{} Measuring assets under {}", CHART, root.display());
    let mapping = AssetScanner::new(root).scan()?;

    match output {
        Some(path) => {
            let path = Path::new(path);
            sizes::save_snapshot(path, &mapping)?;
            eprintln!(
                "{} Wrote {} asset sizes to {}",
                CHECKMARK,
                mapping.len(),
                style(path.display()).cyan()
            );
        }
        None => {
            let json = serde_json::to_string_pretty(&mapping)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn run_build(
    build_cmd: &str,
    root: &Path,
    executor: &impl CommandExecutor,
) -> Result<(), AssetDeltaError> {
    // Whitespace splitting, not shell parsing; quoting belongs in a script
    let mut parts = build_cmd.split_whitespace();
    let program = parts.next().ok_or_else(|| AssetDeltaError::CommandFailed {
        command: build_cmd.to_string(),
        detail: "empty build command".to_string(),
    })?;
    let args: Vec<&str> = parts.collect();

    eprintln!("{} Running build: {}", HAMMER, style(build_cmd).bold());
    let status = executor
        .run(|cmd| cmd.args(&args).current_dir(root), program)
        .map_err(|source| AssetDeltaError::Io {
            context: format!("running {build_cmd}"),
            source,
        })?;

    if !status.success() {
        return Err(AssetDeltaError::CommandFailed {
            command: build_cmd.to_string(),
            detail: String::new(),
        });
    }

    Ok(())
}
