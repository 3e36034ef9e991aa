//! Package-manager install planning
//!
//! Picks the install command from whichever lockfile the project commits.
//! The npm special case is historical but load-bearing: a v2
//! package-lock.json is npm 7's format, and any other npm major (6 rewrites
//! it, 8+ upgrades it to v3) would mutate the lockfile, so those projects
//! are installed with `npx npm@7 ci` instead.

use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::error::AssetDeltaError;
use crate::infra::{CommandExecutor, FileSystem};

/// The fields of package-lock.json install planning cares about
#[derive(Debug, Deserialize)]
struct PackageLock {
    #[serde(rename = "lockfileVersion")]
    lockfile_version: Option<u64>,
}

/// A resolved install command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    /// Program to invoke
    pub program: String,
    /// Arguments to pass
    pub args: Vec<String>,
}

impl InstallPlan {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// The full command line, for logging and error messages
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Parse the major component out of `npm -v` output
fn npm_major_version(executor: &impl CommandExecutor) -> Result<u64, AssetDeltaError> {
    let output = executor
        .execute(|cmd| cmd.arg("-v"), "npm")
        .map_err(|source| AssetDeltaError::Io {
            context: "running npm -v".to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(AssetDeltaError::CommandFailed {
            command: "npm -v".to_string(),
            detail: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    version
        .split('.')
        .next()
        .and_then(|major| major.parse().ok())
        .ok_or_else(|| AssetDeltaError::CommandFailed {
            command: "npm -v".to_string(),
            detail: format!("unparseable version output: {version:?}"),
        })
}

/// Select the install command for a project directory
///
/// - `yarn.lock` → `yarn --frozen-lockfile`
/// - `package-lock.json` → `npm ci`, or `npx npm@7 ci` when the lockfile is
///   v2 but the installed npm is any major other than 7
/// - neither → logged warning and `npm install`
///
/// # Errors
///
/// Returns an error if package-lock.json cannot be read or parsed, or the
/// npm version probe fails.
pub fn plan_install(
    project_dir: &Path,
    fs: &impl FileSystem,
    executor: &impl CommandExecutor,
) -> Result<InstallPlan, AssetDeltaError> {
    if fs.exists(&project_dir.join("yarn.lock")) {
        return Ok(InstallPlan::new("yarn", &["--frozen-lockfile"]));
    }

    let lock_path = project_dir.join("package-lock.json");
    if fs.exists(&lock_path) {
        let contents = fs
            .read_to_string(&lock_path)
            .map_err(|source| AssetDeltaError::Io {
                context: format!("reading {}", lock_path.display()),
                source,
            })?;
        let lock: PackageLock =
            serde_json::from_str(&contents).map_err(|source| AssetDeltaError::InvalidLockfile {
                path: lock_path.clone(),
                source,
            })?;

        if lock.lockfile_version == Some(2) && npm_major_version(executor)? != 7 {
            return Ok(InstallPlan::new("npx", &["npm@7", "ci"]));
        }
        return Ok(InstallPlan::new("npm", &["ci"]));
    }

    warn!("No package-lock.json or yarn.lock detected! We strongly recommend committing one");
    Ok(InstallPlan::new("npm", &["install"]))
}

/// Execute an install plan in a project directory
///
/// # Errors
///
/// Returns [`AssetDeltaError::ToolMissing`] when the planned program is not
/// on PATH, and [`AssetDeltaError::CommandFailed`] on a non-zero exit.
pub fn run_install(
    plan: &InstallPlan,
    project_dir: &Path,
    executor: &impl CommandExecutor,
) -> Result<(), AssetDeltaError> {
    if which::which(&plan.program).is_err() {
        return Err(AssetDeltaError::ToolMissing {
            tool: plan.program.clone(),
            install_hint: format!(
                "Install Node.js, which provides {}, or adjust the project lockfile",
                plan.program
            ),
        });
    }

    let status = executor
        .run(
            |cmd| cmd.args(&plan.args).current_dir(project_dir),
            &plan.program,
        )
        .map_err(|source| AssetDeltaError::Io {
            context: format!("running {}", plan.command_line()),
            source,
        })?;

    if !status.success() {
        return Err(AssetDeltaError::CommandFailed {
            command: plan.command_line(),
            detail: String::new(),
        });
    }

    Ok(())
}
