//! Error types with contextual suggestions
//!
//! Structured errors for everything outside the three core functions
//! (normalize, diff, render never fail). Each variant carries enough context
//! for an actionable message, a suggested fix, and a CI-friendly exit code.

use std::path::PathBuf;

use thiserror::Error;

/// asset-delta errors with contextual suggestions
#[derive(Error, Debug)]
pub enum AssetDeltaError {
    /// Input file missing for an operation
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to missing file
        path: PathBuf,
        /// Operation that required the file
        operation: String,
    },

    /// Build output directory is absent
    #[error("Asset directory not found: {path}")]
    AssetsDirMissing {
        /// Expected dist/assets location
        path: PathBuf,
    },

    /// Snapshot file did not parse as a size mapping
    #[error("Invalid size snapshot: {path}")]
    InvalidSnapshot {
        /// Path to the snapshot file
        path: PathBuf,
        #[source]
        /// JSON parse error
        source: serde_json::Error,
    },

    /// package-lock.json did not parse
    #[error("Invalid lockfile: {path}")]
    InvalidLockfile {
        /// Path to the lockfile
        path: PathBuf,
        #[source]
        /// JSON parse error
        source: serde_json::Error,
    },

    /// Required external tool is not installed
    #[error("Tool not installed: {tool}")]
    ToolMissing {
        /// Tool name
        tool: String,
        /// How to get it
        install_hint: String,
    },

    /// An external command exited non-zero
    #[error("Command failed: {command}")]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Captured error output, possibly empty
        detail: String,
    },

    /// GITHUB_TOKEN is required but unset
    #[error("GITHUB_TOKEN is not set")]
    MissingToken,

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {context}")]
    Http {
        /// Request being made
        context: String,
        #[source]
        /// reqwest error
        source: reqwest::Error,
    },

    /// GitHub API returned a non-success status
    #[error("GitHub API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl AssetDeltaError {
    /// Get an actionable suggestion for resolving this error, if any
    ///
    /// # Examples
    ///
    /// ```
    /// use asset_delta::error::AssetDeltaError;
    ///
    /// let error = AssetDeltaError::MissingToken;
    /// assert!(error.suggestion().unwrap().contains("GITHUB_TOKEN"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::FileNotFound { path, operation } => Some(format!(
                "Ensure {} exists before {}",
                path.display(),
                operation
            )),
            Self::AssetsDirMissing { .. } => Some(
                "Run your build first, or pass --root pointing at the directory \
                 that contains dist/assets"
                    .to_string(),
            ),
            Self::InvalidSnapshot { .. } => Some(
                "Snapshots are JSON mappings of path to {raw, gzip, brotli}; \
                 regenerate with 'asset-delta measure'"
                    .to_string(),
            ),
            Self::InvalidLockfile { .. } => {
                Some("Regenerate package-lock.json with 'npm install'".to_string())
            }
            Self::ToolMissing { install_hint, .. } => Some(install_hint.clone()),
            Self::CommandFailed { .. } => {
                Some("Check the command output above and fix the underlying failure".to_string())
            }
            Self::MissingToken => {
                Some("Export GITHUB_TOKEN with repo scope before posting comments".to_string())
            }
            Self::Http { .. } | Self::Api { .. } => {
                Some("Check network access, token permissions, and the API base URL".to_string())
            }
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get the exit code for this error, following sysexits.h conventions
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolMissing { .. } => 127, // Command not found (Unix convention)
            Self::FileNotFound { .. } => 66, // EX_NOINPUT
            Self::AssetsDirMissing { .. } => 66, // EX_NOINPUT
            Self::InvalidSnapshot { .. } => 65, // EX_DATAERR
            Self::InvalidLockfile { .. } => 65, // EX_DATAERR
            Self::MissingToken => 78,        // EX_CONFIG
            Self::Http { .. } => 69,         // EX_UNAVAILABLE
            Self::Api { .. } => 69,          // EX_UNAVAILABLE
            Self::Io { .. } => 74,           // EX_IOERR
            Self::CommandFailed { .. } => 1, // Generic error (CI should fail)
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format an error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(ad_error) = error.downcast_ref::<AssetDeltaError>() {
            if let Some(suggestion) = ad_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from an error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(ad_error) = error.downcast_ref::<AssetDeltaError>() {
            ad_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_assets_dir_missing_suggests_running_build() {
        let err = AssetDeltaError::AssetsDirMissing {
            path: Path::new("web/dist/assets").to_path_buf(),
        };

        let suggestion = err.suggestion().unwrap();
        assert!(suggestion.contains("build"));
        assert_eq!(err.exit_code(), 66);
    }

    #[test]
    fn test_tool_missing_exit_code_is_command_not_found() {
        let err = AssetDeltaError::ToolMissing {
            tool: "yarn".to_string(),
            install_hint: "npm install --global yarn".to_string(),
        };

        assert_eq!(err.exit_code(), 127);
        assert_eq!(err.suggestion().unwrap(), "npm install --global yarn");
    }

    #[test]
    fn test_formatter_includes_message_and_help() {
        let err: anyhow::Error = AssetDeltaError::MissingToken.into();

        let formatted = ErrorFormatter::format(&err);
        assert!(formatted.contains("GITHUB_TOKEN is not set"));
        assert!(formatted.contains("help:"));
        assert_eq!(ErrorFormatter::exit_code(&err), 78);
    }

    #[test]
    fn test_formatter_includes_cause_chain() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: anyhow::Error = AssetDeltaError::Io {
            context: "reading snapshot".to_string(),
            source,
        }
        .into();

        let formatted = ErrorFormatter::format(&err);
        assert!(formatted.contains("caused by:"));
        assert!(formatted.contains("denied"));
    }

    #[test]
    fn test_generic_anyhow_error_exits_one() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ErrorFormatter::exit_code(&err), 1);
    }
}
