//! Infrastructure traits for filesystem probes and command execution
//!
//! Dependency-injection seams so install planning and subprocess steps can
//! be tested with mocks instead of a real package manager.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Output};

/// Trait for the filesystem operations install planning needs
pub trait FileSystem {
    /// Check whether a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Read the entire contents of a file into a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Real filesystem implementation that delegates to std::fs
#[derive(Debug, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Trait for abstracting command execution
pub trait CommandExecutor {
    /// Execute a command and return its exit status, with stdio inherited
    fn status(&self, cmd: &mut Command) -> io::Result<ExitStatus>;

    /// Execute a command and capture its output
    fn output(&self, cmd: &mut Command) -> io::Result<Output>;

    /// Execute a command built with a closure and capture its output
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use asset_delta::infra::{CommandExecutor, RealCommandExecutor};
    ///
    /// let executor = RealCommandExecutor;
    /// let output = executor.execute(|cmd| cmd.arg("-v"), "npm")?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn execute<F>(&self, builder: F, program: &str) -> io::Result<Output>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let mut cmd = Command::new(program);
        builder(&mut cmd);
        self.output(&mut cmd)
    }

    /// Execute a command built with a closure and return its exit status
    fn run<F>(&self, builder: F, program: &str) -> io::Result<ExitStatus>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let mut cmd = Command::new(program);
        builder(&mut cmd);
        self.status(&mut cmd)
    }
}

/// Real command executor that delegates to std::process::Command
#[derive(Debug, Clone, Copy)]
pub struct RealCommandExecutor;

impl CommandExecutor for RealCommandExecutor {
    fn status(&self, cmd: &mut Command) -> io::Result<ExitStatus> {
        cmd.status()
    }

    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        cmd.output()
    }
}

/// Create an ExitStatus with the given exit code for use in test mocks.
///
/// This avoids spawning actual processes in tests.
#[cfg(all(test, unix))]
pub fn mock_exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8) // Unix stores exit code in upper bits
}

#[cfg(all(test, windows))]
pub fn mock_exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_exists_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("yarn.lock");

        let fs = RealFileSystem;
        assert!(!fs.exists(&file_path));

        std::fs::write(&file_path, "# yarn lockfile v1").unwrap();
        assert!(fs.exists(&file_path));
        assert_eq!(fs.read_to_string(&file_path).unwrap(), "# yarn lockfile v1");
    }

    #[test]
    fn test_real_filesystem_read_nonexistent_file_returns_error() {
        let fs = RealFileSystem;
        assert!(fs.read_to_string(Path::new("/nonexistent/file.txt")).is_err());
    }

    #[test]
    fn test_real_command_executor_output_captures_stdout() {
        let executor = RealCommandExecutor;
        let output = executor.execute(|cmd| cmd.arg("hello"), "echo").unwrap();

        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("hello"));
    }

    #[test]
    fn test_real_command_executor_run_reports_status() {
        let executor = RealCommandExecutor;
        let status = executor.run(|cmd| cmd.arg("ok"), "echo").unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_real_command_executor_nonexistent_command_returns_error() {
        let executor = RealCommandExecutor;
        let mut cmd = Command::new("nonexistent_command_xyz_123");
        assert!(executor.output(&mut cmd).is_err());
    }

    #[test]
    fn test_mock_exit_status_round_trips_code() {
        assert!(mock_exit_status(0).success());
        assert!(!mock_exit_status(1).success());
        assert_eq!(mock_exit_status(2).code(), Some(2));
    }
}
