//! Completions command implementation
//!
//! Handles `asset-delta completions`, which generates shell completion
//! scripts for bash, zsh, fish, etc.

use clap_complete::{generate, Shell};

/// Generate shell completion scripts
///
/// Outputs the completion script for the specified shell to stdout.
///
/// # Examples
///
/// ```bash
/// # Bash
/// asset-delta completions bash > /etc/bash_completion.d/asset-delta
///
/// # Zsh
/// asset-delta completions zsh > ~/.zfunc/_asset-delta
/// ```
pub fn cmd_completions(shell: Shell) {
    // Re-created here since the derive Cli lives in main.rs
    use clap::Command;

    let mut cmd = Command::new("asset-delta")
        .version(env!("CARGO_PKG_VERSION"))
        .about("CI helper that diffs built JS/CSS asset sizes between branches")
        .subcommand(Command::new("measure").about("Measure built assets into a size snapshot"))
        .subcommand(Command::new("diff").about("Diff two size snapshots"))
        .subcommand(Command::new("comment").about("Post the diff report as a PR comment"))
        .subcommand(Command::new("completions").about("Generate shell completions"));

    let bin_name = "asset-delta".to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
