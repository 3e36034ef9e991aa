use asset_delta::cmd;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::process;

/// CI helper that diffs built JS/CSS asset sizes between branches
///
/// asset-delta measures a web application's built assets, correlates hashed
/// filenames across two builds, and reports per-file size changes as a
/// Markdown table suitable for a pull-request comment.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure built assets into a size snapshot
    Measure {
        /// Project root containing dist/assets
        #[arg(short, long, default_value = ".")]
        root: String,

        /// Write the snapshot to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Install dependencies first (command picked from the lockfile)
        #[arg(long)]
        install: bool,

        /// Build command to run before measuring
        #[arg(short, long)]
        build: Option<String>,
    },

    /// Diff two size snapshots and print the report
    Diff {
        /// Base branch snapshot
        base: String,

        /// Comparison branch snapshot
        comparison: String,

        /// Output the raw diff mapping as JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },

    /// Post the diff report as a pull-request comment
    Comment {
        /// Base branch snapshot
        base: String,

        /// Comparison branch snapshot
        comparison: String,

        /// Webhook event payload file (defaults to $GITHUB_EVENT_PATH)
        #[arg(long)]
        event: Option<String>,

        /// Repository as OWNER/NAME (overrides the event payload)
        #[arg(long, requires = "pr")]
        repo: Option<String>,

        /// Pull request number (overrides the event payload)
        #[arg(long, requires = "repo")]
        pr: Option<u64>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Measure {
            root,
            output,
            install,
            build,
        }) => cmd::cmd_measure(root, output.as_deref(), *install, build.as_deref()),
        Some(Commands::Diff {
            base,
            comparison,
            json,
        }) => cmd::cmd_diff(base, comparison, *json),
        Some(Commands::Comment {
            base,
            comparison,
            event,
            repo,
            pr,
        }) => cmd::cmd_comment(base, comparison, event.as_deref(), repo.as_deref(), *pr),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("asset-delta v{}", env!("CARGO_PKG_VERSION"));
            println!("CI helper that diffs built JS/CSS asset sizes between branches\n");
            println!("Usage: asset-delta <COMMAND>\n");
            println!("Commands:");
            println!("  measure  Measure built assets into a size snapshot");
            println!("  diff     Diff two size snapshots and print the report");
            println!("  comment  Post the diff report as a pull-request comment");
            println!("\nRun 'asset-delta <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use asset_delta::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
