//! CLI argument definitions for Wake.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wake - extract and classify developer activity from a prompt log and
/// git history.
#[derive(Parser, Debug)]
#[command(name = "wake")]
#[command(author, version, about = "Extract and classify developer activity from prompt logs and git history", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Run as if wake was started in <path> instead of the current directory.
    /// The path must exist and is used literally, bypassing git root detection.
    /// Can also be set via the WAKE_REPO environment variable.
    #[arg(short = 'C', long = "repo", global = true, env = "WAKE_REPO")]
    pub repo_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Segment the prompt log and export the prompt table
    Prompts {
        /// Path to the prompt log (overrides wake.toml)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Output directory for exported tables (overrides wake.toml)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Parse git history into the commit table
    Commits {
        /// Output directory for exported tables (overrides wake.toml)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Classify prompts: stored overrides, then keyword rules, then
    /// optional interactive review of unresolved records
    Classify {
        /// Path to the prompt log (overrides wake.toml)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Output directory for exported tables (overrides wake.toml)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Review records classified as 'other' interactively
        #[arg(short, long)]
        interactive: bool,
    },

    /// Run the full pipeline and write the markdown report
    Report {
        /// Path to the prompt log (overrides wake.toml)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Output directory for tables and the report (overrides wake.toml)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show version and build information
    BuildInfo,
}

/// Package version from Cargo metadata.
pub fn package_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Git commit the binary was built from (set by build.rs).
pub fn git_commit() -> &'static str {
    env!("WAKE_GIT_COMMIT")
}

/// Build timestamp (set by build.rs).
pub fn build_timestamp() -> &'static str {
    env!("WAKE_BUILD_TIMESTAMP")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // This will panic if the CLI is misconfigured
        Cli::command().debug_assert();
    }
}
