//! Wake CLI - extract and classify developer activity from prompt logs
//! and git history.

use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use wake::cli::{Cli, Commands};
use wake::commands::{self, Output};
use wake::git_history::find_git_root;

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    // Determine repo path: --repo flag > WAKE_REPO env > auto-detect git root > cwd
    let repo_path = resolve_repo_path(cli.repo_path, human);

    if let Err(e) = run_command(cli.command, &repo_path, human) {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

/// Resolve the repository path based on explicit flag, environment
/// variable, or auto-detection.
///
/// When an explicit path is provided (via -C/--repo or WAKE_REPO), it is
/// used literally without git root detection. Otherwise the git root is
/// detected from the current directory, falling back to the current
/// directory itself.
fn resolve_repo_path(explicit_path: Option<PathBuf>, human: bool) -> PathBuf {
    match explicit_path {
        Some(path) => {
            if !path.exists() {
                if human {
                    eprintln!(
                        "Error: Specified repo path does not exist: {}",
                        path.display()
                    );
                } else {
                    eprintln!(
                        "{}",
                        serde_json::json!({
                            "error": format!("Specified repo path does not exist: {}", path.display())
                        })
                    );
                }
                process::exit(1);
            }
            path
        }
        None => {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            find_git_root(&cwd).unwrap_or(cwd)
        }
    }
}

fn run_command(command: Commands, repo_path: &Path, human: bool) -> Result<(), wake::Error> {
    match command {
        Commands::Prompts { log, output } => {
            let result = commands::prompts(repo_path, log.as_deref(), output.as_deref())?;
            print_output(&result, human);
        }

        Commands::Commits { output } => {
            let result = commands::commits(repo_path, output.as_deref())?;
            print_output(&result, human);
        }

        Commands::Classify {
            log,
            output,
            interactive,
        } => {
            let result =
                commands::classify(repo_path, log.as_deref(), output.as_deref(), interactive)?;
            print_output(&result, human);
        }

        Commands::Report { log, output } => {
            let result = commands::run_report(repo_path, log.as_deref(), output.as_deref())?;
            print_output(&result, human);
        }

        Commands::BuildInfo => {
            if human {
                println!("Version: {}", wake::cli::package_version());
                println!("Commit:  {}", wake::cli::git_commit());
                println!("Built:   {}", wake::cli::build_timestamp());
            } else {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": wake::cli::package_version(),
                        "commit": wake::cli::git_commit(),
                        "built": wake::cli::build_timestamp(),
                    })
                );
            }
        }
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn print_output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
