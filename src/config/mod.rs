//! Configuration for Wake runs.
//!
//! Configuration lives in an optional `wake.toml` at the root of the
//! analyzed repository. A missing file means defaults; a malformed file is
//! an error. Any field may be omitted and picks up its default, so a config
//! file only needs to name what it changes. CLI flags override file values
//! at the command layer.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name, looked up at the repository root.
pub const CONFIG_FILE: &str = "wake.toml";

/// Run configuration with recognized defaults.
///
/// # TOML Schema
///
/// ```toml
/// prompt-log = "cursor-log.md"
/// output-dir = "analysis"
/// tracked-extensions = ["php", "yaml", "yml"]
/// test-path-markers = ["tests/", "Tests/"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Path to the prompt log, relative to the repository root unless absolute
    pub prompt_log: PathBuf,

    /// Directory for exported tables and the report, relative to the
    /// repository root unless absolute
    pub output_dir: PathBuf,

    /// File extensions counted toward tracked change statistics (no dot)
    pub tracked_extensions: Vec<String>,

    /// Path substrings separating test code from main code, matched
    /// case-sensitively
    pub test_path_markers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt_log: PathBuf::from("cursor-log.md"),
            output_dir: PathBuf::from("analysis"),
            tracked_extensions: vec!["php".to_string(), "yaml".to_string(), "yml".to_string()],
            test_path_markers: vec!["tests/".to_string(), "Tests/".to_string()],
        }
    }
}

impl Config {
    /// Load config from `wake.toml` under `repo_path`, or defaults if absent.
    pub fn load(repo_path: &Path) -> Result<Self> {
        let path = repo_path.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Absolute path to the prompt log for this repository.
    pub fn prompt_log_path(&self, repo_path: &Path) -> PathBuf {
        resolve(repo_path, &self.prompt_log)
    }

    /// Absolute path to the output directory for this repository.
    pub fn output_dir_path(&self, repo_path: &Path) -> PathBuf {
        resolve(repo_path, &self.output_dir)
    }
}

/// Join a config path onto the repo root, leaving absolute paths alone.
fn resolve(repo_path: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        repo_path.join(configured)
    }
}
