//! Common test utilities for wake integration tests.
//!
//! Provides `TestEnv` for isolated test environments: each env is a
//! temporary directory acting as the analyzed repository, and `wake()`
//! returns a Command pinned to it via the WAKE_REPO env var, making the
//! tests parallel-safe and independent of the caller's working directory.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
pub use tempfile::TempDir;

/// A test environment with an isolated repository directory.
pub struct TestEnv {
    pub repo_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        Self {
            repo_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the wake binary pinned to this repository.
    pub fn wake(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_wake"));
        cmd.current_dir(self.repo_dir.path());
        cmd.env("WAKE_REPO", self.repo_dir.path());
        cmd
    }

    /// Get the path to the repository directory.
    pub fn path(&self) -> &Path {
        self.repo_dir.path()
    }

    /// Write the prompt log at its default location.
    pub fn write_log(&self, content: &str) {
        fs::write(self.path().join("cursor-log.md"), content).unwrap();
    }

    /// Run a git command in the repository, with a fixed identity so
    /// commits work in a bare CI environment.
    pub fn git(&self, args: &[&str]) {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(self.path())
            .env("GIT_AUTHOR_NAME", "Wake Test")
            .env("GIT_AUTHOR_EMAIL", "wake@example.com")
            .env("GIT_COMMITTER_NAME", "Wake Test")
            .env("GIT_COMMITTER_EMAIL", "wake@example.com")
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    /// Write a file under the repository, creating parent directories.
    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
