//! Wake - developer-activity extraction and classification.
//!
//! This library provides the core functionality for the `wake` CLI tool:
//! segmenting a free-text prompt log into prompt records, parsing git
//! history into commit records with per-file change counters, and a
//! persistence-aware heuristic classifier for the prompt records.

pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod export;
pub mod git_history;
pub mod models;
pub mod overrides;
pub mod prompt_log;
pub mod report;
pub mod stats;

/// Library-level error type for Wake operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Git command failed: {0}")]
    GitCommand(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Wake operations.
pub type Result<T> = std::result::Result<T, Error>;
