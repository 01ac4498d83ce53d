//! Prompt log segmentation.
//!
//! The prompt log is UTF-8 free text in which authored prompts are
//! separated by delimiter lines of exactly three dashes. Segmentation
//! trims each candidate, drops empty segments, and drops injected
//! metadata (segments starting with `commit` or a bracketed `[...]` tag),
//! then computes word and character counts for the survivors.

use crate::models::PromptRecord;
use std::fs;
use std::path::Path;

/// Delimiter line separating prompts in the log.
const DELIMITER: &str = "---";

/// Segment raw log text into prompt records.
///
/// Pure: no I/O, no category assignment. Empty-after-trim segments are
/// never materialized.
pub fn segment(content: &str) -> Vec<PromptRecord> {
    split_segments(content)
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| !is_noise(s))
        .map(|s| PromptRecord::new(s.to_string()))
        .collect()
}

/// Load and segment the prompt log at `path`.
///
/// A missing or unreadable log is non-fatal: it yields an empty record
/// sequence so the rest of the pipeline can proceed with zero prompts.
pub fn load(path: &Path) -> Vec<PromptRecord> {
    match fs::read_to_string(path) {
        Ok(content) => segment(&content),
        Err(e) => {
            eprintln!("Warning: cannot read prompt log {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Split on delimiter lines, keeping the text between them.
fn split_segments(content: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for line in content.lines() {
        if line.trim() == DELIMITER {
            segments.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    segments.push(current);

    segments
}

/// Injected metadata rather than an authored prompt.
///
/// Covers commit echoes (`commit abc123...`) and bracketed tool tags
/// (`[tool] ...`) that some editors write into the log between prompts.
fn is_noise(trimmed: &str) -> bool {
    if trimmed.to_lowercase().starts_with("commit") {
        return true;
    }
    if let Some(rest) = trimmed.strip_prefix('[') {
        let first_line = rest.lines().next().unwrap_or("");
        if first_line.contains(']') {
            return true;
        }
    }
    false
}
