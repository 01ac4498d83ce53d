//! Git history extraction and parsing.
//!
//! History is requested as one header line per commit
//! (`<40-hex-id>;<unix-timestamp>;<summary>`) followed by that commit's
//! numstat lines (`<additions>\t<deletions>\t<path>`, where either count is
//! `-` for binary files). Parsing folds the lines through a local
//! accumulator: a header seals the in-progress record and opens a fresh
//! one, numstat lines accumulate counters, and the final record is sealed
//! at end of input. Lines matching neither pattern are tool noise and are
//! skipped.

use crate::models::CommitRecord;
use crate::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

/// Pretty format handed to `git log`: hash, commit time, summary.
const PRETTY_FORMAT: &str = "%H;%ct;%s";

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-f]{40};").unwrap());
static NUMSTAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+|-)[ \t]+(\d+|-)[ \t]+(.+)$").unwrap());

/// Parse raw `git log --numstat` output into commit records.
///
/// `tracked_extensions` selects the file extensions counted toward the
/// tracked counters; `test_markers` are case-sensitive path substrings
/// that route a tracked change into the test counters instead of main.
pub fn parse(
    raw: &str,
    tracked_extensions: &[String],
    test_markers: &[String],
) -> Vec<CommitRecord> {
    let mut commits = Vec::new();
    let mut current: Option<CommitRecord> = None;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if HEADER_RE.is_match(line) {
            if let Some(sealed) = current.take() {
                commits.push(sealed);
            }
            // A header that doesn't carry all three fields is skipped
            // without opening an accumulator; its numstat lines fall
            // through to the no-accumulator case below.
            current = open_commit(line);
        } else if let Some(caps) = NUMSTAT_RE.captures(line) {
            if let Some(commit) = current.as_mut() {
                let additions = parse_count(&caps[1]);
                let deletions = parse_count(&caps[2]);
                let path = &caps[3];
                let tracked = has_tracked_extension(path, tracked_extensions);
                let test = test_markers.iter().any(|m| path.contains(m.as_str()));
                commit.apply_numstat(additions, deletions, tracked, test);
            }
        }
    }

    if let Some(sealed) = current {
        commits.push(sealed);
    }

    commits
}

/// Collect and parse the history of the repository at `repo_path`.
///
/// Invokes `git log --numstat` with the header format above. A missing
/// git binary, a non-repository, or a failing command is an error; the
/// command layer degrades it to an empty history.
pub fn collect(
    repo_path: &Path,
    tracked_extensions: &[String],
    test_markers: &[String],
) -> Result<Vec<CommitRecord>> {
    let pretty = format!("--pretty=format:{}", PRETTY_FORMAT);
    let output = Command::new("git")
        .args(["log", "--numstat", pretty.as_str()])
        .current_dir(repo_path)
        .output()
        .map_err(|e| Error::GitCommand(format!("failed to run git log: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand(format!(
            "git log failed: {}",
            stderr.trim()
        )));
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    Ok(parse(&raw, tracked_extensions, test_markers))
}

/// Find the git repository root by walking up from `start`.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        if d.join(".git").exists() {
            return Some(d.to_path_buf());
        }
        dir = d.parent();
    }
    None
}

/// Open an accumulator from a header line, or None if it is malformed.
fn open_commit(line: &str) -> Option<CommitRecord> {
    let mut parts = line.splitn(3, ';');
    let id = parts.next()?;
    let timestamp: i64 = parts.next()?.parse().ok()?;
    let message = parts.next()?;
    Some(CommitRecord::new(
        id.to_string(),
        timestamp,
        message.to_string(),
    ))
}

/// Numstat count field: a number, or `-` for binary files (counted as 0).
fn parse_count(field: &str) -> u64 {
    if field == "-" { 0 } else { field.parse().unwrap_or(0) }
}

/// Whether the path's extension is one of the tracked extensions.
fn has_tracked_extension(path: &str, extensions: &[String]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|t| t == ext))
}
