//! Data models for Wake records.
//!
//! This module defines the core data structures:
//! - `Category` - Closed taxonomy of prompt activity types
//! - `PromptRecord` - One segmented unit of authored free text
//! - `CommitRecord` - One git commit with derived line-change counters
//! - `OverrideEntry` - A durable `(text, category)` classification decision

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity category for a prompt record.
///
/// The set is closed; classification rules are checked in a fixed
/// precedence order (see `classify::RULES`), which is not the same as the
/// interactive menu order in [`Category::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ci,
    Git,
    Fix,
    Continue,
    Feat,
    Refactor,
    Test,
    Docs,
    Other,
}

impl Category {
    /// All categories in interactive menu order.
    pub const ALL: [Category; 9] = [
        Category::Feat,
        Category::Fix,
        Category::Refactor,
        Category::Docs,
        Category::Test,
        Category::Ci,
        Category::Continue,
        Category::Git,
        Category::Other,
    ];

    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ci" => Some(Category::Ci),
            "git" => Some(Category::Git),
            "fix" => Some(Category::Fix),
            "continue" => Some(Category::Continue),
            "feat" => Some(Category::Feat),
            "refactor" => Some(Category::Refactor),
            "test" => Some(Category::Test),
            "docs" => Some(Category::Docs),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ci => "ci",
            Category::Git => "git",
            Category::Fix => "fix",
            Category::Continue => "continue",
            Category::Feat => "feat",
            Category::Refactor => "refactor",
            Category::Test => "test",
            Category::Docs => "docs",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One unit of developer-authored free text from the prompt log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Trimmed prompt text, never empty
    pub text: String,

    /// Number of whitespace-delimited tokens in `text`
    pub word_count: usize,

    /// Length of `text` in characters
    pub char_count: usize,

    /// Assigned activity category; absent until classification runs
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl PromptRecord {
    /// Create a record from already-trimmed, non-empty text.
    pub fn new(text: String) -> Self {
        let word_count = text.split_whitespace().count();
        let char_count = text.chars().count();
        Self {
            text,
            word_count,
            char_count,
            category: None,
        }
    }
}

/// One git commit with aggregate line-change counters.
///
/// Counters accumulate while the parser consumes that commit's numstat
/// lines. `tracked_additions == test_additions + main_additions` holds at
/// all times (same for deletions): tracked changes are partitioned into
/// test and main by path marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full 40-hex commit hash
    #[serde(rename = "commit")]
    pub id: String,

    /// Commit time as seconds since epoch
    pub timestamp: i64,

    /// Commit time as a calendar timestamp (UTC)
    #[serde(rename = "datetime")]
    pub when: DateTime<Utc>,

    /// First-line commit summary
    pub message: String,

    /// Lines added across all files
    #[serde(rename = "additions")]
    pub total_additions: u64,

    /// Lines deleted across all files
    #[serde(rename = "deletions")]
    pub total_deletions: u64,

    /// Number of files touched
    pub files_changed: u64,

    /// Lines added in files with a tracked extension
    pub tracked_additions: u64,

    /// Lines deleted in files with a tracked extension
    pub tracked_deletions: u64,

    /// Tracked additions under a test-path marker
    pub test_additions: u64,

    /// Tracked deletions under a test-path marker
    pub test_deletions: u64,

    /// Tracked additions outside any test-path marker
    pub main_additions: u64,

    /// Tracked deletions outside any test-path marker
    pub main_deletions: u64,
}

impl CommitRecord {
    /// Open a new record with zeroed counters.
    pub fn new(id: String, timestamp: i64, message: String) -> Self {
        Self {
            id,
            timestamp,
            when: DateTime::from_timestamp(timestamp, 0).unwrap_or_default(),
            message,
            total_additions: 0,
            total_deletions: 0,
            files_changed: 0,
            tracked_additions: 0,
            tracked_deletions: 0,
            test_additions: 0,
            test_deletions: 0,
            main_additions: 0,
            main_deletions: 0,
        }
    }

    /// Accumulate one numstat line into the counters.
    ///
    /// Total counters always move; tracked counters only when `tracked`,
    /// and the same increment lands in exactly one of the test/main pair,
    /// keeping the partition invariant.
    pub fn apply_numstat(&mut self, additions: u64, deletions: u64, tracked: bool, test: bool) {
        self.total_additions += additions;
        self.total_deletions += deletions;
        self.files_changed += 1;

        if tracked {
            self.tracked_additions += additions;
            self.tracked_deletions += deletions;
            if test {
                self.test_additions += additions;
                self.test_deletions += deletions;
            } else {
                self.main_additions += additions;
                self.main_deletions += deletions;
            }
        }
    }
}

/// A durable classification decision keyed by exact prompt text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideEntry {
    /// Full trimmed prompt text, matched exactly
    pub text: String,

    /// The category assigned by a human or a previous pass
    #[serde(rename = "type")]
    pub category: Category,
}
