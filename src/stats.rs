//! Aggregate statistics over prompt and commit records.
//!
//! Pure summaries consumed by the report and the CLI output: totals,
//! averages, per-category prompt counts, commit activity by day and hour,
//! and net main/test line counts. Empty inputs produce zeroed stats.

use crate::models::{CommitRecord, PromptRecord};
use chrono::Timelike;
use serde::Serialize;
use std::collections::HashMap;

/// Summary of a prompt record sequence.
#[derive(Debug, Clone, Serialize)]
pub struct PromptStats {
    pub total_prompts: usize,
    pub avg_words_per_prompt: f64,
    pub avg_chars_per_prompt: f64,
}

/// Summary of a commit record sequence.
#[derive(Debug, Clone, Serialize)]
pub struct CommitStats {
    pub total_commits: usize,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub avg_changes_per_commit: f64,
    pub avg_commits_per_day: f64,
    /// Hour of day (0-23, UTC) with the most commits; smallest such hour on a tie
    pub most_active_hour: Option<u32>,
    /// Distinct calendar hours containing at least one commit
    pub active_hours: usize,
    /// Net tracked lines outside test paths (additions minus deletions)
    pub main_lines: i64,
    /// Net tracked lines under test paths
    pub test_lines: i64,
    /// Test lines as a percentage of main lines, when main is positive
    pub test_to_main_percent: Option<f64>,
}

/// Compute prompt totals and averages.
pub fn prompt_stats(records: &[PromptRecord]) -> PromptStats {
    let total = records.len();
    if total == 0 {
        return PromptStats {
            total_prompts: 0,
            avg_words_per_prompt: 0.0,
            avg_chars_per_prompt: 0.0,
        };
    }

    let words: usize = records.iter().map(|r| r.word_count).sum();
    let chars: usize = records.iter().map(|r| r.char_count).sum();
    PromptStats {
        total_prompts: total,
        avg_words_per_prompt: words as f64 / total as f64,
        avg_chars_per_prompt: chars as f64 / total as f64,
    }
}

/// Per-category prompt counts, sorted by count descending (category name
/// ascending on ties). Unclassified records count as `not_classified`.
pub fn category_counts(records: &[PromptRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        let key = match record.category {
            Some(category) => category.as_str().to_string(),
            None => "not_classified".to_string(),
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// Compute commit totals, activity buckets, and net line counts.
pub fn commit_stats(records: &[CommitRecord]) -> CommitStats {
    let total = records.len();
    if total == 0 {
        return CommitStats {
            total_commits: 0,
            total_additions: 0,
            total_deletions: 0,
            avg_changes_per_commit: 0.0,
            avg_commits_per_day: 0.0,
            most_active_hour: None,
            active_hours: 0,
            main_lines: 0,
            test_lines: 0,
            test_to_main_percent: None,
        };
    }

    let total_additions: u64 = records.iter().map(|c| c.total_additions).sum();
    let total_deletions: u64 = records.iter().map(|c| c.total_deletions).sum();

    let mut days: HashMap<chrono::NaiveDate, usize> = HashMap::new();
    let mut hours_of_day: HashMap<u32, usize> = HashMap::new();
    let mut calendar_hours: HashMap<(chrono::NaiveDate, u32), usize> = HashMap::new();
    for commit in records {
        let date = commit.when.date_naive();
        let hour = commit.when.hour();
        *days.entry(date).or_insert(0) += 1;
        *hours_of_day.entry(hour).or_insert(0) += 1;
        *calendar_hours.entry((date, hour)).or_insert(0) += 1;
    }

    let most_active_hour = hours_of_day
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(hour, _)| *hour);

    let main_additions: u64 = records.iter().map(|c| c.main_additions).sum();
    let main_deletions: u64 = records.iter().map(|c| c.main_deletions).sum();
    let test_additions: u64 = records.iter().map(|c| c.test_additions).sum();
    let test_deletions: u64 = records.iter().map(|c| c.test_deletions).sum();
    let main_lines = main_additions as i64 - main_deletions as i64;
    let test_lines = test_additions as i64 - test_deletions as i64;

    CommitStats {
        total_commits: total,
        total_additions,
        total_deletions,
        avg_changes_per_commit: (total_additions + total_deletions) as f64 / total as f64,
        avg_commits_per_day: total as f64 / days.len() as f64,
        most_active_hour,
        active_hours: calendar_hours.len(),
        main_lines,
        test_lines,
        test_to_main_percent: if main_lines > 0 {
            Some(test_lines as f64 / main_lines as f64 * 100.0)
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn prompt(text: &str, category: Option<Category>) -> PromptRecord {
        let mut record = PromptRecord::new(text.to_string());
        record.category = category;
        record
    }

    fn commit(timestamp: i64, main_add: u64, test_add: u64) -> CommitRecord {
        let mut record = CommitRecord::new("a".repeat(40), timestamp, "msg".to_string());
        record.apply_numstat(main_add, 0, true, false);
        record.apply_numstat(test_add, 0, true, true);
        record
    }

    #[test]
    fn test_empty_inputs() {
        let p = prompt_stats(&[]);
        assert_eq!(p.total_prompts, 0);
        assert_eq!(p.avg_words_per_prompt, 0.0);

        let c = commit_stats(&[]);
        assert_eq!(c.total_commits, 0);
        assert_eq!(c.most_active_hour, None);
        assert_eq!(c.test_to_main_percent, None);
    }

    #[test]
    fn test_prompt_averages() {
        let records = vec![
            prompt("раз два", None),
            prompt("три четыре пять шесть", None),
        ];
        let stats = prompt_stats(&records);
        assert_eq!(stats.total_prompts, 2);
        assert_eq!(stats.avg_words_per_prompt, 3.0);
    }

    #[test]
    fn test_category_counts_sorted() {
        let records = vec![
            prompt("a", Some(Category::Fix)),
            prompt("b", Some(Category::Fix)),
            prompt("c", Some(Category::Feat)),
            prompt("d", None),
        ];
        let counts = category_counts(&records);
        assert_eq!(counts[0], ("fix".to_string(), 2));
        assert_eq!(counts.len(), 3);
        assert!(counts.iter().any(|(k, n)| k == "not_classified" && *n == 1));
    }

    #[test]
    fn test_commit_activity_buckets() {
        // 2023-11-14 22:13:20 UTC and one hour later, plus next day
        let records = vec![
            commit(1700000000, 10, 5),
            commit(1700003600, 1, 0),
            commit(1700086400, 2, 0),
        ];
        let stats = commit_stats(&records);
        assert_eq!(stats.total_commits, 3);
        assert_eq!(stats.active_hours, 3);
        // 3 commits over 2 distinct days
        assert_eq!(stats.avg_commits_per_day, 1.5);
        assert_eq!(stats.main_lines, 13);
        assert_eq!(stats.test_lines, 5);
        let percent = stats.test_to_main_percent.unwrap();
        assert!((percent - 38.46).abs() < 0.01);
    }

    #[test]
    fn test_most_active_hour_smallest_on_tie() {
        // Same hour of day across two days beats two singleton hours
        let records = vec![
            commit(1700000000, 0, 0),
            commit(1700086400, 0, 0),
            commit(1700003600, 0, 0),
        ];
        let stats = commit_stats(&records);
        // 1700000000 and 1700086400 share hour 22 UTC
        assert_eq!(stats.most_active_hour, Some(22));
    }

    #[test]
    fn test_changes_per_commit() {
        let mut record = CommitRecord::new("b".repeat(40), 1700000000, "m".to_string());
        record.apply_numstat(7, 3, false, false);
        let stats = commit_stats(&[record]);
        assert_eq!(stats.avg_changes_per_commit, 10.0);
        assert_eq!(stats.test_to_main_percent, None);
    }
}
