//! Command implementations for the Wake CLI.
//!
//! Each command loads config, runs the relevant core stages, exports the
//! derived tables, and returns a result struct implementing [`Output`].
//! Missing inputs (absent prompt log, failing git command) degrade to a
//! stderr warning and an empty record sequence here, so a run never
//! aborts for lack of one source; a failing override-store save is the
//! one hard error, since it would silently lose classification work.

use crate::classify::{self, StdinDecisionProvider};
use crate::config::Config;
use crate::models::{Category, CommitRecord, PromptRecord};
use crate::overrides::OverrideStore;
use crate::stats::{self, CommitStats, PromptStats};
use crate::{Result, export, git_history, prompt_log, report};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

/// One row of the category distribution.
#[derive(Debug, Serialize)]
pub struct CategoryCount {
    #[serde(rename = "type")]
    pub category: String,
    pub count: usize,
}

/// Result of `wake prompts`.
#[derive(Debug, Serialize)]
pub struct PromptsResult {
    pub log: String,
    #[serde(flatten)]
    pub stats: PromptStats,
    pub table: String,
}

impl Output for PromptsResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Prompts: {}\nAverage words per prompt: {:.1}\nAverage characters per prompt: {:.1}\nTable: {}",
            self.stats.total_prompts,
            self.stats.avg_words_per_prompt,
            self.stats.avg_chars_per_prompt,
            self.table
        )
    }
}

/// Result of `wake commits`.
#[derive(Debug, Serialize)]
pub struct CommitsResult {
    #[serde(flatten)]
    pub stats: CommitStats,
    pub table: String,
}

impl Output for CommitsResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut out = format!(
            "Commits: {}\nAdditions: {}\nDeletions: {}\nAverage changes per commit: {:.1}",
            self.stats.total_commits,
            self.stats.total_additions,
            self.stats.total_deletions,
            self.stats.avg_changes_per_commit
        );
        if let Some(hour) = self.stats.most_active_hour {
            let _ = write!(out, "\nMost active hour: {}:00 UTC", hour);
        }
        let _ = write!(out, "\nTable: {}", self.table);
        out
    }
}

/// Result of `wake classify`.
#[derive(Debug, Serialize)]
pub struct ClassifyResult {
    pub log: String,
    #[serde(flatten)]
    pub stats: PromptStats,
    pub categories: Vec<CategoryCount>,
    /// Records still classified as `other` after the pass
    pub unresolved: usize,
    pub store: String,
    pub table: String,
}

impl Output for ClassifyResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut out = format!("Classified {} prompts:", self.stats.total_prompts);
        for row in &self.categories {
            let _ = write!(out, "\n  {:<10} {}", row.category, row.count);
        }
        let _ = write!(out, "\nUnresolved (other): {}", self.unresolved);
        let _ = write!(out, "\nStore: {}\nTable: {}", self.store, self.table);
        out
    }
}

/// Result of `wake report`.
#[derive(Debug, Serialize)]
pub struct ReportResult {
    pub prompts: PromptStats,
    pub commits: CommitStats,
    pub categories: Vec<CategoryCount>,
    pub report: String,
    pub prompt_table: String,
    pub commit_table: String,
}

impl Output for ReportResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Prompts: {}\nCommits: {}\nReport: {}\nPrompt table: {}\nCommit table: {}",
            self.prompts.total_prompts,
            self.commits.total_commits,
            self.report,
            self.prompt_table,
            self.commit_table
        )
    }
}

/// Segment the prompt log and export the prompt table.
pub fn prompts(
    repo_path: &Path,
    log: Option<&Path>,
    output: Option<&Path>,
) -> Result<PromptsResult> {
    let config = Config::load(repo_path)?;
    let log_path = resolve_log(repo_path, &config, log);
    let output_dir = resolve_output(repo_path, &config, output);

    let records = prompt_log::load(&log_path);
    let table = export::write_prompt_table(&output_dir, &records)?;

    Ok(PromptsResult {
        log: log_path.display().to_string(),
        stats: stats::prompt_stats(&records),
        table: table.display().to_string(),
    })
}

/// Parse git history and export the commit table.
pub fn commits(repo_path: &Path, output: Option<&Path>) -> Result<CommitsResult> {
    let config = Config::load(repo_path)?;
    let output_dir = resolve_output(repo_path, &config, output);

    let records = collect_or_empty(repo_path, &config);
    let table = export::write_commit_table(&output_dir, &records)?;

    Ok(CommitsResult {
        stats: stats::commit_stats(&records),
        table: table.display().to_string(),
    })
}

/// Classify the prompt log and persist the decisions.
pub fn classify(
    repo_path: &Path,
    log: Option<&Path>,
    output: Option<&Path>,
    interactive: bool,
) -> Result<ClassifyResult> {
    let config = Config::load(repo_path)?;
    let log_path = resolve_log(repo_path, &config, log);
    let output_dir = resolve_output(repo_path, &config, output);

    let mut records = prompt_log::load(&log_path);
    let store = OverrideStore::for_repo(repo_path);

    let mut stdin_provider = StdinDecisionProvider;
    let provider: Option<&mut dyn classify::DecisionProvider> = if interactive {
        Some(&mut stdin_provider)
    } else {
        None
    };
    classify::run_pass(&mut records, &store, provider)?;

    let table = export::write_prompt_table(&output_dir, &records)?;

    Ok(ClassifyResult {
        log: log_path.display().to_string(),
        stats: stats::prompt_stats(&records),
        categories: category_rows(&records),
        unresolved: records
            .iter()
            .filter(|r| r.category == Some(Category::Other))
            .count(),
        store: store.path().display().to_string(),
        table: table.display().to_string(),
    })
}

/// Full pipeline: classify prompts, collect commits, export tables, and
/// write the markdown report.
pub fn run_report(
    repo_path: &Path,
    log: Option<&Path>,
    output: Option<&Path>,
) -> Result<ReportResult> {
    let config = Config::load(repo_path)?;
    let log_path = resolve_log(repo_path, &config, log);
    let output_dir = resolve_output(repo_path, &config, output);

    let mut records = prompt_log::load(&log_path);
    let store = OverrideStore::for_repo(repo_path);
    classify::run_pass(&mut records, &store, None)?;

    let commits = collect_or_empty(repo_path, &config);

    let prompt_table = export::write_prompt_table(&output_dir, &records)?;
    let commit_table = export::write_commit_table(&output_dir, &commits)?;

    let report_path = output_dir.join(report::REPORT_FILE);
    fs::write(&report_path, report::render(&records, &commits))?;

    Ok(ReportResult {
        prompts: stats::prompt_stats(&records),
        commits: stats::commit_stats(&commits),
        categories: category_rows(&records),
        report: report_path.display().to_string(),
        prompt_table: prompt_table.display().to_string(),
        commit_table: commit_table.display().to_string(),
    })
}

/// Collect git history, degrading a failed extraction to an empty
/// sequence so the rest of the run proceeds.
fn collect_or_empty(repo_path: &Path, config: &Config) -> Vec<CommitRecord> {
    match git_history::collect(
        repo_path,
        &config.tracked_extensions,
        &config.test_path_markers,
    ) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Warning: could not extract git history: {}", e);
            Vec::new()
        }
    }
}

fn category_rows(records: &[PromptRecord]) -> Vec<CategoryCount> {
    stats::category_counts(records)
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}

fn resolve_log(repo_path: &Path, config: &Config, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => repo_path.join(path),
        None => config.prompt_log_path(repo_path),
    }
}

fn resolve_output(repo_path: &Path, config: &Config, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => repo_path.join(path),
        None => config.output_dir_path(repo_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_commits_outside_a_repo_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let result = commits(dir.path(), None).unwrap();
        assert_eq!(result.stats.total_commits, 0);
        assert!(dir.path().join("analysis/commits.csv").exists());
    }

    #[test]
    fn test_classify_missing_log_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let result = classify(dir.path(), None, None, false).unwrap();
        assert_eq!(result.stats.total_prompts, 0);
        assert_eq!(result.unresolved, 0);
    }

    #[test]
    fn test_classify_writes_store_and_table() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("cursor-log.md"),
            "исправь ошибку\n---\nдобавь фичу\n",
        )
        .unwrap();

        let result = classify(dir.path(), None, None, false).unwrap();
        assert_eq!(result.stats.total_prompts, 2);
        assert!(dir.path().join(".wake/classifications.jsonl").exists());

        let table = fs::read_to_string(dir.path().join("analysis/prompts.csv")).unwrap();
        assert!(table.contains("исправь ошибку,2,14,fix"));
        assert!(table.contains("добавь фичу,2,11,feat"));
    }

    #[test]
    fn test_report_writes_analysis_markdown() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("cursor-log.md"), "исправь ошибку\n").unwrap();

        let result = run_report(dir.path(), None, None).unwrap();
        assert_eq!(result.prompts.total_prompts, 1);

        let report = fs::read_to_string(dir.path().join("analysis/ANALYSIS.md")).unwrap();
        assert!(report.contains("# Development Activity Analysis"));
        assert!(report.contains("- Total prompts: 1"));
    }

    #[test]
    fn test_prompts_respects_config_log_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("wake.toml"), "prompt-log = \"notes.md\"\n").unwrap();
        fs::write(dir.path().join("notes.md"), "первый\n---\nвторой\n").unwrap();

        let result = prompts(dir.path(), None, None).unwrap();
        assert_eq!(result.stats.total_prompts, 2);
    }
}
