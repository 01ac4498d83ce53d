//! Markdown activity report.
//!
//! Renders the aggregate statistics into a human-readable document:
//! an overall statistics list, the prompt category distribution as a
//! table with percentages, and a short conclusions section. The command
//! layer writes the result to `ANALYSIS.md` in the output directory.

use crate::models::{CommitRecord, PromptRecord};
use crate::stats::{self, category_counts};
use std::fmt::Write;

/// Report file name under the output directory.
pub const REPORT_FILE: &str = "ANALYSIS.md";

/// Render the full markdown report.
pub fn render(prompts: &[PromptRecord], commits: &[CommitRecord]) -> String {
    let prompt_stats = stats::prompt_stats(prompts);
    let commit_stats = stats::commit_stats(commits);
    let counts = category_counts(prompts);

    let mut out = String::new();
    out.push_str("# Development Activity Analysis\n\n");
    out.push_str("## Overall statistics\n\n");

    let _ = writeln!(out, "- Total prompts: {}", prompt_stats.total_prompts);
    let _ = writeln!(out, "- Total commits: {}", commit_stats.total_commits);
    if commit_stats.total_commits > 0 {
        let _ = writeln!(
            out,
            "- Average prompts per commit: {:.1}",
            prompt_stats.total_prompts as f64 / commit_stats.total_commits as f64
        );
    }
    let _ = writeln!(
        out,
        "- Hours spent (hours containing at least one commit): {}",
        commit_stats.active_hours
    );
    let _ = writeln!(
        out,
        "- Average words per prompt: {:.1}",
        prompt_stats.avg_words_per_prompt
    );
    let _ = writeln!(
        out,
        "- Average characters per prompt: {:.1}",
        prompt_stats.avg_chars_per_prompt
    );
    let _ = writeln!(
        out,
        "- Average commits per day: {:.1}",
        commit_stats.avg_commits_per_day
    );
    if let Some(hour) = commit_stats.most_active_hour {
        let _ = writeln!(out, "- Most active commit hour: {}:00 UTC", hour);
    }
    let _ = writeln!(
        out,
        "- Average changes per commit: {:.1} lines",
        commit_stats.avg_changes_per_commit
    );
    let _ = writeln!(out, "- Net lines in main code: {}", commit_stats.main_lines);
    let _ = writeln!(out, "- Net lines in tests: {}", commit_stats.test_lines);
    if let Some(percent) = commit_stats.test_to_main_percent {
        let _ = writeln!(out, "- Test-to-code ratio: {:.1}%", percent);
    }

    if !counts.is_empty() {
        out.push_str("\n## Prompt type distribution\n\n");
        out.push_str("| Type | Count | Share |\n");
        out.push_str("|------|-------|-------|\n");
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        for (category, count) in &counts {
            let share = *count as f64 / total as f64 * 100.0;
            let _ = writeln!(out, "| {} | {} | {:.1}% |", category, count, share);
        }
    }

    out.push_str("\n## Conclusions\n\n");
    if let Some((top, top_count)) = counts.first() {
        let _ = writeln!(
            out,
            "1. **Prompts**: the most frequent type is `{}` ({} prompts), with an average length of {:.1} words.",
            top, top_count, prompt_stats.avg_words_per_prompt
        );
    } else {
        out.push_str("1. **Prompts**: no prompts were found in the log.\n");
    }
    if commit_stats.total_commits > 0 {
        let hour = commit_stats
            .most_active_hour
            .map(|h| format!("{}:00 UTC", h))
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(
            out,
            "2. **Commits**: {:.1} commits per day on average, peaking around {}, with {:.1} changed lines per commit.",
            commit_stats.avg_commits_per_day, hour, commit_stats.avg_changes_per_commit
        );
    } else {
        out.push_str("2. **Commits**: no commit history was available.\n");
    }

    out
}
