//! CSV export of the derived tables.
//!
//! Two fixed-schema tables for external tooling: the prompt table
//! (`text,word_count,char_count,type`) and the commit table with the full
//! counter set. Fields containing commas, quotes, or newlines are quoted
//! RFC-4180 style.

use crate::models::{CommitRecord, PromptRecord};
use crate::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Prompt table file name under the output directory.
pub const PROMPTS_FILE: &str = "prompts.csv";

/// Commit table file name under the output directory.
pub const COMMITS_FILE: &str = "commits.csv";

/// Write the prompt table; returns the file path.
pub fn write_prompt_table(output_dir: &Path, records: &[PromptRecord]) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(PROMPTS_FILE);
    let mut out = BufWriter::new(File::create(&path)?);

    writeln!(out, "text,word_count,char_count,type")?;
    for record in records {
        let category = record.category.map(|c| c.as_str()).unwrap_or("");
        writeln!(
            out,
            "{},{},{},{}",
            csv_field(&record.text),
            record.word_count,
            record.char_count,
            category
        )?;
    }

    out.flush()?;
    Ok(path)
}

/// Write the commit table; returns the file path.
pub fn write_commit_table(output_dir: &Path, records: &[CommitRecord]) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(COMMITS_FILE);
    let mut out = BufWriter::new(File::create(&path)?);

    writeln!(
        out,
        "commit,timestamp,datetime,message,additions,deletions,files_changed,\
         tracked_additions,tracked_deletions,test_additions,test_deletions,\
         main_additions,main_deletions"
    )?;
    for commit in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            commit.id,
            commit.timestamp,
            commit.when.to_rfc3339(),
            csv_field(&commit.message),
            commit.total_additions,
            commit.total_deletions,
            commit.files_changed,
            commit.tracked_additions,
            commit.tracked_deletions,
            commit.test_additions,
            commit.test_deletions,
            commit.main_additions,
            commit.main_deletions
        )?;
    }

    out.flush()?;
    Ok(path)
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
