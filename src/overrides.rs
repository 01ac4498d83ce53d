//! Durable classification overrides.
//!
//! The store is a JSONL table with exactly two fields per row, `text` and
//! `type`, kept under the analyzed repository's `.wake/` directory. It is
//! read once at the start of a classification pass and rewritten in full
//! at the end (atomic replace), so a decision made once — by a human or a
//! previous pass — is never recomputed.

use crate::models::{Category, OverrideEntry};
use crate::{Error, Result};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Directory for wake state inside the analyzed repository.
pub const DATA_DIR: &str = ".wake";

/// Store file name under [`DATA_DIR`].
pub const STORE_FILE: &str = "classifications.jsonl";

/// Mapping from exact prompt text to a previously assigned category.
pub struct OverrideStore {
    path: PathBuf,
}

impl OverrideStore {
    /// Store for the repository at `repo_path`.
    pub fn for_repo(repo_path: &Path) -> Self {
        Self {
            path: repo_path.join(DATA_DIR).join(STORE_FILE),
        }
    }

    /// Store backed by an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all overrides.
    ///
    /// A missing or unreadable store means no overrides; corrupt rows are
    /// skipped. Duplicate texts resolve to the last row (last write wins).
    pub fn load(&self) -> HashMap<String, Category> {
        let mut map = HashMap::new();

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return map,
        };

        for line in BufReader::new(file).lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<OverrideEntry>(&line) {
                Ok(entry) => {
                    map.insert(entry.text, entry.category);
                }
                Err(e) => {
                    eprintln!("Warning: skipping corrupt override row: {}", e);
                }
            }
        }

        map
    }

    /// Atomically replace the store with the given mapping.
    ///
    /// Rows are written sorted by text so repeated saves of the same
    /// mapping produce identical files. Failure here is a hard error:
    /// losing classification decisions silently is unacceptable.
    pub fn save(&self, map: &HashMap<String, Category>) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::Other(format!("override store has no parent directory: {}", self.path.display())))?;
        fs::create_dir_all(parent)?;

        let mut rows: Vec<(&String, &Category)> = map.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        for (text, category) in rows {
            let entry = OverrideEntry {
                text: text.clone(),
                category: *category,
            };
            writeln!(tmp, "{}", serde_json::to_string(&entry)?)?;
        }

        tmp.persist(&self.path)
            .map_err(|e| Error::Other(format!("failed to persist override store: {}", e)))?;

        Ok(())
    }
}
