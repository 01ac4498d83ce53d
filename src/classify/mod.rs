//! Prompt classification.
//!
//! Each prompt record is resolved in three layers: a stored override for
//! the exact text is authoritative and skips everything else; otherwise an
//! ordered keyword-rule table assigns a category (first match wins);
//! records that land on `other` may finally be put to a
//! [`DecisionProvider`] — the CLI wires stdin in interactive mode, tests
//! supply canned answers. At the end of a pass every decision is written
//! back to the override store, so the next run replays it for free.

use crate::models::{Category, PromptRecord};
use crate::overrides::OverrideStore;
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::LazyLock;

/// Ordered keyword rules; earlier entries take precedence and the first
/// match wins. Matching is a substring test against the lowercased text;
/// the standalone word "ci" is the one word-boundary match and is checked
/// together with the other `ci` keywords.
const RULES: &[(Category, &[&str])] = &[
    (Category::Ci, &["phpstan", "cs-fix", "php-cs"]),
    (Category::Git, &["закоммить", "commit", "коммит"]),
    (
        Category::Fix,
        &[
            "неверн", "не раб", "не отраб", "исправ", "ошибка", "фикс", "error", "unable",
            "cannot", "docker", "докер", "все еще", "всё еще",
        ],
    ),
    (Category::Continue, &["продолжай"]),
    (Category::Feat, &["давай", "добав"]),
    (Category::Refactor, &["рефактор"]),
    (Category::Test, &["тест"]),
    (Category::Docs, &["ридми", "readme", "докум"]),
];

static CI_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bci\b").unwrap());

/// Supplies a category for a record the rules left at `other`.
///
/// `None` keeps `other`. Implementations may block (the stdin provider
/// does); the engine stays deterministic and testable by taking the
/// provider as a seam instead of reading input itself.
pub trait DecisionProvider {
    fn decide(&mut self, record: &PromptRecord) -> Option<Category>;
}

/// Apply the ordered keyword rules to a text.
pub fn rule_category(text: &str) -> Category {
    let lower = text.to_lowercase();
    for (category, keywords) in RULES {
        let mut hit = keywords.iter().any(|k| lower.contains(k));
        if *category == Category::Ci {
            hit = hit || CI_WORD_RE.is_match(&lower);
        }
        if hit {
            return *category;
        }
    }
    Category::Other
}

/// Classify records in place: overrides first, then rules, then the
/// provider for unresolved (`other`) records.
pub fn classify(
    records: &mut [PromptRecord],
    overrides: &HashMap<String, Category>,
    mut provider: Option<&mut dyn DecisionProvider>,
) {
    for record in records.iter_mut() {
        if let Some(stored) = overrides.get(&record.text) {
            record.category = Some(*stored);
            continue;
        }

        let mut category = rule_category(&record.text);
        if category == Category::Other {
            if let Some(p) = provider.as_deref_mut() {
                if let Some(chosen) = p.decide(record) {
                    category = chosen;
                }
            }
        }
        record.category = Some(category);
    }
}

/// Run one full classification pass against the store.
///
/// Loads overrides, classifies, then persists the union of the previously
/// stored mapping and this pass's assignments (this pass wins on
/// collision), so decisions for prompts absent from the current log
/// survive.
pub fn run_pass(
    records: &mut [PromptRecord],
    store: &OverrideStore,
    provider: Option<&mut dyn DecisionProvider>,
) -> Result<()> {
    let previous = store.load();
    classify(records, &previous, provider);

    let mut merged = previous;
    for record in records.iter() {
        if let Some(category) = record.category {
            merged.insert(record.text.clone(), category);
        }
    }
    store.save(&merged)
}

/// Interactive provider reading category choices from stdin.
///
/// Prints the prompt and a numbered menu; an empty line keeps `other`,
/// anything unparsable warns and keeps `other`.
pub struct StdinDecisionProvider;

impl DecisionProvider for StdinDecisionProvider {
    fn decide(&mut self, record: &PromptRecord) -> Option<Category> {
        println!("\n========== Prompt ==========");
        println!("{}", record.text);
        println!("========== End Prompt ==========\n");
        println!("Choose a type for this prompt:");
        for (i, category) in Category::ALL.iter().enumerate() {
            println!("{}. {}", i + 1, category);
        }
        print!("Enter a number (leave empty to keep 'other'): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            eprintln!("Warning: could not read input, keeping 'other'");
            return None;
        }

        let choice = line.trim();
        if choice.is_empty() {
            return None;
        }

        match choice.parse::<usize>() {
            Ok(n) if (1..=Category::ALL.len()).contains(&n) => Some(Category::ALL[n - 1]),
            _ => {
                eprintln!("Warning: invalid choice '{}', keeping 'other'", choice);
                None
            }
        }
    }
}
