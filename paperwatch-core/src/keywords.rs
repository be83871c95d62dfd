//! Keyword table loading
//!
//! Rules come from a plain text file, one `pattern, weight` per line.
//! Matching is case-insensitive, as substrings or whole words per table mode.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Errors from keyword table loading
#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("failed to read keyword file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("failed to write keyword backup at {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How patterns are tested against title and author text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Pattern anywhere in the text
    #[default]
    Substring,
    /// Pattern bounded by word boundaries
    Word,
}

/// A single scoring rule: pattern plus its weight
#[derive(Debug, Clone)]
pub struct KeywordRule {
    /// Pattern as written in the keyword file
    pub pattern: String,
    /// Weight added to a paper's score when the pattern matches
    pub weight: i32,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Lowercased pattern for case-insensitive substring search
    Substring(String),
    Word(Regex),
}

impl KeywordRule {
    /// Build a rule, compiling its matcher for the given mode
    pub fn new(pattern: &str, weight: i32, mode: MatchMode) -> Result<Self, String> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err("empty pattern".to_string());
        }

        let matcher = match mode {
            MatchMode::Substring => Matcher::Substring(pattern.to_lowercase()),
            MatchMode::Word => {
                let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(pattern)))
                    .map_err(|e| format!("pattern does not compile: {}", e))?;
                Matcher::Word(re)
            }
        };

        Ok(Self {
            pattern: pattern.to_string(),
            weight,
            matcher,
        })
    }

    /// Test the pattern against a piece of text, case-insensitively
    pub fn matches(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Substring(needle) => text.to_lowercase().contains(needle.as_str()),
            Matcher::Word(re) => re.is_match(text),
        }
    }
}

/// An ordered, immutable set of keyword rules
#[derive(Debug, Clone)]
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
    mode: MatchMode,
}

impl KeywordTable {
    /// Parse table contents from text, failing on the first malformed row
    pub fn parse(contents: &str, mode: MatchMode, path: &Path) -> Result<Self, KeywordError> {
        let mut rules = Vec::new();

        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Split on the last comma so patterns may contain commas
            let (pattern, weight_str) = line.rsplit_once(',').ok_or_else(|| {
                KeywordError::Malformed {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason: format!("expected `pattern, weight`, got `{}`", line),
                }
            })?;

            let weight: i32 =
                weight_str
                    .trim()
                    .parse()
                    .map_err(|_| KeywordError::Malformed {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        reason: format!("weight `{}` is not an integer", weight_str.trim()),
                    })?;

            let rule =
                KeywordRule::new(pattern, weight, mode).map_err(|reason| {
                    KeywordError::Malformed {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        reason,
                    }
                })?;

            rules.push(rule);
        }

        Ok(Self { rules, mode })
    }

    /// Load the table from a file
    pub fn load(path: &Path, mode: MatchMode) -> Result<Self, KeywordError> {
        let contents = fs::read_to_string(path).map_err(|source| KeywordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, mode, path)
    }

    /// Load the table, falling back to the backup copy when the primary
    /// file is unreadable, and mirroring a fresh backup on success.
    pub fn load_with_backup(
        path: &Path,
        backup: &Path,
        mode: MatchMode,
    ) -> Result<Self, KeywordError> {
        let table = match Self::load(path, mode) {
            Ok(table) => table,
            Err(KeywordError::Io { path, source }) => {
                warn!("keyword file {} unreadable ({}), loading backup", path.display(), source);
                Self::load(backup, mode)?
            }
            // Malformed tables are never papered over with the backup
            Err(e) => return Err(e),
        };

        let mirrored: String = table
            .rules
            .iter()
            .map(|r| format!("{}, {}\n", r.pattern, r.weight))
            .collect();
        fs::write(backup, mirrored).map_err(|source| KeywordError::Backup {
            path: backup.to_path_buf(),
            source,
        })?;

        if table.is_empty() {
            warn!("keyword table is empty, nothing will ever be flagged");
        }
        info!("loaded {} keyword rules", table.len());
        Ok(table)
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
