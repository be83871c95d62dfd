//! Run configuration
//!
//! Loaded once at startup from a YAML file and passed down explicitly;
//! nothing reads configuration ambiently.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use paperwatch_core::{find_archive, known_archive_ids, MatchMode, DEFAULT_THRESHOLD};

/// Errors from configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown archive `{0}` (known: {1})")]
    UnknownArchive(String, String),
}

/// Settings for one run
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Path to the keyword table
    pub keywords_file: PathBuf,
    /// Relevance threshold; papers must score strictly above it
    #[serde(default = "default_threshold")]
    pub threshold: i32,
    /// arXiv archive to watch, e.g. `quant-ph`
    pub archive: String,
    /// Destination Slack channel
    pub slack_channel: String,
    /// Whether digest entries carry the abstract
    #[serde(default)]
    pub include_abstract: bool,
    /// Substring or whole-word keyword matching
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Directory the markdown summary is written to
    #[serde(default = "default_summary_dir")]
    pub summary_dir: PathBuf,
    /// Keyword backup mirror; defaults to `keywords.backup`
    #[serde(default = "default_backup_file")]
    pub backup_file: PathBuf,
}

fn default_threshold() -> i32 {
    DEFAULT_THRESHOLD
}

fn default_summary_dir() -> PathBuf {
    PathBuf::from("summaries")
}

fn default_backup_file() -> PathBuf {
    PathBuf::from("keywords.backup")
}

impl Settings {
    /// Load and validate settings from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Settings =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Deserialize {
                path: path.to_path_buf(),
                source,
            })?;

        if find_archive(&settings.archive).is_none() {
            return Err(ConfigError::UnknownArchive(
                settings.archive,
                known_archive_ids(),
            ));
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r##"
keywords_file: keywords.csv
threshold: 4
archive: quant-ph
slack_channel: "#papers"
include_abstract: true
"##;

    fn parse(contents: &str) -> Result<Settings, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    #[test]
    fn test_parse_config() {
        let settings = parse(CONFIG).unwrap();
        assert_eq!(settings.keywords_file, PathBuf::from("keywords.csv"));
        assert_eq!(settings.threshold, 4);
        assert_eq!(settings.archive, "quant-ph");
        assert_eq!(settings.slack_channel, "#papers");
        assert!(settings.include_abstract);
    }

    #[test]
    fn test_defaults() {
        let settings = parse(
            "keywords_file: keywords.csv\narchive: cond-mat\nslack_channel: \"#papers\"\n",
        )
        .unwrap();
        assert_eq!(settings.threshold, DEFAULT_THRESHOLD);
        assert!(!settings.include_abstract);
        assert_eq!(settings.match_mode, MatchMode::Substring);
        assert_eq!(settings.summary_dir, PathBuf::from("summaries"));
        assert_eq!(settings.backup_file, PathBuf::from("keywords.backup"));
    }

    #[test]
    fn test_match_mode_values() {
        let settings = parse(
            "keywords_file: k.csv\narchive: cs\nslack_channel: \"#p\"\nmatch_mode: word\n",
        )
        .unwrap();
        assert_eq!(settings.match_mode, MatchMode::Word);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = parse(
            "keywords_file: k.csv\narchive: cs\nslack_channel: \"#p\"\nthresold: 3\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let result = parse("archive: cs\nslack_channel: \"#p\"\n");
        assert!(result.is_err());
    }
}
