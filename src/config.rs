//! Configuration types and parsing for the recovery pipeline

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main configuration structure for a recovery run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// One hint per mnemonic slot, in order
    pub hints: Vec<Hint>,

    /// Optional newline-delimited word list; the embedded BIP39 English list
    /// is used when absent
    #[serde(default)]
    pub wordlist_path: Option<PathBuf>,

    /// Language tag of the word list (only "en" behavior is specified)
    #[serde(default = "default_language")]
    pub language: String,

    /// Optional expected phrase length, validated against the hint count
    #[serde(default)]
    pub expected_length: Option<usize>,

    /// Number of worker threads for the uniqueness filter
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,

    /// Progress report cadence in seconds
    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,

    /// Where the surviving phrases are written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// BIP39 passphrase used by the downstream derivation stage
    #[serde(default)]
    pub passphrase: String,

    /// Whether to render a progress bar alongside log output
    #[serde(default = "default_show_progress_bar")]
    pub show_progress_bar: bool,
}

/// Partial knowledge about one mnemonic slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hint {
    /// The word at this slot is known exactly
    Exact(String),
    /// Only the first letter of the word is known
    FirstLetter(char),
    /// Nothing is known; any dictionary word fits
    Any,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_report_interval_secs() -> u64 {
    crate::DEFAULT_REPORT_INTERVAL_SECS
}

fn default_output_path() -> PathBuf {
    PathBuf::from("valid_mnemonics.json")
}

fn default_show_progress_bar() -> bool {
    true
}

impl RecoveryConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RecoveryConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RecoveryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.hints.is_empty() {
            return Err(ConfigError::EmptyHints.into());
        }

        if let Some(expected) = self.expected_length {
            if expected != self.hints.len() {
                return Err(ConfigError::HintCountMismatch {
                    expected,
                    actual: self.hints.len(),
                }
                .into());
            }
        }

        for hint in &self.hints {
            match hint {
                Hint::Exact(word) => {
                    if word.is_empty() || !word.chars().all(|c| c.is_ascii_lowercase()) {
                        return Err(ConfigError::InvalidWord(word.clone()).into());
                    }
                }
                Hint::FirstLetter(c) => {
                    if !c.is_ascii_lowercase() {
                        return Err(ConfigError::InvalidHintLetter(*c).into());
                    }
                }
                Hint::Any => {}
            }
        }

        let len = self.hints.len();
        if len < crate::MIN_MNEMONIC_LENGTH || len > crate::MAX_MNEMONIC_LENGTH || len % 3 != 0 {
            // Not fatal: the pipeline accepts any slot count, but only
            // standard lengths can ever pass the checksum filter.
            warn!("{} slots is not a standard BIP39 phrase length", len);
        }

        Ok(())
    }

    /// Number of mnemonic slots
    pub fn phrase_length(&self) -> usize {
        self.hints.len()
    }
}
