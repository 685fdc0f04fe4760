//! BIP39 word list loading and membership checks

use crate::error::{DictionaryError, Result};
use bip39::Language;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Ordered, immutable list of valid mnemonic words for one language.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashMap<String, usize>,
    language: String,
}

impl Dictionary {
    /// The canonical BIP39 English word list shipped with the `bip39` crate.
    pub fn english() -> Self {
        let words: Vec<String> = Language::English
            .word_list()
            .iter()
            .map(|w| w.to_string())
            .collect();
        // The canonical list is distinct by construction.
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Self {
            words,
            index,
            language: "en".to_string(),
        }
    }

    /// Build a dictionary from an explicit word sequence, preserving order.
    pub fn from_words(words: Vec<String>, language: &str) -> Result<Self> {
        if words.is_empty() {
            return Err(DictionaryError::Empty.into());
        }

        let mut index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            if index.insert(word.clone(), i).is_some() {
                return Err(DictionaryError::DuplicateWord(word.clone()).into());
            }
        }

        Ok(Self {
            words,
            index,
            language: language.to_string(),
        })
    }

    /// Load a newline-delimited word list from a file.
    ///
    /// A trailing empty entry left by the file's final newline is trimmed.
    /// For English, entries outside the canonical BIP39 list are reported as
    /// warnings but do not fail the load.
    pub fn from_file(path: &Path, language: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut words: Vec<String> = content
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
        if words.last().is_some_and(|w| w.is_empty()) {
            words.pop();
        }

        let dictionary = Self::from_words(words, language)?;

        if language == "en" {
            for word in &dictionary.words {
                if Language::English.find_word(word).is_none() {
                    warn!("Word is not in the canonical BIP39 list: {}", word);
                }
            }
        }

        Ok(dictionary)
    }

    /// All words in load order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Position of a word in the load order.
    pub fn position(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }
}
