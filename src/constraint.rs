//! Hint-to-candidate-set compilation

use crate::config::Hint;
use crate::dictionary::Dictionary;
use crate::error::{ConfigError, Result};
use tracing::debug;

/// The ordered dictionary words compatible with one slot's hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCandidates {
    /// Slot position in the phrase (0-based)
    pub position: usize,
    /// Matching words, in dictionary order
    pub words: Vec<String>,
    /// The constraining first letter, for first-letter hints only
    pub letter: Option<char>,
}

impl SlotCandidates {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Builds the per-slot candidate sets for a hint sequence.
///
/// A hint matching zero dictionary words is a configuration error, not a
/// silent empty result.
pub fn compile(hints: &[Hint], dictionary: &Dictionary) -> Result<Vec<SlotCandidates>> {
    let mut slots = Vec::with_capacity(hints.len());

    for (position, hint) in hints.iter().enumerate() {
        let slot = match hint {
            Hint::Exact(word) => {
                if !dictionary.contains(word) {
                    return Err(ConfigError::UnknownExactWord {
                        position,
                        word: word.clone(),
                    }
                    .into());
                }
                SlotCandidates {
                    position,
                    words: vec![word.clone()],
                    letter: None,
                }
            }
            Hint::FirstLetter(letter) => {
                let words: Vec<String> = dictionary
                    .words()
                    .iter()
                    .filter(|w| w.starts_with(*letter))
                    .cloned()
                    .collect();
                if words.is_empty() {
                    return Err(ConfigError::NoWordsForLetter {
                        position,
                        letter: *letter,
                    }
                    .into());
                }
                SlotCandidates {
                    position,
                    words,
                    letter: Some(*letter),
                }
            }
            Hint::Any => SlotCandidates {
                position,
                words: dictionary.words().to_vec(),
                letter: None,
            },
        };

        debug!("Slot {}: {} candidate words", position, slot.len());
        slots.push(slot);
    }

    Ok(slots)
}
