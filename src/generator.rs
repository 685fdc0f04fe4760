//! Lazy cartesian-product generation of candidate phrases

use crate::constraint::SlotCandidates;
use crate::error::{GeneratorError, Result};
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// Hard cap on the enumerable search space. Estimation has no such cap; only
/// enumeration does.
pub const MAX_SEARCH_SPACE: u64 = 1_000_000_000_000;

/// A candidate mnemonic phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The words in the phrase, one per slot
    pub words: Vec<String>,
    /// The phrase as a space-separated string
    pub phrase: String,
    /// Linear index within the cartesian product
    pub index: u64,
}

impl Candidate {
    pub fn new(words: Vec<String>, index: u64) -> Self {
        let phrase = words.join(" ");
        Self {
            words,
            phrase,
            index,
        }
    }

    /// Get the phrase as a string slice
    pub fn as_str(&self) -> &str {
        &self.phrase
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// True when no word appears in more than one slot.
    pub fn is_unique(&self) -> bool {
        // Phrases are at most 24 words; a quadratic scan beats hashing here.
        self.words
            .iter()
            .enumerate()
            .all(|(i, word)| !self.words[..i].contains(word))
    }
}

/// Streaming generator over the cartesian product of the slot candidate sets.
///
/// Emits candidates in lexicographic order: slot order major, within-slot
/// dictionary order minor. A fresh generator reproduces the identical
/// sequence, and any suffix can be reached by linear index for sharding.
#[derive(Debug)]
pub struct CandidateGenerator<'a> {
    slots: &'a [SlotCandidates],
    current_indices: Vec<usize>,
    total: u64,
    cursor: u64,
    exhausted: bool,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(slots: &'a [SlotCandidates]) -> Result<Self> {
        let product: BigUint = slots.iter().map(|slot| BigUint::from(slot.len())).product();
        let total = product
            .to_u64()
            .filter(|&total| total <= MAX_SEARCH_SPACE)
            .ok_or(GeneratorError::SearchSpaceTooLarge(product.clone()))?;

        Ok(Self {
            slots,
            current_indices: vec![0; slots.len()],
            total,
            cursor: 0,
            exhausted: total == 0,
        })
    }

    /// Total number of candidates in the product
    pub fn total_combinations(&self) -> u64 {
        self.total
    }

    /// Linear index of the next candidate to be emitted
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Generate the next candidate, or `None` once the product is exhausted
    pub fn next_candidate(&mut self) -> Option<Candidate> {
        if self.exhausted {
            return None;
        }

        let candidate = self.materialize(&self.current_indices, self.cursor);
        self.advance();
        Some(candidate)
    }

    /// Random access by linear index, independent of the cursor
    pub fn candidate_at(&self, index: u64) -> Result<Candidate> {
        if index >= self.total {
            return Err(GeneratorError::IndexOutOfRange(index).into());
        }
        let indices = self.index_to_indices(index);
        Ok(self.materialize(&indices, index))
    }

    /// Reset the generator to the beginning of the sequence
    pub fn reset(&mut self) {
        self.current_indices.fill(0);
        self.cursor = 0;
        self.exhausted = self.total == 0;
    }

    /// Position the cursor at a specific linear index
    pub fn skip_to(&mut self, index: u64) -> Result<()> {
        if index >= self.total {
            return Err(GeneratorError::IndexOutOfRange(index).into());
        }

        self.current_indices = self.index_to_indices(index);
        self.cursor = index;
        self.exhausted = false;
        Ok(())
    }

    fn materialize(&self, indices: &[usize], index: u64) -> Candidate {
        let words = indices
            .iter()
            .zip(self.slots)
            .map(|(&word_index, slot)| slot.words[word_index].clone())
            .collect();
        Candidate::new(words, index)
    }

    /// Advance the odometer; the last slot varies fastest.
    fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.total {
            self.exhausted = true;
            return;
        }

        for position in (0..self.slots.len()).rev() {
            self.current_indices[position] += 1;
            if self.current_indices[position] < self.slots[position].len() {
                break;
            }
            self.current_indices[position] = 0; // carry into the next slot up
        }
    }

    /// Convert a linear index to per-slot word indices.
    fn index_to_indices(&self, mut index: u64) -> Vec<usize> {
        let mut indices = vec![0; self.slots.len()];
        for position in (0..self.slots.len()).rev() {
            let len = self.slots[position].len() as u64;
            indices[position] = (index % len) as usize;
            index /= len;
        }
        indices
    }
}

impl Iterator for CandidateGenerator<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_candidate()
    }
}
