//! Combination-count estimation over compiled candidate sets

use crate::constraint::SlotCandidates;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use std::collections::HashMap;

/// Candidate counts for a compiled hint sequence.
///
/// `without_repetition` is an advisory upper bound for progress display, not
/// the exact output count of the uniqueness filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEstimate {
    /// Exact product of the per-slot set sizes
    pub with_repetition: BigUint,
    /// Upper bound after accounting for words shared across slots that are
    /// constrained by the same first letter
    pub without_repetition: BigUint,
}

impl SearchEstimate {
    /// Lossy conversion for rate arithmetic in progress reporting.
    pub fn with_repetition_f64(&self) -> f64 {
        self.with_repetition.to_f64().unwrap_or(f64::INFINITY)
    }
}

/// Computes both candidate counts without enumerating anything.
///
/// Slots constrained by the same first letter draw from one shared pool and
/// are treated as sampled without replacement: the k-th slot counted within a
/// letter group contributes `pool_size - (k - 1)`, floored at zero. Exact and
/// unconstrained slots multiply their full set size independently.
pub fn estimate(slots: &[SlotCandidates]) -> SearchEstimate {
    let with_repetition = slots
        .iter()
        .map(|slot| BigUint::from(slot.len()))
        .product();

    let mut counted_per_letter: HashMap<char, usize> = HashMap::new();
    let mut without_repetition = BigUint::one();
    for slot in slots {
        let contribution = match slot.letter {
            Some(letter) => {
                let counted = counted_per_letter.entry(letter).or_insert(0);
                let remaining = slot.len().saturating_sub(*counted);
                *counted += 1;
                remaining
            }
            None => slot.len(),
        };
        without_repetition *= BigUint::from(contribution);
    }

    SearchEstimate {
        with_repetition,
        without_repetition,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(position: usize, words: &[&str], letter: Option<char>) -> SlotCandidates {
        SlotCandidates {
            position,
            words: words.iter().map(|w| w.to_string()).collect(),
            letter,
        }
    }

    #[test]
    fn test_estimate_scenario() {
        let slots = vec![
            slot(0, &["apple", "ant"], Some('a')),
            slot(1, &["apple", "ant"], Some('a')),
            slot(2, &["bear"], None),
        ];

        let estimate = estimate(&slots);
        assert_eq!(estimate.with_repetition, BigUint::from(4u32));
        assert_eq!(estimate.without_repetition, BigUint::from(2u32));
    }

    #[test]
    fn test_estimate_independent_letter_groups() {
        // Two 'a' slots and two 'b' slots: 3*2 * 2*1 = 12
        let slots = vec![
            slot(0, &["apple", "ant", "arm"], Some('a')),
            slot(1, &["apple", "ant", "arm"], Some('a')),
            slot(2, &["bear", "bat"], Some('b')),
            slot(3, &["bear", "bat"], Some('b')),
        ];

        let estimate = estimate(&slots);
        assert_eq!(estimate.with_repetition, BigUint::from(36u32));
        assert_eq!(estimate.without_repetition, BigUint::from(12u32));
    }

    #[test]
    fn test_estimate_group_larger_than_pool() {
        // Three slots drawing from a two-word pool: 2*1*0 = 0
        let slots = vec![
            slot(0, &["apple", "ant"], Some('a')),
            slot(1, &["apple", "ant"], Some('a')),
            slot(2, &["apple", "ant"], Some('a')),
        ];

        let estimate = estimate(&slots);
        assert_eq!(estimate.with_repetition, BigUint::from(8u32));
        assert_eq!(estimate.without_repetition, BigUint::from(0u32));
    }

    #[test]
    fn test_estimate_exceeds_u64() {
        // 24 unconstrained slots over the full English list: 2048^24 >> 2^64
        let dict = crate::dictionary::Dictionary::english();
        let slots: Vec<SlotCandidates> = (0..24)
            .map(|position| SlotCandidates {
                position,
                words: dict.words().to_vec(),
                letter: None,
            })
            .collect();

        let estimate = estimate(&slots);
        assert_eq!(
            estimate.with_repetition,
            BigUint::from(2048u32).pow(24u32)
        );
        assert!(estimate.with_repetition.to_u64().is_none());
    }

    #[test]
    fn test_estimate_empty_slots() {
        let estimate = estimate(&[]);
        assert_eq!(estimate.with_repetition, BigUint::one());
        assert_eq!(estimate.without_repetition, BigUint::one());
    }
}
