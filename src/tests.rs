//! Cross-module test suite for the recovery pipeline
//! Exercises the search stages together on small synthetic dictionaries

use crate::checksum::{validate_phrase, ChecksumOutcome};
use crate::config::Hint;
use crate::constraint::compile;
use crate::dictionary::Dictionary;
use crate::estimate::estimate;
use crate::filter::{FilterCounters, UniquenessFilter};
use crate::generator::{Candidate, CandidateGenerator};
use num_traits::ToPrimitive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Known BIP39 phrases and their expected validation outcomes
struct ChecksumVector {
    phrase: &'static str,
    outcome: ChecksumOutcome,
}

const CHECKSUM_VECTORS: &[ChecksumVector] = &[
    ChecksumVector {
        phrase: "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        outcome: ChecksumOutcome::Valid,
    },
    ChecksumVector {
        phrase: "ozone drill grab fiber curtain grace pudding thank cruise elder eight picture",
        outcome: ChecksumOutcome::Valid,
    },
    ChecksumVector {
        phrase: "legal winner thank year wave sausage worth useful legal winner thank yellow",
        outcome: ChecksumOutcome::Valid,
    },
    ChecksumVector {
        phrase: "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
        outcome: ChecksumOutcome::RejectedChecksum,
    },
    ChecksumVector {
        phrase: "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon ability",
        outcome: ChecksumOutcome::RejectedChecksum,
    },
    ChecksumVector {
        phrase: "abandon abandon abandon",
        outcome: ChecksumOutcome::RejectedLength,
    },
];

fn synthetic_dictionary(words: &[&str]) -> Dictionary {
    Dictionary::from_words(words.iter().map(|w| w.to_string()).collect(), "en").unwrap()
}

#[test]
fn test_checksum_vectors() {
    for vector in CHECKSUM_VECTORS {
        let outcome = validate_phrase(vector.phrase).unwrap();
        assert_eq!(
            outcome, vector.outcome,
            "unexpected outcome for: {}",
            vector.phrase
        );
    }
}

#[test]
fn test_with_repetition_estimate_matches_enumeration() {
    let cases: Vec<(Vec<&str>, Vec<Hint>)> = vec![
        (
            vec!["apple", "ant", "bear"],
            vec![
                Hint::FirstLetter('a'),
                Hint::FirstLetter('a'),
                Hint::Exact("bear".to_string()),
            ],
        ),
        (
            vec!["apple", "ant", "bear", "bat", "cat"],
            vec![Hint::Any, Hint::FirstLetter('b'), Hint::FirstLetter('c')],
        ),
        (vec!["apple", "ant"], vec![Hint::Any; 4]),
    ];

    for (words, hints) in cases {
        let dict = synthetic_dictionary(&words);
        let slots = compile(&hints, &dict).unwrap();
        let estimate = estimate(&slots);

        let emitted = CandidateGenerator::new(&slots).unwrap().count() as u64;
        assert_eq!(estimate.with_repetition.to_u64().unwrap(), emitted);
    }
}

#[test]
fn test_uniqueness_acceptance_matches_predicate() {
    let dict = synthetic_dictionary(&["apple", "ant", "arm", "bear"]);
    let slots = compile(
        &[Hint::FirstLetter('a'), Hint::FirstLetter('a'), Hint::Any],
        &dict,
    )
    .unwrap();

    let all: Vec<Candidate> = CandidateGenerator::new(&slots).unwrap().collect();
    let expected: Vec<&Candidate> = all.iter().filter(|c| c.is_unique()).collect();

    let cancel = AtomicBool::new(false);
    let (accepted, _) = UniquenessFilter::new(3)
        .run(&slots, &FilterCounters::new(), &cancel)
        .unwrap();

    assert_eq!(accepted.len(), expected.len());
    for (got, want) in accepted.iter().zip(expected) {
        assert_eq!(got, want);
        assert_eq!(got.words.len(), got.word_count());
    }
}

#[test]
fn test_scenario_pipeline_stages() {
    // dictionary {apple, ant, bear}; hints [F(a), F(a), Exact(bear)]
    let dict = synthetic_dictionary(&["apple", "ant", "bear"]);
    let hints = [
        Hint::FirstLetter('a'),
        Hint::FirstLetter('a'),
        Hint::Exact("bear".to_string()),
    ];
    let slots = compile(&hints, &dict).unwrap();

    let estimate = estimate(&slots);
    assert_eq!(estimate.with_repetition.to_u64(), Some(4));
    assert_eq!(estimate.without_repetition.to_u64(), Some(2));

    let candidates: Vec<Candidate> = CandidateGenerator::new(&slots).unwrap().collect();
    assert_eq!(candidates.len(), 4);

    let cancel = AtomicBool::new(false);
    let counters = FilterCounters::new();
    let (unique, cancelled) = UniquenessFilter::new(2)
        .run(&slots, &counters, &cancel)
        .unwrap();

    assert!(!cancelled);
    assert_eq!(counters.processed(), 4);
    let phrases: Vec<&str> = unique.iter().map(|c| c.as_str()).collect();
    assert_eq!(phrases, ["apple ant bear", "ant apple bear"]);
}

#[test]
fn test_generator_determinism_across_runs() {
    let dict = Dictionary::english();
    let hints = [
        Hint::FirstLetter('z'),
        Hint::FirstLetter('z'),
        Hint::Exact("abandon".to_string()),
    ];
    let slots = compile(&hints, &dict).unwrap();

    let first: Vec<String> = CandidateGenerator::new(&slots)
        .unwrap()
        .map(|c| c.phrase)
        .collect();
    let second: Vec<String> = CandidateGenerator::new(&slots)
        .unwrap()
        .map(|c| c.phrase)
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_mid_run_cancellation_yields_subset() {
    let dict = Dictionary::english();
    let hints = vec![Hint::FirstLetter('z'); 3];
    let slots = compile(&hints, &dict).unwrap();

    let no_cancel = AtomicBool::new(false);
    let full = UniquenessFilter::new(4)
        .run(&slots, &FilterCounters::new(), &no_cancel)
        .unwrap()
        .0;

    let cancel = Arc::new(AtomicBool::new(false));
    let trigger = Arc::clone(&cancel);
    let handle = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(1));
        trigger.store(true, Ordering::SeqCst);
    });

    let (partial, _) = UniquenessFilter::new(4)
        .run(&slots, &FilterCounters::new(), &cancel)
        .unwrap();
    handle.join().unwrap();

    // Never a superset, never a partially evaluated candidate
    assert!(partial.len() <= full.len());
    assert!(partial.iter().all(|c| full.contains(c)));
}

#[test]
fn test_first_letter_search_recovers_known_phrase() {
    // All twelve words distinct, so the phrase survives the uniqueness filter
    let phrase = "ozone drill grab fiber curtain grace pudding thank cruise elder eight picture";
    let dict = Dictionary::english();
    let mut hints: Vec<Hint> = phrase
        .split(' ')
        .map(|w| Hint::Exact(w.to_string()))
        .collect();
    hints[0] = Hint::FirstLetter('o');

    let slots = compile(&hints, &dict).unwrap();
    let cancel = AtomicBool::new(false);
    let (unique, _) = UniquenessFilter::new(2)
        .run(&slots, &FilterCounters::new(), &cancel)
        .unwrap();

    let (valid, cancelled) = crate::checksum::ChecksumFilter
        .filter(unique, &cancel)
        .unwrap();

    assert!(!cancelled);
    assert!(valid.iter().any(|c| c.as_str() == phrase));
    for candidate in &valid {
        assert_eq!(
            validate_phrase(candidate.as_str()).unwrap(),
            ChecksumOutcome::Valid
        );
    }
}
