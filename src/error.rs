//! Error types for the mnemonic recovery pipeline

use num_bigint::BigUint;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum RecoveryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Checksum validator failure: {0}")]
    Validator(String),

    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors, all fatal before the search starts
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No hints configured")]
    EmptyHints,

    #[error("Hint count {actual} does not match expected phrase length {expected}")]
    HintCountMismatch { expected: usize, actual: usize },

    #[error("Invalid first-letter hint '{0}': must be a lowercase ASCII letter")]
    InvalidHintLetter(char),

    #[error("Invalid word in hints: {0}")]
    InvalidWord(String),

    #[error("Exact hint at position {position} names a word not in the dictionary: {word}")]
    UnknownExactWord { position: usize, word: String },

    #[error("No dictionary word starts with '{letter}' (hint at position {position})")]
    NoWordsForLetter { position: usize, letter: char },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Word list loading errors
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Word list is empty")]
    Empty,

    #[error("Duplicate word in list: {0}")]
    DuplicateWord(String),
}

/// Candidate generation errors
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Search space too large to enumerate: {0} combinations")]
    SearchSpaceTooLarge(BigUint),

    #[error("Candidate index {0} out of range")]
    IndexOutOfRange(u64),
}

/// Key derivation and address encoding errors
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("BIP39 error: {0}")]
    Bip39(String),

    #[error("BIP32 derivation error: {0}")]
    Bip32(#[from] bitcoin::bip32::Error),

    #[error("Key encoding error: {0}")]
    KeyEncoding(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RecoveryError>;
