//! BIP39 checksum validation of unique candidates

use crate::error::{RecoveryError, Result};
use crate::generator::Candidate;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Outcome of validating a single phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumOutcome {
    /// The phrase decodes to entropy with a matching checksum
    Valid,
    /// The word count maps to no supported BIP39 entropy length
    RejectedLength,
    /// The trailing checksum bits do not match the entropy
    RejectedChecksum,
}

/// Validates one phrase against the BIP39 English word list.
///
/// The two defined rejection reasons are normal filter outcomes; any other
/// validator error is surfaced as fatal rather than absorbed as a rejection,
/// so an unrelated validator fault cannot silently drop a recovery candidate.
pub fn validate_phrase(phrase: &str) -> Result<ChecksumOutcome> {
    match bip39::Mnemonic::parse_in_normalized(bip39::Language::English, phrase) {
        Ok(_) => Ok(ChecksumOutcome::Valid),
        Err(error) => match error {
            bip39::Error::BadWordCount(_) | bip39::Error::BadEntropyBitCount(_) => {
                Ok(ChecksumOutcome::RejectedLength)
            }
            bip39::Error::InvalidChecksum => Ok(ChecksumOutcome::RejectedChecksum),
            other => Err(RecoveryError::Validator(other.to_string())),
        },
    }
}

/// Sequential filter keeping candidates whose phrase passes BIP39 validation.
#[derive(Debug, Default)]
pub struct ChecksumFilter;

impl ChecksumFilter {
    /// Filters in encounter order, preserving it in the output.
    ///
    /// Returns the accepted candidates and whether cancellation stopped the
    /// pass early; the partial list is still meaningful in that case.
    pub fn filter(
        &self,
        candidates: Vec<Candidate>,
        cancel: &AtomicBool,
    ) -> Result<(Vec<Candidate>, bool)> {
        let mut valid = Vec::new();
        let mut cancelled = false;

        for candidate in candidates {
            if cancel.load(Ordering::SeqCst) {
                cancelled = true;
                break;
            }

            match validate_phrase(candidate.as_str())? {
                ChecksumOutcome::Valid => valid.push(candidate),
                ChecksumOutcome::RejectedLength | ChecksumOutcome::RejectedChecksum => {
                    debug!("Rejected: {}", candidate.as_str());
                }
            }
        }

        info!("Found {} valid mnemonics", valid.len());
        Ok((valid, cancelled))
    }
}
