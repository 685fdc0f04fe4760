//! BIP39 Mnemonic Recovery
//!
//! Recovers a forgotten BIP39 mnemonic phrase from partial per-slot
//! knowledge: for each word position either the exact word, only its first
//! letter, or nothing is known. The pipeline compiles the hints into
//! candidate word sets, streams their cartesian product, drops phrases that
//! reuse a word, keeps phrases whose entropy passes the BIP39 checksum, and
//! persists the survivors for downstream address probing.

pub mod checksum;
pub mod config;
pub mod constraint;
pub mod derive;
pub mod dictionary;
pub mod error;
pub mod estimate;
pub mod filter;
pub mod generator;
pub mod pipeline;
pub mod progress;
pub mod sink;

pub use config::{Hint, RecoveryConfig};
pub use constraint::SlotCandidates;
pub use dictionary::Dictionary;
pub use error::*;
pub use estimate::SearchEstimate;
pub use filter::{FilterCounters, UniquenessFilter};
pub use generator::{Candidate, CandidateGenerator};
pub use pipeline::{RecoveryEngine, RecoveryOutcome, RecoveryStats};
pub use progress::{ProgressReporter, ReporterConfig};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::checksum::{ChecksumFilter, ChecksumOutcome};
    pub use crate::config::{Hint, RecoveryConfig};
    pub use crate::constraint::SlotCandidates;
    pub use crate::derive::{DerivedAccount, HistoryClient};
    pub use crate::dictionary::Dictionary;
    pub use crate::error::*;
    pub use crate::estimate::SearchEstimate;
    pub use crate::filter::{FilterCounters, UniquenessFilter};
    pub use crate::generator::{Candidate, CandidateGenerator};
    pub use crate::pipeline::{RecoveryEngine, RecoveryOutcome, RecoveryStats};
    pub use crate::progress::{ProgressReporter, ReporterConfig};
    pub use anyhow::{Context, Result};
}

#[cfg(test)]
mod tests;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reference cadence for progress reports, in seconds
pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 5;

/// Maximum standard mnemonic length
pub const MAX_MNEMONIC_LENGTH: usize = 24;

/// Minimum standard mnemonic length
pub const MIN_MNEMONIC_LENGTH: usize = 12;
