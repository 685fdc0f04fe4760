//! End-to-end search pipeline
//!
//! Wires the stages together: hint compilation, combination estimation, the
//! parallel uniqueness scan with its progress reporter, checksum validation,
//! and the final result write.

use crate::checksum::ChecksumFilter;
use crate::config::RecoveryConfig;
use crate::constraint::{self, SlotCandidates};
use crate::dictionary::Dictionary;
use crate::error::{RecoveryError, Result};
use crate::estimate::{self, SearchEstimate};
use crate::filter::{FilterCounters, UniquenessFilter};
use crate::generator::Candidate;
use crate::progress::{self, ProgressReporter, ReporterConfig};
use crate::sink;
use num_traits::ToPrimitive;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Statistics for a completed (or interrupted) run
#[derive(Debug, Clone, Default)]
pub struct RecoveryStats {
    /// Candidates scanned by the uniqueness filter
    pub candidates_processed: u64,
    /// Phrases with no repeated word
    pub unique_found: u64,
    /// Phrases that also passed the checksum
    pub valid_found: u64,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Result of a search run
#[derive(Debug)]
pub struct RecoveryOutcome {
    /// The surviving mnemonics, in generation order
    pub mnemonics: Vec<Candidate>,
    /// Final statistics
    pub stats: RecoveryStats,
    /// True when cancellation stopped the checksum stage early; the written
    /// results are then a partial but valid prefix
    pub cancelled: bool,
    /// Where the results were written
    pub output_path: PathBuf,
}

/// Main search engine
pub struct RecoveryEngine {
    config: RecoveryConfig,
    slots: Vec<SlotCandidates>,
    estimate: SearchEstimate,
}

impl RecoveryEngine {
    /// Validate the configuration, load the dictionary, and compile the
    /// hints. All configuration errors surface here, before any search work.
    pub fn new(config: RecoveryConfig) -> Result<Self> {
        config.validate()?;

        let dictionary = match &config.wordlist_path {
            Some(path) => Dictionary::from_file(path, &config.language)?,
            None => Dictionary::english(),
        };
        info!(
            "Loaded {} dictionary words ({})",
            dictionary.len(),
            dictionary.language()
        );

        let slots = constraint::compile(&config.hints, &dictionary)?;
        let estimate = estimate::estimate(&slots);
        info!(
            "Total possible combinations (with repetitions): {}",
            estimate.with_repetition
        );
        info!(
            "Total possible combinations (without repetitions): {}",
            estimate.without_repetition
        );

        Ok(Self {
            config,
            slots,
            estimate,
        })
    }

    pub fn estimate(&self) -> &SearchEstimate {
        &self.estimate
    }

    pub fn slots(&self) -> &[SlotCandidates] {
        &self.slots
    }

    /// Run the search to completion or cancellation.
    ///
    /// An interrupt during the uniqueness scan aborts without writing; an
    /// interrupt once the checksum stage has started still writes the partial
    /// accepted list.
    pub fn run(&self, cancel: Arc<AtomicBool>) -> Result<RecoveryOutcome> {
        let start = Instant::now();

        let counters = Arc::new(FilterCounters::new());
        counters.start();
        let reporter = ProgressReporter::spawn(
            Arc::clone(&counters),
            ReporterConfig {
                interval: Duration::from_secs(self.config.report_interval_secs),
                show_progress_bar: self.config.show_progress_bar,
                total_with_repetition: self.estimate.with_repetition.to_u64().unwrap_or(u64::MAX),
            },
        );

        info!("Checking for unique phrases (no repeated words)...");
        let filter = UniquenessFilter::new(self.config.num_threads);
        let filter_result = filter.run(&self.slots, &counters, &cancel);
        reporter.stop();
        let (unique, scan_cancelled) = filter_result?;

        if scan_cancelled {
            info!(
                "Scan cancelled after {} candidates; no results written",
                counters.processed()
            );
            return Err(RecoveryError::Cancelled);
        }

        let unique_found = unique.len() as u64;
        info!(
            "{} unique phrases found. These will have their checksums validated.",
            unique_found
        );

        let (valid, checksum_cancelled) = ChecksumFilter.filter(unique, &cancel)?;

        let stats = RecoveryStats {
            candidates_processed: counters.processed(),
            unique_found,
            valid_found: valid.len() as u64,
            elapsed: start.elapsed(),
        };

        sink::write_results(&self.config.output_path, &valid)?;
        info!(
            "Search finished in {}: {} scanned, {} unique, {} valid",
            progress::format_duration(stats.elapsed),
            progress::format_number(stats.candidates_processed),
            stats.unique_found,
            stats.valid_found
        );

        Ok(RecoveryOutcome {
            mnemonics: valid,
            stats,
            cancelled: checksum_cancelled,
            output_path: self.config.output_path.clone(),
        })
    }
}
