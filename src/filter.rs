//! Parallel uniqueness filtering over disjoint shards of the candidate space

use crate::constraint::SlotCandidates;
use crate::error::Result;
use crate::generator::{Candidate, CandidateGenerator};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

/// Candidates processed between cancellation checks and counter updates
/// within a shard.
const SHARD_BATCH: u64 = 4096;

/// Counters shared between the filter workers and the progress reporter.
///
/// Monotonically increasing while the filter runs; reads are eventually
/// consistent, which is sufficient for advisory reporting.
#[derive(Debug, Default)]
pub struct FilterCounters {
    processed: AtomicU64,
    accepted: AtomicU64,
    running: AtomicBool,
}

impl FilterCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    pub fn finish(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Filters the candidate stream down to phrases with no repeated word.
///
/// The cartesian product's index space is split into contiguous disjoint
/// ranges, one worker per shard, each driving its own generator cursor and
/// accumulating into a shard-local vector. Locals are merged in shard order
/// at the end, so the output order equals generation order and runs are
/// deterministic.
#[derive(Debug)]
pub struct UniquenessFilter {
    num_shards: usize,
}

impl UniquenessFilter {
    pub fn new(num_shards: usize) -> Self {
        Self {
            num_shards: num_shards.max(1),
        }
    }

    /// Runs the filter to completion or cancellation.
    ///
    /// Returns the accepted candidates and whether cancellation cut the scan
    /// short. After a cancellation signal, in-flight batches finish but no
    /// new batch is dequeued.
    pub fn run(
        &self,
        slots: &[SlotCandidates],
        counters: &FilterCounters,
        cancel: &AtomicBool,
    ) -> Result<(Vec<Candidate>, bool)> {
        counters.start();
        let result = self.run_inner(slots, counters, cancel);
        // The running flag must clear on every path so the progress reporter
        // can always join.
        counters.finish();
        result
    }

    fn run_inner(
        &self,
        slots: &[SlotCandidates],
        counters: &FilterCounters,
        cancel: &AtomicBool,
    ) -> Result<(Vec<Candidate>, bool)> {
        let total = CandidateGenerator::new(slots)?.total_combinations();

        let ranges = shard_ranges(total, self.num_shards as u64);
        debug!("Filtering {} candidates across {} shards", total, ranges.len());

        let shard_results: Result<Vec<Vec<Candidate>>> = ranges
            .into_par_iter()
            .map(|(start, end)| run_shard(slots, start, end, counters, cancel))
            .collect();
        let shard_results = shard_results?;

        let cancelled = cancel.load(Ordering::SeqCst) && counters.processed() < total;
        let accepted = shard_results.into_iter().flatten().collect();
        Ok((accepted, cancelled))
    }
}

fn run_shard(
    slots: &[SlotCandidates],
    start: u64,
    end: u64,
    counters: &FilterCounters,
    cancel: &AtomicBool,
) -> Result<Vec<Candidate>> {
    let mut generator = CandidateGenerator::new(slots)?;
    generator.skip_to(start)?;

    let mut local = Vec::new();
    let mut cursor = start;
    while cursor < end {
        if cancel.load(Ordering::SeqCst) {
            break;
        }

        let batch_end = (cursor + SHARD_BATCH).min(end);
        let mut batch_processed = 0u64;
        while cursor < batch_end {
            let candidate = match generator.next_candidate() {
                Some(candidate) => candidate,
                None => break,
            };
            batch_processed += 1;
            cursor += 1;

            if candidate.is_unique() {
                counters.accepted.fetch_add(1, Ordering::Relaxed);
                local.push(candidate);
            }
        }
        counters.processed.fetch_add(batch_processed, Ordering::Relaxed);
    }

    Ok(local)
}

/// Splits `0..total` into at most `shards` contiguous disjoint ranges
/// covering every index exactly once.
fn shard_ranges(total: u64, shards: u64) -> Vec<(u64, u64)> {
    if total == 0 {
        return Vec::new();
    }
    let shards = shards.clamp(1, total);
    let base = total / shards;
    let remainder = total % shards;

    let mut ranges = Vec::with_capacity(shards as usize);
    let mut start = 0;
    for shard in 0..shards {
        let len = base + u64::from(shard < remainder);
        ranges.push((start, start + len));
        start += len;
    }
    ranges
}
