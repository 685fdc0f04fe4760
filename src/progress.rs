//! Progress reporting for the filtering stage

use crate::filter::FilterCounters;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::info;

/// How often the reporter thread re-checks the running flag between samples.
const POLL_SLICE: Duration = Duration::from_millis(100);

/// Configuration for the progress reporter
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Sampling interval between reports
    pub interval: Duration,
    /// Whether to render a progress bar in addition to log lines
    pub show_progress_bar: bool,
    /// The with-repetition combination count the scan runs over
    pub total_with_repetition: u64,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(crate::DEFAULT_REPORT_INTERVAL_SECS),
            show_progress_bar: true,
            total_with_repetition: 0,
        }
    }
}

/// Observer task for a running uniqueness filter.
///
/// Samples the shared counters at a fixed cadence and reports accepted count,
/// percentage scanned, instantaneous throughput, and estimated time
/// remaining. Never blocks the filter; terminates as soon as the filter
/// clears its running flag.
pub struct ProgressReporter {
    handle: Option<JoinHandle<()>>,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Spawn the reporter thread. The counters' running flag must already be
    /// set, or the thread exits immediately.
    pub fn spawn(counters: Arc<FilterCounters>, config: ReporterConfig) -> Self {
        let bar = if config.show_progress_bar {
            let bar = ProgressBar::new(config.total_with_repetition);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            bar.set_message("Scanning for unique phrases...");
            Some(bar)
        } else {
            None
        };

        let thread_bar = bar.clone();
        let handle = thread::spawn(move || {
            report_loop(&counters, &config, thread_bar.as_ref());
        });

        Self {
            handle: Some(handle),
            bar,
        }
    }

    /// Join the reporter thread and clear the bar. Also runs on drop, so the
    /// thread never outlives the reporter on any exit path.
    pub fn stop(mut self) {
        self.join_inner();
    }

    fn join_inner(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.join_inner();
    }
}

fn report_loop(counters: &FilterCounters, config: &ReporterConfig, bar: Option<&ProgressBar>) {
    let start = Instant::now();
    let total = config.total_with_repetition;
    let mut last_accepted = 0u64;
    let mut last_sample = Instant::now();

    while counters.is_running() {
        thread::sleep(POLL_SLICE);
        if last_sample.elapsed() < config.interval {
            continue;
        }

        let processed = counters.processed();
        let accepted = counters.accepted();
        let elapsed = start.elapsed();
        let sample_secs = last_sample.elapsed().as_secs_f64();
        let throughput = (accepted - last_accepted) as f64 / sample_secs;
        let percentage = if total > 0 {
            processed as f64 / total as f64 * 100.0
        } else {
            100.0
        };
        let remaining = if throughput > 0.0 {
            Some(Duration::from_secs_f64(
                total.saturating_sub(processed) as f64 / throughput,
            ))
        } else {
            None
        };

        if let Some(bar) = bar {
            bar.set_position(processed);
            bar.set_message(format!("{} found, {}", accepted, format_rate(throughput)));
        }

        info!(
            "{} found, {:.1}% scanned, {} (elapsed: {}, remaining: {})",
            accepted,
            percentage,
            format_rate(throughput),
            format_duration(elapsed),
            remaining
                .map(format_duration)
                .unwrap_or_else(|| "unknown".to_string()),
        );

        last_accepted = accepted;
        last_sample = Instant::now();
    }
}

/// Format a duration in human-readable form
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Format large numbers with thousands separators
pub fn format_number(num: u64) -> String {
    let num_str = num.to_string();
    let mut result = String::new();

    for (i, c) in num_str.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

/// Format a rate with appropriate units
pub fn format_rate(rate: f64) -> String {
    if rate >= 1_000_000.0 {
        format!("{:.1}M/s", rate / 1_000_000.0)
    } else if rate >= 1_000.0 {
        format!("{:.1}K/s", rate / 1_000.0)
    } else {
        format!("{:.0}/s", rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_joins_when_filter_finishes() {
        let counters = Arc::new(FilterCounters::new());
        counters.start();

        let reporter = ProgressReporter::spawn(
            Arc::clone(&counters),
            ReporterConfig {
                interval: Duration::from_millis(50),
                show_progress_bar: false,
                total_with_repetition: 100,
            },
        );

        counters.finish();
        // stop() must return promptly once the running flag is cleared
        reporter.stop();
    }

    #[test]
    fn test_reporter_exits_without_running_filter() {
        let counters = Arc::new(FilterCounters::new());
        let reporter = ProgressReporter::spawn(counters, ReporterConfig::default());
        reporter.stop();
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m 1s");
        assert_eq!(format_duration(Duration::from_secs(61)), "1m 1s");
        assert_eq!(format_duration(Duration::from_secs(1)), "1s");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(123), "123");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(1500000.0), "1.5M/s");
        assert_eq!(format_rate(1500.0), "1.5K/s");
        assert_eq!(format_rate(150.0), "150/s");
        assert_eq!(format_rate(0.0), "0/s");
    }
}
