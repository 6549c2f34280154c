//! Progress and skip reporting for an extraction pass.
//!
//! The extractor never logs on its own; it hands every classification to a
//! [`Reporter`] supplied by the caller.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::extract::{ExtractionSummary, Outcome};

pub trait Reporter {
    /// Called once before the first record with the number of records in the archive.
    fn begin(&mut self, _total_records: usize) {}

    /// Called for every evaluated record. `index` is 1-based.
    fn record(&mut self, _index: usize, _outcome: Outcome) {}

    /// Called when the accepted count hits the cap and the pass stops.
    fn limit_reached(&mut self, _max_count: usize) {}

    fn finish(&mut self, _summary: &ExtractionSummary) {}
}

/// Logs through `tracing` and optionally drives a progress bar on stderr.
pub struct TracingReporter {
    show_progress: bool,
    bar: Option<ProgressBar>,
}

impl TracingReporter {
    pub fn new(show_progress: bool) -> Self {
        TracingReporter {
            show_progress,
            bar: None,
        }
    }
}

impl Reporter for TracingReporter {
    fn begin(&mut self, total_records: usize) {
        info!("Extracting tweet texts...");
        if self.show_progress {
            let pb = ProgressBar::new(total_records as u64);
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
            );
            self.bar = Some(pb);
        }
    }

    fn record(&mut self, index: usize, outcome: Outcome) {
        if let Outcome::Skipped(reason) = outcome {
            debug!(index, %reason, "Skipped tweet at index {}", index);
        }
        if let Some(pb) = &self.bar {
            pb.inc(1);
        }
    }

    fn limit_reached(&mut self, max_count: usize) {
        info!("Reached maximum tweet limit of {}", max_count);
    }

    fn finish(&mut self, summary: &ExtractionSummary) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
        info!("Extracted {} valid tweets", summary.accepted);
        info!("Skipped {} invalid or empty tweets", summary.malformed);
        info!("Skipped {} tweets containing links", summary.links);
        info!("Skipped {} retweets", summary.retweets);
    }
}
