//! Console implementation of the core progress-sink contract
//!
//! Renders the uploader's event stream with indicatif: a determinate overall
//! bar for batches, a spinner for the in-flight item, and log lines printed
//! above the bars so they never corrupt each other. Safe to call from the
//! worker task.

use colored::Colorize;
use igp_core::sink::{CurrentProgress, ProgressSink};
use igp_core::types::{BatchReport, MediaId};
use indicatif::{MultiProgress, ProgressBar};

use crate::progress;

/// Sink rendering upload progress on the terminal
pub struct ConsoleSink {
    multi: MultiProgress,
    overall: Option<ProgressBar>,
    current: ProgressBar,
}

impl ConsoleSink {
    /// Sink for a single-item upload: spinner only.
    pub fn single() -> Self {
        let multi = MultiProgress::new();
        let current = multi.add(progress::create_spinner("waiting"));
        Self {
            multi,
            overall: None,
            current,
        }
    }

    /// Sink for a batch of `total` jobs: overall bar plus spinner.
    pub fn batch(total: usize) -> Self {
        let multi = MultiProgress::new();
        let overall = multi.add(progress::create_overall_bar(total as u64));
        let current = multi.add(progress::create_spinner("waiting"));
        Self {
            multi,
            overall: Some(overall),
            current,
        }
    }

    /// Clear the bars once the run is over.
    pub fn finish(&self) {
        self.current.finish_and_clear();
        if let Some(overall) = &self.overall {
            overall.finish();
        }
    }
}

impl ProgressSink for ConsoleSink {
    fn log(&self, line: &str) {
        // println through MultiProgress keeps log lines above the bars.
        let _ = self.multi.println(line);
    }

    fn current(&self, label: &str, progress: CurrentProgress) {
        match progress {
            CurrentProgress::Indeterminate => self.current.set_message(label.to_string()),
            CurrentProgress::Done => self.current.set_message("waiting".to_string()),
        }
    }

    fn overall(&self, completed: usize, _total: usize) {
        if let Some(overall) = &self.overall {
            overall.set_position(completed as u64);
        }
    }

    fn batch_complete(&self, report: &BatchReport) {
        let summary = if report.failed == 0 {
            format!("{} {report}", "✓".green().bold())
        } else {
            format!("{} {report}", "✗".red().bold())
        };
        let _ = self.multi.println(summary);
    }

    fn single_complete(&self, media_id: &MediaId) {
        let _ = self
            .multi
            .println(format!("{} published media_id={media_id}", "✓".green().bold()));
    }
}
