//! Progress and log event sink
//!
//! The uploader reports everything through this trait; the front end (CLI
//! today, anything else tomorrow) renders it. Implementations are called from
//! the worker task, never from the caller's context, and must be `Send +
//! Sync`.

use crate::types::{BatchReport, MediaId};

/// State of the current-item indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentProgress {
    /// Work is underway with no known completion fraction
    Indeterminate,
    /// The current item reached a terminal state
    Done,
}

/// Receiver of structured upload events
pub trait ProgressSink: Send + Sync {
    /// A human-readable log line
    fn log(&self, line: &str);

    /// Current-item indicator update with a short label
    fn current(&self, label: &str, progress: CurrentProgress);

    /// Overall batch progress after a job reaches a terminal state.
    ///
    /// `completed` is strictly increasing per batch and ends at `total`.
    fn overall(&self, completed: usize, total: usize);

    /// The batch finished; `report.completed() == report.total`
    fn batch_complete(&self, report: &BatchReport);

    /// A single-item upload finished successfully
    fn single_complete(&self, media_id: &MediaId);
}

/// Sink that discards every event
pub struct NullSink;

impl ProgressSink for NullSink {
    fn log(&self, _line: &str) {}
    fn current(&self, _label: &str, _progress: CurrentProgress) {}
    fn overall(&self, _completed: usize, _total: usize) {}
    fn batch_complete(&self, _report: &BatchReport) {}
    fn single_complete(&self, _media_id: &MediaId) {}
}
