//! Shared domain types
//!
//! Job descriptions, container handles and batch accounting used across the
//! client, parser and uploader.

use crate::error::{IgpError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media being published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Parse a user- or CSV-supplied type string, case-insensitively.
    ///
    /// Returns `None` for anything that is not `image`/`video`; batch rows
    /// with such a type are dropped rather than failing the batch.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Some(MediaType::Image),
            "video" => Some(MediaType::Video),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = IgpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
            .ok_or_else(|| IgpError::validation(format!("media type must be 'image' or 'video', got '{s}'")))
    }
}

/// One unit of upload work: a media type, a public source URL and a caption.
///
/// Immutable once constructed; consumed exactly once by the uploader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadJob {
    pub media_type: MediaType,
    pub source_url: String,
    pub caption: String,
}

impl UploadJob {
    /// Build a job, validating the source URL up front.
    ///
    /// The caption may be empty; an empty caption is omitted from the create
    /// request entirely.
    pub fn new(
        media_type: MediaType,
        source_url: impl Into<String>,
        caption: impl Into<String>,
    ) -> Result<Self> {
        let source_url = source_url.into();
        if !(source_url.starts_with("http://") || source_url.starts_with("https://")) {
            return Err(IgpError::validation(format!(
                "media URL must start with http:// or https://, got '{source_url}'"
            )));
        }
        Ok(Self {
            media_type,
            source_url,
            caption: caption.into(),
        })
    }
}

/// Opaque creation id of a pending media container.
///
/// Scoped to one job: used to poll processing status and to publish, never
/// shared across jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHandle(pub String);

impl fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Permanent id of a published media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaId(pub String);

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side transcoding state of a video container.
///
/// Mapped from the Graph `status_code` field. Codes this crate does not know
/// map to `Unknown` instead of failing, so the poll loop stays
/// forward-compatible with new platform codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingStatus {
    InProgress,
    Finished,
    Error,
    Unknown(String),
}

impl ProcessingStatus {
    /// Map a raw Graph `status_code` string.
    pub fn from_code(code: &str) -> Self {
        match code {
            "IN_PROGRESS" => ProcessingStatus::InProgress,
            "FINISHED" => ProcessingStatus::Finished,
            "ERROR" => ProcessingStatus::Error,
            other => ProcessingStatus::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingStatus::InProgress => write!(f, "IN_PROGRESS"),
            ProcessingStatus::Finished => write!(f, "FINISHED"),
            ProcessingStatus::Error => write!(f, "ERROR"),
            ProcessingStatus::Unknown(code) => write!(f, "{code}"),
        }
    }
}

/// Aggregate outcome of a batch run.
///
/// `succeeded + failed == total` holds once the batch driver finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Number of jobs that have reached a terminal state so far.
    pub fn completed(&self) -> usize {
        self.succeeded + self.failed
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} failed (total {})",
            self.succeeded, self.failed, self.total
        )
    }
}
