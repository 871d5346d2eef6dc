//! Graph API wire types
//!
//! Matches the Graph API response structure for the endpoints this crate
//! calls.

use crate::types::ProcessingStatus;
use serde::{Deserialize, Serialize};

/// Response of both `/media` (create) and `/media_publish`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: String,
}

/// Response of the status query (`?fields=status_code,status`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status_code: Option<String>,
    pub status: Option<String>,
}

/// Current state of a pending container, as reported by the platform
#[derive(Debug, Clone)]
pub struct ContainerStatus {
    /// Mapped processing state
    pub status: ProcessingStatus,
    /// Raw human-readable status string, kept for log output
    pub detail: Option<String>,
}

impl From<StatusResponse> for ContainerStatus {
    fn from(resp: StatusResponse) -> Self {
        let status = match resp.status_code.as_deref() {
            Some(code) => ProcessingStatus::from_code(code),
            // A missing status_code means the platform has not started
            // reporting yet; keep waiting.
            None => ProcessingStatus::InProgress,
        };
        Self {
            status,
            detail: resp.status,
        }
    }
}

/// Graph error envelope: `{"error": {"message": ..., "code": ...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: GraphError,
}

/// The error object inside the envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}
