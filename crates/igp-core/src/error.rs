//! Error types for IGP
//!
//! Every variant carries a user-facing message that tells the operator what
//! kind of failure occurred (bad input, platform rejection, timeout) and what
//! to do about it.

use thiserror::Error;

/// Result type alias for IGP operations
pub type Result<T> = std::result::Result<T, IgpError>;

/// Main error type for the upload engine
#[derive(Error, Debug)]
pub enum IgpError {
    /// Credentials or settings are missing/invalid (pre-flight, blocks any upload)
    #[error("Configuration error: {0}. Set IG_ACCESS_TOKEN and IG_USER_ID in the environment or settings file.")]
    Config(String),

    /// Input was rejected before any network call
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Network-level failure talking to the Graph API
    #[error("Network request failed: {0}. Check your internet connection.")]
    Transport(#[from] reqwest::Error),

    /// The Graph API rejected the request
    #[error("Graph API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// The Graph API returned a body that is not the expected JSON
    #[error("Unexpected response from the Graph API: {0}")]
    Protocol(String),

    /// The platform reported that video processing failed
    #[error("Video processing failed on the platform side: {0}")]
    Processing(String),

    /// Video processing did not finish within the configured budget
    #[error("Timed out after {waited_secs}s waiting for video processing (limit {limit_secs}s). Increase IG_TIMEOUT or check the video.")]
    Timeout { waited_secs: u64, limit_secs: u64 },

    /// The upload was cancelled by the caller
    #[error("Upload cancelled")]
    Cancelled,

    /// The background worker ended without producing a result
    #[error("Upload worker terminated abnormally: {0}")]
    Internal(String),

    /// The CSV file does not exist
    #[error("CSV file not found: '{0}'. Verify the path and read permissions.")]
    CsvNotFound(String),

    /// The CSV file is missing required columns
    #[error("CSV is missing required columns: {0}. Headers must include 'type', 'url' and 'caption' (any casing).")]
    CsvSchema(String),

    /// The CSV file contained no usable rows after filtering
    #[error("No valid jobs in CSV: every row was dropped (unknown type or empty URL).")]
    EmptyBatch,

    /// CSV parsing failed at the format level
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization failed
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File system operation failed
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl IgpError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create an API error
    pub fn api(code: i64, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// True when the error is terminal for the whole run rather than one job
    pub fn is_preflight(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_distinguish_kinds() {
        let api = IgpError::api(190, "Invalid OAuth access token");
        assert!(api.to_string().contains("code 190"));

        let timeout = IgpError::Timeout {
            waited_secs: 600,
            limit_secs: 600,
        };
        assert!(timeout.to_string().contains("600s"));

        let config = IgpError::config("missing access token");
        assert!(config.to_string().contains("IG_ACCESS_TOKEN"));
    }

    #[test]
    fn test_preflight_classification() {
        assert!(IgpError::config("x").is_preflight());
        assert!(!IgpError::validation("x").is_preflight());
        assert!(!IgpError::Cancelled.is_preflight());
    }
}
