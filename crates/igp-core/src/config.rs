//! Configuration for the upload engine
//!
//! A single immutable `Config` value is constructed at startup (from the
//! environment and/or a key=value settings file) and passed by `Arc` to the
//! Graph client and uploader. Nothing mutates it after load.

use crate::error::{IgpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Graph API host used when not overridden (tests point this at a mock server).
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Graph API version used when not specified.
pub const DEFAULT_API_VERSION: &str = "v21.0";

/// Seconds between processing-status polls.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Seconds to wait for video processing before giving up.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Seconds before an individual HTTP request is abandoned.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Policy for Graph status codes this crate does not recognize.
///
/// The platform can introduce new codes at any time. `KeepPolling` treats
/// them as still-in-progress (bounded by the processing timeout); `Fail`
/// treats the first unknown code as a terminal processing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownStatusPolicy {
    #[default]
    KeepPolling,
    Fail,
}

impl std::str::FromStr for UnknownStatusPolicy {
    type Err = IgpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep_polling" | "keep-polling" | "poll" => Ok(UnknownStatusPolicy::KeepPolling),
            "fail" | "strict" => Ok(UnknownStatusPolicy::Fail),
            _ => Err(IgpError::config(format!(
                "invalid unknown-status policy '{s}' (expected 'keep_polling' or 'fail')"
            ))),
        }
    }
}

/// Upload engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bearer credential for the Graph API
    pub access_token: String,

    /// Instagram business account id
    pub account_id: String,

    /// Graph API version segment (e.g. "v21.0")
    pub api_version: String,

    /// Graph API host, overridable for tests
    pub graph_base_url: String,

    /// Delay between processing-status polls
    pub poll_interval: Duration,

    /// Total wait budget for video processing
    pub processing_timeout: Duration,

    /// Per-request HTTP timeout for Graph API calls
    pub http_timeout: Duration,

    /// How to treat unrecognized processing status codes
    #[serde(default)]
    pub unknown_status_policy: UnknownStatusPolicy,
}

impl Config {
    /// Create a config with the given credentials and default tuning.
    pub fn new(access_token: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            account_id: account_id.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            processing_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            unknown_status_policy: UnknownStatusPolicy::default(),
        }
    }

    /// Load config from environment variables (a `.env` file is honored).
    ///
    /// Variables: `IG_ACCESS_TOKEN`, `IG_USER_ID`, `IG_API_VERSION`,
    /// `IG_GRAPH_BASE_URL`, `IG_POLL_INTERVAL`, `IG_TIMEOUT`,
    /// `IG_HTTP_TIMEOUT_SECS`, `IG_UNKNOWN_STATUS_POLICY`.
    pub fn from_env() -> Result<Self> {
        // Optional; missing .env is not an error.
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            std::env::var("IG_ACCESS_TOKEN").unwrap_or_default(),
            std::env::var("IG_USER_ID").unwrap_or_default(),
        );
        config.apply_env()?;
        Ok(config)
    }

    /// Load config from a key=value settings file, then apply environment
    /// overrides on top (environment wins).
    ///
    /// Recognized keys: `access_token`, `ig_user_id`, `api_version`,
    /// `poll_interval`, `timeout`, `http_timeout`, `unknown_status_policy`.
    /// Unknown keys are ignored so the file can carry settings for other
    /// tools.
    pub fn from_settings_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = read_settings(path)?;

        let mut config = Self::new(
            settings.get("access_token").cloned().unwrap_or_default(),
            settings.get("ig_user_id").cloned().unwrap_or_default(),
        );

        if let Some(v) = settings.get("api_version") {
            config.api_version = v.clone();
        }
        if let Some(v) = settings.get("poll_interval") {
            config.poll_interval = Duration::from_secs(parse_secs("poll_interval", v)?);
        }
        if let Some(v) = settings.get("timeout") {
            config.processing_timeout = Duration::from_secs(parse_secs("timeout", v)?);
        }
        if let Some(v) = settings.get("http_timeout") {
            config.http_timeout = Duration::from_secs(parse_secs("http_timeout", v)?);
        }
        if let Some(v) = settings.get("unknown_status_policy") {
            config.unknown_status_policy = v.parse()?;
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Pre-flight validation: must pass before any upload begins.
    ///
    /// Missing credentials are a configuration error, not a runtime API
    /// failure.
    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(IgpError::config("access token is missing"));
        }
        if self.account_id.trim().is_empty() {
            return Err(IgpError::config("Instagram account id is missing"));
        }
        if self.poll_interval > self.processing_timeout {
            return Err(IgpError::config(format!(
                "poll interval ({:?}) exceeds the processing timeout ({:?})",
                self.poll_interval, self.processing_timeout
            )));
        }
        Ok(())
    }

    /// Base URL including the version segment, e.g.
    /// `https://graph.facebook.com/v21.0`.
    pub fn versioned_base_url(&self) -> String {
        format!(
            "{}/{}",
            self.graph_base_url.trim_end_matches('/'),
            self.api_version
        )
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(token) = std::env::var("IG_ACCESS_TOKEN") {
            self.access_token = token;
        }
        if let Ok(account) = std::env::var("IG_USER_ID") {
            self.account_id = account;
        }
        if let Ok(version) = std::env::var("IG_API_VERSION") {
            self.api_version = version;
        }
        if let Ok(base) = std::env::var("IG_GRAPH_BASE_URL") {
            self.graph_base_url = base;
        }
        if let Ok(interval) = std::env::var("IG_POLL_INTERVAL") {
            self.poll_interval = Duration::from_secs(parse_secs("IG_POLL_INTERVAL", &interval)?);
        }
        if let Ok(timeout) = std::env::var("IG_TIMEOUT") {
            self.processing_timeout = Duration::from_secs(parse_secs("IG_TIMEOUT", &timeout)?);
        }
        if let Ok(timeout) = std::env::var("IG_HTTP_TIMEOUT_SECS") {
            self.http_timeout =
                Duration::from_secs(parse_secs("IG_HTTP_TIMEOUT_SECS", &timeout)?);
        }
        if let Ok(policy) = std::env::var("IG_UNKNOWN_STATUS_POLICY") {
            self.unknown_status_policy = policy.parse()?;
        }
        Ok(())
    }
}

/// Parse a `key = value` settings file into a map.
///
/// Lines without `=` and lines starting with `#` are skipped. Keys are
/// lowercased so the file tolerates arbitrary casing.
fn read_settings(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Err(IgpError::config(format!(
            "settings file not found: '{}'",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let mut settings = HashMap::new();
    for line in content.lines() {
        let line = line.trim_start_matches('\u{feff}');
        if line.trim().starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            settings.insert(
                key.trim().to_ascii_lowercase(),
                value.trim().to_string(),
            );
        }
    }
    Ok(settings)
}

fn parse_secs(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| IgpError::config(format!("{name} must be a whole number of seconds, got '{value}'")))
}
