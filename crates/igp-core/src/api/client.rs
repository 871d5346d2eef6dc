//! HTTP client for the Instagram Graph API
//!
//! Stateless wrappers over the three remote operations of the publish
//! protocol. No retries: a failed call surfaces immediately to the uploader.

use crate::api::{endpoints, types::*};
use crate::config::Config;
use crate::error::{IgpError, Result};
use crate::types::{ContainerHandle, MediaId, MediaType, UploadJob};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;

// ============================================================================
// Client Constants
// ============================================================================

/// How much of a non-JSON error body to include in protocol errors.
const BODY_SNIPPET_LEN: usize = 200;

/// Graph API client
pub struct GraphClient {
    client: Client,
    config: Arc<Config>,
}

impl GraphClient {
    /// Create a new client from an immutable config.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self { client, config })
    }

    /// Create a pending media container for a job.
    ///
    /// Images send `image_url`; videos send `media_type=VIDEO` plus
    /// `video_url`. An empty caption is omitted from the form entirely, never
    /// sent as an empty string.
    pub async fn create_container(&self, job: &UploadJob) -> Result<ContainerHandle> {
        let url = endpoints::media_url(&self.config.versioned_base_url(), &self.config.account_id);

        let mut form: Vec<(&str, &str)> = vec![("access_token", &self.config.access_token)];
        if !job.caption.is_empty() {
            form.push(("caption", &job.caption));
        }
        match job.media_type {
            MediaType::Image => {
                form.push(("image_url", &job.source_url));
            }
            MediaType::Video => {
                form.push(("media_type", "VIDEO"));
                form.push(("video_url", &job.source_url));
            }
        }

        let response = self.client.post(&url).form(&form).send().await?;
        let body: IdResponse = decode(response).await?;

        Ok(ContainerHandle(body.id))
    }

    /// Fetch the processing status of a pending container.
    ///
    /// Unrecognized status codes map to `ProcessingStatus::Unknown` rather
    /// than failing, so the caller's poll loop decides the policy.
    pub async fn status(&self, handle: &ContainerHandle) -> Result<ContainerStatus> {
        let url = endpoints::status_url(&self.config.versioned_base_url(), &handle.0);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("fields", "status_code,status"),
                ("access_token", self.config.access_token.as_str()),
            ])
            .send()
            .await?;
        let body: StatusResponse = decode(response).await?;

        Ok(ContainerStatus::from(body))
    }

    /// Publish a container, making it live.
    ///
    /// Returns the platform's permanent media id.
    pub async fn publish(&self, handle: &ContainerHandle) -> Result<MediaId> {
        let url = endpoints::media_publish_url(
            &self.config.versioned_base_url(),
            &self.config.account_id,
        );

        let form = [
            ("creation_id", handle.0.as_str()),
            ("access_token", self.config.access_token.as_str()),
        ];

        let response = self.client.post(&url).form(&form).send().await?;
        let body: IdResponse = decode(response).await?;

        Ok(MediaId(body.id))
    }

    /// The config this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Decode a Graph response: non-2xx bodies are decoded through the error
/// envelope into `Api { code, message }`. A rejection whose JSON body lacks
/// the envelope still becomes an `Api` error, with the HTTP status as the
/// code and the body as the message; only genuinely non-JSON bodies become
/// `Protocol`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let http_status = response.status();
    let text = response.text().await?;

    if !http_status.is_success() {
        return match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) => Err(IgpError::Api {
                code: envelope.error.code,
                message: envelope.error.message,
            }),
            Err(_) if serde_json::from_str::<serde_json::Value>(&text).is_ok() => {
                Err(IgpError::Api {
                    code: i64::from(http_status.as_u16()),
                    message: snippet(&text).to_string(),
                })
            }
            Err(_) => Err(IgpError::protocol(format!(
                "HTTP {} with non-JSON body: {}",
                http_status.as_u16(),
                snippet(&text)
            ))),
        };
    }

    serde_json::from_str(&text).map_err(|e| {
        IgpError::protocol(format!(
            "could not decode response ({e}): {}",
            snippet(&text)
        ))
    })
}

fn snippet(text: &str) -> &str {
    let end = text
        .char_indices()
        .take_while(|(i, _)| *i < BODY_SNIPPET_LEN)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    &text[..end]
}
