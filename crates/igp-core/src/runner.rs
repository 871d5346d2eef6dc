//! Execution host
//!
//! Schedules upload work on a background task so the triggering context
//! (CLI event loop, GUI thread, test harness) never blocks, and marshals the
//! terminal result back through the returned handle.

use crate::error::{IgpError, Result};
use crate::types::{BatchReport, MediaId, UploadJob};
use crate::uploader::Uploader;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a spawned upload, awaitable for its terminal result
pub struct UploadTask<T> {
    handle: JoinHandle<Result<T>>,
    cancel: CancellationToken,
}

impl<T> UploadTask<T> {
    /// Request cancellation; the worker notices at its next checkpoint
    /// (before a network call or during a poll sleep).
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the worker to reach a terminal state.
    pub async fn join(self) -> Result<T> {
        match self.handle.await {
            Ok(result) => result,
            // A panicked worker is reported, not propagated as a panic.
            Err(join_err) => Err(IgpError::Internal(join_err.to_string())),
        }
    }
}

/// Spawn a single-item upload on a background task.
pub fn spawn_single(uploader: Arc<Uploader>, job: UploadJob) -> UploadTask<MediaId> {
    let cancel = uploader.cancellation_token();
    let handle = tokio::spawn(async move { uploader.upload_one(&job).await });
    UploadTask { handle, cancel }
}

/// Spawn a batch upload on a background task.
pub fn spawn_batch(uploader: Arc<Uploader>, jobs: Vec<UploadJob>) -> UploadTask<BatchReport> {
    let cancel = uploader.cancellation_token();
    let handle = tokio::spawn(async move { uploader.upload_batch(&jobs).await });
    UploadTask { handle, cancel }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::api::GraphClient;
    use crate::config::Config;
    use crate::sink::NullSink;
    use crate::types::MediaType;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_spawned_single_upload_completes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v21.0/178414/media"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "c1"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v21.0/178414/media_publish"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "m1"})),
            )
            .mount(&server)
            .await;

        let mut config = Config::new("test-token", "178414");
        config.graph_base_url = server.uri();
        let config = Arc::new(config);
        let client = GraphClient::new(Arc::clone(&config)).unwrap();
        let uploader = Arc::new(Uploader::new(config, client, Arc::new(NullSink)));

        let job = UploadJob::new(MediaType::Image, "http://x/a.jpg", "").unwrap();
        let task = spawn_single(uploader, job);
        let media_id = task.join().await.unwrap();
        assert_eq!(media_id.0, "m1");
    }

    #[tokio::test]
    async fn test_cancel_during_poll_surfaces_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v21.0/178414/media"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "c1"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v21.0/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status_code": "IN_PROGRESS",
                "status": "Transcoding"
            })))
            .mount(&server)
            .await;

        let mut config = Config::new("test-token", "178414");
        config.graph_base_url = server.uri();
        // Long interval so cancellation, not timeout, ends the wait.
        config.poll_interval = Duration::from_secs(30);
        config.processing_timeout = Duration::from_secs(600);
        let config = Arc::new(config);
        let client = GraphClient::new(Arc::clone(&config)).unwrap();
        let uploader = Arc::new(Uploader::new(config, client, Arc::new(NullSink)));

        let job = UploadJob::new(MediaType::Video, "http://x/v.mp4", "").unwrap();
        let task = spawn_single(uploader, job);

        // Give the worker a moment to enter the poll sleep, then cancel.
        tokio::time::sleep(Duration::from_millis(100)).await;
        task.cancel();

        let err = task.join().await.unwrap_err();
        assert!(matches!(err, IgpError::Cancelled));
    }
}
