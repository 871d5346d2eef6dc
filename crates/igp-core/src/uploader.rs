//! Upload orchestration
//!
//! Drives one job through the container protocol (create → wait for
//! processing → publish) and sequences batches of jobs with per-item failure
//! isolation. Batch items run strictly in input order, one at a time; a
//! failing item is recorded and the batch moves on.

use crate::api::GraphClient;
use crate::config::{Config, UnknownStatusPolicy};
use crate::error::{IgpError, Result};
use crate::sink::{CurrentProgress, ProgressSink};
use crate::types::{BatchReport, ContainerHandle, MediaId, MediaType, ProcessingStatus, UploadJob};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Orchestrates uploads against one account
pub struct Uploader {
    config: Arc<Config>,
    client: GraphClient,
    sink: Arc<dyn ProgressSink>,
    cancel: CancellationToken,
}

impl Uploader {
    /// Create an uploader with a fresh cancellation token.
    pub fn new(config: Arc<Config>, client: GraphClient, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            config,
            client,
            sink,
            cancel: CancellationToken::new(),
        }
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that cancels this uploader's in-flight work.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Upload a single job and return its published media id.
    ///
    /// Errors are surfaced directly to the caller as the final outcome.
    pub async fn upload_one(&self, job: &UploadJob) -> Result<MediaId> {
        self.config.validate()?;

        self.sink.log(&format!(
            "[single] starting: type={} url={}",
            job.media_type, job.source_url
        ));
        self.sink.current("uploading", CurrentProgress::Indeterminate);

        let result = self.run_job(job).await;

        self.sink.current("idle", CurrentProgress::Done);
        match &result {
            Ok(media_id) => {
                self.sink
                    .log(&format!("✓ upload complete, media_id={media_id}"));
                self.sink.single_complete(media_id);
            }
            Err(e) => {
                self.sink.log(&format!("✗ upload failed: {e}"));
            }
        }
        result
    }

    /// Upload a batch of jobs strictly in order, fail-soft per item.
    ///
    /// Returns the aggregate report; `succeeded + failed == jobs.len()` when
    /// this returns `Ok`. The only `Err` outcomes are pre-flight
    /// configuration failure and cancellation.
    pub async fn upload_batch(&self, jobs: &[UploadJob]) -> Result<BatchReport> {
        self.config.validate()?;

        let total = jobs.len();
        let mut report = BatchReport::new(total);

        self.sink
            .log(&format!("[batch] {total} job(s) queued, starting"));

        for (index, job) in jobs.iter().enumerate() {
            let position = index + 1;

            // Cancellation between items stops the batch as a whole.
            if self.cancel.is_cancelled() {
                return Err(IgpError::Cancelled);
            }

            self.sink.log(&format!(
                "[{position}/{total}] type={} url={}",
                job.media_type, job.source_url
            ));
            self.sink.current(
                &format!("uploading {position}/{total}"),
                CurrentProgress::Indeterminate,
            );

            match self.run_job(job).await {
                Ok(media_id) => {
                    report.succeeded += 1;
                    info!(%media_id, position, total, "batch item published");
                    self.sink
                        .log(&format!("  → ✓ published, media_id={media_id}"));
                }
                Err(IgpError::Cancelled) => return Err(IgpError::Cancelled),
                Err(e) => {
                    report.failed += 1;
                    warn!(error = %e, position, total, "batch item failed");
                    self.sink.log(&format!("  → ✗ failed: {e}"));
                }
            }

            self.sink.current("idle", CurrentProgress::Done);
            self.sink.overall(report.completed(), total);
        }

        self.sink.log(&format!("[batch] finished: {report}"));
        self.sink.batch_complete(&report);
        Ok(report)
    }

    /// Run one job through the full state machine.
    async fn run_job(&self, job: &UploadJob) -> Result<MediaId> {
        if self.cancel.is_cancelled() {
            return Err(IgpError::Cancelled);
        }

        self.sink.log("   → creating container");
        debug!(media_type = %job.media_type, url = %job.source_url, "creating container");
        let handle = self.client.create_container(job).await?;

        if job.media_type == MediaType::Video {
            self.sink.log("   → video processing");
            self.wait_for_processing(&handle).await?;
        }

        if self.cancel.is_cancelled() {
            return Err(IgpError::Cancelled);
        }

        self.sink.log("   → publishing");
        let media_id = self.client.publish(&handle).await?;
        debug!(%media_id, "container published");
        Ok(media_id)
    }

    /// Poll the container status until it is finished, failed or timed out.
    ///
    /// Wait time accumulates in poll-interval increments after each sleep and
    /// is checked against the timeout immediately, so the budget is never
    /// exceeded by more than one interval.
    async fn wait_for_processing(&self, handle: &ContainerHandle) -> Result<()> {
        let interval = self.config.poll_interval;
        let limit = self.config.processing_timeout;
        let mut waited = Duration::ZERO;

        loop {
            if self.cancel.is_cancelled() {
                return Err(IgpError::Cancelled);
            }

            let status = self.client.status(handle).await?;
            let detail = status.detail.as_deref().unwrap_or("-");
            self.sink.log(&format!(
                "      - status_code={} status={} elapsed={}s",
                status.status,
                detail,
                waited.as_secs()
            ));

            match status.status {
                ProcessingStatus::Finished => return Ok(()),
                ProcessingStatus::Error => {
                    return Err(IgpError::Processing(detail.to_string()));
                }
                ProcessingStatus::InProgress => {}
                ProcessingStatus::Unknown(code) => match self.config.unknown_status_policy {
                    UnknownStatusPolicy::KeepPolling => {
                        warn!(status_code = %code, "unrecognized status code, still waiting");
                    }
                    UnknownStatusPolicy::Fail => {
                        return Err(IgpError::Processing(format!(
                            "unrecognized status code '{code}'"
                        )));
                    }
                },
            }

            tokio::select! {
                _ = self.cancel.cancelled() => return Err(IgpError::Cancelled),
                _ = tokio::time::sleep(interval) => {}
            }

            waited += interval;
            if waited >= limit {
                return Err(IgpError::Timeout {
                    waited_secs: waited.as_secs(),
                    limit_secs: limit.as_secs(),
                });
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::sink::testing::RecordingSink;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_uploader(base_url: &str, sink: Arc<RecordingSink>) -> Uploader {
        let mut config = Config::new("test-token", "178414");
        config.graph_base_url = base_url.to_string();
        config.poll_interval = Duration::from_millis(10);
        config.processing_timeout = Duration::from_millis(50);
        let config = Arc::new(config);
        let client = GraphClient::new(Arc::clone(&config)).unwrap();
        Uploader::new(config, client, sink)
    }

    #[tokio::test]
    async fn test_image_never_polls_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v21.0/178414/media"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "c1"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v21.0/178414/media_publish"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "m1"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        // No GET mock: a status poll would 404 and fail the test below.

        let sink = Arc::new(RecordingSink::default());
        let uploader = test_uploader(&server.uri(), Arc::clone(&sink));
        let job = UploadJob::new(MediaType::Image, "http://x/a.jpg", "").unwrap();
        let media_id = uploader.upload_one(&job).await.unwrap();
        assert_eq!(media_id.0, "m1");

        let requests = server.received_requests().await.unwrap();
        assert!(requests.iter().all(|r| r.method.as_str() == "POST"));
        assert!(sink
            .logs()
            .iter()
            .any(|line| line.contains("media_id=m1")));
    }

    #[tokio::test]
    async fn test_preflight_failure_before_any_request() {
        let server = MockServer::start().await;

        let mut config = Config::new("", "");
        config.graph_base_url = server.uri();
        let config = Arc::new(config);
        let client = GraphClient::new(Arc::clone(&config)).unwrap();
        let uploader = Uploader::new(config, client, Arc::new(RecordingSink::default()));

        let job = UploadJob::new(MediaType::Image, "http://x/a.jpg", "").unwrap();
        let err = uploader.upload_one(&job).await.unwrap_err();
        assert!(matches!(err, IgpError::Config(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pre_cancelled_uploader_does_nothing() {
        let server = MockServer::start().await;
        let sink = Arc::new(RecordingSink::default());
        let uploader = test_uploader(&server.uri(), Arc::clone(&sink));
        uploader.cancellation_token().cancel();

        let job = UploadJob::new(MediaType::Image, "http://x/a.jpg", "").unwrap();
        let err = uploader.upload_one(&job).await.unwrap_err();
        assert!(matches!(err, IgpError::Cancelled));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_video_times_out_on_endless_in_progress() {
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

        let sink = Arc::new(RecordingSink::default());
        let uploader = test_uploader(&server.uri(), Arc::clone(&sink));
        let job = UploadJob::new(MediaType::Video, "http://x/v.mp4", "").unwrap();
        let err = uploader.upload_one(&job).await.unwrap_err();
        assert!(matches!(err, IgpError::Timeout { .. }));

        // The poll loop logged its observations, and no overall-progress
        // events fire in single mode.
        assert!(sink
            .logs()
            .iter()
            .any(|line| line.contains("status_code=IN_PROGRESS")));
        assert!(sink.overall_updates().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_status_strict_policy_fails_fast() {
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
                "status_code": "SOMETHING_NEW",
                "status": "?"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = Config::new("test-token", "178414");
        config.graph_base_url = server.uri();
        config.poll_interval = Duration::from_millis(10);
        config.processing_timeout = Duration::from_millis(500);
        config.unknown_status_policy = UnknownStatusPolicy::Fail;
        let config = Arc::new(config);
        let client = GraphClient::new(Arc::clone(&config)).unwrap();
        let uploader = Uploader::new(config, client, Arc::new(RecordingSink::default()));

        let job = UploadJob::new(MediaType::Video, "http://x/v.mp4", "").unwrap();
        let err = uploader.upload_one(&job).await.unwrap_err();
        match err {
            IgpError::Processing(msg) => assert!(msg.contains("SOMETHING_NEW")),
            other => panic!("expected Processing, got {other:?}"),
        }
    }
}
