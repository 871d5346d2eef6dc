//! `igp upload` command implementation
//!
//! Publishes a single image or video by URL.

use crate::commands::load_config;
use crate::sink::ConsoleSink;
use igp_core::runner::spawn_single;
use igp_core::types::{MediaType, UploadJob};
use igp_core::{GraphClient, Result, Uploader};
use std::path::Path;
use std::sync::Arc;

/// Upload one media item and print its published id
pub async fn run(
    media_type: &str,
    url: &str,
    caption: &str,
    settings: Option<&Path>,
) -> Result<()> {
    let media_type: MediaType = media_type.parse()?;
    let job = UploadJob::new(media_type, url, caption)?;

    let config = load_config(settings)?;
    config.validate()?;

    let client = GraphClient::new(Arc::clone(&config))?;
    let sink = Arc::new(ConsoleSink::single());
    let uploader = Arc::new(Uploader::new(config, client, Arc::clone(&sink) as _));

    // Ctrl-c cancels the worker at its next checkpoint instead of killing
    // the process mid-request.
    let cancel = uploader.cancellation_token();
    let ctrlc = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let task = spawn_single(uploader, job);
    let result = task.join().await;
    ctrlc.abort();

    sink.finish();
    result.map(|_| ())
}
