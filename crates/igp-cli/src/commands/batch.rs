//! `igp batch` command implementation
//!
//! Publishes every valid row of a CSV file, sequentially, with per-row
//! failure isolation.

use crate::commands::load_config;
use crate::sink::ConsoleSink;
use igp_core::batch::parse_jobs;
use igp_core::runner::spawn_batch;
use igp_core::types::BatchReport;
use igp_core::{GraphClient, Result, Uploader};
use std::path::Path;
use std::sync::Arc;

/// Run the batch and return the aggregate report.
///
/// The caller decides the exit code: a batch that ran to completion with
/// failed rows is not a command error, but scripts still want a non-zero
/// exit.
pub async fn run(csv: &Path, settings: Option<&Path>) -> Result<BatchReport> {
    // Parse before touching the network so input errors surface immediately.
    let jobs = parse_jobs(csv)?;

    let config = load_config(settings)?;
    config.validate()?;

    let client = GraphClient::new(Arc::clone(&config))?;
    let sink = Arc::new(ConsoleSink::batch(jobs.len()));
    let uploader = Arc::new(Uploader::new(config, client, Arc::clone(&sink) as _));

    let cancel = uploader.cancellation_token();
    let ctrlc = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let task = spawn_batch(uploader, jobs);
    let result = task.join().await;
    ctrlc.abort();

    sink.finish();
    result
}
