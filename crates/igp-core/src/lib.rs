//! IGP Core Library
//!
//! Core engine for publishing media to the Instagram Graph API through the
//! two-phase container protocol (create container → wait for processing →
//! publish).
//!
//! # Overview
//!
//! - **Graph Client**: thin wrappers over the three remote operations
//!   (`api::GraphClient`)
//! - **Batch Parser**: CSV rows → validated upload jobs (`batch`)
//! - **Uploader**: per-job state machine and sequential batch driver
//!   (`uploader::Uploader`)
//! - **Progress Sink**: contract the front end implements to receive
//!   log/progress events (`sink::ProgressSink`)
//! - **Runner**: spawns upload work off the caller's task (`runner`)
//!
//! # Example
//!
//! ```no_run
//! use igp_core::{Config, GraphClient, Uploader};
//! use igp_core::sink::NullSink;
//! use igp_core::types::{MediaType, UploadJob};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> igp_core::Result<()> {
//!     let config = Arc::new(Config::from_env()?);
//!     config.validate()?;
//!     let client = GraphClient::new(Arc::clone(&config))?;
//!     let uploader = Uploader::new(config, client, Arc::new(NullSink));
//!     let job = UploadJob::new(MediaType::Image, "https://example.com/a.jpg", "")?;
//!     let media_id = uploader.upload_one(&job).await?;
//!     println!("published: {media_id}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;
pub mod sink;
pub mod types;
pub mod uploader;

// Re-export commonly used types
pub use api::GraphClient;
pub use config::Config;
pub use error::{IgpError, Result};
pub use types::{BatchReport, MediaId, MediaType, UploadJob};
pub use uploader::Uploader;
