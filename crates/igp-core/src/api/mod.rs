//! Graph API client module
//!
//! HTTP client for the three Instagram Graph operations the publish protocol
//! needs: create container, fetch processing status, publish container.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GraphClient;
pub use types::*;
