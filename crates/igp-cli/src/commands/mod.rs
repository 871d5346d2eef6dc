//! CLI command implementations

pub mod batch;
pub mod config;
pub mod upload;

use igp_core::{Config, Result};
use std::path::Path;
use std::sync::Arc;

/// Load the effective configuration: settings file when given, otherwise
/// environment (with `.env` support). Validation is left to the caller so
/// `config show` can display an incomplete config.
pub fn load_config(settings: Option<&Path>) -> Result<Arc<Config>> {
    let config = match settings {
        Some(path) => Config::from_settings_file(path)?,
        None => Config::from_env()?,
    };
    Ok(Arc::new(config))
}
