//! `igp config` command implementation
//!
//! Shows the effective configuration without requiring valid credentials,
//! so operators can debug a broken setup.

use crate::commands::load_config;
use colored::Colorize;
use igp_core::Result;
use std::path::Path;

/// Show the effective configuration with the access token redacted
pub async fn show(settings: Option<&Path>) -> Result<()> {
    let config = load_config(settings)?;

    println!("{}", "Effective configuration:".bold());
    println!("  access_token          = {}", redact(&config.access_token));
    println!("  account_id            = {}", display_or_unset(&config.account_id));
    println!("  api_version           = {}", config.api_version);
    println!("  graph_base_url        = {}", config.graph_base_url);
    println!("  poll_interval         = {}s", config.poll_interval.as_secs());
    println!(
        "  processing_timeout    = {}s",
        config.processing_timeout.as_secs()
    );
    println!("  http_timeout          = {}s", config.http_timeout.as_secs());
    println!(
        "  unknown_status_policy = {:?}",
        config.unknown_status_policy
    );

    if config.validate().is_err() {
        println!(
            "\n{} credentials are incomplete; uploads will be rejected pre-flight",
            "warning:".yellow().bold()
        );
    }

    Ok(())
}

/// Keep only the last four characters of a secret.
fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return "(unset)".to_string();
    }
    let visible: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{visible}")
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(unset)"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_keeps_last_four() {
        assert_eq!(redact("EAABsbCS1234"), "****1234");
        assert_eq!(redact(""), "(unset)");
        assert_eq!(redact("ab"), "****ab");
    }
}
