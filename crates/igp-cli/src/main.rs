//! IGP CLI - Main entry point

use clap::Parser;
use igp_cli::{Cli, Commands, ConfigCommand};
use igp_core::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        // Verbose mode: debug-level diagnostics on stderr
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("igp".to_string())
            .build()
    } else {
        // Normal mode: warnings and errors only; progress comes from the sink
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("igp".to_string())
            .build()
    };

    // Explicit LOG_* environment variables take precedence over the
    // flag-derived defaults
    let log_config = if std::env::var_os("LOG_LEVEL").is_some()
        || std::env::var_os("LOG_OUTPUT").is_some()
    {
        LogConfig::from_env().unwrap_or(log_config)
    } else {
        log_config
    };

    // The CLI should still work when logging cannot initialize
    let _ = init_logging(&log_config);

    // Execute command
    let exit_code = execute_command(&cli).await;
    process::exit(exit_code);
}

/// Execute the CLI command, mapping outcomes to process exit codes
async fn execute_command(cli: &Cli) -> i32 {
    let settings = cli.settings.as_deref();

    match &cli.command {
        Commands::Upload {
            media_type,
            url,
            caption,
        } => match igp_cli::commands::upload::run(media_type, url, caption, settings).await {
            Ok(()) => 0,
            Err(e) => {
                error!(error = %e, "Upload failed");
                eprintln!("Error: {}", e);
                1
            }
        },

        Commands::Batch { csv } => match igp_cli::commands::batch::run(csv, settings).await {
            // A completed batch with failed rows exits non-zero so scripts
            // can detect partial failure.
            Ok(report) if report.failed == 0 => 0,
            Ok(_) => 1,
            Err(e) => {
                error!(error = %e, "Batch failed");
                eprintln!("Error: {}", e);
                1
            }
        },

        Commands::Config { command } => match command {
            ConfigCommand::Show => match igp_cli::commands::config::show(settings).await {
                Ok(()) => 0,
                Err(e) => {
                    error!(error = %e, "Config command failed");
                    eprintln!("Error: {}", e);
                    1
                }
            },
        },
    }
}
