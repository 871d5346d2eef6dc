//! IGP CLI Library
//!
//! Command-line front end for the Instagram Graph publisher:
//!
//! - **Single upload**: publish one image or video by URL (`igp upload`)
//! - **Batch upload**: publish every row of a CSV file (`igp batch`)
//! - **Configuration**: inspect effective settings (`igp config show`)
//!
//! The CLI implements the core's [`igp_core::sink::ProgressSink`] contract
//! with an indicatif-based console renderer.

pub mod commands;
pub mod progress;
pub mod sink;

// Re-export commonly used types
pub use igp_core::{IgpError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// IGP - Instagram Graph Publisher
#[derive(Parser, Debug)]
#[command(name = "igp")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Key=value settings file (credentials, tuning); environment wins
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish a single image or video
    Upload {
        /// Media type: "image" or "video"
        #[arg(short = 't', long = "type")]
        media_type: String,

        /// Public URL of the media file
        #[arg(short, long)]
        url: String,

        /// Caption text (omitted from the request when empty)
        #[arg(short, long, default_value = "")]
        caption: String,
    },

    /// Publish every row of a CSV file (columns: type,url,caption)
    Batch {
        /// Path to the CSV file
        csv: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (token redacted)
    Show,
}
