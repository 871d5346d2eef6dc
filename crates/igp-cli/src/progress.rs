//! Progress bar utilities for the console sink
//!
//! Determinate overall bar for batch runs, spinner for the current item.

use indicatif::{ProgressBar, ProgressStyle};

/// Create the determinate overall-progress bar for a batch of `total` jobs
pub fn create_overall_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb.set_message("Overall progress");
    pb
}

/// Create a spinner for the in-flight item
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
