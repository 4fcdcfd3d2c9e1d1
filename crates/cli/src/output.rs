//! Terminal output formatting for CLI commands.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", style("ℹ").blue().bold(), message);
}

/// Prints a header for a section.
pub fn section_header(title: &str) {
    println!("\n{}", style(format!("── {} ──", title)).bold());
}

/// Prints a build summary.
pub fn summary(files: usize, modules: usize, duration_ms: u64) {
    println!();
    println!(
        "{}: {} file(s) from {} module(s) in {}ms",
        style("SUCCESS").green().bold(),
        files,
        modules,
        duration_ms
    );
}

/// Creates a spinner for long-running operations.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("Invalid spinner template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
