//! CLI output formatting
//!
//! Provides colored output, spinners, and formatting utilities.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::status::VendoredRepo;

/// Output helper for consistent CLI formatting
pub struct Output;

impl Output {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a list item
    pub fn list_item(item: &str) {
        println!("{} {}", "*".blue().bold(), item);
    }

    /// Create a spinner with a message
    pub fn spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded template must be valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    /// Format a vendored repo line.
    ///
    /// Same text as its `Display` impl, with color when the terminal allows it.
    pub fn vendored(repo: &VendoredRepo) -> String {
        let at = "@".blue().bold();
        if repo.is_aliased() {
            format!(
                "{} {} {} {} {}",
                repo.url.cyan(),
                at,
                repo.revision.magenta(),
                "→".dimmed(),
                repo.path
            )
        } else {
            format!("{} {} {}", repo.path.cyan(), at, repo.revision.magenta())
        }
    }
}
