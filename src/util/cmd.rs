//! Command logging utilities for verbose and dry-run output.

use colored::Colorize;
use std::process::Command;
use tracing::debug;

/// Render a command as a single shell-like line.
///
/// Arguments containing whitespace are single-quoted.
pub fn format_cmd(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    for arg in cmd.get_args() {
        let arg = arg.to_string_lossy();
        if arg.is_empty() || arg.chars().any(char::is_whitespace) {
            parts.push(format!("'{}'", arg));
        } else {
            parts.push(arg.into_owned());
        }
    }
    parts.join(" ")
}

/// Log a command just before execution.
///
/// Emits a `tracing::debug!` event with the command line and working
/// directory. Visible when running with `--verbose` (which sets
/// `subvendor=debug`) or via `RUST_LOG=subvendor::cmd=debug`.
pub fn log_cmd(cmd: &Command) {
    let cwd = cmd
        .get_current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    debug!(
        target: "subvendor::cmd",
        command = %format_cmd(cmd),
        %cwd,
        "exec"
    );
}

/// Print a command that dry-run mode skipped.
pub fn echo_dry_run(cmd: &Command) {
    print_dry_run(&format_cmd(cmd));
}

/// Print an action that dry-run mode skipped.
pub fn print_dry_run(action: &str) {
    println!("{} {}", "[dry-run]".yellow(), action.dimmed());
}
