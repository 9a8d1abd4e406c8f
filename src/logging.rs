//! Logging configuration for nl-ask.
//!
//! Provides platform-aware logging initialization that writes to files in TUI
//! mode (to avoid corrupting the terminal display) and stderr in one-shot mode.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, defaulting to `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes logging for TUI mode.
///
/// Logs are appended to a file to avoid corrupting the terminal display.
/// Location: `~/.local/state/nl-ask/ask.log` on Linux (XDG state directory),
/// or the platform-appropriate state/config directory on other systems.
pub fn init_file_logging() {
    let log_file = match open_log_file(&get_log_path()) {
        Ok(f) => f,
        Err(e) => {
            // Run without logging rather than corrupting the TUI
            eprintln!("Warning: Could not open log file: {e}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false) // No ANSI colors in file output
        .init();
}

/// Initializes logging for one-shot mode.
///
/// Logs are written to stderr so stdout stays clean for the rendered answer.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the log file for appending, creating it and its parent directory
/// as needed. Earlier sessions' entries are kept.
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().append(true).create(true).open(path)
}

/// Returns the path for the log file.
///
/// Uses XDG state directory on Linux (`~/.local/state/nl-ask/ask.log`),
/// or falls back to config directory on other platforms.
pub fn get_log_path() -> PathBuf {
    // Try state directory first (XDG_STATE_HOME on Linux)
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("nl-ask").join("ask.log");
    }

    // Fall back to config directory
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("nl-ask").join("ask.log");
    }

    // Last resort: temp directory
    std::env::temp_dir().join("ask.log")
}
