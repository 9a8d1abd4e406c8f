//! Clipboard support for the TUI.
//!
//! Copies the latest generated SQL to the system clipboard, with fallback
//! support:
//! - Native clipboard via arboard where available
//! - Linux: `xclip` or `xsel` if installed
//! - macOS: `pbcopy`
//! - OSC 52 escape sequence as the universal terminal fallback

use arboard::Clipboard;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Mutex;

/// Global clipboard instance wrapped in a mutex for thread safety.
static CLIPBOARD: Mutex<Option<Clipboard>> = Mutex::new(None);

/// Detected clipboard backend for the current platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    /// Native clipboard via arboard (Windows, some Linux/macOS).
    Arboard,
    /// Linux: xclip command.
    Xclip,
    /// Linux: xsel command.
    Xsel,
    /// macOS: pbcopy command.
    Pbcopy,
    /// Terminal OSC 52 escape sequence (universal fallback).
    Osc52,
}

/// Global backend selection.
static BACKEND: Mutex<Option<ClipboardBackend>> = Mutex::new(None);

/// Detects the best available clipboard backend for the current platform.
fn detect_backend() -> ClipboardBackend {
    // Try arboard first (works on Windows, and some Linux/macOS setups)
    if Clipboard::new().is_ok() {
        return ClipboardBackend::Arboard;
    }

    #[cfg(target_os = "macos")]
    {
        if Command::new("pbcopy")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .is_ok()
        {
            return ClipboardBackend::Pbcopy;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if Command::new("xclip")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
        {
            return ClipboardBackend::Xclip;
        }
        if Command::new("xsel")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
        {
            return ClipboardBackend::Xsel;
        }
    }

    // Fallback to OSC 52 (works in most modern terminals)
    ClipboardBackend::Osc52
}

/// Initializes the clipboard. Should be called once at startup.
pub fn init() -> Result<(), ClipboardError> {
    let backend = detect_backend();

    if let Ok(mut guard) = BACKEND.lock() {
        *guard = Some(backend);
    }

    // Initialize arboard if that's our backend
    if backend == ClipboardBackend::Arboard {
        let clipboard = Clipboard::new().map_err(|e| ClipboardError::Init(e.to_string()))?;
        let mut guard = CLIPBOARD.lock().map_err(|_| ClipboardError::Lock)?;
        *guard = Some(clipboard);
    }

    Ok(())
}

/// Returns the current clipboard backend.
pub fn backend() -> Option<ClipboardBackend> {
    BACKEND.lock().ok().and_then(|g| *g)
}

/// Copies text to the clipboard using the best available backend.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    let backend = backend().unwrap_or_else(detect_backend);

    match backend {
        ClipboardBackend::Arboard => copy_arboard(text),
        ClipboardBackend::Xclip => copy_command(text, "xclip", &["-selection", "clipboard"]),
        ClipboardBackend::Xsel => copy_command(text, "xsel", &["--clipboard", "--input"]),
        ClipboardBackend::Pbcopy => copy_command(text, "pbcopy", &[]),
        ClipboardBackend::Osc52 => copy_osc52(text),
    }
}

fn copy_arboard(text: &str) -> Result<(), ClipboardError> {
    let mut guard = CLIPBOARD.lock().map_err(|_| ClipboardError::Lock)?;
    let clipboard = guard.as_mut().ok_or(ClipboardError::NotInitialized)?;
    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::Copy(e.to_string()))
}

/// Pipes text into an external clipboard command.
fn copy_command(text: &str, program: &str, args: &[&str]) -> Result<(), ClipboardError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::Copy(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| ClipboardError::Copy(format!("Failed to write to {}: {}", program, e)))?;
    }

    child
        .wait()
        .map_err(|e| ClipboardError::Copy(format!("{} failed: {}", program, e)))?;

    Ok(())
}

/// Copies text using the OSC 52 escape sequence.
/// This writes directly to stdout and works in most modern terminals.
fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
    use base64::{engine::general_purpose::STANDARD, Engine};

    let encoded = STANDARD.encode(text);
    // OSC 52 format: ESC ] 52 ; c ; <base64-data> ESC \
    let sequence = format!("\x1b]52;c;{}\x1b\\", encoded);

    std::io::stdout()
        .write_all(sequence.as_bytes())
        .map_err(|e| ClipboardError::Copy(format!("Failed to write OSC 52: {}", e)))?;
    std::io::stdout()
        .flush()
        .map_err(|e| ClipboardError::Copy(format!("Failed to flush OSC 52: {}", e)))?;

    Ok(())
}

/// Clipboard operation errors.
#[derive(Debug, Clone)]
pub enum ClipboardError {
    /// Failed to initialize clipboard.
    Init(String),
    /// Failed to acquire lock.
    Lock,
    /// Clipboard not initialized.
    NotInitialized,
    /// Failed to copy to clipboard.
    Copy(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init(e) => write!(f, "Failed to initialize clipboard: {}", e),
            Self::Lock => write!(f, "Failed to acquire clipboard lock"),
            Self::NotInitialized => write!(f, "Clipboard not initialized"),
            Self::Copy(e) => write!(f, "Failed to copy to clipboard: {}", e),
        }
    }
}

impl std::error::Error for ClipboardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_error_display() {
        let err = ClipboardError::NotInitialized;
        assert_eq!(err.to_string(), "Clipboard not initialized");
    }
}
