//! Error types for nl-ask.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for nl-ask operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AskError {
    /// Transport errors (connection refused, timeouts, malformed response bodies, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend-reported errors (non-2xx responses carrying a detail message)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration errors (invalid config file, bad base URL, unknown profile, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (terminal setup, channel failures, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AskError {
    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a backend error with the given message.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport Error",
            Self::Backend(_) => "Backend Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns the inner message without the category prefix.
    ///
    /// For backend errors this is the detail string the server sent.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport(msg)
            | Self::Backend(msg)
            | Self::Config(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// Result type alias using AskError.
pub type Result<T> = std::result::Result<T, AskError>;
