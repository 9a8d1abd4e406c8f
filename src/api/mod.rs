//! Backend API client for nl-ask.
//!
//! The backend is any HTTP service exposing the `/ask` contract: it accepts a
//! natural-language question and answers with generated SQL plus, optionally,
//! the rows produced by running it. The [`Backend`] trait abstracts that
//! service so the session and the TUI can be driven by a mock in tests.

pub mod http;
pub mod mock;
pub mod types;

pub use http::{HttpBackend, HttpConfig};
pub use mock::MockBackend;
pub use types::{AskRequest, AskResponse, Cell, ErrorBody, ResultSet, Row};

use crate::error::Result;
use async_trait::async_trait;

/// A natural-language-to-SQL backend.
///
/// Implementations must be safe to share across tasks; the TUI holds one
/// instance behind an `Arc` and calls `ask` from spawned tasks.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Sends one question and returns the backend's answer.
    ///
    /// Exactly one request per call; no retries. Failures carry the
    /// backend's detail message when the response body provides one.
    async fn ask(&self, question: &str) -> Result<AskResponse>;

    /// Probes the backend's health endpoint.
    ///
    /// `Ok(true)` means the backend answered `{"ok": true}`; `Ok(false)`
    /// means it answered but reported itself unhealthy. Transport failures
    /// are errors.
    async fn health(&self) -> Result<bool>;

    /// Human-readable identity of the backend, shown in the UI.
    fn describe(&self) -> String;
}
