//! Query session state.
//!
//! `QuerySession` owns the outcome of the latest submission: idle, pending,
//! success, or failure. It is a pure state machine with no I/O of its own;
//! the TUI and the one-shot runner drive it by submitting questions, spawning
//! the network call, and feeding the completion back in. Keeping the state
//! separate from the tasks that drive it lets every transition be tested
//! without a backend.
//!
//! Each submission is tagged with a value from a monotonic counter. A
//! completion is applied only when its tag matches the submission currently
//! pending; anything else arrived too late and is discarded. This makes
//! rapid re-submission safe: the answer on screen always belongs to the last
//! question asked.

use std::time::Duration;

use crate::api::types::{AskResponse, ResultSet};
use crate::error::AskError;

/// Fallback message when a failure carries no text at all.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Substring marking a backend-side LLM_MODE misconfiguration.
const LLM_MODE_MARKER: &str = "Unknown LLM_MODE";

/// Notice shown instead of the raw LLM_MODE error text.
pub const LLM_MODE_NOTICE: &str =
    "Backend misconfigured: the LLM_MODE setting is invalid. Ask the operator to set it to mock, ollama, or vllm.";

/// One accepted submission, handed back by [`QuerySession::submit`].
///
/// The caller performs the network call for it and reports back through
/// [`QuerySession::complete`] with the same sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Position in the monotonic submission order.
    pub seq: u64,
    /// The question, already trimmed.
    pub question: String,
}

/// A completed submission's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// The question this answer belongs to.
    pub question: String,
    /// SQL generated by the backend.
    pub sql: String,
    /// Rows produced by running the SQL, if the backend executed it.
    pub result: Option<ResultSet>,
    /// Wall-clock time from request start to resolution.
    pub elapsed: Duration,
}

/// A completed submission's failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// The question this failure belongs to.
    pub question: String,
    /// User-facing message, already passed through the surfacing rules.
    pub message: String,
    /// Wall-clock time from request start to resolution.
    pub elapsed: Duration,
}

/// The tri-state result of the latest submission.
///
/// `Idle` only exists before the first submission and after a reset.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Outcome {
    #[default]
    Idle,
    Pending {
        seq: u64,
        question: String,
    },
    Success(Answer),
    Failure(Failure),
}

/// State object for one user session.
#[derive(Debug, Default)]
pub struct QuerySession {
    next_seq: u64,
    outcome: Outcome,
}

impl QuerySession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a question for submission.
    ///
    /// The question is trimmed first; if nothing remains, no submission is
    /// made, no request may be sent, and the current outcome is unchanged.
    /// Otherwise the outcome becomes `Pending` and everything from the
    /// previous submission is gone, whether or not its response has arrived.
    pub fn submit(&mut self, question: &str) -> Option<Submission> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        self.next_seq += 1;
        let submission = Submission {
            seq: self.next_seq,
            question: question.to_string(),
        };
        self.outcome = Outcome::Pending {
            seq: submission.seq,
            question: submission.question.clone(),
        };
        Some(submission)
    }

    /// Applies the completion of submission `seq`.
    ///
    /// Returns true if the completion was applied. A completion whose tag
    /// does not match the currently pending submission belongs to a
    /// superseded question (or arrived after a reset) and is discarded.
    pub fn complete(
        &mut self,
        seq: u64,
        reply: std::result::Result<AskResponse, AskError>,
        elapsed: Duration,
    ) -> bool {
        let question = match &self.outcome {
            Outcome::Pending {
                seq: pending,
                question,
            } if *pending == seq => question.clone(),
            _ => return false,
        };

        self.outcome = match reply {
            Ok(response) => Outcome::Success(Answer {
                question,
                sql: response.sql,
                result: response.result,
                elapsed,
            }),
            Err(err) => Outcome::Failure(Failure {
                question,
                message: surface_message(&err),
                elapsed,
            }),
        };
        true
    }

    /// Clears the session back to idle.
    ///
    /// Completions for anything in flight will be discarded when they land.
    pub fn reset(&mut self) {
        self.outcome = Outcome::Idle;
    }

    /// The latest outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// True while a submission is awaiting its response.
    pub fn is_pending(&self) -> bool {
        matches!(self.outcome, Outcome::Pending { .. })
    }

    /// The SQL of the latest successful answer, if there is one.
    pub fn latest_sql(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success(answer) if !answer.sql.is_empty() => Some(&answer.sql),
            _ => None,
        }
    }
}

/// Builds the user-facing message for a failed submission.
///
/// The backend's detail string (or the transport error's message) is shown
/// as-is, with two exceptions: a message naming an unknown LLM_MODE is
/// replaced wholesale with a configuration notice, and an empty message
/// falls back to a generic one.
pub fn surface_message(err: &AskError) -> String {
    let raw = err.message();
    if raw.contains(LLM_MODE_MARKER) {
        return LLM_MODE_NOTICE.to_string();
    }
    if raw.trim().is_empty() {
        return UNKNOWN_ERROR_MESSAGE.to_string();
    }
    raw.to_string()
}
