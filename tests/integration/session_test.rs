//! Session lifecycle tests driven through the mock backend.
//!
//! These wire a `QuerySession` to spawned ask tasks the same way the TUI
//! does: each task reports back over a channel with its sequence number, and
//! completions are applied in arrival order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use nl_ask::api::types::{AskResponse, Cell, ResultSet};
use nl_ask::api::{Backend, MockBackend};
use nl_ask::error::AskError;
use nl_ask::session::{surface_message, Outcome, QuerySession, LLM_MODE_NOTICE};
use tokio::sync::mpsc;

fn response(sql: &str) -> AskResponse {
    AskResponse {
        sql: sql.to_string(),
        result: Some(ResultSet::with_data(
            vec!["n".to_string()],
            vec![vec![Cell::Int(1)]],
        )),
    }
}

/// Spawns an ask task for a submission, reporting back over the channel.
fn spawn_ask(
    backend: Arc<MockBackend>,
    seq: u64,
    question: String,
    tx: mpsc::Sender<(u64, Result<AskResponse, AskError>, Duration)>,
) {
    tokio::spawn(async move {
        let started = Instant::now();
        let reply = backend.ask(&question).await;
        let _ = tx.send((seq, reply, started.elapsed())).await;
    });
}

#[tokio::test]
async fn test_single_submission_round_trip() {
    let backend = Arc::new(MockBackend::new().with_response("ping", response("SELECT 1")));
    let mut session = QuerySession::new();
    let (tx, mut rx) = mpsc::channel(8);

    let submission = session.submit("ping").unwrap();
    spawn_ask(backend, submission.seq, submission.question, tx);

    let (seq, reply, elapsed) = rx.recv().await.unwrap();
    assert!(session.complete(seq, reply, elapsed));

    match session.outcome() {
        Outcome::Success(answer) => {
            assert_eq!(answer.sql, "SELECT 1");
            assert!(answer.result.is_some());
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_second_submission_wins_when_first_resolves_last() {
    // The first question is slow; its response arrives after the second's.
    let backend = Arc::new(
        MockBackend::new()
            .with_delayed_response("first", Duration::from_millis(80), response("SELECT 1"))
            .with_response("second", response("SELECT 2")),
    );
    let mut session = QuerySession::new();
    let (tx, mut rx) = mpsc::channel(8);

    let first = session.submit("first").unwrap();
    spawn_ask(Arc::clone(&backend), first.seq, first.question, tx.clone());

    let second = session.submit("second").unwrap();
    spawn_ask(backend, second.seq, second.question, tx);

    // Apply completions strictly in arrival order
    let mut applied = 0;
    for _ in 0..2 {
        let (seq, reply, elapsed) = rx.recv().await.unwrap();
        if session.complete(seq, reply, elapsed) {
            applied += 1;
        }
    }

    // Only the second submission's completion is applied; the first's
    // late arrival is discarded.
    assert_eq!(applied, 1);
    assert_eq!(session.latest_sql(), Some("SELECT 2"));
}

#[tokio::test]
async fn test_second_submission_wins_when_first_resolves_first() {
    let backend = Arc::new(
        MockBackend::new()
            .with_response("first", response("SELECT 1"))
            .with_delayed_response("second", Duration::from_millis(80), response("SELECT 2")),
    );
    let mut session = QuerySession::new();
    let (tx, mut rx) = mpsc::channel(8);

    let first = session.submit("first").unwrap();
    spawn_ask(Arc::clone(&backend), first.seq, first.question, tx.clone());

    let second = session.submit("second").unwrap();
    spawn_ask(backend, second.seq, second.question, tx);

    for _ in 0..2 {
        let (seq, reply, elapsed) = rx.recv().await.unwrap();
        session.complete(seq, reply, elapsed);
    }

    assert_eq!(session.latest_sql(), Some("SELECT 2"));
}

#[tokio::test]
async fn test_whitespace_question_sends_nothing() {
    let mut session = QuerySession::new();

    assert!(session.submit("  \t ").is_none());
    assert_eq!(session.outcome(), &Outcome::Idle);
    // No submission means no task, no request, no channel traffic
}

#[tokio::test]
async fn test_failure_detail_is_surfaced_verbatim() {
    let backend = Arc::new(MockBackend::new().with_failure("broken", "syntax error"));
    let mut session = QuerySession::new();
    let (tx, mut rx) = mpsc::channel(8);

    let submission = session.submit("broken").unwrap();
    spawn_ask(backend, submission.seq, submission.question, tx);

    let (seq, reply, elapsed) = rx.recv().await.unwrap();
    session.complete(seq, reply, elapsed);

    match session.outcome() {
        Outcome::Failure(failure) => assert_eq!(failure.message, "syntax error"),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_llm_mode_failure_surfaces_configuration_notice() {
    let backend = Arc::new(
        MockBackend::new().with_failure("anything", "Unknown LLM_MODE='foo'. Use: mock | ollama"),
    );
    let mut session = QuerySession::new();
    let (tx, mut rx) = mpsc::channel(8);

    let submission = session.submit("anything at all").unwrap();
    spawn_ask(backend, submission.seq, submission.question, tx);

    let (seq, reply, elapsed) = rx.recv().await.unwrap();
    session.complete(seq, reply, elapsed);

    match session.outcome() {
        Outcome::Failure(failure) => assert_eq!(failure.message, LLM_MODE_NOTICE),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_every_completion_carries_latency() {
    let backend = Arc::new(
        MockBackend::new().with_delayed_response(
            "slow",
            Duration::from_millis(30),
            response("SELECT 1"),
        ),
    );
    let mut session = QuerySession::new();
    let (tx, mut rx) = mpsc::channel(8);

    let submission = session.submit("slow").unwrap();
    spawn_ask(backend, submission.seq, submission.question, tx);

    let (seq, reply, elapsed) = rx.recv().await.unwrap();
    session.complete(seq, reply, elapsed);

    match session.outcome() {
        Outcome::Success(answer) => {
            assert!(answer.elapsed >= Duration::from_millis(30));
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_completion_after_reset_is_discarded() {
    let backend = Arc::new(MockBackend::new());
    let mut session = QuerySession::new();
    let (tx, mut rx) = mpsc::channel(8);

    let submission = session.submit("list customers").unwrap();
    spawn_ask(backend, submission.seq, submission.question, tx);
    session.reset();

    let (seq, reply, elapsed) = rx.recv().await.unwrap();
    assert!(!session.complete(seq, reply, elapsed));
    assert_eq!(session.outcome(), &Outcome::Idle);
}

#[test]
fn test_surface_message_fallback_chain() {
    assert_eq!(surface_message(&AskError::backend("detail text")), "detail text");
    assert_eq!(
        surface_message(&AskError::transport("connection reset")),
        "connection reset"
    );
    assert_eq!(surface_message(&AskError::backend("")), "Unknown error");
    assert_eq!(
        surface_message(&AskError::backend("Unknown LLM_MODE: vllmm")),
        LLM_MODE_NOTICE
    );
}
