//! HTTP contract tests against a local TCP fixture server.
//!
//! The fixture accepts a single connection, captures the raw request, and
//! answers with a canned HTTP response, so the tests can assert both sides
//! of the `/ask` and `/health` exchanges without a live backend.

use nl_ask::api::{Backend, HttpBackend, HttpConfig};
use nl_ask::error::AskError;
use nl_ask::session::{surface_message, QuerySession, LLM_MODE_NOTICE};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves exactly one request with the given status and JSON body.
///
/// Returns the backend base URL and a handle resolving to the raw request.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();

        // Read headers, then the body per Content-Length
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text
                    .lines()
                    .find_map(|l| l.to_lowercase().strip_prefix("content-length:").map(str::to_string))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= header_end + 4 + content_length {
                    break;
                }
            }
            if n == 0 {
                break;
            }
        }

        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{}", addr), handle)
}

fn backend_for(url: &str) -> HttpBackend {
    HttpBackend::new(HttpConfig::new(url)).unwrap()
}

#[tokio::test]
async fn test_ask_posts_trimmed_question_as_json() {
    let (url, request) = serve_once(
        "200 OK",
        r#"{"question": "list customers", "sql": "SELECT 1", "result": null}"#,
    )
    .await;

    // Trimming is the session's job; the backend sends what it is given
    let mut session = QuerySession::new();
    let submission = session.submit("  list customers  ").unwrap();

    let response = backend_for(&url).ask(&submission.question).await.unwrap();
    assert_eq!(response.sql, "SELECT 1");

    let raw = request.await.unwrap();
    assert!(raw.starts_with("POST /ask HTTP/1.1"));
    assert!(raw.to_lowercase().contains("content-type: application/json"));
    assert!(raw.ends_with(r#"{"question":"list customers"}"#));
}

#[tokio::test]
async fn test_null_result_is_success_without_table() {
    let (url, _request) =
        serve_once("200 OK", r#"{"question": "q", "sql": "SELECT 1", "result": null}"#).await;

    let response = backend_for(&url).ask("q").await.unwrap();
    assert_eq!(response.sql, "SELECT 1");
    assert!(response.result.is_none());
}

#[tokio::test]
async fn test_result_rows_deserialize_with_nulls() {
    let (url, _request) = serve_once(
        "200 OK",
        r#"{"sql": "SELECT 1", "result": {"columns": ["a", "b", "c"], "rows": [[1, null, "x"]]}}"#,
    )
    .await;

    let response = backend_for(&url).ask("q").await.unwrap();
    let result = response.result.unwrap();
    assert_eq!(result.columns, vec!["a", "b", "c"]);
    assert_eq!(result.rows[0].len(), 3);
    assert!(result.rows[0][1].is_null());
}

#[tokio::test]
async fn test_error_detail_becomes_backend_error() {
    let (url, _request) = serve_once("400 Bad Request", r#"{"detail": "syntax error"}"#).await;

    let err = backend_for(&url).ask("q").await.unwrap_err();
    assert_eq!(err, AskError::backend("syntax error"));
    assert_eq!(surface_message(&err), "syntax error");
}

#[tokio::test]
async fn test_llm_mode_detail_gets_configuration_notice() {
    let (url, _request) =
        serve_once("500 Internal Server Error", r#"{"detail": "Unknown LLM_MODE: foo"}"#).await;

    let err = backend_for(&url).ask("q").await.unwrap_err();
    // The error keeps the raw detail; the override is presentation-only
    assert_eq!(err, AskError::backend("Unknown LLM_MODE: foo"));
    assert_eq!(surface_message(&err), LLM_MODE_NOTICE);
}

#[tokio::test]
async fn test_detail_less_failure_gets_generic_message() {
    let (url, _request) = serve_once("500 Internal Server Error", "oops, not json").await;

    let err = backend_for(&url).ask("q").await.unwrap_err();
    assert_eq!(err, AskError::backend("Request failed (HTTP 500)"));
}

#[tokio::test]
async fn test_malformed_success_body_is_transport_error() {
    let (url, _request) = serve_once("200 OK", "not json at all").await;

    let err = backend_for(&url).ask("q").await.unwrap_err();
    assert_eq!(err.category(), "Transport Error");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and drop a listener so the port is free but nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = backend_for(&format!("http://{}", addr))
        .ask("q")
        .await
        .unwrap_err();
    assert_eq!(err.category(), "Transport Error");
    assert!(err.message().contains("Failed to connect"));
}

#[tokio::test]
async fn test_health_ok_true() {
    let (url, request) = serve_once("200 OK", r#"{"ok": true}"#).await;

    assert!(backend_for(&url).health().await.unwrap());
    let raw = request.await.unwrap();
    assert!(raw.starts_with("GET /health HTTP/1.1"));
}

#[tokio::test]
async fn test_health_ok_false() {
    let (url, _request) = serve_once("200 OK", r#"{"ok": false}"#).await;
    assert!(!backend_for(&url).health().await.unwrap());
}

#[tokio::test]
async fn test_health_non_2xx_reports_unhealthy() {
    let (url, _request) = serve_once("503 Service Unavailable", "{}").await;
    assert!(!backend_for(&url).health().await.unwrap());
}
