//! Liveness probe.

use axum::http::StatusCode;

/// `GET /health`: 200 with body `OK` while the process is serving.
///
/// Says nothing about the document source or the chat API; a collection
/// that keeps failing shows up in the logs and in a stale state file.
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
