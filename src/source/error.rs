//! Document source error types.
//!
//! Errors are split into transient and permanent so the retry layer knows
//! what is worth another attempt:
//!
//! - **Transient**: HTTP 429 and 5xx, timeouts, connection failures.
//! - **Permanent**: other 4xx (bad token, unshared database, bad id) and
//!   response bodies that are not a query result.
//!
//! Either way the watcher treats the collection as unavailable for this tick
//! and tries again on the next one.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// The kind of source error, categorized for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Safe to retry with backoff.
    Transient,
    /// Retrying will not help until configuration or sharing changes.
    Permanent,
}

impl SourceErrorKind {
    pub fn is_retriable(&self) -> bool {
        matches!(self, SourceErrorKind::Transient)
    }
}

/// A failed fetch from the document source.
#[derive(Debug, Error)]
pub struct SourceError {
    pub kind: SourceErrorKind,

    /// The HTTP status code, if the request got that far.
    pub status_code: Option<u16>,

    pub message: String,

    #[source]
    pub source: Option<reqwest::Error>,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "document source error (HTTP {}): {}", code, self.message),
            None => write!(f, "document source error: {}", self.message),
        }
    }
}

impl SourceError {
    pub fn transient(message: impl Into<String>) -> Self {
        SourceError {
            kind: SourceErrorKind::Transient,
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        SourceError {
            kind: SourceErrorKind::Permanent,
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    /// A non-success HTTP response.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let kind = if is_transient_status(status) {
            SourceErrorKind::Transient
        } else {
            SourceErrorKind::Permanent
        };
        SourceError {
            kind,
            status_code: Some(status),
            message: body.into(),
            source: None,
        }
    }

    /// A request that did not finish within `limit`.
    pub fn timed_out(limit: Duration) -> Self {
        SourceError::transient(format!("no response within {}s", limit.as_secs_f64()))
    }

    /// Categorizes a reqwest error.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let kind = if err.is_timeout() || err.is_connect() || err.is_request() {
            SourceErrorKind::Transient
        } else if let Some(code) = status_code {
            if is_transient_status(code) {
                SourceErrorKind::Transient
            } else {
                SourceErrorKind::Permanent
            }
        } else {
            // Body decoding and builder errors do not fix themselves.
            SourceErrorKind::Permanent
        };

        SourceError {
            kind,
            status_code,
            message: err.to_string(),
            source: Some(err),
        }
    }

    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }
}

/// Rate limiting and server-side failures.
fn is_transient_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}
