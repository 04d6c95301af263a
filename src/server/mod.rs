//! Read-only HTTP surface for operators.
//!
//! # Endpoints
//!
//! - `GET /health` - Returns 200 if the server is running
//! - `GET /api/v1/state` - The whole state file as JSON
//! - `GET /api/v1/collections/{name}/state` - One collection's tracked state
//!
//! Handlers read the state file from disk on every request and never touch
//! the watcher's in-memory ledger.

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod health;
pub mod state;

pub use health::health_handler;
pub use state::{StateError, collection_state_handler, state_handler};

/// Shared application state, passed to handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// The file the watcher persists its ledger to.
    state_file: PathBuf,
}

impl AppState {
    pub fn new(state_file: impl Into<PathBuf>) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                state_file: state_file.into(),
            }),
        }
    }

    pub fn state_file(&self) -> &Path {
        &self.inner.state_file
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::get;

    axum::Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/state", get(state_handler))
        .route(
            "/api/v1/collections/{name}/state",
            get(collection_state_handler),
        )
        .with_state(app_state)
}
