//! State inspection endpoints.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::AppState;
use crate::persistence::{PersistedState, SnapshotError, try_load_snapshot};
use crate::state::{Ledger, TrackedState};
use crate::types::{CollectionKind, UnknownCollection};

/// Errors that can occur when serving state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The watcher has not saved anything yet.
    #[error("no state has been persisted yet")]
    NotFound,

    #[error("{0}")]
    UnknownCollection(#[from] UnknownCollection),

    /// The state file exists but cannot be read.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl IntoResponse for StateError {
    fn into_response(self) -> Response {
        let status = match &self {
            StateError::NotFound => StatusCode::NOT_FOUND,
            StateError::UnknownCollection(_) => StatusCode::BAD_REQUEST,
            StateError::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

fn load(app_state: &AppState) -> Result<PersistedState, StateError> {
    try_load_snapshot(app_state.state_file())?.ok_or(StateError::NotFound)
}

/// `GET /api/v1/state`: the state file as persisted.
///
/// - 200 OK with the file's JSON
/// - 404 Not Found before the first save
/// - 500 Internal Server Error if the file is unreadable
pub async fn state_handler(
    State(app_state): State<AppState>,
) -> Result<Json<PersistedState>, StateError> {
    Ok(Json(load(&app_state)?))
}

/// `GET /api/v1/collections/{name}/state`: one collection's tracked state.
///
/// `name` is `features`, `boards` or `schedules`; anything else is a 400.
pub async fn collection_state_handler(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TrackedState>, StateError> {
    let kind = CollectionKind::from_str(&name)?;
    let ledger = Ledger::from(load(&app_state)?);
    Ok(Json(ledger.get(kind).clone()))
}
