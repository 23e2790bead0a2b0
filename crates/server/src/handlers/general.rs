//! # General Route Handlers
//!
//! The static page, the status probe, and the JSON fallbacks for unknown
//! routes and methods.

use super::{AppError, AppState};
use crate::{auth::middleware::CurrentSession, types::StatusResponse};
use axum::{extract::State, http::StatusCode, response::Html, Json};
use std::io;
use tracing::warn;

pub const INDEX_FILE: &str = "index.html";

/// Serves `index.html` from the configured static directory.
pub async fn index(State(app_state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = app_state.config.static_dir.join(INDEX_FILE);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Front-end page is missing");
            Err(AppError::NotFound)
        }
        Err(e) => Err(AppError::Internal(
            anyhow::Error::new(e).context(format!("Failed to read '{}'", path.display())),
        )),
    }
}

/// Reports whether the knowledge cache is warm and whether the caller may
/// generate.
pub async fn status_handler(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<StatusResponse> {
    let generation = &app_state.generation;
    Json(StatusResponse {
        ok: true,
        knowledge_loaded: generation.knowledge().is_loaded(),
        authenticated: generation.gate().is_authenticated(&session),
        password_required: generation.gate().password_required(),
    })
}

/// Answers `OPTIONS`, preflight or not, with an empty body. The router adds
/// the CORS headers.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

