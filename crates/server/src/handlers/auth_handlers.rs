//! # Authentication Route Handlers
//!
//! Login and logout for the shared site password. The resulting session is
//! written back as a signed cookie.

use super::{AppError, AppState};
use crate::types::{LoginRequest, SuccessResponse};
use anyhow::Context;
use axum::{body::Bytes, extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

/// Checks the submitted password and, on success, issues a session cookie.
///
/// The body is read leniently: a missing or unreadable body counts as an empty
/// password, which still succeeds when no password is configured.
pub async fn login_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    let request: LoginRequest = serde_json::from_slice(&body).unwrap_or_default();

    let mut session = app_state.sessions.read(&jar);
    app_state
        .generation
        .gate()
        .login(&mut session, &request.password)?;
    info!(permanent = session.permanent, "Session authenticated");

    let jar = app_state
        .sessions
        .write(jar, &session)
        .context("Failed to sign session cookie")?;
    Ok((jar, Json(SuccessResponse::ok())))
}

/// Clears the session cookie.
pub async fn logout_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    (app_state.sessions.clear(jar), Json(SuccessResponse::ok()))
}
