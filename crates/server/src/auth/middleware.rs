//! # Session Extractor
//!
//! `CurrentSession` resolves the session cookie of a request. It never
//! rejects: a missing, expired, or forged cookie yields a fresh session, and
//! the handler decides what that session may do.

use crate::state::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use cjm_builder::Session;
use std::convert::Infallible;

#[derive(Debug, Clone, Copy)]
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(CurrentSession(state.sessions.read(&jar)))
    }
}
