//! # Generation Route Handlers

use super::{AppError, AppState};
use crate::{
    auth::middleware::CurrentSession,
    types::{GenerateRequest, GenerateResponse},
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

/// Generates a customer journey map for the submitted keyword.
///
/// A body that is not valid JSON is a 400; every other failure comes from
/// the generation service and is mapped by `AppError`.
pub async fn generate_handler(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload?;
    info!("Received generation request: '{}'", request.keyword);

    let outcome = app_state
        .generation
        .generate(&session, &request.keyword)
        .await?;

    Ok(Json(GenerateResponse {
        success: true,
        data: outcome.data,
        keyword: outcome.keyword,
    }))
}
