use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cjm_builder::{AccessError, GenerationError};
use serde_json::json;
use std::any::Any;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// Every variant renders as `{"error": "<message>"}` with a JSON content type,
/// so the front-end never has to handle an HTML error page.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the CJM generation pipeline.
    Generation(GenerationError),
    /// Login failures.
    Access(AccessError),
    /// The request body could not be read as the expected JSON.
    BadRequest(String),
    NotFound,
    MethodNotAllowed,
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::Generation(err)
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        AppError::Access(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

fn generation_status(err: &GenerationError) -> StatusCode {
    match err {
        GenerationError::Validation => StatusCode::BAD_REQUEST,
        GenerationError::Unauthorized | GenerationError::UpstreamAuth(_) => {
            StatusCode::UNAUTHORIZED
        }
        GenerationError::Billing(_) => StatusCode::PAYMENT_REQUIRED,
        GenerationError::Throttled(_) => StatusCode::TOO_MANY_REQUESTS,
        GenerationError::MissingCredential
        | GenerationError::UpstreamEmpty { .. }
        | GenerationError::Parse { .. }
        | GenerationError::Schema(_)
        | GenerationError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Generation(err) => {
                let status = generation_status(&err);
                if status.is_server_error() {
                    error!("GenerationError: {:?}", err);
                } else {
                    warn!("GenerationError: {:?}", err);
                }
                (status, err.to_string())
            }
            AppError::Access(err) => {
                warn!("Login rejected: {err}");
                (StatusCode::UNAUTHORIZED, err.to_string())
            }
            AppError::BadRequest(detail) => {
                warn!("Bad request: {detail}");
                (StatusCode::BAD_REQUEST, format!("잘못된 요청: {detail}"))
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "요청한 경로를 찾을 수 없습니다.".to_string(),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "허용되지 않는 메서드입니다.".to_string(),
            ),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("서버 내부 오류: {err}"),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}

/// Renders a handler panic caught by `CatchPanicLayer` as a JSON 500.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(anyhow::anyhow!(detail)).into_response()
}
