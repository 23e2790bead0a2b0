use super::{errors::panic_response, handlers, state::AppState};
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

/// Creates the Axum router with all the application routes.
///
/// Unknown paths and wrong methods fall back to JSON errors. The CORS headers
/// are added to every response, panics included, and `OPTIONS` requests are
/// answered by the routes themselves.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/status", get(handlers::status_handler))
        .route(
            "/api/login",
            post(handlers::login_handler).options(handlers::preflight),
        )
        .route("/api/logout", post(handlers::logout_handler))
        .route(
            "/api/generate",
            post(handlers::generate_handler).options(handlers::preflight),
        )
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(app_state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
}
