//! # API Route Handlers
//!
//! This module organizes the Axum route handlers for the `cjm-builder-server`.
//! They are re-exported so the router can refer to everything under a single
//! `handlers::` path.

pub mod auth_handlers;
pub mod general;
pub mod generation_handlers;

pub use auth_handlers::*;
pub use general::*;
pub use generation_handlers::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
