//! Request and response payloads of the JSON API.

use cjm_builder::CjmDocument;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub ok: bool,
    pub knowledge_loaded: bool,
    pub authenticated: bool,
    pub password_required: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// A missing keyword is treated as empty.
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub data: CjmDocument,
    pub keyword: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
