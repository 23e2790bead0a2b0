//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Everything in it is immutable once built, apart
//! from the knowledge cache inside the generation service.

use crate::{auth::session::SessionKeys, config::AppConfig};
use cjm_builder::{
    providers::ai::{openai::OpenAiProvider, AiProvider},
    AuthGate, GenerationService, KnowledgeBase,
};
use std::sync::Arc;
use tracing::{info, warn};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub generation: Arc<GenerationService>,
    /// Signs and verifies the session cookie.
    pub sessions: SessionKeys,
}

/// Builds the shared application state from the configuration.
///
/// The OpenAI client is only created when an API key is configured; without
/// one, generation requests fail with a configuration error instead.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let provider: Option<Box<dyn AiProvider>> = match &config.openai_api_key {
        Some(api_key) => {
            info!(model = %config.openai_model, "Initialized OpenAI provider.");
            Some(Box::new(OpenAiProvider::new(
                config.openai_api_url.clone(),
                api_key.clone(),
                config.openai_model.clone(),
            )?))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; generation requests will be rejected.");
            None
        }
    };

    let knowledge = Arc::new(KnowledgeBase::new(config.knowledge_dir.clone()));
    let gate = AuthGate::new(config.site_password.clone());
    let sessions = SessionKeys::new(config.session_secret.as_bytes(), config.secure_cookies());

    Ok(AppState {
        config: Arc::new(config),
        generation: Arc::new(GenerationService::new(gate, knowledge, provider)),
        sessions,
    })
}
