//! # CJM Generation Service
//!
//! Turns a keyword into a customer journey map: checks the request, renders
//! the prompt around the cached knowledge, makes exactly one model call, and
//! decodes the reply into [`CjmDocument`].

use crate::{
    access::{AuthGate, Session},
    errors::GenerationError,
    knowledge::KnowledgeBase,
    prompts::{build_system_prompt, build_user_prompt},
    providers::ai::{AiProvider, GenerationOptions},
    types::CjmDocument,
};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, LazyLock};
use tracing::{info, instrument, warn};

/// How much of an unparseable reply is echoed back in the error.
pub const PREVIEW_CHARS: usize = 300;

static TRAILING_COMMA_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\}").expect("valid regex"));
static TRAILING_COMMA_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\]").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub data: CjmDocument,
    /// The keyword as used, with surrounding whitespace removed.
    pub keyword: String,
}

#[derive(Debug, Clone)]
pub struct GenerationService {
    gate: AuthGate,
    knowledge: Arc<KnowledgeBase>,
    /// `None` when no model credential is configured.
    provider: Option<Box<dyn AiProvider>>,
    options: GenerationOptions,
}

impl GenerationService {
    pub fn new(
        gate: AuthGate,
        knowledge: Arc<KnowledgeBase>,
        provider: Option<Box<dyn AiProvider>>,
    ) -> Self {
        Self {
            gate,
            knowledge,
            provider,
            options: GenerationOptions::default(),
        }
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn has_credential(&self) -> bool {
        self.provider.is_some()
    }

    /// Generates a customer journey map for `keyword`.
    ///
    /// Checks run in order: keyword, session, credential. The model is only
    /// called once all three pass, and never more than once.
    #[instrument(skip(self, session))]
    pub async fn generate(
        &self,
        session: &Session,
        keyword: &str,
    ) -> Result<GenerationOutcome, GenerationError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(GenerationError::Validation);
        }
        if !self.gate.is_authenticated(session) {
            return Err(GenerationError::Unauthorized);
        }
        let provider = self
            .provider
            .as_ref()
            .ok_or(GenerationError::MissingCredential)?;

        let knowledge = self.knowledge.load().await;
        let system_prompt = build_system_prompt(knowledge);
        let user_prompt = build_user_prompt(keyword);

        info!(
            prompt_chars = system_prompt.chars().count(),
            "Requesting customer journey map"
        );
        let completion = provider
            .generate(&system_prompt, &user_prompt, &self.options)
            .await?
            .ok_or_else(|| GenerationError::UpstreamEmpty {
                finish_reason: "no_choices".to_string(),
            })?;

        let raw = completion.content.trim();
        if raw.is_empty() {
            return Err(GenerationError::UpstreamEmpty {
                finish_reason: completion
                    .finish_reason
                    .unwrap_or_else(|| "unknown".to_string()),
            });
        }

        let value = parse_model_json(raw)?;
        let data = decode_document(value)?;
        info!(journeys = data.cjm_list.len(), "Customer journey map generated");

        Ok(GenerationOutcome {
            data,
            keyword: keyword.to_string(),
        })
    }
}

/// Removes commas that directly precede a closing brace or bracket.
pub fn repair_json(raw: &str) -> String {
    let fixed = TRAILING_COMMA_BRACE.replace_all(raw, "}");
    TRAILING_COMMA_BRACKET.replace_all(&fixed, "]").into_owned()
}

/// Parses model output as JSON, retrying once after [`repair_json`].
pub fn parse_model_json(raw: &str) -> Result<Value, GenerationError> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(first) => {
            warn!("Model output is not valid JSON ({first}); attempting repair");
            serde_json::from_str(&repair_json(raw)).map_err(|e| GenerationError::Parse {
                message: e.to_string(),
                preview: raw.chars().take(PREVIEW_CHARS).collect(),
            })
        }
    }
}

/// Decodes parsed model output into the typed schema.
pub fn decode_document(value: Value) -> Result<CjmDocument, GenerationError> {
    serde_json::from_value(value).map_err(|e| GenerationError::Schema(e.to_string()))
}
