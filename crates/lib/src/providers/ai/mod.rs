pub mod openai;

use crate::errors::ProviderError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Sampling and output controls sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_completion_tokens: u32,
    /// Asks the provider to constrain its output to a single JSON object.
    pub json_mode: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_completion_tokens: 16_000,
            json_mode: true,
        }
    }
}

/// The first choice of a completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub content: String,
    pub finish_reason: Option<String>,
}

/// A trait for interacting with an AI provider.
///
/// Implementations translate transport and API failures into
/// [`ProviderError`] variants before returning.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends a system/user message pair and returns the first choice.
    ///
    /// `Ok(None)` means the provider answered but returned no choices.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Option<Completion>, ProviderError>;
}

dyn_clone::clone_trait_object!(AiProvider);
