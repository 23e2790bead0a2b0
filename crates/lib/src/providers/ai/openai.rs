use crate::{
    errors::ProviderError,
    providers::ai::{AiProvider, Completion, GenerationOptions},
};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{debug, warn};

/// The public OpenAI chat completions endpoint.
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

// --- OpenAI request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// --- OpenAI Provider implementation ---

/// A provider for the OpenAI chat completions API.
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider`.
    pub fn new(api_url: String, api_key: String, model: String) -> Result<Self, ProviderError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ProviderError::ClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Option<Completion>, ProviderError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: options.temperature,
            max_completion_tokens: options.max_completion_tokens,
            response_format: options.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        debug!(model = %self.model, url = %self.api_url, "Sending chat completion request");
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(ProviderError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, "OpenAI API returned an error");
            return Err(classify_error(status, &error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(ProviderError::Deserialization)?;

        Ok(chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| Completion {
                content: choice.message.content.unwrap_or_default(),
                finish_reason: choice.finish_reason,
            }))
    }
}

/// Maps a failed OpenAI response onto a [`ProviderError`] variant.
///
/// The decision uses the status code and the `type`/`code` fields of the
/// OpenAI error envelope, falling back to the status alone when the body is
/// not a recognizable envelope.
pub fn classify_error(status: StatusCode, body: &str) -> ProviderError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let error = envelope.error;
    let message = if error.message.is_empty() {
        body.to_string()
    } else {
        error.message
    };
    let tags = [error.kind.as_deref(), error.code.as_deref()];
    let tagged = |names: &[&str]| tags.iter().flatten().any(|tag| names.contains(tag));

    if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || tagged(&["invalid_api_key", "authentication_error"])
    {
        return ProviderError::Authentication(message);
    }
    if status == StatusCode::PAYMENT_REQUIRED
        || tagged(&["insufficient_quota", "billing_hard_limit_reached", "billing_not_active"])
    {
        return ProviderError::QuotaExceeded(message);
    }
    if status == StatusCode::TOO_MANY_REQUESTS || tagged(&["rate_limit_exceeded"]) {
        return ProviderError::RateLimited(message);
    }
    ProviderError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_status_is_an_authentication_error() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err = classify_error(StatusCode::UNAUTHORIZED, body);
        assert!(
            matches!(err, ProviderError::Authentication(ref m) if m == "Incorrect API key provided")
        );
    }

    #[test]
    fn quota_is_distinguished_from_rate_limit_on_429() {
        let quota = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
        let limit = r#"{"error":{"message":"Rate limit reached","type":"requests","code":"rate_limit_exceeded"}}"#;

        assert!(matches!(
            classify_error(StatusCode::TOO_MANY_REQUESTS, quota),
            ProviderError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify_error(StatusCode::TOO_MANY_REQUESTS, limit),
            ProviderError::RateLimited(_)
        ));
    }

    #[test]
    fn unstructured_body_falls_back_to_status() {
        let err = classify_error(StatusCode::BAD_GATEWAY, "upstream exploded");
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
