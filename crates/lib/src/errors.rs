use thiserror::Error;

/// Errors raised at the boundary of an AI provider.
///
/// Providers classify upstream failures into these variants from the HTTP
/// status and the structured error body, so callers never inspect messages.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    Request(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    Deserialization(reqwest::Error),
    #[error("AI provider rejected the credential: {0}")]
    Authentication(String),
    #[error("AI provider rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("AI provider quota exhausted: {0}")]
    QuotaExceeded(String),
    #[error("AI provider returned an error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// The outcomes of a failed CJM generation.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("키워드를 입력해주세요.")]
    Validation,
    #[error("인증이 필요합니다.")]
    Unauthorized,
    #[error("서버에 OPENAI_API_KEY 환경변수가 설정되지 않았습니다.")]
    MissingCredential,
    #[error("AI 응답이 비어 있습니다 (finish_reason: {finish_reason}). 키워드를 더 구체적으로 입력하거나 다시 시도해주세요.")]
    UpstreamEmpty { finish_reason: String },
    #[error("AI 응답 파싱 실패: {message}\n응답 미리보기: {preview}")]
    Parse { message: String, preview: String },
    #[error("AI 응답 형식 오류: {0}")]
    Schema(String),
    #[error("OpenAI API 키가 올바르지 않습니다. OPENAI_API_KEY를 확인해주세요.")]
    UpstreamAuth(#[source] ProviderError),
    #[error("API 요청 한도 초과. 잠시 후 다시 시도해주세요.")]
    Throttled(#[source] ProviderError),
    #[error("OpenAI 크레딧이 부족합니다. OpenAI 계정을 확인해주세요.")]
    Billing(#[source] ProviderError),
    #[error("{0}")]
    Upstream(#[source] ProviderError),
}

impl From<ProviderError> for GenerationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Authentication(_) => GenerationError::UpstreamAuth(err),
            ProviderError::RateLimited(_) => GenerationError::Throttled(err),
            ProviderError::QuotaExceeded(_) => GenerationError::Billing(err),
            other => GenerationError::Upstream(other),
        }
    }
}
