//! OpenAI chat completions client with JSON-schema constrained output.
//!
//! Any OpenAI-compatible endpoint works as long as it honours
//! `response_format = json_schema` and signals overload with HTTP 429.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::chat::{
    ensure_has_user_turn, ChatMessage, ChatProvider, ChatResponse, StructuredOutputFormat, Usage,
};
use crate::error::LLMError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";

/// Configuration for the OpenAI client.
#[derive(Debug)]
pub struct OpenAIConfig {
    /// API key for authentication with OpenAI.
    pub api_key: SecretString,
    /// Base URL every endpoint path is joined onto. Always ends with `/`.
    pub base_url: Url,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature for response randomness.
    pub temperature: Option<f32>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Client for OpenAI's chat completions API.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct OpenAI {
    pub config: Arc<OpenAIConfig>,
    pub client: Client,
}

#[derive(Serialize, Debug)]
struct OpenAIChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct OpenAIResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: &'a StructuredOutputFormat,
}

/// Request payload for OpenAI's chat API endpoint.
#[derive(Serialize, Debug)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    response_format: OpenAIResponseFormat<'a>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
pub struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatChoice {
    message: OpenAIChatMsg,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatMsg {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Deserialize, Debug)]
struct OpenAIErrorEnvelope {
    error: OpenAIErrorBody,
}

#[derive(Deserialize, Debug)]
struct OpenAIErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

impl OpenAIChatResponse {
    fn refusal(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.refusal.as_deref())
    }
}

impl std::fmt::Display for OpenAIChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "No response content"),
        }
    }
}

impl ChatResponse for OpenAIChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|content| !content.is_empty())
    }

    fn usage(&self) -> Option<Usage> {
        self.usage.clone()
    }
}

impl OpenAI {
    /// Creates a new OpenAI client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key, must not be empty
    /// * `base_url` - Endpoint root (defaults to the public OpenAI API)
    /// * `model` - Model to use (defaults to [`DEFAULT_MODEL`])
    /// * `temperature` - Sampling temperature
    /// * `timeout_seconds` - Per-request timeout in seconds
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        let client = Client::builder()
            .build()
            .map_err(|e| LLMError::HttpError(format!("Failed to build HTTP client: {e}")))?;
        Self::with_client(
            client,
            api_key,
            base_url,
            model,
            temperature,
            timeout_seconds,
        )
    }

    /// Creates a new OpenAI client with a custom HTTP client.
    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LLMError::AuthError("Missing OpenAI API key".to_string()));
        }
        let base_url = parse_base_url(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        Ok(Self {
            config: Arc::new(OpenAIConfig {
                api_key: SecretString::new(api_key),
                base_url,
                model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                temperature,
                timeout_seconds,
            }),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.config.timeout_seconds
    }

    fn chat_url(&self) -> Result<Url, LLMError> {
        self.config
            .base_url
            .join("chat/completions")
            .map_err(|e| LLMError::HttpError(e.to_string()))
    }

    async fn ensure_success_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, LLMError> {
        log::debug!("OpenAI HTTP status: {}", response.status());
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response.text().await?;
        Err(classify_error(status, &error_text))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, LLMError> {
    let mut normalized = raw.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized)
        .map_err(|e| LLMError::InvalidRequest(format!("Invalid base URL `{raw}`: {e}")))
}

/// Maps a non-success HTTP answer onto the error taxonomy.
///
/// A 429 is transient unless OpenAI says the account is out of quota, in
/// which case waiting will not help.
fn classify_error(status: StatusCode, body: &str) -> LLMError {
    let parsed = serde_json::from_str::<OpenAIErrorEnvelope>(body).ok();
    let message = parsed
        .as_ref()
        .map(|e| e.error.message.clone())
        .unwrap_or_else(|| body.to_string());
    let code = parsed
        .as_ref()
        .and_then(|e| e.error.code.as_ref())
        .and_then(|c| c.as_str());

    match status {
        StatusCode::TOO_MANY_REQUESTS if code == Some("insufficient_quota") => {
            LLMError::ProviderError(format!("OpenAI quota exhausted: {message}"))
        }
        StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimited(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LLMError::AuthError(format!("OpenAI rejected credentials ({status}): {message}"))
        }
        StatusCode::BAD_REQUEST => LLMError::InvalidRequest(message),
        _ => LLMError::ProviderError(format!("OpenAI returned error status {status}: {message}")),
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat_structured(
        &self,
        messages: &[ChatMessage],
        format: &StructuredOutputFormat,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        ensure_has_user_turn(
            messages,
            "OpenAI structured chat needs at least one user message",
        )?;

        let body = OpenAIChatRequest {
            model: &self.config.model,
            messages: messages
                .iter()
                .map(|m| OpenAIChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.config.temperature,
            response_format: OpenAIResponseFormat {
                format_type: "json_schema",
                json_schema: format,
            },
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("OpenAI request payload: {}", json);
            }
        }

        let mut request = self
            .client
            .post(self.chat_url()?)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body);

        if let Some(timeout) = self.config.timeout_seconds {
            request = request.timeout(Duration::from_secs(timeout));
        }

        let resp = request.send().await?;
        let resp = self.ensure_success_response(resp).await?;
        let resp_text = resp.text().await?;
        let parsed: OpenAIChatResponse =
            serde_json::from_str(&resp_text).map_err(|e| LLMError::ResponseFormatError {
                message: format!("Failed to decode OpenAI chat response: {e}"),
                raw_response: resp_text,
            })?;

        if let Some(refusal) = parsed.refusal() {
            return Err(LLMError::ProviderError(format!(
                "Model refused to answer: {refusal}"
            )));
        }
        if let Some(usage) = parsed.usage() {
            log::debug!("OpenAI usage: {usage}");
        }

        Ok(Box::new(parsed))
    }
}
