use thiserror::Error;

/// Error types that can occur when talking to the completion service or
/// interpreting what it returns.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The provider asked us to slow down; the only error kind that is retried
    #[error("Rate limited: {0}")]
    RateLimited(String),
    /// Errors returned by the LLM provider
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Retry attempts exceeded
    #[error("Max retries exceeded after {attempts} tries. Try again later. Last error: {last_error}")]
    RetryExceeded { attempts: usize, last_error: String },
}

impl LLMError {
    /// Whether the error is a transient rate-limit signal.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LLMError::RateLimited(_))
    }
}

/// Converts reqwest HTTP errors into LlmErrors
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}

/// Errors raised while reading or writing a batch table.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("input is missing required column `{0}`")]
    MissingColumn(&'static str),
}
