use async_trait::async_trait;

use crate::error::LLMError;

use super::message::ChatMessage;
use super::structured::StructuredOutputFormat;
use super::usage::Usage;

pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
    fn usage(&self) -> Option<Usage> {
        None
    }
}

/// The one capability the evaluator needs from a completion service: answer
/// a chat exchange with output constrained to a JSON schema.
///
/// Implementations report transient overload as [`LLMError::RateLimited`] so
/// callers can tell it apart from failures that retrying will not fix.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat_structured(
        &self,
        messages: &[ChatMessage],
        format: &StructuredOutputFormat,
    ) -> Result<Box<dyn ChatResponse>, LLMError>;
}
