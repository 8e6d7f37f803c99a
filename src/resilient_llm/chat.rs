use async_trait::async_trait;

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse, StructuredOutputFormat},
    error::LLMError,
};

use super::wrapper::ResilientLLM;

#[async_trait]
impl ChatProvider for ResilientLLM {
    async fn chat_structured(
        &self,
        messages: &[ChatMessage],
        format: &StructuredOutputFormat,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.retry(|| self.inner.chat_structured(messages, format))
            .await
    }
}
