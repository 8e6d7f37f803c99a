use crate::{
    chat::{ChatMessage, ChatProvider},
    error::LLMError,
    resilient_llm::{ResilienceConfig, ResilientLLM, Sleeper},
};

use super::prompt::{eval_response_format, format_ticket_and_reply};
use super::types::{EvalRequest, EvalResponse};

/// Scores ticket replies through a completion service, backing off while
/// the service reports rate limiting.
pub struct TicketEvaluator {
    llm: ResilientLLM,
    system_prompt: String,
}

impl TicketEvaluator {
    pub fn new(
        provider: Box<dyn ChatProvider>,
        system_prompt: impl Into<String>,
        config: ResilienceConfig,
    ) -> Self {
        Self {
            llm: ResilientLLM::new(provider, config),
            system_prompt: system_prompt.into(),
        }
    }

    /// Replaces how the evaluator waits between rate-limited attempts.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.llm = self.llm.with_sleeper(sleeper);
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn max_tries(&self) -> usize {
        self.llm.config().max_attempts
    }

    fn build_messages(&self, request: &EvalRequest) -> [ChatMessage; 2] {
        [
            ChatMessage::system().content(&self.system_prompt).build(),
            ChatMessage::user()
                .content(format_ticket_and_reply(&request.ticket, &request.reply))
                .build(),
        ]
    }

    /// Evaluates one ticket/reply pair.
    ///
    /// Fails with [`LLMError::RetryExceeded`] once every allowed attempt was
    /// rate limited; any other error from the service is returned as is.
    pub async fn generate_evaluation(
        &self,
        request: &EvalRequest,
    ) -> Result<EvalResponse, LLMError> {
        let messages = self.build_messages(request);
        let response = self
            .llm
            .chat_structured(&messages, &eval_response_format())
            .await?;
        let text = response
            .text()
            .ok_or_else(|| LLMError::ResponseFormatError {
                message: format!("No evaluation text returned for ticket {}", request.id),
                raw_response: response.to_string(),
            })?;
        EvalResponse::from_response_text(&text)
    }
}
