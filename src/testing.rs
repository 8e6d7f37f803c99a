//! Stand-in completion service for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::chat::{ChatMessage, ChatProvider, ChatResponse, StructuredOutputFormat};
use crate::error::LLMError;

type Responder = dyn Fn(usize, &[ChatMessage]) -> Result<String, LLMError> + Send + Sync;

#[derive(Debug)]
pub(crate) struct TextResponse(pub(crate) String);

impl std::fmt::Display for TextResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ChatResponse for TextResponse {
    fn text(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Answers each call through a closure given the 1-based call number and the
/// messages, and keeps a log of everything it was sent.
pub(crate) struct ScriptedProvider {
    respond: Box<Responder>,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl ScriptedProvider {
    pub(crate) fn new<F>(respond: F) -> Self
    where
        F: Fn(usize, &[ChatMessage]) -> Result<String, LLMError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn always_rate_limited() -> Self {
        Self::new(|_, _| Err(LLMError::RateLimited("Too many requests".into())))
    }

    /// Rate-limits the first `failures` calls, then answers with `body`.
    pub(crate) fn rate_limited_then(failures: usize, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |call, _| {
            if call <= failures {
                Err(LLMError::RateLimited("Too many requests".into()))
            } else {
                Ok(body.clone())
            }
        })
    }

    pub(crate) fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub(crate) fn seen_messages(&self) -> Arc<Mutex<Vec<Vec<ChatMessage>>>> {
        Arc::clone(&self.seen)
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat_structured(
        &self,
        messages: &[ChatMessage],
        _format: &StructuredOutputFormat,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.seen.lock().unwrap().push(messages.to_vec());
        let text = (self.respond)(call, messages)?;
        Ok(Box::new(TextResponse(text)))
    }
}
