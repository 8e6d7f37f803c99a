use std::future::Future;

use crate::{chat::ChatProvider, error::LLMError};

use super::config::ResilienceConfig;
use super::sleeper::{Sleeper, TokioSleeper};

/// Resilient wrapper that retries rate-limited calls using exponential backoff.
///
/// Only [`LLMError::RateLimited`] is retried. Every other error reaches the
/// caller on its first occurrence. After `max_attempts` rate-limited calls
/// the wrapper gives up with [`LLMError::RetryExceeded`].
pub struct ResilientLLM {
    pub(super) inner: Box<dyn ChatProvider>,
    pub(super) cfg: ResilienceConfig,
    sleeper: Box<dyn Sleeper>,
}

impl ResilientLLM {
    /// Creates a new resilient wrapper around an existing provider.
    pub fn new(inner: Box<dyn ChatProvider>, cfg: ResilienceConfig) -> Self {
        Self {
            inner,
            cfg,
            sleeper: Box::new(TokioSleeper),
        }
    }

    /// Replaces the tokio timer used between attempts.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn config(&self) -> &ResilienceConfig {
        &self.cfg
    }

    pub(super) async fn retry<F, Fut, T>(&self, mut op: F) -> Result<T, LLMError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LLMError>>,
    {
        let max_attempts = self.cfg.max_attempts.max(1);
        let mut tries = 0usize;

        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_rate_limited() => err,
                Err(err) => return Err(err),
            };

            tries += 1;
            let wait = self.cfg.delay_for(tries);
            if tries < max_attempts {
                log::warn!(
                    "Rate limit exceeded. Retrying in {} seconds... ({tries}/{max_attempts})",
                    wait.as_secs()
                );
            } else {
                log::warn!(
                    "Rate limit exceeded on final attempt, waiting {} seconds before giving up",
                    wait.as_secs()
                );
            }
            self.sleeper.sleep(wait).await;

            if tries >= max_attempts {
                return Err(LLMError::RetryExceeded {
                    attempts: tries,
                    last_error: err.to_string(),
                });
            }
        }
    }
}
