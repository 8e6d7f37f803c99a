//! Score support-ticket replies with an LLM rubric.
//!
//! A batch is read from CSV, each ticket/reply pair is sent to a completion
//! service that answers with a JSON-schema constrained verdict, and the
//! verdicts are written back out as CSV. Calls that hit the service's rate
//! limit are retried with exponential backoff.
//!
//! ```no_run
//! use ticket_eval::{
//!     backends::openai::OpenAI,
//!     batch::{evaluate_tickets_usecase, read_tickets},
//!     evaluator::{TicketEvaluator, SYSTEM_PROMPT},
//!     resilient_llm::ResilienceConfig,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OpenAI::new(std::env::var("OPENAI_API_KEY")?, None, None, None, None)?;
//! let evaluator = TicketEvaluator::new(
//!     Box::new(provider),
//!     SYSTEM_PROMPT,
//!     ResilienceConfig::defaults(),
//! );
//! let tickets = read_tickets("tickets.csv")?;
//! evaluate_tickets_usecase(&tickets, &evaluator, "tickets_evaluated.csv").await?;
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod batch;
pub mod chat;
pub mod error;
pub mod evaluator;
pub mod resilient_llm;

#[cfg(test)]
mod testing;

pub use chat::{ChatMessage, ChatProvider, ChatResponse};
pub use error::{BatchError, LLMError};
pub use evaluator::{EvalRequest, EvalResponse, OutputRow, TicketEvaluator};
