//! Scoring a single ticket/reply pair against the support-quality rubric.

#[path = "evaluator/types.rs"]
mod types;

#[path = "evaluator/prompt.rs"]
mod prompt;

#[path = "evaluator/ticket.rs"]
mod ticket;


pub use prompt::{eval_response_format, format_ticket_and_reply, SYSTEM_PROMPT};
pub use ticket::TicketEvaluator;
pub use types::{EvalRequest, EvalResponse, OutputRow, MAX_SCORE, MIN_SCORE};
