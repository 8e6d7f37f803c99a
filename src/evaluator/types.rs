use serde::{Deserialize, Serialize};

use crate::error::LLMError;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// One ticket/reply pair to be scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalRequest {
    /// Row index in the input batch, starting at 0.
    pub id: usize,
    pub ticket: String,
    pub reply: String,
}

impl EvalRequest {
    pub fn new(id: usize, ticket: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            id,
            ticket: ticket.into(),
            reply: reply.into(),
        }
    }
}

/// The model's verdict on a reply, as constrained by the response schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalResponse {
    pub content_score: u8,
    pub content_explanation: String,
    pub format_score: u8,
    pub format_explanation: String,
}

impl EvalResponse {
    /// Parses the raw structured output and checks both scores are in range.
    pub fn from_response_text(text: &str) -> Result<Self, LLMError> {
        let parsed: EvalResponse =
            serde_json::from_str(text).map_err(|e| LLMError::ResponseFormatError {
                message: format!("Evaluation does not match the expected shape: {e}"),
                raw_response: text.to_string(),
            })?;
        parsed.validate(text)?;
        Ok(parsed)
    }

    fn validate(&self, raw: &str) -> Result<(), LLMError> {
        for (field, score) in [
            ("content_score", self.content_score),
            ("format_score", self.format_score),
        ] {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(LLMError::ResponseFormatError {
                    message: format!(
                        "{field} {score} is outside {MIN_SCORE}..={MAX_SCORE}"
                    ),
                    raw_response: raw.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A request and its evaluation flattened into one output table row.
///
/// Field order is the column order of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub ticket: String,
    pub reply: String,
    pub content_score: u8,
    pub content_explanation: String,
    pub format_score: u8,
    pub format_explanation: String,
}

impl OutputRow {
    pub fn from_evaluation(request: &EvalRequest, evaluation: EvalResponse) -> Self {
        Self {
            ticket: request.ticket.clone(),
            reply: request.reply.clone(),
            content_score: evaluation.content_score,
            content_explanation: evaluation.content_explanation,
            format_score: evaluation.format_score,
            format_explanation: evaluation.format_explanation,
        }
    }
}
