use std::path::Path;

use crate::error::BatchError;
use crate::evaluator::{EvalRequest, OutputRow, TicketEvaluator};

use super::writer::write_output;

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub evaluated: usize,
    /// Ids of rows that could not be evaluated and were left out of the output.
    pub failed: Vec<usize>,
}

impl BatchSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Evaluates tickets one after another, in order.
///
/// A ticket whose evaluation fails is logged and skipped; the rest of the
/// batch still runs. Returned rows keep the input order.
pub async fn evaluate_tickets(
    tickets: &[EvalRequest],
    evaluator: &TicketEvaluator,
) -> (Vec<OutputRow>, BatchSummary) {
    let mut rows = Vec::with_capacity(tickets.len());
    let mut summary = BatchSummary {
        total: tickets.len(),
        ..BatchSummary::default()
    };

    for ticket in tickets {
        log::info!("Evaluating ticket: {}", ticket.id);
        match evaluator.generate_evaluation(ticket).await {
            Ok(evaluation) => {
                rows.push(OutputRow::from_evaluation(ticket, evaluation));
                summary.evaluated += 1;
            }
            Err(err) => {
                log::warn!("Failed to evaluate ticket: {} due to: {err}", ticket.id);
                summary.failed.push(ticket.id);
            }
        }
    }

    (rows, summary)
}

/// Runs the whole batch and writes the evaluated rows to `output_path` once
/// every ticket has been attempted.
pub async fn evaluate_tickets_usecase(
    tickets: &[EvalRequest],
    evaluator: &TicketEvaluator,
    output_path: impl AsRef<Path>,
) -> Result<BatchSummary, BatchError> {
    let (rows, summary) = evaluate_tickets(tickets, evaluator).await;
    write_output(output_path, &rows)?;
    log::info!(
        "Evaluated {}/{} tickets ({} failed)",
        summary.evaluated,
        summary.total,
        summary.failed.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use serde_json::json;

    use super::*;
    use crate::batch::read_tickets;
    use crate::chat::{ChatMessage, ChatRole};
    use crate::error::LLMError;
    use crate::evaluator::SYSTEM_PROMPT;
    use crate::resilient_llm::{RecordingSleeper, ResilienceConfig};
    use crate::testing::ScriptedProvider;

    fn user_turn(messages: &[ChatMessage]) -> &str {
        messages
            .iter()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }

    fn verdict(content_score: u8) -> String {
        json!({
            "content_score": content_score,
            "content_explanation": "relevant",
            "format_score": 5,
            "format_explanation": "clean"
        })
        .to_string()
    }

    fn evaluator(provider: ScriptedProvider) -> TicketEvaluator {
        TicketEvaluator::new(
            Box::new(provider),
            SYSTEM_PROMPT,
            ResilienceConfig::defaults().with_max_attempts(2),
        )
        .with_sleeper(RecordingSleeper::default())
    }

    #[tokio::test]
    async fn scenario_row_is_flattened_verbatim() {
        let evaluator = evaluator(ScriptedProvider::new(|_, _| Ok(verdict(4))));
        let tickets = vec![EvalRequest::new(0, "Hi, I need help", "Sure, how can I help?")];

        let (rows, summary) = evaluate_tickets(&tickets, &evaluator).await;

        assert_eq!(
            rows,
            vec![OutputRow {
                ticket: "Hi, I need help".into(),
                reply: "Sure, how can I help?".into(),
                content_score: 4,
                content_explanation: "relevant".into(),
                format_score: 5,
                format_explanation: "clean".into(),
            }]
        );
        assert!(summary.is_complete());
    }

    #[tokio::test]
    async fn failed_row_is_skipped_and_batch_continues() {
        let provider = ScriptedProvider::new(|_, messages| {
            if user_turn(messages).contains("ticket: broken") {
                Err(LLMError::ProviderError("boom".into()))
            } else {
                Ok(verdict(3))
            }
        });
        let calls = provider.call_counter();
        let evaluator = evaluator(provider);
        let tickets = vec![
            EvalRequest::new(0, "first", "a"),
            EvalRequest::new(1, "broken", "b"),
            EvalRequest::new(2, "third", "c"),
        ];

        let (rows, summary) = evaluate_tickets(&tickets, &evaluator).await;

        let kept: Vec<&str> = rows.iter().map(|r| r.ticket.as_str()).collect();
        assert_eq!(kept, vec!["first", "third"]);
        assert_eq!(
            summary,
            BatchSummary {
                total: 3,
                evaluated: 2,
                failed: vec![1],
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_retries_fail_only_that_row() {
        let provider = ScriptedProvider::new(|_, messages| {
            if user_turn(messages).contains("ticket: busy") {
                Err(LLMError::RateLimited("Too many requests".into()))
            } else {
                Ok(verdict(2))
            }
        });
        let calls = provider.call_counter();
        let evaluator = evaluator(provider);
        let tickets = vec![
            EvalRequest::new(0, "busy", "a"),
            EvalRequest::new(1, "calm", "b"),
        ];

        let (rows, summary) = evaluate_tickets(&tickets, &evaluator).await;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticket, "calm");
        assert_eq!(summary.failed, vec![0]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn csv_in_csv_out_keeps_every_row_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tickets.csv");
        let output = dir.path().join("tickets_evaluated.csv");
        std::fs::write(
            &input,
            "ticket,reply\n\"Hi, I need help\",\"Sure, how can I help?\"\nWhere is my order?,It ships tomorrow.\nRefund please,Done.\n",
        )
        .unwrap();

        let evaluator = evaluator(ScriptedProvider::new(|call, _| Ok(verdict(call as u8))));
        let tickets = read_tickets(&input).unwrap();
        let summary = evaluate_tickets_usecase(&tickets, &evaluator, &output)
            .await
            .unwrap();

        assert_eq!(summary.evaluated, 3);
        let mut rdr = csv::Reader::from_path(&output).unwrap();
        let rows: Vec<OutputRow> = rdr.deserialize().collect::<Result<_, _>>().unwrap();
        let pairs: Vec<(&str, &str, u8)> = rows
            .iter()
            .map(|r| (r.ticket.as_str(), r.reply.as_str(), r.content_score))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Hi, I need help", "Sure, how can I help?", 1),
                ("Where is my order?", "It ships tomorrow.", 2),
                ("Refund please", "Done.", 3),
            ]
        );
        assert!(rows
            .iter()
            .all(|r| (1..=5).contains(&r.content_score) && (1..=5).contains(&r.format_score)));
    }

    #[tokio::test]
    async fn all_rows_failing_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let evaluator = evaluator(ScriptedProvider::new(|_, _| {
            Err(LLMError::HttpError("connection refused".into()))
        }));
        let tickets = vec![EvalRequest::new(0, "a", "b")];

        let summary = evaluate_tickets_usecase(&tickets, &evaluator, &output)
            .await
            .unwrap();

        assert!(!summary.is_complete());
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.starts_with("ticket,reply,content_score"));
    }
}
