//! Reading a ticket table, evaluating it row by row, writing the scores out.

#[path = "batch/reader.rs"]
mod reader;

#[path = "batch/writer.rs"]
mod writer;

#[path = "batch/runner.rs"]
mod runner;

pub use reader::{read_tickets, read_tickets_from, REPLY_COLUMN, TICKET_COLUMN};
pub use runner::{evaluate_tickets, evaluate_tickets_usecase, BatchSummary};
pub use writer::{write_output, write_output_to, OUTPUT_COLUMNS};
