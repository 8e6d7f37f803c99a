use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;

use crate::error::BatchError;
use crate::evaluator::EvalRequest;

pub const TICKET_COLUMN: &str = "ticket";
pub const REPLY_COLUMN: &str = "reply";

/// Reads every row of a CSV file into an [`EvalRequest`], numbered from 0.
pub fn read_tickets(path: impl AsRef<Path>) -> Result<Vec<EvalRequest>, BatchError> {
    let path = path.as_ref();
    log::debug!("Reading tickets from {}", path.display());
    read_tickets_from(File::open(path)?)
}

/// Same as [`read_tickets`] for any reader. Only the `ticket` and `reply`
/// columns are used; they may appear in any position.
pub fn read_tickets_from<R: io::Read>(reader: R) -> Result<Vec<EvalRequest>, BatchError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let ticket_idx = column_index(&headers, TICKET_COLUMN)?;
    let reply_idx = column_index(&headers, REPLY_COLUMN)?;

    rdr.records()
        .enumerate()
        .map(|(id, record)| -> Result<EvalRequest, BatchError> {
            let record = record?;
            Ok(EvalRequest::new(
                id,
                record.get(ticket_idx).unwrap_or_default(),
                record.get(reply_idx).unwrap_or_default(),
            ))
        })
        .collect()
}

fn column_index(headers: &StringRecord, name: &'static str) -> Result<usize, BatchError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(BatchError::MissingColumn(name))
}
