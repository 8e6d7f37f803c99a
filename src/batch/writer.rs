use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::BatchError;
use crate::evaluator::OutputRow;

pub const OUTPUT_COLUMNS: [&str; 6] = [
    "ticket",
    "reply",
    "content_score",
    "content_explanation",
    "format_score",
    "format_explanation",
];

pub fn write_output(path: impl AsRef<Path>, rows: &[OutputRow]) -> Result<(), BatchError> {
    let path = path.as_ref();
    log::debug!("Writing {} rows to {}", rows.len(), path.display());
    write_output_to(File::create(path)?, rows)
}

/// Writes the header and one line per row. The header is written even when
/// there are no rows.
pub fn write_output_to<W: io::Write>(writer: W, rows: &[OutputRow]) -> Result<(), BatchError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        wtr.write_record(OUTPUT_COLUMNS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
