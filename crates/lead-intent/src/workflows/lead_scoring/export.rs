use std::io::Write;

use super::domain::ScoredLead;

/// Column order of exported result sheets.
pub const EXPORT_COLUMNS: [&str; 6] = ["name", "role", "company", "intent", "score", "reasoning"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV export: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Writes the header row followed by one row per scored lead. The header is always written.
pub fn write_csv<W: Write>(writer: W, results: &[ScoredLead]) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(EXPORT_COLUMNS)?;
    for result in results {
        csv_writer.serialize(result)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string(results: &[ScoredLead]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, results)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn to_json_string(results: &[ScoredLead]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}
