//! Delimited text exports (`;` by default).

use std::path::Path;

use migrate_model::RawRecord;

use crate::error::{IngestError, Result};

/// Parses delimited text with a header row.
///
/// Header names are trimmed and blank headers are skipped. Rows may be
/// shorter than the header; missing trailing cells are absent. Values are
/// kept untrimmed.
pub fn parse_delimited(text: &str, delimiter: u8, path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let mut row = RawRecord::new();
        for (column, value) in headers.iter().zip(record.iter()) {
            if column.is_empty() {
                continue;
            }
            row.insert(column.as_str(), value);
        }
        rows.push(row);
    }

    Ok(rows)
}

fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}
