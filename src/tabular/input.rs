//! Reading the repository URL list.

use std::io::Read;
use std::path::Path;

use crate::github::ScanError;

use super::csv_error;

/// Reads the non-empty cells of `column` from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`ScanError::Io`] when the file cannot be opened and
/// [`ScanError::Csv`] when it is malformed or lacks `column`.
pub fn read_repository_urls(path: &Path, column: &str) -> Result<Vec<String>, ScanError> {
    let file = std::fs::File::open(path).map_err(|error| ScanError::Io {
        message: format!("{}: {error}", path.display()),
    })?;
    read_repository_urls_from(file, column)
}

/// Reads the non-empty cells of `column` from CSV `source`.
///
/// Cells are trimmed; rows whose cell is blank are skipped without comment.
///
/// # Errors
///
/// Returns [`ScanError::Csv`] when the data is malformed or the header row
/// lacks `column`.
pub fn read_repository_urls_from<Source: Read>(
    source: Source,
    column: &str,
) -> Result<Vec<String>, ScanError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let index = reader
        .headers()
        .map_err(|error| csv_error(&error))?
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| ScanError::Csv {
            message: format!("input has no `{column}` column"),
        })?;

    let mut urls = Vec::new();
    for record in reader.records() {
        let row = record.map_err(|error| csv_error(&error))?;
        if let Some(cell) = row.get(index).filter(|cell| !cell.is_empty()) {
            urls.push(cell.to_owned());
        }
    }

    tracing::debug!(column, count = urls.len(), "read repository list");
    Ok(urls)
}
