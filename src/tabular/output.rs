//! Appending matches to the result file.

use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::github::{ScanError, TestMatch};
use crate::scan::MatchSink;

use super::csv_error;

/// Header row of the result file.
pub const RESULT_HEADERS: [&str; 6] = [
    "owner",
    "repository",
    "pr_number",
    "pr_title",
    "pr_url",
    "test_file",
];

/// [`MatchSink`] appending one CSV row per match, flushed immediately.
///
/// The header row is written only when the file is created, so repeated
/// runs against the same path accumulate rows under a single header.
pub struct CsvMatchSink {
    writer: csv::Writer<File>,
}

impl CsvMatchSink {
    /// Opens `path` for appending, creating it with a header row if absent.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Io`] when the file cannot be opened or the
    /// header cannot be written.
    pub fn open(path: &Path) -> Result<Self, ScanError> {
        let io_error = |error: std::io::Error| ScanError::Io {
            message: format!("{}: {error}", path.display()),
        };

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(io_error)?;
        let is_new = file.metadata().map_err(io_error)?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer
                .write_record(RESULT_HEADERS)
                .map_err(|error| csv_error(&error))?;
            writer.flush().map_err(io_error)?;
        }

        tracing::debug!(path = %path.display(), created = is_new, "opened result file");
        Ok(Self { writer })
    }
}

impl MatchSink for CsvMatchSink {
    fn record(&mut self, test_match: &TestMatch) -> Result<(), ScanError> {
        self.writer
            .serialize(test_match)
            .map_err(|error| csv_error(&error))?;
        self.writer.flush().map_err(|error| ScanError::Io {
            message: error.to_string(),
        })
    }
}
