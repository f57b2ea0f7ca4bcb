//! CSV input and output for scan runs.
//!
//! The repository list is a CSV file with a header row; one named column
//! holds repository URLs. Matches are appended to a second CSV file as they
//! are found, so an interrupted run keeps everything recorded so far.

mod input;
mod output;

pub use input::{read_repository_urls, read_repository_urls_from};
pub use output::{CsvMatchSink, RESULT_HEADERS};

use crate::github::ScanError;

fn csv_error(error: &csv::Error) -> ScanError {
    if let csv::ErrorKind::Io(io_error) = error.kind() {
        return ScanError::Io {
            message: io_error.to_string(),
        };
    }
    ScanError::Csv {
        message: error.to_string(),
    }
}
