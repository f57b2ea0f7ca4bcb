//! Destination for matches found by a scan.

use crate::github::{ScanError, TestMatch};

/// Receives each [`TestMatch`] as soon as it is found.
pub trait MatchSink {
    /// Records one match.
    ///
    /// # Errors
    ///
    /// Returns an error when the match cannot be stored; the scan aborts.
    fn record(&mut self, test_match: &TestMatch) -> Result<(), ScanError>;
}

impl MatchSink for Vec<TestMatch> {
    fn record(&mut self, test_match: &TestMatch) -> Result<(), ScanError> {
        self.push(test_match.clone());
        Ok(())
    }
}
