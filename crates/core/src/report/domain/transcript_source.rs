use crate::analysis::domain::transcript_row::TranscriptRow;

use super::report_request::ReportRequest;

/// Domain interface for fetching a user's transcript rows in a date window.
pub trait TranscriptSource: Send {
    fn fetch(
        &self,
        request: &ReportRequest,
    ) -> Result<Vec<TranscriptRow>, Box<dyn std::error::Error>>;
}
