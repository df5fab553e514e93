use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::analysis::domain::transcript_row::TranscriptRow;
use crate::report::domain::report_request::ReportRequest;
use crate::report::domain::transcript_source::TranscriptSource;

/// Stored form of a transcript row: the row plus its owner and date.
#[derive(Deserialize)]
struct StoredRow {
    #[serde(deserialize_with = "crate::shared::lenient_string::deserialize")]
    user_id: String,
    date: NaiveDate,
    #[serde(flatten)]
    row: TranscriptRow,
}

/// Reads transcript rows from a JSON array file.
///
/// Each element carries `user_id`, `date` (`YYYY-MM-DD`), `speaker`,
/// `speaker_label` and `text_edited`. Rows are filtered to the request's
/// user and inclusive date window, keeping file order.
pub struct JsonTranscriptSource {
    path: PathBuf,
}

impl JsonTranscriptSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl TranscriptSource for JsonTranscriptSource {
    fn fetch(
        &self,
        request: &ReportRequest,
    ) -> Result<Vec<TranscriptRow>, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {}: {e}", self.path.display()))?;
        let stored: Vec<StoredRow> = serde_json::from_str(&json)
            .map_err(|e| format!("Invalid transcript file {}: {e}", self.path.display()))?;

        let rows: Vec<TranscriptRow> = stored
            .into_iter()
            .filter(|s| s.user_id == request.user_id && request.covers(s.date))
            .map(|s| s.row)
            .collect();
        log::info!(
            "Fetched {} rows for user {} ({} to {})",
            rows.len(),
            request.user_id,
            request.start_date,
            request.end_date
        );
        Ok(rows)
    }
}
