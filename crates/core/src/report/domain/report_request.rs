use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One user's transcripts over an inclusive date window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReportRequest {
    pub fn new(user_id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            start_date,
            end_date,
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
