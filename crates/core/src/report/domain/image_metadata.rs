use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::constants::WORDCLOUD_IMAGE_TYPE;

use super::report_request::ReportRequest;

/// Persisted record describing one rendered report image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub image_id: String,
    pub speaker: String,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub image_type: String,
    pub image_path: String,
}

impl ImageMetadata {
    pub fn wordcloud(
        image_id: impl Into<String>,
        speaker: impl Into<String>,
        request: &ReportRequest,
        image_path: &Path,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            speaker: speaker.into(),
            user_id: request.user_id.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            image_type: WORDCLOUD_IMAGE_TYPE.to_string(),
            image_path: image_path.to_string_lossy().into_owned(),
        }
    }
}
