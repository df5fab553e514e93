use serde::{Deserialize, Serialize};

/// One transcribed utterance as returned by the transcript source.
///
/// `speaker` keys the text reports; `speaker_label` keys the word clouds.
/// Both may differ when diarized speakers are later relabelled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRow {
    #[serde(deserialize_with = "crate::shared::lenient_string::deserialize")]
    pub speaker: String,
    #[serde(
        default,
        deserialize_with = "crate::shared::lenient_string::deserialize"
    )]
    pub speaker_label: String,
    #[serde(
        default,
        deserialize_with = "crate::shared::lenient_string::deserialize"
    )]
    pub text_edited: String,
}

impl TranscriptRow {
    pub fn new(
        speaker: impl Into<String>,
        speaker_label: impl Into<String>,
        text_edited: impl Into<String>,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            speaker_label: speaker_label.into(),
            text_edited: text_edited.into(),
        }
    }
}
