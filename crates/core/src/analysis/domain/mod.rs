pub mod noun_frequency;
pub mod pos_classifier;
pub mod pos_summary;
pub mod speaker_aggregator;
pub mod speech_analysis;
pub mod transcript_row;
