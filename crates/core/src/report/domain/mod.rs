pub mod image_metadata;
pub mod metadata_sink;
pub mod report_request;
pub mod transcript_source;
