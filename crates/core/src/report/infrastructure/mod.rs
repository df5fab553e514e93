pub mod json_lines_metadata_sink;
pub mod json_transcript_source;
