use super::image_metadata::ImageMetadata;

/// Domain interface for persisting image metadata records.
pub trait MetadataSink: Send {
    fn insert(&mut self, metadata: &ImageMetadata) -> Result<(), Box<dyn std::error::Error>>;
}
