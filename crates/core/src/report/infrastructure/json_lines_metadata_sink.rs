use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::report::domain::image_metadata::ImageMetadata;
use crate::report::domain::metadata_sink::MetadataSink;

/// Appends metadata records to a file, one JSON object per line.
pub struct JsonLinesMetadataSink {
    path: PathBuf,
}

impl JsonLinesMetadataSink {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataSink for JsonLinesMetadataSink {
    fn insert(&mut self, metadata: &ImageMetadata) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(metadata)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
