use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wordlens_core::shared::constants::{DEFAULT_FONT_PATH, DEFAULT_MECAB_COMMAND};
use wordlens_core::wordcloud::domain::cloud_options::CloudOptions;

/// Persistent defaults, overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub font_path: PathBuf,
    pub output_dir: PathBuf,
    pub metadata_path: PathBuf,
    pub mecab_command: String,
    pub mecab_args: Vec<String>,
    pub cloud: CloudOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            output_dir: PathBuf::from("wordclouds"),
            metadata_path: PathBuf::from("wordclouds").join("image_metadata.jsonl"),
            mecab_command: DEFAULT_MECAB_COMMAND.to_string(),
            mecab_args: Vec::new(),
            cloud: CloudOptions::default(),
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("WordLens").join("settings.json"))
    }

    /// Loads settings from `explicit` when given (errors are reported),
    /// else from the user config file when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match Self::config_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .map_err(|e| format!("Invalid settings {}: {e}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"mecab_command": "/opt/mecab/bin/mecab", "cloud": {"max_words": 80}}"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.mecab_command, "/opt/mecab/bin/mecab");
        assert_eq!(settings.cloud.max_words, 80);
        assert_eq!(settings.cloud.max_font_size, 100);
        assert_eq!(settings.output_dir, PathBuf::from("wordclouds"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/settings.json"))).is_err());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{").unwrap();
        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }
}
