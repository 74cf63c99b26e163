// Application settings
// Loaded from ~/.config/tabula/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Body rows kept when a large file is loaded as a preview.
    #[serde(rename = "file.previewRowLimit")]
    pub preview_row_limit: usize,

    /// File size in megabytes from which a load is offered as a preview.
    #[serde(rename = "file.largeFileMB")]
    pub large_file_mb: u64,

    /// Whether large files are previewed at all. When false every file
    /// loads in full regardless of size.
    #[serde(rename = "file.previewLargeFiles")]
    pub preview_large_files: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preview_row_limit: 10_000,
            large_file_mb: 50,
            preview_large_files: true,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tabula");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file();
            return settings;
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&strip_comments(&contents)) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Error parsing settings.json: {}", e);
                    eprintln!("Using default settings");
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(&path, json).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(&self) {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // File handling
    // Files at or above "file.largeFileMB" load as a preview of the
    // first "file.previewRowLimit" body rows.
    "file.previewRowLimit": 10000,
    "file.largeFileMB": 50,
    "file.previewLargeFiles": true
}
"#;

        if let Err(e) = fs::write(&path, default_config) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }

    /// True when a file of `byte_len` bytes should be offered as a
    /// preview load instead of a full load.
    pub fn should_preview(&self, byte_len: u64) -> bool {
        self.preview_large_files && byte_len >= self.large_file_mb.saturating_mul(1024 * 1024)
    }
}

/// Strip comments (lines starting with //) so the settings file can be
/// annotated without breaking the JSON parser.
fn strip_comments(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.trim().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.preview_row_limit, 10_000);
        assert_eq!(settings.large_file_mb, 50);
        assert!(settings.preview_large_files);
    }

    #[test]
    fn test_parse_dotted_keys_with_comments() {
        let raw = r#"{
    // preview tuning
    "file.previewRowLimit": 250,
    "file.largeFileMB": 10,
    "file.previewLargeFiles": false
}
"#;
        let settings: Settings = serde_json::from_str(&strip_comments(raw)).unwrap();
        assert_eq!(settings.preview_row_limit, 250);
        assert_eq!(settings.large_file_mb, 10);
        assert!(!settings.preview_large_files);
    }

    #[test]
    fn test_missing_and_unknown_fields() {
        let settings: Settings =
            serde_json::from_str(r#"{"file.largeFileMB": 5, "ui.someOldKey": true}"#).unwrap();
        assert_eq!(settings.large_file_mb, 5);
        assert_eq!(settings.preview_row_limit, 10_000);
    }

    #[test]
    fn test_should_preview_threshold() {
        let mut settings = Settings::default();
        settings.large_file_mb = 1;
        assert!(!settings.should_preview(1024 * 1024 - 1));
        assert!(settings.should_preview(1024 * 1024));

        settings.preview_large_files = false;
        assert!(!settings.should_preview(u64::MAX));
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let template = r#"{
    // File handling
    "file.previewRowLimit": 10000,
    "file.largeFileMB": 50,
    "file.previewLargeFiles": true
}
"#;
        let settings: Settings = serde_json::from_str(&strip_comments(template)).unwrap();
        assert_eq!(settings.preview_row_limit, Settings::default().preview_row_limit);
        assert_eq!(settings.large_file_mb, Settings::default().large_file_mb);
    }
}
