// Recently opened files
// Stored in ~/.config/tabula/recent_files.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How many entries the recent-files list keeps.
pub const MAX_RECENT_FILES: usize = 5;

/// Most-recent-first list of opened file paths, deduplicated by path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentFiles {
    paths: Vec<PathBuf>,
}

impl RecentFiles {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tabula")
            .join("recent_files.json")
    }

    /// Loads the list from disk; any failure yields an empty list.
    pub fn load() -> Self {
        fs::read_to_string(Self::path())
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), String> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(&path, json).map_err(|e| e.to_string())
    }

    /// Moves `path` to the front, dropping any older entry for the same
    /// path and anything beyond the cap.
    pub fn record(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
        self.paths.insert(0, path.to_path_buf());
        self.paths.truncate(MAX_RECENT_FILES);
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn most_recent(&self) -> Option<&Path> {
        self.paths.first().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}
