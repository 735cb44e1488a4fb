//! Configuration module for gpio-diagram
//!
//! This module handles:
//! - Editor configuration (`EditorConfig`, TOML) chosen with `--config`
//! - Application state persistence (recent scenes, last session)
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.hxyulin.gpio-diagram/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.gpio-diagram/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.gpio-diagram\`
//!
//! # Files
//!
//! - `app_state.json` - Recent scenes and last session info
//! - `logs/` - Daily rolling log files
//!
//! # Example
//!
//! ```ignore
//! use gpio_diagram::config::{AppState, EditorConfig};
//!
//! let config = EditorConfig::load_or_default(Path::new("gpio-diagram.toml"));
//! let mut state = AppState::load_or_default();
//! state.add_recent_scene(&config.default_scene_file);
//! state.save()?;
//! ```

pub mod editor;

pub use editor::EditorConfig;

use crate::error::{DiagramError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.hxyulin.gpio-diagram";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Scene file extension
pub const SCENE_FILE_EXTENSION: &str = "json";

/// Maximum number of recent scenes to remember
pub const MAX_RECENT_SCENES: usize = 10;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        DiagramError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            DiagramError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

/// Directory for rolling log files
pub fn log_dir() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join("logs"))
}

// ==================== Recent Scene Entry ====================

/// A recently opened or saved scene file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentScene {
    pub path: PathBuf,

    /// Last opened timestamp (Unix seconds)
    pub last_opened: u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl RecentScene {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_opened: unix_now(),
        }
    }

    /// File name for menus
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

// ==================== App State ====================

/// Persistent application state
///
/// History and preferences that outlive a single scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// Most recent first
    #[serde(default)]
    pub recent_scenes: Vec<RecentScene>,

    #[serde(default)]
    pub last_scene_path: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub dark_mode: bool,
}

fn default_app_state_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            recent_scenes: Vec::new(),
            last_scene_path: None,
            dark_mode: true,
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            DiagramError::Config("Could not determine app state path".to_string())
        })?;
        Self::load_from(&path)
    }

    /// Load app state from a specific file; a missing file gives defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DiagramError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| DiagramError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(APP_STATE_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DiagramError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| DiagramError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Move a scene to the front of the recent list
    pub fn add_recent_scene(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();

        self.recent_scenes.retain(|s| s.path != path);
        self.recent_scenes.insert(0, RecentScene::new(path.clone()));
        self.recent_scenes.truncate(MAX_RECENT_SCENES);

        self.last_scene_path = Some(path);
    }

    pub fn remove_recent_scene(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.recent_scenes.retain(|s| s.path != path);

        if self.last_scene_path.as_deref() == Some(path) {
            self.last_scene_path = None;
        }
    }

    /// Drop recent scenes whose files no longer exist
    pub fn cleanup_missing_scenes(&mut self) {
        self.recent_scenes.retain(|s| s.exists());

        if let Some(ref last) = self.last_scene_path {
            if !last.exists() {
                self.last_scene_path = None;
            }
        }
    }

    /// The last scene path, if that file still exists
    pub fn last_scene(&self) -> Option<&Path> {
        self.last_scene_path
            .as_deref()
            .filter(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_scenes_dedup_and_order() {
        let mut state = AppState::default();
        state.add_recent_scene("/a.json");
        state.add_recent_scene("/b.json");
        state.add_recent_scene("/a.json");

        let paths: Vec<_> = state.recent_scenes.iter().map(|s| s.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("/a.json"), PathBuf::from("/b.json")]);
        assert_eq!(state.last_scene_path, Some(PathBuf::from("/a.json")));
    }

    #[test]
    fn test_recent_scenes_limit() {
        let mut state = AppState::default();
        for i in 0..15 {
            state.add_recent_scene(format!("/scenes/scene{}.json", i));
        }
        assert_eq!(state.recent_scenes.len(), MAX_RECENT_SCENES);
        assert_eq!(state.recent_scenes[0].display_name(), "scene14.json");
    }

    #[test]
    fn test_remove_recent_scene_clears_last() {
        let mut state = AppState::default();
        state.add_recent_scene("/a.json");
        state.remove_recent_scene("/a.json");
        assert!(state.recent_scenes.is_empty());
        assert_eq!(state.last_scene_path, None);
    }

    #[test]
    fn test_cleanup_missing_scenes() {
        let dir = tempfile::tempdir().unwrap();
        let kept = dir.path().join("kept.json");
        std::fs::write(&kept, "{}").unwrap();

        let mut state = AppState::default();
        state.add_recent_scene(&kept);
        state.add_recent_scene(dir.path().join("gone.json"));
        state.cleanup_missing_scenes();

        assert_eq!(state.recent_scenes.len(), 1);
        assert_eq!(state.recent_scenes[0].path, kept);
        assert_eq!(state.last_scene_path, None);
    }

    #[test]
    fn test_app_state_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_STATE_FILE);

        let mut state = AppState::default();
        state.dark_mode = false;
        state.add_recent_scene("/x/qq.json");
        state.save_to(&path).unwrap();

        let loaded = AppState::load_from(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_app_state_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppState::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, AppState::default());
    }
}
