//! Editor configuration file
//!
//! A small TOML file, all keys optional:
//!
//! ```toml
//! default_scene_file = "qq.json"
//! poll_interval_ms = 1000
//! start_simulating = true
//! shutdown_timeout_ms = 1000
//! canvas_width = 800.0
//! canvas_height = 600.0
//! ```

use crate::error::{DiagramError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Scene file used when none is given on the command line
pub const DEFAULT_SCENE_FILE: &str = "qq.json";

/// Default poll interval in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default bounded wait for the poll thread on exit
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 1000;

/// Editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Scene loaded at startup and offered by Save
    pub default_scene_file: PathBuf,

    /// Time between pin poll cycles
    pub poll_interval_ms: u64,

    /// Start with simulated GPIO even when hardware is attached
    pub start_simulating: bool,

    /// How long to wait for the poll thread on exit
    pub shutdown_timeout_ms: u64,

    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_scene_file: PathBuf::from(DEFAULT_SCENE_FILE),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            start_simulating: true,
            shutdown_timeout_ms: DEFAULT_SHUTDOWN_TIMEOUT_MS,
            canvas_width: 800.0,
            canvas_height: 600.0,
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DiagramError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            DiagramError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load the config, returning defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Using default editor config: {}", e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DiagramError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| DiagramError::Config(format!("Failed to write config: {}", e)))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}
