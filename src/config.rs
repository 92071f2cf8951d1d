//! Editor configuration
//!
//! Configuration is a flat JSON file. Every field has a default so a
//! partial file (or no file at all) is valid; a malformed file is
//! reported and replaced by the defaults rather than aborting startup.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Editor behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Interval between auto-save sweeps, in milliseconds.
    /// Every modified buffer with a file path is saved each time the
    /// interval elapses. Set to 0 to disable auto-save.
    #[serde(default = "default_auto_save_interval_ms")]
    pub auto_save_interval_ms: u64,

    /// Whether a missed search retries once from the opposite end of the
    /// document before reporting "not found".
    #[serde(default = "default_true")]
    pub wrap_search: bool,
}

fn default_auto_save_interval_ms() -> u64 {
    300_000 // 5 minutes
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auto_save_interval_ms: default_auto_save_interval_ms(),
            wrap_search: default_true(),
        }
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl EditorConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: EditorConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Load configuration, falling back to the defaults when the file is
    /// missing or invalid
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config from {:?}: {}; using defaults", path, e);
                Self::default()
            }
        }
    }
}
