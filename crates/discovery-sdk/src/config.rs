use crate::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "discovery.json";

/// SDK tuning knobs, read from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
    /// How long a call waits for the platform before failing with `Timedout`
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Capacity of the request and event channels
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// Send `{"listen": true|false}` when an event gains its first or loses its last listener
    #[serde(default = "default_listen_on_subscribe")]
    pub listen_on_subscribe: bool,
}

impl SdkConfig {
    /// Load config from file, or return default if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// `~/.config/discovery-sdk/discovery.json`, or `None` without a home directory
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "discovery-sdk")
            .map(|project| project.config_dir().join(CONFIG_FILE))
    }

    /// Load from [`default_path`](Self::default_path), falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or contains invalid JSON.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_event_buffer() -> usize {
    64
}

fn default_listen_on_subscribe() -> bool {
    true
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            event_buffer: default_event_buffer(),
            listen_on_subscribe: default_listen_on_subscribe(),
        }
    }
}
