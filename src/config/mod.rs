//! Settings persistence.
//!
//! `AppState` holds everything that survives a restart: the server
//! installation path, the launch configuration, and console behavior knobs.
//! Stored as pretty-printed JSON under the user config directory.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::error::ConfigError;
use crate::models::ServerConfig;

/// Default cap on retained console entries.
pub const DEFAULT_CONSOLE_CAPACITY: usize = 5000;

/// Persisted application state.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppState {
    /// Root of the HLDS installation. Absent until the operator completes
    /// folder selection; the rest of the console is inert while absent.
    pub install_path: Option<String>,

    /// Launch configuration for the server process.
    pub server: ServerConfig,

    /// Maximum number of console entries retained before FIFO eviction.
    pub console_capacity: usize,

    /// Keep the transcript pinned to the newest entry while the operator
    /// is already at the bottom.
    pub auto_scroll: bool,

    /// Optional timeout for start/stop calls, in seconds. `None` means the
    /// call may run unbounded, matching the reference behavior.
    pub lifecycle_timeout_secs: Option<u64>,

    /// Optional timeout for command dispatch, in seconds.
    pub dispatch_timeout_secs: Option<u64>,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            install_path: None,
            server: ServerConfig::default(),
            console_capacity: DEFAULT_CONSOLE_CAPACITY,
            auto_scroll: true,
            lifecycle_timeout_secs: None,
            dispatch_timeout_secs: None,
        }
    }
}

/// Get the application config directory: `~/.config/hlds-console`
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir()
        .ok_or_else(|| ConfigError::NoConfigDir("no user config directory".to_string()))?;
    Ok(base.join("hlds-console"))
}

/// Ensure the config directory exists and return it.
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(ConfigError::IoError)?;
    Ok(dir)
}

pub struct SettingsManager;

impl SettingsManager {
    fn settings_path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("settings.json"))
    }

    /// Load AppState from settings.json, or return defaults if the file
    /// doesn't exist. A file that fails to parse logs a warning and falls
    /// back to defaults instead of failing startup.
    pub fn load() -> Result<AppState, ConfigError> {
        let path = Self::settings_path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<AppState>(&content) {
                Ok(mut state) => {
                    if state.console_capacity == 0 {
                        state.console_capacity = DEFAULT_CONSOLE_CAPACITY;
                    }
                    Ok(state)
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse {}, falling back to defaults: {}",
                        path.display(),
                        e
                    );
                    Ok(AppState::default())
                }
            },
            Err(_) => Ok(AppState::default()),
        }
    }

    /// Save AppState to settings.json.
    pub fn save(state: &AppState) -> Result<(), ConfigError> {
        let dir = ensure_config_dir()?;
        let content = serde_json::to_string_pretty(state).map_err(ConfigError::InvalidJson)?;
        std::fs::write(dir.join("settings.json"), content).map_err(ConfigError::IoError)?;
        Ok(())
    }

    /// Create a thread-safe shared instance of AppState.
    pub fn new_shared() -> Result<Arc<RwLock<AppState>>, ConfigError> {
        let state = Self::load()?;
        Ok(Arc::new(RwLock::new(state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert!(state.install_path.is_none());
        assert_eq!(state.console_capacity, DEFAULT_CONSOLE_CAPACITY);
        assert!(state.auto_scroll);
        assert!(state.lifecycle_timeout_secs.is_none());
    }

    #[test]
    fn test_state_round_trip() {
        let mut state = AppState::default();
        state.install_path = Some("/srv/hlds".to_string());
        state.server.port = "27016".to_string();
        state.lifecycle_timeout_secs = Some(30);

        let json = serde_json::to_string(&state).unwrap();
        let loaded: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.install_path.as_deref(), Some("/srv/hlds"));
        assert_eq!(loaded.server.port, "27016");
        assert_eq!(loaded.lifecycle_timeout_secs, Some(30));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let loaded: AppState = serde_json::from_str(r#"{"install_path":"/srv/hlds"}"#).unwrap();
        assert_eq!(loaded.install_path.as_deref(), Some("/srv/hlds"));
        assert_eq!(loaded.server, ServerConfig::default());
        assert_eq!(loaded.console_capacity, DEFAULT_CONSOLE_CAPACITY);
    }
}
