//! Unified error type hierarchy for HLDS Console
//!
//! Provides structured error handling with ConfigError, DispatchError,
//! LifecycleError, MetricsError, and RecordError.
//!
//! Gate cancellation is deliberately not an error: a cancelled folder
//! selection is modeled as `Ok(None)` and leaves state unchanged.

use std::io;
use thiserror::Error;

/// Settings persistence and configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine config directory: {0}")]
    NoConfigDir(String),

    #[error("Invalid JSON in settings: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("IO error during settings operations: {0}")]
    IoError(#[from] io::Error),
}

/// Command dispatch errors (operator input failed to reach the process).
#[derive(Error, Debug, Clone)]
pub enum DispatchError {
    #[error("Server process is not running")]
    ProcessNotRunning,

    #[error("Server stdin is not available")]
    StdinUnavailable,

    #[error("Failed to write to server stdin: {0}")]
    WriteFailed(String),

    #[error("Command dispatch timed out")]
    TimedOut,
}

/// Server process start/stop errors.
#[derive(Error, Debug, Clone)]
pub enum LifecycleError {
    #[error("Server installation path is not configured")]
    PathNotConfigured,

    #[error("Failed to start server process: {0}")]
    StartFailed(String),

    #[error("Failed to stop server process: {0}")]
    StopFailed(String),

    #[error("Lifecycle call timed out")]
    TimedOut,
}

/// Telemetry sampling errors (one tick failed; never fatal).
#[derive(Error, Debug, Clone)]
pub enum MetricsError {
    #[error("System metrics unavailable: {0}")]
    Unavailable(String),
}

/// Keyed-record store errors (admins, maps, webhooks, scoreboards).
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Server installation path is not configured")]
    MissingInstallPath,

    #[error("Record file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in record store: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("IO error during record operations: {0}")]
    IoError(#[from] io::Error),
}

impl DispatchError {
    /// User-facing message for the notification sink.
    pub fn user_message(&self) -> String {
        format!("Command was not delivered: {}", self)
    }
}

impl LifecycleError {
    /// User-facing message for the notification sink.
    pub fn user_message(&self) -> String {
        match self {
            LifecycleError::PathNotConfigured => self.to_string(),
            LifecycleError::StartFailed(reason) => {
                format!("Server failed to start: {}", reason)
            }
            LifecycleError::StopFailed(reason) => {
                format!("Server failed to stop: {}", reason)
            }
            LifecycleError::TimedOut => "Server did not respond in time".to_string(),
        }
    }
}

/// Top-level result type for operations that may fail.
/// Use this as the return type for all fallible functions.
/// Example: `fn risky_operation() -> Result<String>`
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
