//! HLDS Console Rust Backend
//!
//! Operator console for a Half-Life Dedicated Server process: gates usage
//! behind a configured installation path, streams the process's live output
//! into an ordered session transcript, relays typed commands into its
//! stdin, and samples host resource telemetry for display.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Core data structures and types
//! - **config**: Settings persistence
//! - **gate**: Installation gate state machine
//! - **applog**: Application log pipeline
//! - **console**: Session transcript, log aggregator, command relay
//! - **telemetry**: Metrics provider, periodic sampler, sliding window
//! - **server**: Process manager, lifecycle controller, game events
//! - **records**: Admin/map/webhook/scoreboard collaborators
//! - **ui**: AppController and egui integration

pub mod applog;
pub mod config;
pub mod console;
pub mod error;
pub mod gate;
pub mod models;
pub mod records;
pub mod server;
pub mod telemetry;
pub mod ui;

// Re-export the log crate for macro usage
pub use log;

// Re-export error types for easy access
pub use error::{ConfigError, DispatchError, LifecycleError, MetricsError, RecordError, Result};

// Re-export model types for easy access
pub use models::{
    AdminEntry,
    LogEntry,
    MetricsSnapshot,
    // Enums
    Origin,
    ServerConfig,
    ServerRunState,
    Severity,
    SystemIdentity,
    TelemetrySample,
    Webhook,
    WebhookEvent,
};

// Re-export the console core
pub use console::{CommandRelay, ConsoleSession, LogAggregator};

// Re-export telemetry types
pub use telemetry::{
    MetricsProvider, SamplerHandle, SysinfoProvider, TelemetrySampler, TelemetryWindow,
    TELEMETRY_WINDOW_CAPACITY,
};

// Re-export server process types
pub use server::{
    GameEvent, HldsProcess, LifecycleController, OutputSink, OutputSubscription, ProcessManager,
};

// Re-export the gate and settings
pub use config::{AppState, SettingsManager};
pub use gate::InstallGate;

// Re-export UI controller
pub use ui::{AppController, AppUI, ConsoleEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
