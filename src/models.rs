//! Core data structures shared across the console.
//!
//! Model types are plain data: session log entries, run state, telemetry
//! samples, server configuration, and the record shapes consumed by the
//! admin/map/webhook collaborators.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a console line. Derived from the text, never transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Classify a line of console text.
    ///
    /// Case-insensitive `error` or the literal `FATAL` wins over a
    /// case-insensitive `warn`; everything else is Info.
    pub fn classify(text: &str) -> Severity {
        let lower = text.to_lowercase();
        if lower.contains("error") || text.contains("FATAL") {
            Severity::Error
        } else if lower.contains("warn") {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}

/// Where a console entry came from: the server process or the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Remote,
    Local,
}

/// One immutable entry in the console transcript.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Monotonic sequence number, assigned at append.
    pub sequence: u64,
    pub text: String,
    pub severity: Severity,
    pub origin: Origin,
}

/// Believed run state of the external server process.
///
/// Mutated only by the lifecycle controller, and only after the external
/// start/stop call was acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerRunState {
    Stopped,
    Running,
}

impl ServerRunState {
    pub fn toggled(self) -> ServerRunState {
        match self {
            ServerRunState::Stopped => ServerRunState::Running,
            ServerRunState::Running => ServerRunState::Stopped,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServerRunState::Stopped => "Stopped",
            ServerRunState::Running => "Running",
        }
    }
}

/// Static host identity fields. Session-scoped: refreshed on every sample
/// but not part of the time series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemIdentity {
    pub system_name: Option<String>,
    pub kernel_version: Option<String>,
    pub os_version: Option<String>,
    pub host_name: Option<String>,
}

/// One host-resource sample.
#[derive(Debug, Clone)]
pub struct TelemetrySample {
    pub timestamp: DateTime<Local>,
    pub cpu_percent: f32,
    pub ram_percent: f32,
    pub net_down_bytes_per_sec: u64,
    pub net_up_bytes_per_sec: u64,
}

/// What one metrics-provider call yields: the sample plus the refreshed
/// identity fields.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub sample: TelemetrySample,
    pub identity: SystemIdentity,
}

/// Launch configuration for the server process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub port: String,
    pub map: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: "27015".to_string(),
            map: "de_dust2".to_string(),
        }
    }
}

/// One AMX Mod X admin entry from `users.ini`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminEntry {
    pub name: Option<String>,
    pub auth: String,
    pub password: String,
    pub access: String,
    pub flags: String,
}

/// A registered webhook endpoint and the event names it subscribes to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Webhook {
    pub url: String,
    pub events: Vec<String>,
}

/// Events the console emits toward registered webhooks.
///
/// The names form a fixed vocabulary; registrations are validated against it.
#[derive(Debug, Clone)]
pub enum WebhookEvent {
    ServerStarted,
    ServerStopped,
    ErrorOccurred,
    MapAdded(String),
    MapDeleted(String),
    MapChanged(String),
    KnifeKill {
        killer_id: String,
        killer_name: String,
        victim_id: String,
        victim_name: String,
        killer_score: u32,
        victim_score: u32,
    },
    Custom {
        title: String,
        message: String,
    },
}

impl WebhookEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ServerStarted => "server_started",
            Self::ServerStopped => "server_stopped",
            Self::ErrorOccurred => "error_occurred",
            Self::MapAdded(_) => "map_added",
            Self::MapDeleted(_) => "map_deleted",
            Self::MapChanged(_) => "map_changed",
            Self::KnifeKill { .. } => "knife_kill",
            Self::Custom { .. } => "custom_event",
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::ServerStarted => "Server Started".into(),
            Self::ServerStopped => "Server Stopped".into(),
            Self::ErrorOccurred => "Server Error".into(),
            Self::MapAdded(name) => format!("Map Added: {}", name),
            Self::MapDeleted(name) => format!("Map Removed: {}", name),
            Self::MapChanged(name) => format!("Map Changed: {}", name),
            Self::KnifeKill {
                killer_name,
                victim_name,
                ..
            } => format!("Knife Kill: {} vs {}", killer_name, victim_name),
            Self::Custom { title, .. } => title.clone(),
        }
    }

    pub fn description(&self) -> String {
        let timestamp = Local::now().format("%d/%m/%Y %H:%M:%S");
        match self {
            Self::ServerStarted => format!("The server is up and accepting players\n{}", timestamp),
            Self::ServerStopped => format!("The server was shut down\n{}", timestamp),
            Self::ErrorOccurred => format!("A critical error occurred on the server\n{}", timestamp),
            Self::Custom { message, .. } => format!("{}\n{}", message, timestamp),
            _ => format!("{}", timestamp),
        }
    }

    /// Embed accent color, one per event kind.
    pub fn color(&self) -> u32 {
        match self {
            Self::ServerStarted => 0x57F287,
            Self::ServerStopped => 0xED4245,
            Self::ErrorOccurred => 0xFF0000,
            Self::MapAdded(_) => 0x00B0F4,
            Self::MapDeleted(_) => 0xFAA61A,
            Self::MapChanged(_) => 0x5865F2,
            Self::KnifeKill { .. } => 0x9B59B6,
            Self::Custom { .. } => 0xFB7F0C,
        }
    }

    /// Extra embed fields, currently only for knife kills.
    pub fn fields(&self) -> Option<Vec<serde_json::Value>> {
        match self {
            Self::KnifeKill {
                killer_name,
                victim_name,
                killer_score,
                victim_score,
                ..
            } => Some(vec![
                serde_json::json!({
                    "name": killer_name,
                    "value": format!("{} knife kill(s) against {}", killer_score, victim_name),
                    "inline": true,
                }),
                serde_json::json!({
                    "name": victim_name,
                    "value": format!("{} knife kill(s) against {}", victim_score, killer_name),
                    "inline": true,
                }),
            ]),
            _ => None,
        }
    }

    /// Full Discord-style webhook payload for this event.
    pub fn payload(&self) -> serde_json::Value {
        let mut embed = serde_json::json!({
            "title": self.title(),
            "description": self.description(),
            "color": self.color(),
            "footer": { "text": "HLDS Console" },
            "timestamp": Utc::now().to_rfc3339(),
        });
        if let Some(fields) = self.fields() {
            embed["fields"] = serde_json::Value::Array(fields);
        }
        serde_json::json!({
            "username": "HLDS Console",
            "embeds": [embed],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_error_case_insensitive() {
        assert_eq!(Severity::classify("ERROR: disk full"), Severity::Error);
        assert_eq!(Severity::classify("an error happened"), Severity::Error);
    }

    #[test]
    fn test_classify_fatal_literal_only() {
        assert_eq!(Severity::classify("FATAL crash"), Severity::Error);
        // Lowercase "fatal" is not the literal marker and carries no "error"
        assert_eq!(Severity::classify("fatal crash"), Severity::Info);
    }

    #[test]
    fn test_classify_warning_and_info() {
        assert_eq!(Severity::classify("Warn: low memory"), Severity::Warning);
        assert_eq!(Severity::classify("all fine"), Severity::Info);
    }

    #[test]
    fn test_error_wins_over_warning() {
        assert_eq!(Severity::classify("warning: error ahead"), Severity::Error);
    }

    #[test]
    fn test_run_state_toggled() {
        assert_eq!(ServerRunState::Stopped.toggled(), ServerRunState::Running);
        assert_eq!(ServerRunState::Running.toggled(), ServerRunState::Stopped);
    }

    #[test]
    fn test_webhook_event_names_match_vocabulary() {
        assert_eq!(WebhookEvent::ServerStarted.name(), "server_started");
        assert_eq!(WebhookEvent::MapDeleted("de_aztec".into()).name(), "map_deleted");
        let kill = WebhookEvent::KnifeKill {
            killer_id: "1".into(),
            killer_name: "a".into(),
            victim_id: "2".into(),
            victim_name: "b".into(),
            killer_score: 3,
            victim_score: 1,
        };
        assert_eq!(kill.name(), "knife_kill");
        assert_eq!(kill.fields().unwrap().len(), 2);
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, "27015");
        assert_eq!(config.map, "de_dust2");
    }
}
