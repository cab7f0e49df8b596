//! Webhook registry and event delivery.
//!
//! Registrations are `{url, events[]}` pairs in `webhooks.json`; event
//! names are validated against the fixed vocabulary. Delivery posts a
//! Discord-style embed to every hook subscribed to the event name. A failed
//! delivery is logged and never propagates.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

use crate::error::RecordError;
use crate::models::{Webhook, WebhookEvent};

/// The fixed event vocabulary hooks may subscribe to.
pub const EVENT_VOCABULARY: [&str; 8] = [
    "server_started",
    "server_stopped",
    "error_occurred",
    "map_added",
    "map_deleted",
    "map_changed",
    "custom_event",
    "knife_kill",
];

static HTTP: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Clone)]
pub struct WebhookRegistry {
    path: PathBuf,
}

impl WebhookRegistry {
    pub fn new(dir: &Path) -> Self {
        WebhookRegistry {
            path: dir.join("webhooks.json"),
        }
    }

    /// All registered hooks; a missing or unreadable registry is empty.
    pub fn list(&self) -> Vec<Webhook> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn add(&self, url: String, events: Vec<String>) -> Result<(), RecordError> {
        if url.trim().is_empty() {
            return Err(RecordError::InvalidRecord("webhook url is empty".to_string()));
        }
        for event in &events {
            if !EVENT_VOCABULARY.contains(&event.as_str()) {
                return Err(RecordError::InvalidRecord(format!(
                    "unknown event name: {}",
                    event
                )));
            }
        }
        let mut hooks = self.list();
        hooks.push(Webhook { url, events });
        self.write(&hooks)
    }

    pub fn remove(&self, url: &str) -> Result<(), RecordError> {
        let hooks: Vec<Webhook> = self.list().into_iter().filter(|w| w.url != url).collect();
        self.write(&hooks)
    }

    fn write(&self, hooks: &[Webhook]) -> Result<(), RecordError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(RecordError::IoError)?;
        }
        let json = serde_json::to_string_pretty(hooks).map_err(RecordError::InvalidJson)?;
        fs::write(&self.path, json).map_err(RecordError::IoError)?;
        Ok(())
    }

    /// Deliver `event` to every hook subscribed to its name.
    pub async fn emit(&self, event: &WebhookEvent) {
        let event_name = event.name();
        let matching: Vec<Webhook> = self
            .list()
            .into_iter()
            .filter(|hook| hook.events.iter().any(|e| e == event_name))
            .collect();
        if matching.is_empty() {
            return;
        }

        log::info!(
            "Emitting event '{}' to {} webhook(s)",
            event_name,
            matching.len()
        );
        let payload = event.payload();

        for hook in matching {
            match HTTP.post(&hook.url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => {
                    log::warn!(
                        "Webhook {} rejected event '{}': HTTP {}",
                        hook.url,
                        event_name,
                        response.status()
                    );
                }
                Err(e) => {
                    log::warn!("Webhook {} delivery failed: {}", hook.url, e);
                }
            }
        }
    }
}
