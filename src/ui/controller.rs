//! AppController: central orchestrator between the UI and the console core.
//!
//! Owns the shared settings, the installation gate, the process manager,
//! the lifecycle controller, and the record collaborators. Background tasks
//! never touch UI state directly; everything flows back through the
//! `ConsoleEvent` channel drained by the update loop.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::{ensure_config_dir, AppState, SettingsManager};
use crate::console::CommandRelay;
use crate::error::{ConfigError, RecordError};
use crate::gate::InstallGate;
use crate::models::{AdminEntry, MetricsSnapshot, ServerRunState, Webhook, WebhookEvent};
use crate::records::{self, FavoriteMaps, KnifeScoreboard, WebhookRegistry};
use crate::server::{GameEvent, HldsProcess, LifecycleController, ProcessManager};

/// Events flowing from background tasks into the UI consumer loop.
#[derive(Debug)]
pub enum ConsoleEvent {
    /// One telemetry tick succeeded.
    Telemetry(MetricsSnapshot),
    /// A lifecycle transition was acknowledged.
    RunState(ServerRunState),
    /// A start/stop call failed; run state was left as it was.
    LifecycleFailed(String),
    /// An echoed command never reached the process.
    DispatchFailed(String),
}

pub struct AppController {
    /// Thread-safe application state.
    pub settings: Arc<RwLock<AppState>>,
    /// Installation gate; the UI blocks until satisfied.
    pub gate: InstallGate,
    /// The external server process.
    pub process: Arc<HldsProcess>,
    /// Start/stop transitions and believed run state.
    pub lifecycle: LifecycleController,
    /// Operator command dispatch.
    pub relay: CommandRelay,
    /// Channel for console events.
    pub events_tx: mpsc::Sender<ConsoleEvent>,
    pub webhooks: WebhookRegistry,
    pub favorites: FavoriteMaps,
    pub scoreboard: Arc<Mutex<KnifeScoreboard>>,
}

impl AppController {
    /// Initialize with production collaborators. Loads persisted settings
    /// and the record stores from the config directory.
    pub fn new(events_tx: mpsc::Sender<ConsoleEvent>) -> Result<Self, ConfigError> {
        let state = SettingsManager::load()?;
        let gate = InstallGate::from_state(&state);
        let lifecycle_timeout = state.lifecycle_timeout_secs.map(Duration::from_secs);
        let dispatch_timeout = state.dispatch_timeout_secs.map(Duration::from_secs);
        let settings = Arc::new(RwLock::new(state));

        let process = Arc::new(HldsProcess::new(Arc::clone(&settings)));
        let manager: Arc<dyn ProcessManager> = Arc::clone(&process) as Arc<dyn ProcessManager>;
        let lifecycle =
            LifecycleController::new(Arc::clone(&manager), events_tx.clone(), lifecycle_timeout);
        let relay = CommandRelay::new(manager, events_tx.clone(), dispatch_timeout);

        let record_dir = ensure_config_dir()?;
        let scoreboard = Arc::new(Mutex::new(KnifeScoreboard::load(&record_dir)));
        records::knife_scores::spawn_reset_scheduler(Arc::clone(&scoreboard));

        Ok(AppController {
            settings,
            gate,
            process,
            lifecycle,
            relay,
            events_tx,
            webhooks: WebhookRegistry::new(&record_dir),
            favorites: FavoriteMaps::load(&record_dir),
            scoreboard,
        })
    }

    /// Open the folder picker and persist a concrete selection.
    /// Returns true once the gate is satisfied by this call.
    pub fn select_install_folder(&mut self) -> bool {
        let settings = Arc::clone(&self.settings);
        let result = self.gate.select_with(
            || {
                rfd::FileDialog::new()
                    .set_title("Select the HLDS server folder")
                    .pick_folder()
            },
            |path| {
                let mut state = settings.write().expect("settings lock");
                state.install_path = Some(path.to_string_lossy().into_owned());
                SettingsManager::save(&state)
            },
        );
        match result {
            Ok(selected) => selected.is_some(),
            Err(e) => {
                log::error!("Failed to persist install path: {}", e);
                false
            }
        }
    }

    pub fn save_settings(&self) -> Result<(), ConfigError> {
        SettingsManager::save(&self.settings.read().expect("settings lock"))
    }

    fn require_install_path(&self) -> Result<PathBuf, RecordError> {
        self.gate
            .path()
            .map(PathBuf::from)
            .ok_or(RecordError::MissingInstallPath)
    }

    /// Fire a webhook event without blocking the UI loop.
    pub fn emit_webhook(&self, event: WebhookEvent) {
        let registry = self.webhooks.clone();
        tokio::spawn(async move {
            registry.emit(&event).await;
        });
    }

    /// React to a game event detected in an accepted console line.
    pub fn handle_game_event(&self, event: GameEvent) {
        match event {
            GameEvent::Crash => self.emit_webhook(WebhookEvent::ErrorOccurred),
            GameEvent::KnifeKill {
                killer_id,
                killer_name,
                victim_id,
                victim_name,
            } => {
                let (killer_score, victim_score) = self
                    .scoreboard
                    .lock()
                    .expect("scoreboard lock")
                    .register_kill(&killer_id, &killer_name, &victim_id, &victim_name);
                self.emit_webhook(WebhookEvent::KnifeKill {
                    killer_id,
                    killer_name,
                    victim_id,
                    victim_name,
                    killer_score,
                    victim_score,
                });
            }
        }
    }

    // ------------------------------------------------------------------
    // Record collaborators
    // ------------------------------------------------------------------

    pub fn list_admins(&self) -> Result<Vec<AdminEntry>, RecordError> {
        records::admins::list_admins(&self.require_install_path()?)
    }

    pub fn add_admin(&self, entry: &AdminEntry) -> Result<(), RecordError> {
        records::admins::add_admin(&self.require_install_path()?, entry)?;
        self.emit_webhook(WebhookEvent::Custom {
            title: "Admin Added".to_string(),
            message: format!("`{}` was added to the admin list", entry.auth),
        });
        Ok(())
    }

    pub fn update_admin(&self, entry: &AdminEntry) -> Result<(), RecordError> {
        records::admins::update_admin(&self.require_install_path()?, entry)?;
        self.emit_webhook(WebhookEvent::Custom {
            title: "Admin Updated".to_string(),
            message: format!("`{}` had its data updated", entry.auth),
        });
        Ok(())
    }

    pub fn remove_admin(&self, auth: &str) -> Result<(), RecordError> {
        records::admins::remove_admin(&self.require_install_path()?, auth)?;
        self.emit_webhook(WebhookEvent::Custom {
            title: "Admin Removed".to_string(),
            message: format!("`{}` was removed from the admin list", auth),
        });
        Ok(())
    }

    pub fn list_maps(&self) -> Result<Vec<String>, RecordError> {
        records::maps::list_maps(&self.require_install_path()?)
    }

    pub fn delete_map(&mut self, map_name: &str) -> Result<bool, RecordError> {
        let deleted = records::maps::delete_map_files(&self.require_install_path()?, map_name)?;
        if deleted {
            self.favorites.remove(map_name)?;
            self.emit_webhook(WebhookEvent::MapDeleted(map_name.to_string()));
        }
        Ok(deleted)
    }

    pub fn import_map(&self, source: &std::path::Path) -> Result<String, RecordError> {
        let name = records::maps::import_map(&self.require_install_path()?, source)?;
        self.emit_webhook(WebhookEvent::MapAdded(name.clone()));
        Ok(name)
    }

    pub fn list_webhooks(&self) -> Vec<Webhook> {
        self.webhooks.list()
    }

    pub fn add_webhook(&self, url: String, events: Vec<String>) -> Result<(), RecordError> {
        self.webhooks.add(url, events)
    }

    pub fn remove_webhook(&self, url: &str) -> Result<(), RecordError> {
        self.webhooks.remove(url)
    }
}
