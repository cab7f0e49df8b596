//! Main app orchestrator and UI state.
//!
//! `AppUI` implements `eframe::App`. Every frame it drains the console
//! event channel and the output subscription (the single consumer thread of
//! the design), then renders the gate modal or the main layout: the live
//! console on the left, the routed tab content on the right.

use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::console::{ConsoleSession, LogAggregator};
use crate::models::{AdminEntry, SystemIdentity};
use crate::server::{scan_line, OutputSubscription, ProcessManager};
use crate::telemetry::{SamplerHandle, SysinfoProvider, TelemetrySampler, TelemetryWindow};
use crate::ui::controller::{AppController, ConsoleEvent};

/// Tab identifiers for navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Maps,
    Admins,
    Webhooks,
    Settings,
}

/// Transient UI state - state that doesn't persist across sessions
pub struct UIState {
    /// Currently active tab
    pub active_tab: Tab,

    /// The live console transcript.
    pub session: ConsoleSession,

    /// Dedup/classify state for incoming output lines.
    pub aggregator: LogAggregator,

    /// Command input field contents.
    pub command_input: String,

    /// Sliding window of telemetry samples.
    pub telemetry: TelemetryWindow,

    /// Latest host identity fields, republished on every sample.
    pub identity: SystemIdentity,

    /// Error message to display (if any)
    pub error_message: Option<String>,

    /// Success message to display (if any)
    pub success_message: Option<String>,

    /// Cached map list and whether it was loaded.
    pub maps: Vec<String>,
    pub maps_loaded: bool,

    /// Cached admin list and whether it was loaded.
    pub admins: Vec<AdminEntry>,
    pub admins_loaded: bool,

    /// Admin form fields.
    pub admin_form: AdminForm,

    /// Webhook form: url plus one flag per vocabulary event.
    pub webhook_url: String,
    pub webhook_selected: Vec<bool>,
}

#[derive(Default, Clone)]
pub struct AdminForm {
    pub name: String,
    pub auth: String,
    pub password: String,
    pub access: String,
    pub flags: String,
}

impl UIState {
    fn new(console_capacity: usize) -> Self {
        UIState {
            active_tab: Tab::Dashboard,
            session: ConsoleSession::new(console_capacity),
            aggregator: LogAggregator::new(),
            command_input: String::new(),
            telemetry: TelemetryWindow::default(),
            identity: SystemIdentity::default(),
            error_message: None,
            success_message: None,
            maps: vec![],
            maps_loaded: false,
            admins: vec![],
            admins_loaded: false,
            admin_form: AdminForm::default(),
            webhook_url: String::new(),
            webhook_selected: vec![false; crate::records::webhooks::EVENT_VOCABULARY.len()],
        }
    }
}

pub struct AppUI {
    pub controller: AppController,
    pub ui_state: UIState,
    events_rx: mpsc::Receiver<ConsoleEvent>,
    /// The single output subscription for this session.
    output: Option<OutputSubscription>,
    /// Teardown handle for the telemetry timer.
    sampler: Option<SamplerHandle>,
}

impl AppUI {
    pub fn new(controller: AppController, events_rx: mpsc::Receiver<ConsoleEvent>) -> Self {
        let console_capacity = controller
            .settings
            .read()
            .expect("settings lock")
            .console_capacity;

        let output = controller.process.subscribe_output();
        let sampler = TelemetrySampler::spawn(
            Box::new(SysinfoProvider::new()),
            controller.events_tx.clone(),
            crate::telemetry::sampler::SAMPLE_PERIOD,
        );

        AppUI {
            controller,
            ui_state: UIState::new(console_capacity),
            events_rx,
            output: Some(output),
            sampler: Some(sampler),
        }
    }

    /// Drain pending console events from background tasks.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                ConsoleEvent::Telemetry(snapshot) => {
                    self.ui_state.telemetry.push(snapshot.sample);
                    self.ui_state.identity = snapshot.identity;
                }
                ConsoleEvent::RunState(state) => {
                    self.ui_state.success_message = Some(format!("Server is now {}", state.label()));
                    let event = match state {
                        crate::models::ServerRunState::Running => {
                            crate::models::WebhookEvent::ServerStarted
                        }
                        crate::models::ServerRunState::Stopped => {
                            crate::models::WebhookEvent::ServerStopped
                        }
                    };
                    self.controller.emit_webhook(event);
                }
                ConsoleEvent::LifecycleFailed(message) => {
                    self.ui_state.error_message = Some(message);
                }
                ConsoleEvent::DispatchFailed(message) => {
                    self.ui_state.error_message = Some(message);
                }
            }
        }
    }

    /// Drain buffered output lines through the aggregator into the session.
    fn drain_output(&mut self) {
        let Some(subscription) = self.output.as_mut() else {
            return;
        };
        while let Some(line) = subscription.try_next() {
            if let Some(entry) = self
                .ui_state
                .aggregator
                .ingest(&mut self.ui_state.session, line)
            {
                if let Some(event) = scan_line(&entry.text) {
                    self.controller.handle_game_event(event);
                }
            }
        }
    }

    fn render_gate_modal(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.label("HLDS Console");
            });
        });
        egui::Window::new("Select the HLDS server folder")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("You must select the server folder before using the application.");
                ui.add_space(8.0);
                if ui.button("Select folder...").clicked() {
                    self.controller.select_install_folder();
                }
            });
    }

    fn render_top_nav(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("HLDS Console");
                ui.separator();
                for (tab, label) in [
                    (Tab::Dashboard, "Dashboard"),
                    (Tab::Maps, "Maps"),
                    (Tab::Admins, "Admins"),
                    (Tab::Webhooks, "Webhooks"),
                    (Tab::Settings, "Settings"),
                ] {
                    ui.selectable_value(&mut self.ui_state.active_tab, tab, label);
                }
            });
        });
    }

    fn render_messages(&mut self, ui: &mut egui::Ui) {
        if let Some(message) = self.ui_state.error_message.clone() {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(200, 100, 100), &message);
                if ui.small_button("x").clicked() {
                    self.ui_state.error_message = None;
                }
            });
        }
        if let Some(message) = self.ui_state.success_message.clone() {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(100, 200, 100), &message);
                if ui.small_button("x").clicked() {
                    self.ui_state.success_message = None;
                }
            });
        }
    }
}

impl eframe::App for AppUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.drain_output();

        // Streaming sources have no repaint hook of their own; poll at 4 Hz.
        ctx.request_repaint_after(Duration::from_millis(250));

        if !self.controller.gate.is_satisfied() {
            self.render_gate_modal(ctx);
            return;
        }

        self.render_top_nav(ctx);

        egui::SidePanel::left("console_pane")
            .resizable(true)
            .default_width(560.0)
            .show(ctx, |ui| {
                crate::ui::console::render_console(ui, &mut self.controller, &mut self.ui_state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_messages(ui);
            match self.ui_state.active_tab {
                Tab::Dashboard => {
                    crate::ui::dashboard::render_dashboard(ui, &self.ui_state);
                }
                Tab::Maps => {
                    crate::ui::maps::render_maps(ui, &mut self.controller, &mut self.ui_state);
                }
                Tab::Admins => {
                    crate::ui::admins::render_admins(ui, &mut self.controller, &mut self.ui_state);
                }
                Tab::Webhooks => {
                    crate::ui::webhooks::render_webhooks(
                        ui,
                        &mut self.controller,
                        &mut self.ui_state,
                    );
                }
                Tab::Settings => {
                    crate::ui::settings::render_settings(
                        ui,
                        &mut self.controller,
                        &mut self.ui_state,
                    );
                }
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Teardown contracts: both are invoked exactly once.
        if let Some(subscription) = self.output.take() {
            subscription.unsubscribe();
        }
        if let Some(sampler) = self.sampler.take() {
            sampler.stop();
        }
        log::info!("Console session closed");
    }
}
