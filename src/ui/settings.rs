//! Settings view.
//!
//! Edits are applied to the shared state immediately and written to disk on
//! Save. Timeout and capacity changes take effect on the next launch; the
//! relay and lifecycle controller read them at construction.

use eframe::egui;

use crate::ui::app::UIState;
use crate::ui::controller::AppController;

pub fn render_settings(ui: &mut egui::Ui, controller: &mut AppController, state: &mut UIState) {
    ui.heading("Settings");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Server folder:");
        let path = controller
            .gate
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "not configured".to_string());
        ui.monospace(path);
        if ui.button("Browse...").clicked() && controller.select_install_folder() {
            state.success_message = Some("Server folder updated".to_string());
        }
    });

    ui.separator();

    {
        let mut app_state = controller.settings.write().expect("settings lock");

        ui.heading("Server launch");
        egui::Grid::new("server_settings")
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.label("Port:");
                ui.text_edit_singleline(&mut app_state.server.port);
                ui.end_row();
                ui.label("Startup map:");
                ui.text_edit_singleline(&mut app_state.server.map);
                ui.end_row();
            });
        ui.label("Launch settings apply on the next server start.");

        ui.separator();
        ui.heading("Console");
        ui.horizontal(|ui| {
            ui.label("Retained entries:");
            ui.add(egui::DragValue::new(&mut app_state.console_capacity).clamp_range(100..=100_000));
        });
        ui.checkbox(&mut app_state.auto_scroll, "Follow newest output");

        ui.separator();
        ui.heading("External calls");

        let mut limit_lifecycle = app_state.lifecycle_timeout_secs.is_some();
        if ui
            .checkbox(&mut limit_lifecycle, "Limit start/stop duration")
            .changed()
        {
            app_state.lifecycle_timeout_secs = limit_lifecycle.then_some(30);
        }
        if let Some(secs) = app_state.lifecycle_timeout_secs.as_mut() {
            ui.add(egui::DragValue::new(secs).clamp_range(1..=600).suffix(" s"));
        }

        let mut limit_dispatch = app_state.dispatch_timeout_secs.is_some();
        if ui
            .checkbox(&mut limit_dispatch, "Limit command dispatch duration")
            .changed()
        {
            app_state.dispatch_timeout_secs = limit_dispatch.then_some(5);
        }
        if let Some(secs) = app_state.dispatch_timeout_secs.as_mut() {
            ui.add(egui::DragValue::new(secs).clamp_range(1..=600).suffix(" s"));
        }
        ui.label("Timeout and capacity changes take effect after a restart.");
    }

    ui.separator();
    if ui.button("Save settings").clicked() {
        match controller.save_settings() {
            Ok(()) => state.success_message = Some("Settings saved".to_string()),
            Err(e) => state.error_message = Some(format!("Failed to save settings: {}", e)),
        }
    }
}
