//! Dashboard view: host identity and the telemetry window.

use eframe::egui;

use crate::ui::app::UIState;
use crate::ui::widgets::{format_bytes_per_sec, sparkline};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(251, 127, 12);

pub fn render_dashboard(ui: &mut egui::Ui, state: &UIState) {
    ui.heading("System Overview");
    ui.separator();

    egui::Grid::new("identity_grid")
        .spacing([40.0, 10.0])
        .striped(true)
        .show(ui, |ui| {
            let identity = &state.identity;
            ui.label("System:");
            ui.label(identity.system_name.as_deref().unwrap_or("-"));
            ui.end_row();

            ui.label("Hostname:");
            ui.label(identity.host_name.as_deref().unwrap_or("-"));
            ui.end_row();

            ui.label("Kernel:");
            ui.label(identity.kernel_version.as_deref().unwrap_or("-"));
            ui.end_row();

            ui.label("OS:");
            ui.label(identity.os_version.as_deref().unwrap_or("-"));
            ui.end_row();
        });

    ui.separator();

    let cpu: Vec<f32> = state.telemetry.iter().map(|s| s.cpu_percent).collect();
    let ram: Vec<f32> = state.telemetry.iter().map(|s| s.ram_percent).collect();

    let latest = state.telemetry.latest();

    ui.horizontal(|ui| {
        ui.label("CPU usage");
        if let Some(sample) = latest {
            ui.label(
                egui::RichText::new(format!("{:.1}%", sample.cpu_percent))
                    .strong()
                    .color(ACCENT),
            );
        }
    });
    sparkline(ui, &cpu, 100.0, ACCENT);

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("RAM usage");
        if let Some(sample) = latest {
            ui.label(
                egui::RichText::new(format!("{:.1}%", sample.ram_percent))
                    .strong()
                    .color(ACCENT),
            );
        }
    });
    sparkline(ui, &ram, 100.0, ACCENT);

    ui.add_space(8.0);
    ui.heading("Network");
    if let Some(sample) = latest {
        egui::Grid::new("network_grid")
            .spacing([40.0, 6.0])
            .show(ui, |ui| {
                ui.label("Download:");
                ui.label(format_bytes_per_sec(sample.net_down_bytes_per_sec));
                ui.end_row();
                ui.label("Upload:");
                ui.label(format_bytes_per_sec(sample.net_up_bytes_per_sec));
                ui.end_row();
            });
    } else {
        ui.label("Waiting for the first sample...");
    }

    let down: Vec<f32> = state
        .telemetry
        .iter()
        .map(|s| s.net_down_bytes_per_sec as f32)
        .collect();
    sparkline(ui, &down, 1.0, egui::Color32::from_rgb(56, 189, 248));
}
