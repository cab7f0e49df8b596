//! Webhooks view: registered endpoints and their event subscriptions.

use eframe::egui;

use crate::records::webhooks::EVENT_VOCABULARY;
use crate::ui::app::UIState;
use crate::ui::controller::AppController;

pub fn render_webhooks(ui: &mut egui::Ui, controller: &mut AppController, state: &mut UIState) {
    ui.heading("Webhooks");
    ui.separator();

    let hooks = controller.list_webhooks();
    let mut to_remove: Option<String> = None;

    if hooks.is_empty() {
        ui.label("No webhooks registered.");
    } else {
        egui::Grid::new("webhooks_grid")
            .spacing([16.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                for hook in &hooks {
                    ui.label(&hook.url);
                    ui.label(hook.events.join(", "));
                    if ui.small_button("Remove").clicked() {
                        to_remove = Some(hook.url.clone());
                    }
                    ui.end_row();
                }
            });
    }

    if let Some(url) = to_remove {
        if let Err(e) = controller.remove_webhook(&url) {
            state.error_message = Some(e.to_string());
        }
    }

    ui.separator();
    ui.heading("Register webhook");

    ui.horizontal(|ui| {
        ui.label("URL:");
        ui.add(
            egui::TextEdit::singleline(&mut state.webhook_url)
                .hint_text("https://discord.com/api/webhooks/..."),
        );
    });

    ui.label("Events:");
    for (i, event) in EVENT_VOCABULARY.iter().enumerate() {
        ui.checkbox(&mut state.webhook_selected[i], *event);
    }

    let selected: Vec<String> = EVENT_VOCABULARY
        .iter()
        .zip(&state.webhook_selected)
        .filter(|(_, &on)| on)
        .map(|(name, _)| name.to_string())
        .collect();

    let valid = !state.webhook_url.trim().is_empty() && !selected.is_empty();
    if ui.add_enabled(valid, egui::Button::new("Add webhook")).clicked() {
        match controller.add_webhook(state.webhook_url.trim().to_string(), selected) {
            Ok(()) => {
                state.webhook_url.clear();
                state.webhook_selected.iter_mut().for_each(|on| *on = false);
                state.success_message = Some("Webhook registered".to_string());
            }
            Err(e) => state.error_message = Some(e.to_string()),
        }
    }
}
