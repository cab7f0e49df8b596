//! Live console view: transcript, command input, and the run-state toggle.

use eframe::egui;

use crate::models::ServerRunState;
use crate::ui::app::UIState;
use crate::ui::controller::AppController;
use crate::ui::widgets::severity_color;

pub fn render_console(ui: &mut egui::Ui, controller: &mut AppController, state: &mut UIState) {
    ui.horizontal(|ui| {
        ui.heading("Console");
        ui.separator();
        let run_state = controller.lifecycle.run_state();
        let (color, label) = match run_state {
            ServerRunState::Running => (egui::Color32::from_rgb(100, 200, 100), "Running"),
            ServerRunState::Stopped => (egui::Color32::from_rgb(200, 100, 100), "Stopped"),
        };
        ui.colored_label(color, label);

        let button_label = match run_state {
            ServerRunState::Running => "Stop server",
            ServerRunState::Stopped => "Start server",
        };
        let transitioning = controller.lifecycle.is_transitioning();
        if ui
            .add_enabled(!transitioning, egui::Button::new(button_label))
            .clicked()
        {
            controller.lifecycle.toggle();
        }
        if transitioning {
            ui.spinner();
        }
    });
    ui.separator();

    let auto_scroll = controller
        .settings
        .read()
        .expect("settings lock")
        .auto_scroll;

    let input_height = 32.0;
    egui::ScrollArea::vertical()
        .auto_shrink(false)
        .max_height(ui.available_height() - input_height)
        .stick_to_bottom(auto_scroll)
        .show(ui, |ui| {
            for entry in state.session.iter() {
                ui.label(
                    egui::RichText::new(&entry.text)
                        .monospace()
                        .color(severity_color(entry.severity)),
                );
            }
        });

    ui.separator();
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.command_input)
                .hint_text("Type a command...")
                .desired_width(ui.available_width() - 64.0),
        );
        let submitted = ui.button("Send").clicked()
            || (response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
        if submitted {
            if controller
                .relay
                .submit(&mut state.session, &state.command_input)
            {
                // Cleared no matter how the dispatch resolves.
                state.command_input.clear();
                response.request_focus();
            }
        }
    });
}
