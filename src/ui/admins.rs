//! Admins view: the AMX Mod X users.ini entries.

use eframe::egui;

use crate::models::AdminEntry;
use crate::ui::app::UIState;
use crate::ui::controller::AppController;

pub fn render_admins(ui: &mut egui::Ui, controller: &mut AppController, state: &mut UIState) {
    ui.horizontal(|ui| {
        ui.heading("Admins");
        if ui.button("Refresh").clicked() {
            state.admins_loaded = false;
        }
    });
    ui.separator();

    if !state.admins_loaded {
        match controller.list_admins() {
            Ok(admins) => {
                state.admins = admins;
                state.admins_loaded = true;
            }
            Err(e) => {
                ui.label(format!("Could not read users.ini: {}", e));
                return;
            }
        }
    }

    let mut to_remove: Option<String> = None;
    let mut to_edit: Option<AdminEntry> = None;

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() * 0.5)
        .auto_shrink(false)
        .show(ui, |ui| {
            egui::Grid::new("admins_grid")
                .spacing([16.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.strong("Auth");
                    ui.strong("Access");
                    ui.strong("Flags");
                    ui.strong("");
                    ui.strong("");
                    ui.end_row();

                    for admin in &state.admins {
                        ui.label(admin.name.as_deref().unwrap_or("-"));
                        ui.label(&admin.auth);
                        ui.label(&admin.access);
                        ui.label(&admin.flags);
                        if ui.small_button("Edit").clicked() {
                            to_edit = Some(admin.clone());
                        }
                        if ui.small_button("Remove").clicked() {
                            to_remove = Some(admin.auth.clone());
                        }
                        ui.end_row();
                    }
                });
        });

    if let Some(admin) = to_edit {
        state.admin_form.name = admin.name.unwrap_or_default();
        state.admin_form.auth = admin.auth;
        state.admin_form.password = admin.password;
        state.admin_form.access = admin.access;
        state.admin_form.flags = admin.flags;
    }

    if let Some(auth) = to_remove {
        match controller.remove_admin(&auth) {
            Ok(()) => state.admins_loaded = false,
            Err(e) => state.error_message = Some(e.to_string()),
        }
    }

    ui.separator();
    ui.heading("Add or update entry");

    egui::Grid::new("admin_form").spacing([16.0, 4.0]).show(ui, |ui| {
        ui.label("Name:");
        ui.text_edit_singleline(&mut state.admin_form.name);
        ui.end_row();
        ui.label("Auth (Steam ID / nick):");
        ui.text_edit_singleline(&mut state.admin_form.auth);
        ui.end_row();
        ui.label("Password:");
        ui.text_edit_singleline(&mut state.admin_form.password);
        ui.end_row();
        ui.label("Access:");
        ui.text_edit_singleline(&mut state.admin_form.access);
        ui.end_row();
        ui.label("Flags:");
        ui.text_edit_singleline(&mut state.admin_form.flags);
        ui.end_row();
    });

    let entry = AdminEntry {
        name: if state.admin_form.name.trim().is_empty() {
            None
        } else {
            Some(state.admin_form.name.trim().to_string())
        },
        auth: state.admin_form.auth.trim().to_string(),
        password: state.admin_form.password.clone(),
        access: state.admin_form.access.trim().to_string(),
        flags: state.admin_form.flags.trim().to_string(),
    };

    ui.horizontal(|ui| {
        let valid = !entry.auth.is_empty();
        if ui.add_enabled(valid, egui::Button::new("Add")).clicked() {
            match controller.add_admin(&entry) {
                Ok(()) => {
                    state.admins_loaded = false;
                    state.admin_form = Default::default();
                }
                Err(e) => state.error_message = Some(e.to_string()),
            }
        }
        let exists = state.admins.iter().any(|a| a.auth == entry.auth);
        if ui
            .add_enabled(valid && exists, egui::Button::new("Update"))
            .clicked()
        {
            match controller.update_admin(&entry) {
                Ok(()) => {
                    state.admins_loaded = false;
                    state.admin_form = Default::default();
                }
                Err(e) => state.error_message = Some(e.to_string()),
            }
        }
    });
}
