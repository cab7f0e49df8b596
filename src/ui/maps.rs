//! Maps view: installed map files, favorites, deletion, and import.

use eframe::egui;

use crate::ui::app::UIState;
use crate::ui::controller::AppController;

pub fn render_maps(ui: &mut egui::Ui, controller: &mut AppController, state: &mut UIState) {
    ui.horizontal(|ui| {
        ui.heading("Maps");
        if ui.button("Refresh").clicked() {
            state.maps_loaded = false;
        }
        if ui.button("Import map...").clicked() {
            if let Some(source) = rfd::FileDialog::new()
                .add_filter("BSP map", &["bsp"])
                .pick_file()
            {
                match controller.import_map(&source) {
                    Ok(name) => {
                        state.success_message = Some(format!("Map {} imported", name));
                        state.maps_loaded = false;
                    }
                    Err(e) => state.error_message = Some(e.to_string()),
                }
            }
        }
    });
    ui.separator();

    if !state.maps_loaded {
        match controller.list_maps() {
            Ok(maps) => {
                state.maps = maps;
                state.maps_loaded = true;
            }
            Err(e) => {
                ui.label(format!("Could not list maps: {}", e));
                return;
            }
        }
    }

    if state.maps.is_empty() {
        ui.label("No maps found.");
        return;
    }

    let mut to_delete: Option<String> = None;
    let mut to_toggle: Option<String> = None;

    egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
        egui::Grid::new("maps_grid")
            .spacing([16.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                for map in &state.maps {
                    let favorite = controller.favorites.contains(map);
                    let star = if favorite { "★" } else { "☆" };
                    if ui.button(star).clicked() {
                        to_toggle = Some(map.clone());
                    }
                    ui.label(map);
                    if ui.small_button("Delete").clicked() {
                        to_delete = Some(map.clone());
                    }
                    ui.end_row();
                }
            });
    });

    if let Some(map) = to_toggle {
        if let Err(e) = controller.favorites.toggle(&map) {
            state.error_message = Some(e.to_string());
        }
    }

    if let Some(map) = to_delete {
        match controller.delete_map(&map) {
            Ok(true) => {
                state.success_message = Some(format!("Map {} removed", map));
                state.maps_loaded = false;
            }
            Ok(false) => {
                state.error_message = Some(format!("No files found for {}", map));
            }
            Err(e) => state.error_message = Some(e.to_string()),
        }
    }
}
