//! Shared rendering helpers.

use eframe::egui;

use crate::models::Severity;

pub fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Error => egui::Color32::from_rgb(220, 80, 80),
        Severity::Warning => egui::Color32::from_rgb(220, 190, 80),
        Severity::Info => egui::Color32::GRAY,
    }
}

pub fn format_bytes_per_sec(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    let value = bytes as f64;
    if value >= MIB {
        format!("{:.1} MiB/s", value / MIB)
    } else if value >= KIB {
        format!("{:.1} KiB/s", value / KIB)
    } else {
        format!("{} B/s", bytes)
    }
}

/// Area-filled sparkline over the sample history, newest on the right.
pub fn sparkline(ui: &mut egui::Ui, values: &[f32], max_hint: f32, color: egui::Color32) {
    let height = 64.0;
    let (response, painter) = ui.allocate_painter(
        egui::Vec2::new(ui.available_width(), height),
        egui::Sense::hover(),
    );
    let rect = response.rect;

    painter.rect_filled(rect, 2.0, egui::Color32::from_black_alpha(50));
    painter.rect_stroke(rect, 2.0, egui::Stroke::new(0.5, egui::Color32::DARK_GRAY));

    if values.is_empty() {
        return;
    }

    let peak = values
        .iter()
        .copied()
        .fold(max_hint, f32::max)
        .max(0.1);

    let step = rect.width() / values.len().max(1) as f32;
    let mut points = Vec::with_capacity(values.len() + 2);
    for (i, &value) in values.iter().enumerate() {
        let x = rect.min.x + (i as f32 + 0.5) * step;
        let y = rect.max.y - (value / peak).clamp(0.0, 1.0) * (rect.height() - 4.0);
        points.push(egui::pos2(x, y));
    }

    let line_points = points.clone();
    points.push(egui::pos2(rect.max.x, rect.max.y));
    points.push(egui::pos2(rect.min.x, rect.max.y));

    let fill = egui::Color32::from_rgba_premultiplied(color.r(), color.g(), color.b(), 30);
    let clipped = painter.with_clip_rect(rect.shrink(1.0));
    clipped.add(egui::Shape::convex_polygon(points, fill, egui::Stroke::NONE));
    clipped.add(egui::Shape::line(line_points, egui::Stroke::new(1.5, color)));
}
