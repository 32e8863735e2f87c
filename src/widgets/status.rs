//! Bottom status strip.

use eframe::egui;

use crate::core::surface::{EditMode, EditorSurface};

/// Render the status bar: edit mode, widths, document health.
pub fn render(ctx: &egui::Context, surface: &EditorSurface) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.monospace(match surface.edit_mode() {
                EditMode::Plain => "PLAIN",
                EditMode::Rich => "RICH ",
            });

            ui.separator();

            match surface.viewport_width() {
                Some(w) => ui.monospace(format!("viewport {:>4}px", w)),
                None => ui.monospace("viewport  ---"),
            };

            ui.separator();

            match surface.chart_width() {
                Some(w) => ui.monospace(format!("chart {:>4}px", w)),
                None => ui.monospace("chart  ---"),
            };

            ui.separator();

            if surface.last_error().is_some() {
                ui.monospace("parse error");
            } else {
                let keys = surface
                    .document()
                    .as_object()
                    .map(|m| m.len())
                    .unwrap_or(0);
                ui.monospace(format!("{} top-level keys", keys));
            }
        });
    });
}
