//! Application shell - binds the editor surface to egui panels.
//!
//! Layout: a fixed-width editing panel on the left (error banner, mode
//! toggle, active affordance), the chart in the central panel, a status
//! strip along the bottom. All state transitions go through
//! [`EditorSurface`]; this file only routes input and lays out widgets.

use eframe::egui;
use log::debug;

use crate::core::surface::{EDITOR_PANEL_WIDTH, EditMode, EditorSurface};
use crate::widgets::{ChartView, PlainEditor, rich_editor, status};

/// Main application state
pub struct VizpadApp {
    surface: EditorSurface,
    plain: PlainEditor,
    /// Rebuilt whenever the computed chart width changes; hover state and
    /// friends die with the old instance instead of resizing incrementally.
    chart: Option<ChartView>,
}

impl Default for VizpadApp {
    fn default() -> Self {
        Self::new()
    }
}

impl VizpadApp {
    pub fn new() -> Self {
        Self {
            surface: EditorSurface::new(),
            plain: PlainEditor::new(),
            chart: None,
        }
    }

    fn editor_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("editor_panel")
            .exact_width(EDITOR_PANEL_WIDTH as f32)
            .resizable(false)
            .show(ctx, |ui| {
                // Error banner sits above everything else in the panel
                if let Some(error) = self.surface.last_error() {
                    ui.colored_label(egui::Color32::RED, error);
                    ui.separator();
                }

                if ui
                    .button(self.surface.edit_mode().toggle_label())
                    .clicked()
                {
                    self.surface.toggle_mode();
                    if self.surface.edit_mode() == EditMode::Plain {
                        // Pick up edits made through the tree
                        self.plain.resync(self.surface.document());
                    }
                }
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    let input = match self.surface.edit_mode() {
                        EditMode::Plain => self.plain.ui(ui, self.surface.document()),
                        EditMode::Rich => rich_editor::ui(ui, self.surface.document()),
                    };
                    if let Some(input) = input {
                        self.surface.on_edit(input);
                    }
                });
            });
    }

    fn chart_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (Some(spec), Some(key)) = (self.surface.render_spec(), self.surface.chart_width())
            else {
                return;
            };

            let stale = self
                .chart
                .as_ref()
                .map(|c| c.width_key() != key)
                .unwrap_or(true);
            if stale {
                debug!("Chart width {} - rebuilding chart view", key);
                self.chart = Some(ChartView::new(key));
            }
            if let Some(chart) = self.chart.as_mut() {
                chart.ui(ui, &spec);
            }
        });
    }
}

impl eframe::App for VizpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Viewport observation + debounced resize
        let width = ctx.input(|i| i.screen_rect().width()).round() as i32;
        self.surface.observe_viewport(width);
        self.surface.tick();
        if let Some(due) = self.surface.resize_due_in() {
            // Wake up when the pending resize is due, even if idle
            ctx.request_repaint_after(due);
        }

        status::render(ctx, &self.surface);
        self.editor_panel(ctx);
        self.chart_panel(ctx);
    }
}
