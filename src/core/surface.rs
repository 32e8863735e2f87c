//! Editor surface - the single state unit behind the whole app.
//!
//! Owns the specification document, the edit-mode flag, the last parse
//! error and the debounced viewport width. The egui shell is a thin layer
//! over this: widgets feed [`EditorSurface::on_edit`], the update loop
//! feeds [`EditorSurface::observe_viewport`] and [`EditorSurface::tick`],
//! and rendering reads [`EditorSurface::render_spec`].
//!
//! The document is only ever replaced wholesale by a successful
//! parse/normalization; a failed edit leaves it untouched and surfaces the
//! parser's message instead.

use std::time::Duration;

use serde_json::Value;

use crate::core::debounce::Debouncer;
use crate::core::document::{self, EditInput};

/// Fixed width of the editing panel, in logical pixels.
pub const EDITOR_PANEL_WIDTH: i32 = 500;
/// Fixed margin kept free to the right of the chart.
pub const CHART_RIGHT_MARGIN: i32 = 200;

/// Which editing affordance is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Raw-text editing
    Plain,
    /// Structured tree editing
    Rich,
}

impl EditMode {
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Plain => EditMode::Rich,
            EditMode::Rich => EditMode::Plain,
        }
    }

    /// Button label: names the mode the toggle switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            EditMode::Plain => "Rich mode",
            EditMode::Rich => "Plain mode",
        }
    }
}

/// State and transitions of the editor.
#[derive(Debug)]
pub struct EditorSurface {
    viewport_width: Option<i32>,
    edit_mode: EditMode,
    document: Value,
    last_error: Option<String>,
    resize: Debouncer,
}

impl Default for EditorSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSurface {
    pub fn new() -> Self {
        Self {
            viewport_width: None,
            edit_mode: EditMode::Plain,
            document: document::default_spec(),
            last_error: None,
            resize: Debouncer::default(),
        }
    }

    /// Test-friendly constructor with a custom resize quiet period.
    pub fn with_resize_delay(delay_ms: u64) -> Self {
        Self {
            resize: Debouncer::new(delay_ms),
            ..Self::new()
        }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn viewport_width(&self) -> Option<i32> {
        self.viewport_width
    }

    /// Feed the current window width, once per frame.
    ///
    /// The very first reading applies immediately (initial width on mount);
    /// after that, a changed reading re-arms the debouncer and an unchanged
    /// one is ignored, so a burst of resize frames collapses into a single
    /// application of the final width after the quiet period.
    pub fn observe_viewport(&mut self, width: i32) {
        if self.viewport_width.is_none() && !self.resize.is_pending() {
            log::debug!("Initial viewport width: {}", width);
            self.viewport_width = Some(width);
            return;
        }

        let last_seen = self.resize.pending_value().or(self.viewport_width);
        if last_seen != Some(width) {
            self.resize.schedule(width);
        }
    }

    /// Apply a due resize, if any. Returns true when the stored viewport
    /// width actually changed (the shell uses this to trigger a repaint).
    pub fn tick(&mut self) -> bool {
        let Some(width) = self.resize.tick() else {
            return false;
        };
        if self.viewport_width == Some(width) {
            return false;
        }
        log::debug!(
            "Viewport resized: {:?} -> {}",
            self.viewport_width,
            width
        );
        self.viewport_width = Some(width);
        true
    }

    /// Time until a pending resize fires, for repaint scheduling.
    pub fn resize_due_in(&self) -> Option<Duration> {
        self.resize.time_until_due()
    }

    /// Flip between plain and rich editing. Pure mode transition: the
    /// document and the last error are left alone.
    pub fn toggle_mode(&mut self) {
        self.edit_mode = self.edit_mode.toggled();
        log::debug!("Edit mode: {:?}", self.edit_mode);
    }

    /// Apply one edit from either affordance. The only mutation path for
    /// the document: success replaces it wholesale and clears the error,
    /// failure records the parser's message and changes nothing else.
    pub fn on_edit(&mut self, input: EditInput) {
        match document::normalize(input) {
            Ok(doc) => {
                self.document = doc;
                self.last_error = None;
            }
            Err(e) => {
                log::warn!("Malformed document input: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Width available to the chart: viewport minus the editor panel and
    /// the right margin. Negative when the window is narrower than both;
    /// the chart panel clamps at draw time.
    pub fn chart_width(&self) -> Option<i32> {
        self.viewport_width
            .map(|w| w - EDITOR_PANEL_WIDTH - CHART_RIGHT_MARGIN)
    }

    /// Transient copy of the document for rendering, with the computed
    /// chart width stamped over its top-level `"width"`. The stored
    /// document never carries the derived width.
    pub fn render_spec(&self) -> Option<Value> {
        let width = self.chart_width()?;
        let mut spec = self.document.clone();
        if let Value::Object(map) = &mut spec {
            map.insert("width".to_string(), Value::from(width));
        }
        Some(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_state() {
        let surface = EditorSurface::new();
        assert_eq!(surface.edit_mode(), EditMode::Plain);
        assert_eq!(surface.viewport_width(), None);
        assert!(surface.last_error().is_none());
        assert_eq!(surface.document(), &document::default_spec());
        assert!(surface.render_spec().is_none());
    }

    #[test]
    fn test_valid_plain_edit_replaces_document() {
        let mut surface = EditorSurface::new();
        // Seed an error so we can see it cleared
        surface.on_edit(EditInput::PlainText("nope".into()));
        assert!(surface.last_error().is_some());

        surface.on_edit(EditInput::PlainText(r#"{"marks": []}"#.into()));
        assert_eq!(surface.document(), &json!({"marks": []}));
        assert!(surface.last_error().is_none());
    }

    #[test]
    fn test_malformed_edit_keeps_document() {
        let mut surface = EditorSurface::new();
        let before = surface.document().clone();

        surface.on_edit(EditInput::PlainText(r#"{"bad json"#.into()));
        assert_eq!(surface.document(), &before);
        let msg = surface.last_error().unwrap();
        assert!(!msg.is_empty());
        // Still the original 8-category dataset
        assert_eq!(surface.document()["data"][0]["values"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_rich_edit_normalizes() {
        let mut surface = EditorSurface::new();
        let tree = json!({"marks": [{"type": "rect"}]});
        surface.on_edit(EditInput::RichTree(tree.clone()));
        assert_eq!(surface.document(), &tree);
        assert!(surface.last_error().is_none());
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut surface = EditorSurface::new();
        surface.on_edit(EditInput::PlainText("broken".into()));
        let doc = surface.document().clone();
        let err = surface.last_error().map(str::to_string);

        surface.toggle_mode();
        assert_eq!(surface.edit_mode(), EditMode::Rich);
        surface.toggle_mode();
        assert_eq!(surface.edit_mode(), EditMode::Plain);
        assert_eq!(surface.document(), &doc);
        assert_eq!(surface.last_error().map(str::to_string), err);
    }

    #[test]
    fn test_first_observation_applies_immediately() {
        let mut surface = EditorSurface::new();
        surface.observe_viewport(1480);
        assert_eq!(surface.viewport_width(), Some(1480));
        assert_eq!(surface.chart_width(), Some(780));
    }

    #[test]
    fn test_resize_is_debounced_to_final_value() {
        let mut surface = EditorSurface::with_resize_delay(20);
        surface.observe_viewport(1000);

        // Burst of readings within the quiet window
        for width in [1010, 1100, 1200, 1280] {
            surface.observe_viewport(width);
            assert!(!surface.tick());
        }
        assert_eq!(surface.viewport_width(), Some(1000));

        std::thread::sleep(std::time::Duration::from_millis(30));
        assert!(surface.tick());
        assert_eq!(surface.viewport_width(), Some(1280));
        // Quiet afterwards: nothing more fires
        assert!(!surface.tick());
    }

    #[test]
    fn test_resize_idempotent_for_unchanged_width() {
        let mut surface = EditorSurface::with_resize_delay(10);
        surface.observe_viewport(1480);
        let width = surface.chart_width();

        // Same reading again: no event, nothing scheduled
        surface.observe_viewport(1480);
        assert!(surface.resize_due_in().is_none());
        assert!(!surface.tick());
        assert_eq!(surface.chart_width(), width);
    }

    #[test]
    fn test_render_spec_stamps_width_on_copy_only() {
        let mut surface = EditorSurface::new();
        surface.observe_viewport(1480);

        surface.on_edit(EditInput::PlainText(r#"{"marks": []}"#.into()));
        let spec = surface.render_spec().unwrap();
        assert_eq!(spec["width"], json!(1480 - 500 - 200));
        assert_eq!(spec["marks"], json!([]));
        // Stored document keeps no derived width
        assert_eq!(surface.document(), &json!({"marks": []}));
    }

    #[test]
    fn test_render_spec_overwrites_declared_width() {
        let mut surface = EditorSurface::new();
        surface.observe_viewport(1480);
        // Default spec declares width 400; the render copy wins
        assert_eq!(surface.render_spec().unwrap()["width"], json!(780));
        assert_eq!(surface.document()["width"], json!(400));
    }

    #[test]
    fn test_toggle_label_names_target_mode() {
        assert_eq!(EditMode::Plain.toggle_label(), "Rich mode");
        assert_eq!(EditMode::Rich.toggle_label(), "Plain mode");
    }
}
