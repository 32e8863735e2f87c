//! Plain textual affordance - a multiline code box over the raw document.

use eframe::egui;
use serde_json::Value;

use crate::core::document::{self, EditInput};

/// Raw-text editor state. Holds the text buffer between frames.
///
/// The buffer is seeded from the pretty-printed document and re-seeded via
/// [`PlainEditor::resync`] whenever the affordance (re)activates, so edits
/// made through the tree show up on mode switch. While the affordance is
/// active the buffer is the source of truth: the document is never written
/// back into it between keystrokes, even when a keystroke fails to parse.
pub struct PlainEditor {
    buffer: String,
    seeded: bool,
}

impl Default for PlainEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainEditor {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            seeded: false,
        }
    }

    /// Reload the buffer from the document (2-space-indented form).
    pub fn resync(&mut self, doc: &Value) {
        self.buffer = document::pretty(doc);
        self.seeded = true;
    }

    /// Render the text box. Returns the full raw text on every change.
    pub fn ui(&mut self, ui: &mut egui::Ui, doc: &Value) -> Option<EditInput> {
        if !self.seeded {
            self.resync(doc);
        }

        let response = ui.add(
            egui::TextEdit::multiline(&mut self.buffer)
                .code_editor()
                .desired_width(f32::INFINITY)
                .desired_rows(30),
        );

        if response.changed() {
            Some(EditInput::PlainText(self.buffer.clone()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resync_pretty_prints() {
        let mut editor = PlainEditor::new();
        editor.resync(&json!({"marks": []}));
        assert_eq!(editor.buffer, "{\n  \"marks\": []\n}");
        assert!(editor.seeded);
    }
}
