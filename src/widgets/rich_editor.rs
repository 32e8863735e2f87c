//! Rich tree affordance - structured editing over the document.
//!
//! Objects and arrays render as collapsing nodes, scalars as inline
//! editors matched to their type. Any committed change rebuilds and emits
//! a full copy of the document; the surface round-trips that copy through
//! the normal parse path, so tree edits obey the same invariant as text
//! edits.

use eframe::egui;
use serde_json::{Number, Value};

use crate::core::document::EditInput;

/// Subtrees at this depth start collapsed; everything else starts open.
/// Depth 1 is an immediate child of the document root.
pub const COLLAPSE_DEPTH: usize = 3;

fn collapsed_by_default(depth: usize) -> bool {
    depth == COLLAPSE_DEPTH
}

/// Render the tree editor. Returns a fully-updated document copy when any
/// value was edited this frame.
pub fn ui(ui: &mut egui::Ui, doc: &Value) -> Option<EditInput> {
    let mut working = doc.clone();
    let mut changed = false;

    match &mut working {
        Value::Object(map) => {
            for (key, value) in map.iter_mut() {
                changed |= node_ui(ui, &format!("$.{key}"), key, value, 1);
            }
        }
        Value::Array(items) => {
            for (i, value) in items.iter_mut().enumerate() {
                changed |= node_ui(ui, &format!("$[{i}]"), &format!("[{i}]"), value, 1);
            }
        }
        // Degenerate document (bare scalar): still editable
        leaf => changed |= leaf_ui(ui, "$", leaf),
    }

    changed.then_some(EditInput::RichTree(working))
}

fn node_ui(ui: &mut egui::Ui, path: &str, key: &str, value: &mut Value, depth: usize) -> bool {
    let mut changed = false;
    match value {
        Value::Object(map) => {
            egui::CollapsingHeader::new(format!("{key} ({})", map.len()))
                .id_salt(path)
                .default_open(!collapsed_by_default(depth))
                .show(ui, |ui| {
                    for (k, v) in map.iter_mut() {
                        changed |= node_ui(ui, &format!("{path}.{k}"), k, v, depth + 1);
                    }
                });
        }
        Value::Array(items) => {
            egui::CollapsingHeader::new(format!("{key} [{}]", items.len()))
                .id_salt(path)
                .default_open(!collapsed_by_default(depth))
                .show(ui, |ui| {
                    for (i, v) in items.iter_mut().enumerate() {
                        changed |=
                            node_ui(ui, &format!("{path}[{i}]"), &format!("[{i}]"), v, depth + 1);
                    }
                });
        }
        leaf => {
            ui.horizontal(|ui| {
                ui.label(format!("{}:", key));
                changed |= leaf_ui(ui, path, leaf);
            });
        }
    }
    changed
}

fn leaf_ui(ui: &mut egui::Ui, path: &str, value: &mut Value) -> bool {
    let mut changed = false;
    match value {
        Value::String(s) => {
            let response = ui.add(
                egui::TextEdit::singleline(s)
                    .id_salt(path)
                    .desired_width(ui.available_width()),
            );
            changed = response.changed();
        }
        Value::Number(n) => {
            let mut edited = n.as_f64().unwrap_or(0.0);
            let was_int = n.is_i64() || n.is_u64();
            let response = ui.add(egui::DragValue::new(&mut edited).speed(1.0));
            if response.changed()
                && let Some(updated) = number_value(edited, was_int)
            {
                *value = updated;
                changed = true;
            }
        }
        Value::Bool(b) => {
            changed = ui.checkbox(b, "").changed();
        }
        Value::Null => {
            ui.weak("null");
        }
        // Containers are handled by node_ui
        Value::Object(_) | Value::Array(_) => {}
    }
    changed
}

/// Rebuild a JSON number from an edited f64, keeping integers integral.
/// None for values JSON cannot represent (NaN, infinities).
fn number_value(edited: f64, was_int: bool) -> Option<Value> {
    if !edited.is_finite() {
        return None;
    }
    if was_int && edited.fract() == 0.0 {
        Some(Value::from(edited as i64))
    } else {
        Number::from_f64(edited).map(Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collapse_only_at_depth_three() {
        assert!(!collapsed_by_default(1));
        assert!(!collapsed_by_default(2));
        assert!(collapsed_by_default(3));
        assert!(!collapsed_by_default(4));
    }

    #[test]
    fn test_number_value_keeps_integers_integral() {
        assert_eq!(number_value(28.0, true), Some(json!(28)));
        assert_eq!(number_value(28.5, true), Some(json!(28.5)));
        assert_eq!(number_value(0.05, false), Some(json!(0.05)));
        assert_eq!(number_value(f64::NAN, false), None);
    }
}
