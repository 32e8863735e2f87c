//! Specification document model.
//!
//! The document is a plain `serde_json::Value` tree: objects, arrays,
//! strings, numbers, booleans, null. It loosely follows a declarative
//! chart-description schema but is never validated beyond a successful
//! parse. Both editing affordances funnel through [`normalize`], so every
//! value the app ever stores came out of the JSON parser.

use serde_json::{Value, json};

/// Fresh copy of the built-in default chart: a bar chart over a fixed
/// 8-row dataset with a hover tooltip signal.
///
/// A factory rather than a shared constant so each surface starts from an
/// independent value.
pub fn default_spec() -> Value {
    json!({
        "$schema": "https://vega.github.io/schema/vega/v3.json",
        "width": 400,
        "height": 200,
        "padding": 5,

        "data": [
            {
                "name": "table",
                "values": [
                    {"category": "A", "amount": 28},
                    {"category": "B", "amount": 55},
                    {"category": "C", "amount": 43},
                    {"category": "D", "amount": 91},
                    {"category": "E", "amount": 81},
                    {"category": "F", "amount": 53},
                    {"category": "G", "amount": 19},
                    {"category": "H", "amount": 87}
                ]
            }
        ],

        "signals": [
            {
                "name": "tooltip",
                "value": {},
                "on": [
                    {"events": "rect:mouseover", "update": "datum"},
                    {"events": "rect:mouseout", "update": "{}"}
                ]
            }
        ],

        "scales": [
            {
                "name": "xscale",
                "type": "band",
                "domain": {"data": "table", "field": "category"},
                "range": "width",
                "padding": 0.05,
                "round": true
            },
            {
                "name": "yscale",
                "domain": {"data": "table", "field": "amount"},
                "nice": true,
                "range": "height"
            }
        ],

        "axes": [
            {"orient": "bottom", "scale": "xscale"},
            {"orient": "left", "scale": "yscale"}
        ],

        "marks": [
            {
                "type": "rect",
                "from": {"data": "table"},
                "encode": {
                    "enter": {
                        "x": {"scale": "xscale", "field": "category"},
                        "width": {"scale": "xscale", "band": 1},
                        "y": {"scale": "yscale", "field": "amount"},
                        "y2": {"scale": "yscale", "value": 0}
                    },
                    "update": {
                        "fill": {"value": "steelblue"}
                    },
                    "hover": {
                        "fill": {"value": "red"}
                    }
                }
            },
            {
                "type": "text",
                "encode": {
                    "enter": {
                        "align": {"value": "center"},
                        "baseline": {"value": "bottom"},
                        "fill": {"value": "#333"}
                    },
                    "update": {
                        "x": {"scale": "xscale", "signal": "tooltip.category", "band": 0.5},
                        "y": {"scale": "yscale", "signal": "tooltip.amount", "offset": -2},
                        "text": {"signal": "tooltip.amount"},
                        "fillOpacity": [
                            {"test": "datum === tooltip", "value": 0},
                            {"value": 1}
                        ]
                    }
                }
            }
        ]
    })
}

/// One pending edit, from either affordance.
#[derive(Debug, Clone)]
pub enum EditInput {
    /// Full raw text from the plain affordance.
    PlainText(String),
    /// Fully-updated document copy from the tree affordance.
    RichTree(Value),
}

/// Turn an edit into a canonical document, or fail with the parser's error.
///
/// Plain text is parsed as JSON. A rich tree is serialized and re-parsed:
/// the round-trip strips any non-data artifacts the editing widget may have
/// attached. Anything non-JSON-representable is silently dropped in the
/// process; that matches the behavior this editor was modelled on.
pub fn normalize(input: EditInput) -> Result<Value, serde_json::Error> {
    match input {
        EditInput::PlainText(text) => serde_json::from_str(&text),
        EditInput::RichTree(tree) => serde_json::from_str(&serde_json::to_string(&tree)?),
    }
}

/// 2-space-indented text form, used to seed the plain affordance.
pub fn pretty(doc: &Value) -> String {
    serde_json::to_string_pretty(doc).unwrap_or_else(|e| {
        log::error!("Failed to pretty-print document: {}", e);
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec_shape() {
        let spec = default_spec();
        assert_eq!(spec["width"], json!(400));
        assert_eq!(spec["height"], json!(200));
        let rows = spec["data"][0]["values"].as_array().unwrap();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[3]["category"], json!("D"));
        assert_eq!(rows[3]["amount"], json!(91));
        assert_eq!(spec["signals"][0]["name"], json!("tooltip"));
        assert_eq!(spec["marks"][0]["type"], json!("rect"));
    }

    #[test]
    fn test_default_spec_is_fresh_per_call() {
        let mut a = default_spec();
        a["width"] = json!(9999);
        // Mutating one copy must not leak into the next
        assert_eq!(default_spec()["width"], json!(400));
    }

    #[test]
    fn test_normalize_plain_valid() {
        let doc = normalize(EditInput::PlainText(r#"{"marks": []}"#.into())).unwrap();
        assert_eq!(doc, json!({"marks": []}));
    }

    #[test]
    fn test_normalize_plain_malformed() {
        let err = normalize(EditInput::PlainText(r#"{"bad json"#.into())).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_normalize_rich_round_trips() {
        let tree = json!({"a": [1, 2, {"b": true, "c": null}], "d": "text"});
        let doc = normalize(EditInput::RichTree(tree.clone())).unwrap();
        assert_eq!(doc, tree);
    }

    #[test]
    fn test_pretty_two_space_indent() {
        let text = pretty(&json!({"marks": [1]}));
        assert!(text.contains("\n  \"marks\": [\n    1\n  ]"));
    }

    #[test]
    fn test_pretty_parses_back() {
        let spec = default_spec();
        let reparsed: Value = serde_json::from_str(&pretty(&spec)).unwrap();
        assert_eq!(reparsed, spec);
    }
}
