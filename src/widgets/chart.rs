//! Chart panel - draws a bar-chart specification with the egui painter.
//!
//! A [`ChartView`] is built for one chart width (its identity key). The
//! shell throws the instance away and builds a new one whenever the
//! computed width changes, so internal state like the hover highlight
//! never survives a resize.
//!
//! The interpreter is deliberately shallow: it understands rect marks over
//! a named data table with a band x-scale and a linear y-scale, which is
//! what the built-in default describes. Anything else degrades to a
//! diagnostic placeholder, never an error.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use serde_json::Value;

/// Space reserved left of the plot for the value axis.
const Y_AXIS_GUTTER: f32 = 48.0;
/// Space reserved under the plot for the category axis.
const X_AXIS_GUTTER: f32 = 24.0;
/// Value-axis tick count.
const Y_TICKS: usize = 5;

const DEFAULT_FILL: Color32 = Color32::from_rgb(0x46, 0x82, 0xb4); // steelblue
const DEFAULT_HOVER_FILL: Color32 = Color32::RED;

/// Width-keyed bar-chart renderer.
pub struct ChartView {
    width_key: i32,
    hover: Option<usize>,
}

impl ChartView {
    /// Build a renderer for one chart width.
    pub fn new(width_key: i32) -> Self {
        Self {
            width_key,
            hover: None,
        }
    }

    /// Identity key this instance was built for.
    pub fn width_key(&self) -> i32 {
        self.width_key
    }

    /// Draw the spec. The plot width comes from the spec's stamped
    /// `"width"`, clamped to the non-negative range at draw time.
    pub fn ui(&mut self, ui: &mut egui::Ui, spec: &Value) {
        let Some(bars) = BarSpec::extract(spec) else {
            ui.centered_and_justified(|ui| {
                ui.weak("Nothing to render: the spec has no rect mark over a data table");
            });
            return;
        };

        let plot_w = (spec["width"].as_f64().unwrap_or(self.width_key as f64) as f32).max(0.0);
        let plot_h = bars.height;
        let pad = bars.padding;

        let size = Vec2::new(
            Y_AXIS_GUTTER + plot_w + pad * 2.0,
            plot_h + X_AXIS_GUTTER + pad * 2.0,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let plot = Rect::from_min_size(
            response.rect.min + Vec2::new(Y_AXIS_GUTTER + pad, pad),
            Vec2::new(plot_w, plot_h),
        );

        let axis_stroke = Stroke::new(1.0, ui.visuals().weak_text_color());
        let text_color = ui.visuals().text_color();
        let font = FontId::proportional(11.0);

        // Axes
        painter.line_segment([plot.left_top(), plot.left_bottom()], axis_stroke);
        painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis_stroke);

        // Value-axis ticks
        let domain_max = nice_ceil(bars.rows.iter().map(|(_, v)| *v).fold(0.0, f64::max));
        for i in 0..=Y_TICKS {
            let value = domain_max * i as f64 / Y_TICKS as f64;
            let y = plot.bottom() - (value / domain_max) as f32 * plot.height();
            painter.line_segment(
                [Pos2::new(plot.left() - 3.0, y), Pos2::new(plot.left(), y)],
                axis_stroke,
            );
            painter.text(
                Pos2::new(plot.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                format_amount(value),
                font.clone(),
                text_color,
            );
        }

        if bars.rows.is_empty() || plot_w <= 0.0 {
            self.hover = None;
            return;
        }

        // Band layout: one step per category, inner padding from the scale
        let step = plot.width() / bars.rows.len() as f32;
        let inner_pad = step * bars.band_padding;
        let pointer = response.hover_pos();

        self.hover = None;
        let mut bar_rects = Vec::with_capacity(bars.rows.len());
        for (i, (_, value)) in bars.rows.iter().enumerate() {
            let h = ((value / domain_max) as f32 * plot.height()).max(0.0);
            let rect = Rect::from_min_max(
                Pos2::new(plot.left() + i as f32 * step + inner_pad, plot.bottom() - h),
                Pos2::new(plot.left() + (i + 1) as f32 * step - inner_pad, plot.bottom()),
            );
            if pointer.is_some_and(|p| rect.contains(p)) {
                self.hover = Some(i);
            }
            bar_rects.push(rect);
        }

        for (i, ((category, value), rect)) in bars.rows.iter().zip(&bar_rects).enumerate() {
            let hovered = self.hover == Some(i);
            let fill = if hovered { bars.hover_fill } else { bars.fill };
            painter.rect_filled(*rect, 0.0, fill);

            // Category label under the bar
            painter.text(
                Pos2::new(rect.center().x, plot.bottom() + 4.0),
                Align2::CENTER_TOP,
                category,
                font.clone(),
                text_color,
            );

            // Tooltip text mark above the hovered bar
            if hovered {
                painter.text(
                    Pos2::new(rect.center().x, rect.top() - 2.0),
                    Align2::CENTER_BOTTOM,
                    format_amount(*value),
                    font.clone(),
                    bars.label_fill,
                );
            }
        }
    }
}

/// Everything the painter needs, pulled out of the declarative spec.
struct BarSpec {
    height: f32,
    padding: f32,
    band_padding: f32,
    rows: Vec<(String, f64)>,
    fill: Color32,
    hover_fill: Color32,
    label_fill: Color32,
}

impl BarSpec {
    fn extract(spec: &Value) -> Option<Self> {
        let marks = spec["marks"].as_array()?;
        let rect_mark = marks.iter().find(|m| m["type"] == "rect")?;
        let text_mark = marks.iter().find(|m| m["type"] == "text");

        // Table: the rect mark's source, else the first data entry with rows
        let data = spec["data"].as_array()?;
        let table = rect_mark["from"]["data"]
            .as_str()
            .and_then(|name| data.iter().find(|d| d["name"] == name))
            .or_else(|| data.iter().find(|d| d["values"].is_array()))?;

        // Field names come from the scale domains
        let scales = spec["scales"].as_array().map(Vec::as_slice).unwrap_or(&[]);
        let band = scales.iter().find(|s| s["type"] == "band");
        let linear = scales.iter().find(|s| s["type"] != "band");
        let x_field = band
            .and_then(|s| s["domain"]["field"].as_str())
            .unwrap_or("category");
        let y_field = linear
            .and_then(|s| s["domain"]["field"].as_str())
            .unwrap_or("amount");
        let band_padding = band
            .and_then(|s| s["padding"].as_f64())
            .unwrap_or(0.05) as f32;

        let rows = table["values"]
            .as_array()?
            .iter()
            .filter_map(|row| {
                let y = row[y_field].as_f64()?;
                let x = match &row[x_field] {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((x, y))
            })
            .collect();

        let encode = &rect_mark["encode"];
        let fill = encode["update"]["fill"]["value"]
            .as_str()
            .and_then(parse_color)
            .unwrap_or(DEFAULT_FILL);
        let hover_fill = encode["hover"]["fill"]["value"]
            .as_str()
            .and_then(parse_color)
            .unwrap_or(DEFAULT_HOVER_FILL);
        let label_fill = text_mark
            .and_then(|m| m["encode"]["enter"]["fill"]["value"].as_str())
            .and_then(parse_color)
            .unwrap_or(Color32::from_rgb(0x33, 0x33, 0x33));

        Some(Self {
            height: spec["height"].as_f64().unwrap_or(200.0) as f32,
            padding: spec["padding"].as_f64().unwrap_or(5.0) as f32,
            band_padding,
            rows,
            fill,
            hover_fill,
            label_fill,
        })
    }
}

/// Round up to the next "nice" axis bound (1/2/5 ladder).
fn nice_ceil(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(max.log10().floor());
    for mult in [1.0, 2.0, 5.0, 10.0] {
        let bound = mult * magnitude;
        if bound >= max {
            return bound;
        }
    }
    10.0 * magnitude
}

/// Axis/tooltip number formatting: integers without a trailing ".0".
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// CSS-style colors as they appear in chart specs: #rgb, #rrggbb, and the
/// handful of names the default document uses.
fn parse_color(s: &str) -> Option<Color32> {
    if let Some(hex) = s.strip_prefix('#') {
        let expand = |c: u8| (c << 4) | c;
        return match hex.len() {
            3 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                Some(Color32::from_rgb(
                    expand(((v >> 8) & 0xf) as u8),
                    expand(((v >> 4) & 0xf) as u8),
                    expand((v & 0xf) as u8),
                ))
            }
            6 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                Some(Color32::from_rgb(
                    ((v >> 16) & 0xff) as u8,
                    ((v >> 8) & 0xff) as u8,
                    (v & 0xff) as u8,
                ))
            }
            _ => None,
        };
    }
    match s {
        "steelblue" => Some(DEFAULT_FILL),
        "red" => Some(Color32::RED),
        "firebrick" => Some(Color32::from_rgb(0xb2, 0x22, 0x22)),
        "black" => Some(Color32::BLACK),
        "white" => Some(Color32::WHITE),
        "gray" | "grey" => Some(Color32::GRAY),
        "green" => Some(Color32::from_rgb(0x00, 0x80, 0x00)),
        "blue" => Some(Color32::BLUE),
        "orange" => Some(Color32::from_rgb(0xff, 0xa5, 0x00)),
        _ => None,
    }
}
