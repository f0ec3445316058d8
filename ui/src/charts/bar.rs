use super::drawing::{Anchor, Drawing, Shape, Stroke, TextStyle};
use crate::core::format::number_to_string;

pub(crate) const GRID_COLOR: &str = "#e5e7eb";
pub(crate) const BASELINE_COLOR: &str = "#cbd5e1";
pub(crate) const TICK_TEXT_COLOR: &str = "#6b7280";

#[derive(Debug, Clone, PartialEq)]
pub struct BarOptions {
    pub height: f64,
    pub pad: f64,
    pub gap: f64,
    pub ticks: usize,
    pub color: String,
    pub text_color: String,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            height: 240.0,
            pad: 44.0,
            gap: 16.0,
            ticks: 4,
            color: "#7c3aed".to_string(),
            text_color: "#111827".to_string(),
        }
    }
}

impl BarOptions {
    pub fn with_color(color: &str) -> Self {
        Self {
            color: color.to_string(),
            ..Self::default()
        }
    }
}

/// Labelled vertical bars over a gridded value axis.
///
/// Bars share the horizontal space left after padding and gaps; heights are
/// scaled against the largest value (never less than 1). An empty input, or
/// labels and values of different lengths, produce an empty drawing.
pub fn bar_geometry(labels: &[String], values: &[f64], options: &BarOptions, width: f64) -> Drawing {
    if labels.is_empty() || labels.len() != values.len() {
        return Drawing::empty();
    }

    let BarOptions {
        height,
        pad,
        gap,
        ticks,
        ..
    } = *options;
    let count = labels.len() as f64;
    let max = values.iter().copied().fold(1.0_f64, f64::max);
    let plot_height = height - pad * 2.0;
    let bar_width = ((width - pad * 2.0 - gap * (count - 1.0)) / count).max(0.0);
    let baseline = height - pad;

    let mut drawing = Drawing::stretched(width, height);

    let ticks = ticks.max(1);
    for i in 0..=ticks {
        let tick = max / ticks as f64 * i as f64;
        let y = baseline - tick / max * plot_height;
        drawing.push(Shape::Line {
            x1: pad,
            y1: y,
            x2: width - pad,
            y2: y,
            stroke: Stroke::hairline(GRID_COLOR),
        });
        drawing.push(Shape::Text {
            x: pad - 10.0,
            y: y + 6.0,
            content: number_to_string(tick.round()),
            style: TextStyle::new(13.0, TICK_TEXT_COLOR, Anchor::End),
        });
    }

    drawing.push(Shape::Line {
        x1: pad,
        y1: baseline,
        x2: width - pad,
        y2: baseline,
        stroke: Stroke::hairline(BASELINE_COLOR),
    });

    for (i, (label, value)) in labels.iter().zip(values).enumerate() {
        let x = pad + i as f64 * (bar_width + gap);
        let bar_height = (value / max * plot_height).max(0.0);
        let y = baseline - bar_height;
        let centre = x + bar_width / 2.0;

        drawing.push(Shape::Rect {
            x,
            y,
            width: bar_width,
            height: bar_height,
            radius: 10.0,
            fill: options.color.clone(),
        });
        drawing.push(Shape::Text {
            x: centre,
            y: y - 10.0,
            content: number_to_string(*value),
            style: TextStyle::new(16.0, &options.text_color, Anchor::Middle).bold(),
        });
        drawing.push(Shape::Text {
            x: centre,
            y: baseline + 30.0,
            content: label.clone(),
            style: TextStyle::new(14.0, "#111827", Anchor::Middle).bold(),
        });
    }

    drawing
}
