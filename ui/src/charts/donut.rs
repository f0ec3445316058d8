use std::f64::consts::PI;

use super::drawing::{Anchor, ArcDash, Drawing, Shape, Stroke, TextStyle};
use crate::core::format::to_fixed;

const WIDTH: f64 = 260.0;
const HEIGHT: f64 = 150.0;
const RADIUS: f64 = 40.0;
const CENTRES: [f64; 2] = [70.0, 190.0];
const CENTRE_Y: f64 = 70.0;
const RING_WIDTH: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DonutOptions {
    pub first_caption: String,
    pub second_caption: String,
    pub first_color: String,
    pub second_color: String,
    pub track_color: String,
}

impl Default for DonutOptions {
    fn default() -> Self {
        Self {
            first_caption: "Average".to_string(),
            second_caption: "Best".to_string(),
            first_color: "#60a5fa".to_string(),
            second_color: "#22c55e".to_string(),
            track_color: "#e5e7eb".to_string(),
        }
    }
}

/// Two percentage rings side by side on a fixed canvas. The viewport width
/// plays no part. A non-finite value produces an empty drawing.
pub fn donut_geometry(first: f64, second: f64, options: &DonutOptions) -> Drawing {
    if !first.is_finite() || !second.is_finite() {
        return Drawing::empty();
    }

    let mut drawing = Drawing::new(WIDTH, HEIGHT);
    let rings = [
        (first, CENTRES[0], &options.first_color),
        (second, CENTRES[1], &options.second_color),
    ];

    for &(value, cx, color) in &rings {
        push_ring(&mut drawing, value, cx, color, &options.track_color);
    }
    for &(value, cx, _) in &rings {
        drawing.push(Shape::Text {
            x: cx,
            y: CENTRE_Y + 4.0,
            content: format!("{}%", to_fixed(value, 1)),
            style: TextStyle::new(12.0, "#374151", Anchor::Middle).bold(),
        });
    }
    for (caption, cx) in [&options.first_caption, &options.second_caption]
        .into_iter()
        .zip(CENTRES)
    {
        drawing.push(Shape::Text {
            x: cx,
            y: HEIGHT - 20.0,
            content: caption.clone(),
            style: TextStyle::new(12.0, "#6b7280", Anchor::Middle),
        });
    }

    drawing
}

fn push_ring(drawing: &mut Drawing, value: f64, cx: f64, color: &str, track: &str) {
    let circumference = 2.0 * PI * RADIUS;
    let length = circumference * value.clamp(0.0, 100.0) / 100.0;

    drawing.push(Shape::Circle {
        cx,
        cy: CENTRE_Y,
        r: RADIUS,
        fill: None,
        stroke: Some(Stroke {
            color: track.to_string(),
            width: RING_WIDTH,
            round_caps: false,
        }),
        dash: None,
    });
    drawing.push(Shape::Circle {
        cx,
        cy: CENTRE_Y,
        r: RADIUS,
        fill: None,
        stroke: Some(Stroke::rounded(color, RING_WIDTH)),
        dash: Some(ArcDash {
            length,
            gap: circumference - length,
            rotate: -90.0,
        }),
    });
}
