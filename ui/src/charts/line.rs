use super::{
    bar::{BASELINE_COLOR, GRID_COLOR, TICK_TEXT_COLOR},
    drawing::{Anchor, Drawing, PathCommand, Shape, Stroke, TextStyle},
};
use crate::core::{format::to_fixed, series::Point};

#[derive(Debug, Clone, PartialEq)]
pub struct LineOptions {
    pub height: f64,
    pub pad: f64,
    pub dot_radius: f64,
    pub ticks: usize,
    pub color: String,
    pub fill: String,
    /// Text shown instead of an empty drawing when the series is empty.
    pub empty_placeholder: Option<String>,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            height: 240.0,
            pad: 44.0,
            dot_radius: 5.0,
            ticks: 4,
            color: "#f97316".to_string(),
            fill: "rgba(249,115,22,0.15)".to_string(),
            empty_placeholder: None,
        }
    }
}

/// Area-under-line chart with one dot per sample.
pub fn line_geometry(series: &[Point], options: &LineOptions, width: f64) -> Drawing {
    let LineOptions {
        height,
        pad,
        dot_radius,
        ticks,
        ..
    } = *options;

    if series.is_empty() {
        let Some(placeholder) = &options.empty_placeholder else {
            return Drawing::empty();
        };
        let mut drawing = Drawing::stretched(width, height);
        drawing.push(Shape::Text {
            x: width / 2.0,
            y: height / 2.0,
            content: placeholder.clone(),
            style: TextStyle::new(14.0, TICK_TEXT_COLOR, Anchor::Middle),
        });
        return drawing;
    }

    let (min, max) = series.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.y), hi.max(p.y))
    });
    let nice_min = min.floor();
    let nice_max = max.ceil();
    let range = if nice_max - nice_min == 0.0 {
        1.0
    } else {
        nice_max - nice_min
    };

    let last = series.len() - 1;
    let baseline = height - pad;
    let step_x = (width - pad * 2.0) / last.max(1) as f64;
    let scale_y = |v: f64| baseline - (v - nice_min) / range * (height - pad * 2.0);

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (pad + i as f64 * step_x, scale_y(p.y)))
        .collect();

    let mut drawing = Drawing::stretched(width, height);

    let ticks = ticks.max(1);
    for i in 0..=ticks {
        let tick = nice_min + range * i as f64 / ticks as f64;
        let y = scale_y(tick);
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
            content: to_fixed(tick, 1),
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

    let mut label_indices = vec![0, last / 2, last];
    label_indices.dedup();
    for i in label_indices {
        drawing.push(Shape::Text {
            x: pad + i as f64 * step_x,
            y: baseline + 28.0,
            content: series[i].x.to_string(),
            style: TextStyle::new(12.0, TICK_TEXT_COLOR, Anchor::Middle),
        });
    }

    let polyline: Vec<PathCommand> = points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            if i == 0 {
                PathCommand::MoveTo(x, y)
            } else {
                PathCommand::LineTo(x, y)
            }
        })
        .collect();

    let mut area = polyline.clone();
    area.push(PathCommand::LineTo(pad + last as f64 * step_x, baseline));
    area.push(PathCommand::LineTo(pad, baseline));
    area.push(PathCommand::Close);

    drawing.push(Shape::Path {
        commands: area,
        fill: Some(options.fill.clone()),
        stroke: None,
    });
    drawing.push(Shape::Path {
        commands: polyline,
        fill: None,
        stroke: Some(Stroke::rounded(&options.color, 3.0)),
    });

    for (x, y) in points {
        drawing.push(Shape::Circle {
            cx: x,
            cy: y,
            r: dot_radius,
            fill: Some("#ffffff".to_string()),
            stroke: Some(Stroke {
                color: options.color.clone(),
                width: 3.0,
                round_caps: false,
            }),
            dash: None,
        });
    }

    drawing
}
