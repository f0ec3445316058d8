//! Vector drawing instructions produced by the geometry functions.

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Middle,
    End,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub round_caps: bool,
}

impl Stroke {
    pub fn hairline(color: &str) -> Self {
        Self {
            color: color.to_string(),
            width: 1.0,
            round_caps: false,
        }
    }

    pub fn rounded(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            round_caps: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: String,
    pub anchor: Anchor,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size: f64, color: &str, anchor: Anchor) -> Self {
        Self {
            size,
            color: color.to_string(),
            anchor,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Dash pattern for circles drawn as arcs: `(visible, gap)` lengths plus the
/// rotation (degrees) applied around the centre so the arc starts at 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcDash {
    pub length: f64,
    pub gap: f64,
    pub rotate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        fill: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: TextStyle,
    },
    Path {
        commands: Vec<PathCommand>,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
        dash: Option<ArcDash>,
    },
}

/// A complete chart: viewBox size plus shapes in paint order. The default
/// value is the empty drawing (nothing rendered).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    /// `false` lets the viewBox stretch to the container.
    pub preserve_aspect: bool,
    pub shapes: Vec<Shape>,
}

impl Drawing {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            preserve_aspect: true,
            shapes: Vec::new(),
        }
    }

    /// A drawing that fills its container in both directions.
    pub fn stretched(width: f64, height: f64) -> Self {
        Self {
            preserve_aspect: false,
            ..Self::new(width, height)
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn rects(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
                ..
            } => Some((*x, *y, *width, *height)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn count_lines(&self) -> usize {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Line { .. }))
            .count()
    }

    pub fn count_circles(&self) -> usize {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Circle { .. }))
            .count()
    }
}
