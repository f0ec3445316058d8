use std::fmt::Write;

use super::drawing::{Drawing, PathCommand, Shape, Stroke, TextStyle};
use crate::core::format::number_to_string;

/// Serialize a drawing to standalone SVG markup. The empty drawing becomes
/// the empty string so a cleared surface holds no element at all.
pub fn to_markup(drawing: &Drawing) -> String {
    if drawing.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(256 + drawing.shapes.len() * 96);
    let aspect = if drawing.preserve_aspect {
        ""
    } else {
        " preserveAspectRatio=\"none\""
    };
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\"{aspect} aria-hidden=\"true\">",
        num(drawing.width),
        num(drawing.height)
    );

    for shape in &drawing.shapes {
        write_shape(&mut out, shape);
    }

    out.push_str("</svg>");
    out
}

fn write_shape(out: &mut String, shape: &Shape) {
    match shape {
        Shape::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
                num(*x1),
                num(*y1),
                num(*x2),
                num(*y2),
                stroke_attrs(stroke)
            );
        }
        Shape::Rect {
            x,
            y,
            width,
            height,
            radius,
            fill,
        } => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{}\"/>",
                num(*x),
                num(*y),
                num(*width),
                num(*height),
                num(*radius),
                escape(fill)
            );
        }
        Shape::Text {
            x,
            y,
            content,
            style,
        } => {
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\"{}>{}</text>",
                num(*x),
                num(*y),
                text_attrs(style),
                escape(content)
            );
        }
        Shape::Path {
            commands,
            fill,
            stroke,
        } => {
            let fill = fill.as_deref().unwrap_or("none");
            let stroke = stroke.as_ref().map(stroke_attrs).unwrap_or_default();
            let _ = write!(
                out,
                "<path d=\"{}\" fill=\"{}\"{stroke}/>",
                path_data(commands),
                escape(fill)
            );
        }
        Shape::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            dash,
        } => {
            let fill = fill.as_deref().unwrap_or("none");
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"",
                num(*cx),
                num(*cy),
                num(*r),
                escape(fill)
            );
            if let Some(stroke) = stroke {
                out.push_str(&stroke_attrs(stroke));
            }
            if let Some(dash) = dash {
                let _ = write!(
                    out,
                    " transform=\"rotate({} {} {})\" stroke-dasharray=\"{} {}\"",
                    num(dash.rotate),
                    num(*cx),
                    num(*cy),
                    num(dash.length),
                    num(dash.gap)
                );
            }
            out.push_str("/>");
        }
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(" stroke=\"{}\"", escape(&stroke.color));
    if stroke.width != 1.0 {
        let _ = write!(attrs, " stroke-width=\"{}\"", num(stroke.width));
    }
    if stroke.round_caps {
        attrs.push_str(" stroke-linecap=\"round\" stroke-linejoin=\"round\"");
    }
    attrs
}

fn text_attrs(style: &TextStyle) -> String {
    let mut attrs = format!(
        " text-anchor=\"{}\" font-size=\"{}\" fill=\"{}\"",
        style.anchor.as_str(),
        num(style.size),
        escape(&style.color)
    );
    if style.bold {
        attrs.push_str(" font-weight=\"900\"");
    }
    attrs
}

fn path_data(commands: &[PathCommand]) -> String {
    commands
        .iter()
        .map(|command| match command {
            PathCommand::MoveTo(x, y) => format!("M {} {}", num(*x), num(*y)),
            PathCommand::LineTo(x, y) => format!("L {} {}", num(*x), num(*y)),
            PathCommand::Close => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// Two decimals are plenty for screen coordinates and keep output stable.
fn num(value: f64) -> String {
    number_to_string((value * 100.0).round() / 100.0)
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{
        bar::{bar_geometry, BarOptions},
        donut::{donut_geometry, DonutOptions},
    };

    #[test]
    fn empty_drawing_is_empty_markup() {
        assert_eq!(to_markup(&Drawing::empty()), "");
    }

    #[test]
    fn bar_markup_stretches_and_escapes() {
        let drawing = bar_geometry(
            &["Mistakes / Game".to_string(), "<b>&".to_string()],
            &[3.25, 1.0],
            &BarOptions::default(),
            640.0,
        );
        let markup = to_markup(&drawing);
        assert!(markup.starts_with("<svg"));
        assert!(markup.contains("viewBox=\"0 0 640 240\" preserveAspectRatio=\"none\""));
        assert!(markup.contains(">3.25</text>"));
        assert!(markup.contains("&lt;b&gt;&amp;"));
        assert!(!markup.contains("<b>"));
        assert_eq!(markup.matches("<rect").count(), 2);
        assert!(markup.ends_with("</svg>"));
    }

    #[test]
    fn donut_markup_keeps_aspect_and_rotates_arcs() {
        let markup = to_markup(&donut_geometry(50.0, 75.0, &DonutOptions::default()));
        assert!(!markup.contains("preserveAspectRatio"));
        assert!(markup.contains("transform=\"rotate(-90 70 70)\""));
        assert!(markup.contains("transform=\"rotate(-90 190 70)\""));
        assert!(markup.contains("stroke-dasharray=\"125.66 125.66\""));
    }

    #[test]
    fn markup_is_deterministic() {
        let drawing = bar_geometry(&["a".to_string()], &[1.0], &BarOptions::default(), 333.3);
        assert_eq!(to_markup(&drawing), to_markup(&drawing.clone()));
    }
}
