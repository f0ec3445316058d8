use super::{
    bar::{bar_geometry, BarOptions},
    donut::{donut_geometry, DonutOptions},
    drawing::Drawing,
    line::{line_geometry, LineOptions},
    svg::to_markup,
};
use crate::core::series::Point;

/// Width used when a surface cannot report a usable one.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 640.0;

/// Something a chart can be drawn into.
pub trait Surface {
    /// Current rendered width in pixels, if known.
    fn client_width(&self) -> Option<f64>;

    /// Replace the whole content with `drawing`.
    fn replace(&mut self, drawing: Drawing);
}

/// Usable width of a surface; zero, negative and unknown widths fall back.
pub fn measure(surface: &impl Surface) -> f64 {
    surface
        .client_width()
        .filter(|width| width.is_finite() && *width > 0.0)
        .unwrap_or(DEFAULT_VIEWPORT_WIDTH)
}

pub fn render_bar(surface: &mut impl Surface, labels: &[String], values: &[f64], options: &BarOptions) {
    let width = measure(surface);
    surface.replace(bar_geometry(labels, values, options, width));
}

pub fn render_line(surface: &mut impl Surface, series: &[Point], options: &LineOptions) {
    let width = measure(surface);
    surface.replace(line_geometry(series, options, width));
}

pub fn render_donut(surface: &mut impl Surface, first: f64, second: f64, options: &DonutOptions) {
    surface.replace(donut_geometry(first, second, options));
}

/// A surface that keeps its content as SVG markup, ready to be injected into
/// a container element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupSurface {
    width: Option<f64>,
    markup: String,
}

impl MarkupSurface {
    pub fn new(width: Option<f64>) -> Self {
        Self {
            width,
            markup: String::new(),
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn into_markup(self) -> String {
        self.markup
    }
}

impl Surface for MarkupSurface {
    fn client_width(&self) -> Option<f64> {
        self.width
    }

    fn replace(&mut self, drawing: Drawing) {
        self.markup = to_markup(&drawing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        width: Option<f64>,
        last: Option<Drawing>,
        replaced: usize,
    }

    impl Surface for Recorder {
        fn client_width(&self) -> Option<f64> {
            self.width
        }

        fn replace(&mut self, drawing: Drawing) {
            self.replaced += 1;
            self.last = Some(drawing);
        }
    }

    #[test]
    fn unknown_or_zero_width_falls_back() {
        assert_eq!(measure(&Recorder::default()), 640.0);
        assert_eq!(
            measure(&Recorder {
                width: Some(0.0),
                ..Recorder::default()
            }),
            640.0
        );
        assert_eq!(
            measure(&Recorder {
                width: Some(480.0),
                ..Recorder::default()
            }),
            480.0
        );
    }

    #[test]
    fn render_uses_measured_width() {
        let mut surface = Recorder {
            width: Some(400.0),
            ..Recorder::default()
        };
        render_bar(&mut surface, &["a".to_string()], &[1.0], &BarOptions::default());
        assert_eq!(surface.last.as_ref().map(|d| d.width), Some(400.0));
    }

    #[test]
    fn invalid_input_clears_previous_content() {
        let mut surface = MarkupSurface::new(Some(500.0));
        render_bar(&mut surface, &["a".to_string()], &[3.0], &BarOptions::default());
        assert!(!surface.markup().is_empty());

        render_bar(&mut surface, &["a".to_string()], &[], &BarOptions::default());
        assert_eq!(surface.markup(), "");
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let mut surface = MarkupSurface::new(None);
        render_donut(&mut surface, 80.0, 95.0, &DonutOptions::default());
        let first = surface.markup().to_string();
        render_donut(&mut surface, 80.0, 95.0, &DonutOptions::default());
        assert_eq!(surface.markup(), first);
    }

    #[test]
    fn every_render_replaces_content() {
        let mut surface = Recorder::default();
        render_line(&mut surface, &[], &LineOptions::default());
        render_donut(&mut surface, f64::NAN, 1.0, &DonutOptions::default());
        assert_eq!(surface.replaced, 2);
        assert!(surface.last.is_some_and(|d| d.is_empty()));
    }
}
