//! Chart geometry: pure functions from data and options to a [`Drawing`],
//! serialized to SVG and written into a [`Surface`].

pub mod bar;
pub mod donut;
pub mod drawing;
pub mod line;
pub mod surface;
pub mod svg;

pub use bar::{bar_geometry, BarOptions};
pub use donut::{donut_geometry, DonutOptions};
pub use drawing::{Anchor, Drawing, Shape};
pub use line::{line_geometry, LineOptions};
pub use surface::{
    measure, render_bar, render_donut, render_line, MarkupSurface, Surface,
    DEFAULT_VIEWPORT_WIDTH,
};

use crate::core::series::Point;

/// Everything needed to draw one chart, independent of where it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Bar {
        labels: Vec<String>,
        values: Vec<f64>,
        options: BarOptions,
    },
    Line {
        series: Vec<Point>,
        options: LineOptions,
    },
    Donut {
        first: f64,
        second: f64,
        options: DonutOptions,
    },
}

impl ChartSpec {
    pub fn geometry(&self, width: f64) -> Drawing {
        match self {
            Self::Bar {
                labels,
                values,
                options,
            } => bar_geometry(labels, values, options, width),
            Self::Line { series, options } => line_geometry(series, options, width),
            Self::Donut {
                first,
                second,
                options,
            } => donut_geometry(*first, *second, options),
        }
    }

    pub fn render(&self, surface: &mut impl Surface) {
        let width = measure(surface);
        surface.replace(self.geometry(width));
    }

    /// SVG markup for a container of the given width (`None` uses the default).
    pub fn to_markup(&self, width: Option<f64>) -> String {
        let mut surface = MarkupSurface::new(width);
        self.render(&mut surface);
        surface.into_markup()
    }
}
