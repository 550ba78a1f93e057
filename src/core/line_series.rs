use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::{CoordinateMapper, SeriesPoint};

/// SVG path data plus the counts a presentation layer needs to decide
/// whether the path is worth drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPath {
    pub d: String,
    /// Number of data points that made it into the path.
    pub point_count: usize,
    /// Number of disjoint `M ... L ...` sub-paths.
    pub segment_count: usize,
}

impl SeriesPath {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    /// True when a coordinate was formatted from a NaN or infinite value.
    #[must_use]
    pub fn has_non_finite_coordinate(&self) -> bool {
        self.d.contains("NaN") || self.d.contains("inf")
    }

    pub(crate) fn move_to(&mut self, x: f64, y: f64) {
        self.push_command('M', x, y);
        self.segment_count += 1;
    }

    pub(crate) fn line_to(&mut self, x: f64, y: f64) {
        self.push_command('L', x, y);
    }

    pub(crate) fn close(&mut self) {
        self.d.push_str(" Z");
    }

    fn push_command(&mut self, command: char, x: f64, y: f64) {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        // Writing into a `String` cannot fail.
        let _ = write!(self.d, "{command}{x:.2},{y:.2}");
    }
}

/// Builds a polyline path over `points`, leaving gaps at missing values.
///
/// A missing value ends the current sub-path; the next valid point starts a
/// new one with `M`, so valid points on both sides of a gap are never joined.
#[must_use]
pub fn build_path(points: &[SeriesPoint], mapper: CoordinateMapper) -> SeriesPath {
    let mut path = SeriesPath::empty();
    let mut pen_down = false;

    for point in points {
        let Some(value) = point.finite_value() else {
            pen_down = false;
            continue;
        };
        let pixel = mapper.to_pixel(f64::from(point.year), value);
        if pen_down {
            path.line_to(pixel.x, pixel.y);
        } else {
            path.move_to(pixel.x, pixel.y);
            pen_down = true;
        }
        path.point_count += 1;
    }

    path
}
