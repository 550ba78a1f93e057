use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plotting rectangle for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for PlotPadding {
    fn default() -> Self {
        Self {
            top: 24.0,
            right: 32.0,
            bottom: 40.0,
            left: 56.0,
        }
    }
}

/// Plotting rectangle in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Derives the plotting rectangle left after removing `padding`.
    ///
    /// Widths and heights never go negative; a padding larger than the
    /// viewport yields a zero-sized plot anchored at the padding origin.
    #[must_use]
    pub fn from_viewport(viewport: Viewport, padding: PlotPadding) -> Self {
        let width = (f64::from(viewport.width) - padding.left - padding.right).max(0.0);
        let height = (f64::from(viewport.height) - padding.top - padding.bottom).max(0.0);
        Self::new(padding.left, padding.top, width, height)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn clamp_x(self, x: f64) -> f64 {
        x.clamp(self.left, self.right())
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One observation of a series.
///
/// `year` is the x-axis position. Per-year monthly series store the month
/// index (1..=12) there instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: Option<f64>,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(year: i32, value: f64) -> Self {
        Self {
            year,
            value: Some(value),
        }
    }

    #[must_use]
    pub fn missing(year: i32) -> Self {
        Self { year, value: None }
    }

    /// Returns the value only when it is present and finite.
    #[must_use]
    pub fn finite_value(self) -> Option<f64> {
        self.value.filter(|value| value.is_finite())
    }
}

/// Climate metric carried by annual rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    AvgTemp,
    MaxTemp,
    MinTemp,
    Rainfall,
    HotDays,
    AvgTempMa5,
}

impl Metric {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AvgTemp => "Average temperature",
            Self::MaxTemp => "Maximum temperature",
            Self::MinTemp => "Minimum temperature",
            Self::Rainfall => "Rainfall",
            Self::HotDays => "Days above 25 °C",
            Self::AvgTempMa5 => "Average temperature (5-year mean)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeriesKey {
    /// One line per year, x positions are months.
    Year(i32),
    /// One line per metric, x positions are years.
    Metric(Metric),
    /// Shaded envelope between two metrics.
    Band { lower: Metric, upper: Metric },
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Metric(metric) => f.write_str(metric.label()),
            Self::Band { lower, upper } => write!(f, "{} - {}", lower.label(), upper.label()),
        }
    }
}

/// Ordered sequence of points for one key, sorted by year ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub key: SeriesKey,
    pub label: String,
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Builds a series, sorting points by year and keeping the last point
    /// seen for a duplicated year.
    #[must_use]
    pub fn new(key: SeriesKey, label: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            key,
            label: label.into(),
            points: canonicalize_points(points),
        }
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn valid_point_count(&self) -> usize {
        self.points
            .iter()
            .filter(|point| point.finite_value().is_some())
            .count()
    }
}

/// Shaded region between a lower and an upper bound series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub key: SeriesKey,
    pub label: String,
    lower: Vec<SeriesPoint>,
    upper: Vec<SeriesPoint>,
}

impl Band {
    #[must_use]
    pub fn new(
        key: SeriesKey,
        label: impl Into<String>,
        lower: Vec<SeriesPoint>,
        upper: Vec<SeriesPoint>,
    ) -> Self {
        Self {
            key,
            label: label.into(),
            lower: canonicalize_points(lower),
            upper: canonicalize_points(upper),
        }
    }

    #[must_use]
    pub fn lower(&self) -> &[SeriesPoint] {
        &self.lower
    }

    #[must_use]
    pub fn upper(&self) -> &[SeriesPoint] {
        &self.upper
    }
}

fn canonicalize_points(mut points: Vec<SeriesPoint>) -> Vec<SeriesPoint> {
    points.sort_by_key(|point| point.year);
    let mut canonical: Vec<SeriesPoint> = Vec::with_capacity(points.len());
    for point in points {
        match canonical.last_mut() {
            Some(last) if last.year == point.year => *last = point,
            _ => canonical.push(point),
        }
    }
    canonical
}
