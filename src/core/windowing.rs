use crate::core::{SeriesPoint, YearDomain};

/// Returns the points whose year falls inside the inclusive `years` window.
///
/// `points` must be sorted by year, which `Series` and `Band` guarantee, so
/// the window is a contiguous sub-slice.
#[must_use]
pub fn points_in_year_window(points: &[SeriesPoint], years: YearDomain) -> &[SeriesPoint] {
    let start = points.partition_point(|point| point.year < years.min);
    let end = points.partition_point(|point| point.year <= years.max);
    if start >= end {
        return &[];
    }
    &points[start..end]
}
