use std::collections::BTreeMap;

use crate::core::{CoordinateMapper, PixelPoint, SeriesPath, SeriesPoint};

/// Builds a closed, fillable band between `lower` and `upper`.
///
/// The upper boundary is traced left to right, then the lower boundary right
/// to left. Only years where both bounds are finite participate; fewer than
/// two such years produce an empty path.
#[must_use]
pub fn build_band_path(
    lower: &[SeriesPoint],
    upper: &[SeriesPoint],
    mapper: CoordinateMapper,
) -> SeriesPath {
    let lower_by_year: BTreeMap<i32, f64> = lower
        .iter()
        .filter_map(|point| point.finite_value().map(|value| (point.year, value)))
        .collect();

    let mut edges: Vec<(PixelPoint, PixelPoint)> = upper
        .iter()
        .filter_map(|point| {
            let upper_value = point.finite_value()?;
            let lower_value = *lower_by_year.get(&point.year)?;
            let year = f64::from(point.year);
            Some((
                mapper.to_pixel(year, upper_value),
                mapper.to_pixel(year, lower_value),
            ))
        })
        .collect();

    if edges.len() < 2 {
        return SeriesPath::empty();
    }
    edges.sort_by(|a, b| a.0.x.total_cmp(&b.0.x));

    let mut path = SeriesPath::empty();
    let (first_upper, _) = edges[0];
    path.move_to(first_upper.x, first_upper.y);
    for (upper_px, _) in &edges[1..] {
        path.line_to(upper_px.x, upper_px.y);
    }
    for (_, lower_px) in edges.iter().rev() {
        path.line_to(lower_px.x, lower_px.y);
    }
    path.close();
    path.point_count = edges.len();
    path
}
