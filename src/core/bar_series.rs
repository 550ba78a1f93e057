use serde::{Deserialize, Serialize};

use crate::core::domain::{Domain, ValueDomain, YearDomain, compute_value_domain_padded};
use crate::core::{CoordinateMapper, PlotArea, Series, SeriesPoint};
use crate::interaction::VisibilitySet;

/// Share of each year slot covered by its bar.
pub const BAR_WIDTH_RATIO: f64 = 0.7;

/// One bar rectangle in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub year: i32,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartGeometry {
    pub domain: ValueDomain,
    /// Years covered by the window, in slot order.
    pub years: Vec<i32>,
    pub bars: Vec<BarRect>,
}

/// Returns the trailing points covering the last `years` years, counted back
/// from the latest year present in `points`.
///
/// `points` must be sorted by year, which `Series` guarantees.
#[must_use]
pub fn last_years_window(points: &[SeriesPoint], years: u32) -> &[SeriesPoint] {
    let Some(latest) = points.last().map(|point| point.year) else {
        return points;
    };
    if years == 0 {
        return &[];
    }
    let cutoff = i64::from(latest) - i64::from(years);
    let start = points.partition_point(|point| i64::from(point.year) <= cutoff);
    &points[start..]
}

/// Projects the last `years` years of `series` into band-scale bars.
///
/// Every year in the window owns an equal horizontal slot; missing values
/// keep their slot but produce no bar.
#[must_use]
pub fn project_recent_bars(
    series: &Series,
    years: u32,
    plot: PlotArea,
    padding_ratio: f64,
) -> BarChartGeometry {
    let window = last_years_window(series.points(), years);
    let visible = VisibilitySet::from_keys([series.key]);
    let domain = compute_value_domain_padded([(&series.key, window)], &visible, padding_ratio);

    let year_domain = match (window.first(), window.last()) {
        (Some(first), Some(last)) => YearDomain::new(first.year, last.year),
        _ => YearDomain::new(0, 0),
    };
    let mapper = CoordinateMapper::new(Domain::new(domain, year_domain), plot);

    let slot_count = window.len().max(1) as f64;
    let slot = plot.width / slot_count;
    let bar_width = slot * BAR_WIDTH_RATIO;
    let baseline_y = mapper.value_to_y(0.0);

    let bars = window
        .iter()
        .enumerate()
        .filter_map(|(index, point)| {
            let value = point.finite_value()?;
            let value_y = mapper.value_to_y(value);
            Some(BarRect {
                year: point.year,
                value,
                x: plot.left + index as f64 * slot + (slot - bar_width) / 2.0,
                y: value_y.min(baseline_y),
                width: bar_width,
                height: (baseline_y - value_y).abs(),
            })
        })
        .collect();

    BarChartGeometry {
        domain,
        years: window.iter().map(|point| point.year).collect(),
        bars,
    }
}
