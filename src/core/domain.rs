use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{SeriesKey, SeriesPoint};
use crate::interaction::VisibilitySet;

/// Number of intervals between value-axis ticks.
pub const VALUE_TICK_INTERVALS: u32 = 4;

/// Share of the observed spread added above and below the value range.
pub const DEFAULT_VALUE_PADDING_RATIO: f64 = 0.1;

/// Smallest year span a zoom window may cover.
pub const MIN_ZOOM_SPAN_YEARS: i32 = 1;

/// Largest magnitude the value axis represents. Values beyond it are clamped
/// so padding and tick arithmetic stay finite.
pub const VALUE_AXIS_LIMIT: f64 = f64::MAX / 64.0;

/// Spans up to this size keep integer tick arithmetic exact in `f64`.
const EXACT_INTEGER_SPAN: f64 = 4_503_599_627_370_496.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
    pub tick_step: f64,
}

impl ValueDomain {
    /// Fallback used when no visible series carries a finite value.
    #[must_use]
    pub const fn degenerate() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            tick_step: 1.0,
        }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min == self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearDomain {
    pub min: i32,
    pub max: i32,
}

impl YearDomain {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Width in years, widened so extreme bounds cannot overflow.
    #[must_use]
    pub fn span(self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }
}

/// User-selected sub-range of the year axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomWindow {
    pub min: i32,
    pub max: i32,
}

impl ZoomWindow {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Clamps the window into `base`.
    ///
    /// Returns `None` when the clamped span is shorter than one year, in
    /// which case the window must be discarded.
    #[must_use]
    pub fn clamp_into(self, base: YearDomain) -> Option<YearDomain> {
        let min = base.min.max(self.min.min(base.max));
        let max = base.max.min(self.max.max(base.min));
        let clamped = YearDomain::new(min, max);
        if clamped.span() < i64::from(MIN_ZOOM_SPAN_YEARS) {
            return None;
        }
        Some(clamped)
    }
}

/// Combined value and year domains driving one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub value_min: f64,
    pub value_max: f64,
    pub tick_step: f64,
    pub year_min: i32,
    pub year_max: i32,
}

impl Domain {
    #[must_use]
    pub fn new(value: ValueDomain, years: YearDomain) -> Self {
        Self {
            value_min: value.min,
            value_max: value.max,
            tick_step: value.tick_step,
            year_min: years.min,
            year_max: years.max,
        }
    }

    #[must_use]
    pub fn value_domain(self) -> ValueDomain {
        ValueDomain {
            min: self.value_min,
            max: self.value_max,
            tick_step: self.tick_step,
        }
    }

    #[must_use]
    pub fn year_domain(self) -> YearDomain {
        YearDomain::new(self.year_min, self.year_max)
    }
}

/// Computes the value domain over the visible series with the default padding.
pub fn compute_value_domain<'a, I>(series: I, visible: &VisibilitySet) -> ValueDomain
where
    I: IntoIterator<Item = (&'a SeriesKey, &'a [SeriesPoint])>,
{
    compute_value_domain_padded(series, visible, DEFAULT_VALUE_PADDING_RATIO)
}

/// Computes a zero-anchored value domain with round tick steps.
///
/// Only finite values of series whose key is in `visible` contribute. The
/// range always straddles zero, is padded by `padding_ratio` of the spread
/// on both sides, rounded outward to integers and finally stretched so that
/// `max - min == tick_step * VALUE_TICK_INTERVALS`. Magnitudes beyond
/// [`VALUE_AXIS_LIMIT`] are clamped to it.
pub fn compute_value_domain_padded<'a, I>(
    series: I,
    visible: &VisibilitySet,
    padding_ratio: f64,
) -> ValueDomain
where
    I: IntoIterator<Item = (&'a SeriesKey, &'a [SeriesPoint])>,
{
    let values: Vec<OrderedFloat<f64>> = series
        .into_iter()
        .filter(|(key, _)| visible.contains(key))
        .flat_map(|(_, points)| points.iter().filter_map(|point| point.finite_value()))
        .map(OrderedFloat)
        .collect();

    let (Some(observed_min), Some(observed_max)) = (
        values.iter().min().copied(),
        values.iter().max().copied(),
    ) else {
        return ValueDomain::degenerate();
    };

    let raw_min = clamp_to_axis(observed_min.into_inner()).min(0.0);
    let raw_max = clamp_to_axis(observed_max.into_inner()).max(0.0);
    let spread = (raw_max - raw_min).max(1.0);
    let padding = if padding_ratio.is_finite() && padding_ratio > 0.0 {
        spread * padding_ratio
    } else {
        0.0
    };

    let min = clamp_to_axis(raw_min - padding).floor().min(0.0);
    let max = clamp_to_axis(raw_max + padding).ceil().max(0.0);

    let intervals = f64::from(VALUE_TICK_INTERVALS);
    if max - min > EXACT_INTEGER_SPAN {
        return wide_value_domain(min, max);
    }
    let tick_step = ((max - min) / intervals).ceil().max(1.0);
    ValueDomain {
        min,
        max: min + tick_step * intervals,
        tick_step,
    }
}

/// Clamps `value` into `[-VALUE_AXIS_LIMIT, VALUE_AXIS_LIMIT]`.
#[must_use]
pub fn clamp_to_axis(value: f64) -> f64 {
    value.clamp(-VALUE_AXIS_LIMIT, VALUE_AXIS_LIMIT)
}

// Integer steps stop adding up exactly at this scale, so the step becomes a
// power of two and `min` a multiple of it.
fn wide_value_domain(min: f64, max: f64) -> ValueDomain {
    let intervals = f64::from(VALUE_TICK_INTERVALS);
    let mut tick_step = 2f64.powi(((max - min) / intervals).log2().ceil() as i32);
    let mut snapped = (min / tick_step).floor() * tick_step;
    while snapped + tick_step * intervals < max {
        tick_step *= 2.0;
        snapped = (min / tick_step).floor() * tick_step;
    }
    ValueDomain {
        min: snapped,
        max: snapped + tick_step * intervals,
        tick_step,
    }
}

/// Computes the year domain, narrowed by `zoom` when it survives clamping.
#[must_use]
pub fn compute_year_domain(all_years: &[i32], zoom: Option<ZoomWindow>) -> YearDomain {
    let base = match (all_years.iter().min(), all_years.iter().max()) {
        (Some(&min), Some(&max)) => YearDomain::new(min, max),
        _ => YearDomain::new(0, 0),
    };

    zoom.and_then(|window| window.clamp_into(base))
        .unwrap_or(base)
}

/// Tick values of the value axis, from `min` upward in `tick_step` strides.
#[must_use]
pub fn value_ticks(domain: ValueDomain) -> SmallVec<[f64; 8]> {
    (0..=VALUE_TICK_INTERVALS)
        .map(|index| domain.min + f64::from(index) * domain.tick_step)
        .take_while(|value| *value <= domain.max)
        .collect()
}

/// Integer ticks of the year axis, aiming for roughly `target` intervals.
///
/// The last year is appended when the regular stride stops more than half a
/// stride short of it.
#[must_use]
pub fn year_ticks(domain: YearDomain, target: u32) -> SmallVec<[i32; 16]> {
    let mut ticks = SmallVec::new();
    let span = domain.span();
    if span <= 0 {
        ticks.push(domain.min);
        return ticks;
    }

    // Stride in i64: bounds near the ends of the i32 range must not overflow.
    let target = i64::from(target.max(1));
    let step = ((span + target - 1) / target).max(1);
    let max = i64::from(domain.max);
    let mut year = i64::from(domain.min);
    let mut last = year;
    while year <= max {
        if let Ok(tick) = i32::try_from(year) {
            ticks.push(tick);
        }
        last = year;
        year += step;
    }
    if last != max && (max - last) * 2 >= step {
        ticks.push(domain.max);
    }
    ticks
}
