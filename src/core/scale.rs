use serde::{Deserialize, Serialize};

use crate::core::domain::{Domain, clamp_to_axis};
use crate::core::types::{PixelPoint, PlotArea};

/// Maps `(year, value)` pairs onto the plotting rectangle and back.
///
/// Equal domain bounds on either axis map to the centre of the plot on that
/// axis instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    domain: Domain,
    plot: PlotArea,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(domain: Domain, plot: PlotArea) -> Self {
        Self { domain, plot }
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        self.domain
    }

    #[must_use]
    pub fn plot(self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn year_to_x(self, year: f64) -> f64 {
        let span = f64::from(self.domain.year_max) - f64::from(self.domain.year_min);
        if span == 0.0 {
            return self.plot.left + self.plot.width / 2.0;
        }
        let normalized = (year - f64::from(self.domain.year_min)) / span;
        self.plot.left + normalized * self.plot.width
    }

    #[must_use]
    pub fn value_to_y(self, value: f64) -> f64 {
        let span = self.domain.value_max - self.domain.value_min;
        if span == 0.0 {
            return self.plot.top + self.plot.height / 2.0;
        }
        let normalized = (clamp_to_axis(value) - self.domain.value_min) / span;
        self.plot.top + (1.0 - normalized) * self.plot.height
    }

    #[must_use]
    pub fn to_pixel(self, year: f64, value: f64) -> PixelPoint {
        PixelPoint::new(self.year_to_x(year), self.value_to_y(value))
    }

    /// Inverts the horizontal mapping.
    ///
    /// `pixel_x` is clamped to the plot's horizontal bounds first, so the
    /// result always lies within `[year_min, year_max]`.
    #[must_use]
    pub fn from_pixel_x(self, pixel_x: f64) -> f64 {
        let year_min = f64::from(self.domain.year_min);
        let span = f64::from(self.domain.year_max) - year_min;
        if span == 0.0 || self.plot.width <= 0.0 {
            return year_min;
        }
        let clamped = if pixel_x.is_finite() {
            self.plot.clamp_x(pixel_x)
        } else {
            self.plot.left
        };
        let normalized = (clamped - self.plot.left) / self.plot.width;
        year_min + normalized * span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{ValueDomain, YearDomain};

    fn mapper(years: YearDomain, values: ValueDomain) -> CoordinateMapper {
        CoordinateMapper::new(
            Domain::new(values, years),
            PlotArea::new(56.0, 24.0, 752.0, 256.0),
        )
    }

    #[test]
    fn larger_values_render_higher() {
        let mapper = mapper(
            YearDomain::new(2000, 2010),
            ValueDomain {
                min: 0.0,
                max: 20.0,
                tick_step: 5.0,
            },
        );
        let low = mapper.to_pixel(2000.0, 0.0);
        let high = mapper.to_pixel(2010.0, 20.0);
        assert_eq!(low.x, 56.0);
        assert_eq!(low.y, 280.0);
        assert_eq!(high.x, 808.0);
        assert_eq!(high.y, 24.0);
    }

    #[test]
    fn degenerate_axes_map_to_plot_centre() {
        let mapper = mapper(YearDomain::new(2000, 2000), ValueDomain::degenerate());
        let point = mapper.to_pixel(2000.0, 0.0);
        assert_eq!(point.x, 56.0 + 376.0);
        assert_eq!(point.y, 24.0 + 128.0);
        assert_eq!(mapper.from_pixel_x(700.0), 2000.0);
    }
}
