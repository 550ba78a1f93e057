use serde::{Deserialize, Serialize};

use crate::api::{FormatOptions, NumericFormatter};
use crate::core::{CoordinateMapper, SeriesPoint, Viewport};

/// Overlay position as a percentage of the viewport, so the tooltip can be
/// placed independently of the plot's absolute pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionPct {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub position_pct: PositionPct,
    pub label: String,
    pub value: String,
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipResolver {
    current: Option<TooltipState>,
}

impl TooltipResolver {
    #[must_use]
    pub fn current(&self) -> Option<&TooltipState> {
        self.current.as_ref()
    }

    /// Replaces the tooltip with one anchored on `point`.
    ///
    /// Points without a finite value have no marker to hover, so they clear
    /// the tooltip instead.
    pub fn hover_enter(
        &mut self,
        point: SeriesPoint,
        label: impl Into<String>,
        mapper: CoordinateMapper,
        viewport: Viewport,
        formatter: NumericFormatter,
        options: FormatOptions,
    ) -> Option<&TooltipState> {
        self.current = None;
        if !viewport.is_valid() {
            return None;
        }
        let value = point.finite_value()?;

        let pixel = mapper.to_pixel(f64::from(point.year), value);
        self.current = Some(TooltipState {
            position_pct: PositionPct {
                x: pixel.x / f64::from(viewport.width) * 100.0,
                y: pixel.y / f64::from(viewport.height) * 100.0,
            },
            label: label.into(),
            value: formatter.format(Some(value), options),
            year: point.year,
        });
        self.current.as_ref()
    }

    pub fn hover_leave(&mut self) {
        self.current = None;
    }
}
