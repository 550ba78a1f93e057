use serde::{Deserialize, Serialize};

use crate::core::{Domain, PlotArea, SeriesKey, SeriesPath, Viewport, ZoomWindow};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePath {
    pub key: SeriesKey,
    pub label: String,
    pub path: SeriesPath,
    /// Stroke opacity in `0..=1`.
    pub opacity: f64,
    /// Fewer than two valid points: the host should show a fallback message.
    pub insufficient_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPath {
    pub key: SeriesKey,
    pub label: String,
    pub path: SeriesPath,
    pub insufficient_data: bool,
}

/// Labeled reference mark; `position` is the pixel coordinate along the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Render-ready description of one chart.
///
/// Carries everything a presentation layer needs to draw without redoing
/// any geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub viewport: Viewport,
    pub plot: PlotArea,
    pub domain: Domain,
    pub lines: Vec<LinePath>,
    pub bands: Vec<BandPath>,
    pub value_ticks: Vec<AxisTick>,
    pub x_ticks: Vec<AxisTick>,
    pub tooltip: Option<TooltipState>,
    pub selection: Option<SelectionRect>,
    pub visible_keys: Vec<SeriesKey>,
    pub zoom_window: Option<ZoomWindow>,
    /// No visible line or band has enough points to draw.
    pub insufficient_data: bool,
}

impl ChartFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let domain = self.domain;
        if ![domain.value_min, domain.value_max, domain.tick_step]
            .iter()
            .all(|value| value.is_finite())
        {
            return Err(ChartError::InvalidData(
                "value domain must be finite".to_owned(),
            ));
        }

        let paths = self
            .lines
            .iter()
            .map(|line| (line.key, &line.path))
            .chain(self.bands.iter().map(|band| (band.key, &band.path)));
        for (key, path) in paths {
            if path.has_non_finite_coordinate() {
                return Err(ChartError::InvalidData(format!(
                    "path of `{key}` has non-finite coordinates"
                )));
            }
        }

        for line in &self.lines {
            if !line.opacity.is_finite() || !(0.0..=1.0).contains(&line.opacity) {
                return Err(ChartError::InvalidData(format!(
                    "line `{}` opacity must be finite and in [0, 1]",
                    line.key
                )));
            }
        }
        for tick in self.value_ticks.iter().chain(&self.x_ticks) {
            if !tick.position.is_finite() {
                return Err(ChartError::InvalidData(
                    "tick positions must be finite".to_owned(),
                ));
            }
        }
        if let Some(selection) = self.selection {
            if !selection.x.is_finite() || !selection.width.is_finite() || selection.width < 0.0 {
                return Err(ChartError::InvalidData(
                    "selection rectangle must be finite with width >= 0".to_owned(),
                ));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.path.is_empty())
            && self.bands.iter().all(|band| band.path.is_empty())
    }

    #[must_use]
    pub fn line(&self, key: SeriesKey) -> Option<&LinePath> {
        self.lines.iter().find(|line| line.key == key)
    }
}
