use serde::{Deserialize, Serialize};

use crate::core::domain::DEFAULT_VALUE_PADDING_RATIO;
use crate::core::{PlotPadding, SeriesKey, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::DEFAULT_DRAG_THRESHOLD_PX;

use super::{NumberLocale, ValueKind};

/// What the integer x positions of the plotted series mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum XAxisKind {
    #[default]
    Year,
    /// Month indices 1..=12, for one-line-per-year charts.
    Month,
}

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default)]
    pub padding: PlotPadding,
    #[serde(default = "default_value_padding_ratio")]
    pub value_padding_ratio: f64,
    #[serde(default = "default_zoom_drag_threshold_px")]
    pub zoom_drag_threshold_px: f64,
    #[serde(default)]
    pub locale: NumberLocale,
    #[serde(default)]
    pub value_kind: ValueKind,
    #[serde(default)]
    pub x_axis: XAxisKind,
    #[serde(default = "default_year_tick_target")]
    pub year_tick_target: u32,
    #[serde(default)]
    pub default_visible: Vec<SeriesKey>,
    #[serde(default)]
    pub fade_older_years: bool,
    #[serde(default = "default_recent_years_window")]
    pub recent_years_window: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new(default_viewport())
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            padding: PlotPadding::default(),
            value_padding_ratio: default_value_padding_ratio(),
            zoom_drag_threshold_px: default_zoom_drag_threshold_px(),
            locale: NumberLocale::default(),
            value_kind: ValueKind::default(),
            x_axis: XAxisKind::default(),
            year_tick_target: default_year_tick_target(),
            default_visible: Vec::new(),
            fade_older_years: false,
            recent_years_window: default_recent_years_window(),
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: PlotPadding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_value_kind(mut self, value_kind: ValueKind) -> Self {
        self.value_kind = value_kind;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, x_axis: XAxisKind) -> Self {
        self.x_axis = x_axis;
        self
    }

    /// Sets the series shown on first data load.
    #[must_use]
    pub fn with_default_visible(mut self, keys: Vec<SeriesKey>) -> Self {
        self.default_visible = keys;
        self
    }

    #[must_use]
    pub fn with_fade_older_years(mut self, enabled: bool) -> Self {
        self.fade_older_years = enabled;
        self
    }

    #[must_use]
    pub fn with_zoom_drag_threshold_px(mut self, threshold_px: f64) -> Self {
        self.zoom_drag_threshold_px = threshold_px;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let padding = self.padding;
        for (side, value) in [
            ("top", padding.top),
            ("right", padding.right),
            ("bottom", padding.bottom),
            ("left", padding.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "padding `{side}` must be finite and >= 0"
                )));
            }
        }
        if padding.left + padding.right >= f64::from(self.viewport.width)
            || padding.top + padding.bottom >= f64::from(self.viewport.height)
        {
            return Err(ChartError::InvalidConfig(
                "padding leaves no room for the plot area".to_owned(),
            ));
        }

        if !self.value_padding_ratio.is_finite() || self.value_padding_ratio < 0.0 {
            return Err(ChartError::InvalidConfig(
                "value padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.zoom_drag_threshold_px.is_finite() || self.zoom_drag_threshold_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "zoom drag threshold must be finite and >= 0".to_owned(),
            ));
        }
        if self.year_tick_target == 0 {
            return Err(ChartError::InvalidConfig(
                "year tick target must be > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(840, 320)
}

fn default_value_padding_ratio() -> f64 {
    DEFAULT_VALUE_PADDING_RATIO
}

fn default_zoom_drag_threshold_px() -> f64 {
    DEFAULT_DRAG_THRESHOLD_PX
}

fn default_year_tick_target() -> u32 {
    6
}

fn default_recent_years_window() -> u32 {
    30
}
