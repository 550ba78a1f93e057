mod config;
mod format;
mod frame_builder;
mod json_contract;

pub use config::{ChartConfig, XAxisKind};
pub use format::{FormatOptions, MISSING_VALUE_LABEL, NumberLocale, NumericFormatter, ValueKind};
pub use json_contract::{CHART_FRAME_JSON_SCHEMA_V1, ChartFrameJsonContractV1};

use tracing::{debug, trace, warn};

use crate::core::{
    Band, BarChartGeometry, CoordinateMapper, Domain, PlotArea, Series, SeriesKey, SeriesPoint,
    YearDomain, ZoomWindow, compute_value_domain_padded, compute_year_domain, project_recent_bars,
};
use crate::error::ChartResult;
use crate::interaction::{TooltipResolver, TooltipState, VisibilitySet, ZoomOutcome, ZoomSelector};
use crate::render::Renderer;

/// Interactive chart over one data load of lines and bands.
///
/// All derived geometry (domains, paths, ticks) is recomputed from scratch on
/// every `build_frame`; only visibility, zoom and tooltip state persist
/// between events.
pub struct ClimateChart<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    plot: PlotArea,
    formatter: NumericFormatter,
    lines: Vec<Series>,
    bands: Vec<Band>,
    visibility: VisibilitySet,
    visibility_initialized: bool,
    zoom: ZoomSelector,
    tooltip: TooltipResolver,
}

impl<R: Renderer> ClimateChart<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        if let Err(err) = config.validate() {
            warn!(%err, "chart config rejected");
            return Err(err);
        }
        Ok(Self {
            renderer,
            plot: PlotArea::from_viewport(config.viewport, config.padding),
            formatter: NumericFormatter::new(config.locale),
            zoom: ZoomSelector::new(config.zoom_drag_threshold_px),
            config,
            lines: Vec::new(),
            bands: Vec::new(),
            visibility: VisibilitySet::new(),
            visibility_initialized: false,
            tooltip: TooltipResolver::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn lines(&self) -> &[Series] {
        &self.lines
    }

    #[must_use]
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Replaces the plotted lines, keeping the current bands.
    pub fn set_lines(&mut self, lines: Vec<Series>) {
        let bands = std::mem::take(&mut self.bands);
        self.set_series(lines, bands);
    }

    /// Replaces the shaded bands, keeping the current lines.
    pub fn set_bands(&mut self, bands: Vec<Band>) {
        let lines = std::mem::take(&mut self.lines);
        self.set_series(lines, bands);
    }

    /// Replaces all plotted data.
    ///
    /// The first load that carries at least one series initializes the
    /// visibility set from `ChartConfig::default_visible`; later loads keep
    /// the user's selection.
    pub fn set_series(&mut self, lines: Vec<Series>, bands: Vec<Band>) {
        self.lines = lines;
        self.bands = bands;
        self.tooltip.hover_leave();

        let keys = self.series_keys();
        if !self.visibility_initialized && !keys.is_empty() {
            self.visibility = VisibilitySet::initial(&keys, &self.config.default_visible);
            self.visibility_initialized = true;
        }
        debug!(
            lines = self.lines.len(),
            bands = self.bands.len(),
            visible = self.visibility.len(),
            "chart data set"
        );
    }

    /// Keys of all lines followed by all bands, in data order.
    #[must_use]
    pub fn series_keys(&self) -> Vec<SeriesKey> {
        self.lines
            .iter()
            .map(|series| series.key)
            .chain(self.bands.iter().map(|band| band.key))
            .collect()
    }

    #[must_use]
    pub fn visibility(&self) -> &VisibilitySet {
        &self.visibility
    }

    pub fn toggle_series(&mut self, key: SeriesKey) -> bool {
        let visible = self.visibility.toggle(key);
        trace!(%key, visible, "series toggled");
        visible
    }

    pub fn select_all_series(&mut self) {
        let keys = self.series_keys();
        self.visibility.select_all(keys);
    }

    pub fn clear_all_series(&mut self) {
        self.visibility.clear_all();
    }

    /// Year domain of the whole data load, ignoring any zoom window.
    #[must_use]
    pub fn base_year_domain(&self) -> YearDomain {
        compute_year_domain(&self.all_years(), None)
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        let values = compute_value_domain_padded(
            self.keyed_points(),
            &self.visibility,
            self.config.value_padding_ratio,
        );
        let years = compute_year_domain(&self.all_years(), self.zoom.window());
        Domain::new(values, years)
    }

    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.domain(), self.plot)
    }

    #[must_use]
    pub fn zoom_window(&self) -> Option<ZoomWindow> {
        self.zoom.window()
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomSelector {
        self.zoom
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.zoom.pointer_down(x, y, self.plot);
    }

    pub fn pointer_move(&mut self, x: f64) {
        self.zoom.pointer_move(x, self.plot);
    }

    pub fn pointer_up(&mut self) -> ZoomOutcome {
        let (mapper, base) = (self.mapper(), self.base_year_domain());
        self.zoom.pointer_up(mapper, base)
    }

    pub fn pointer_leave(&mut self) -> ZoomOutcome {
        self.tooltip.hover_leave();
        self.zoom.pointer_leave()
    }

    /// Drops any drag and zoom window, restoring the full year domain.
    pub fn double_click(&mut self) {
        trace!("zoom reset");
        self.zoom.reset();
    }

    pub fn apply_zoom_window(&mut self, window: ZoomWindow) -> bool {
        let base = self.base_year_domain();
        self.zoom.apply_window(window, base)
    }

    /// Shows the tooltip for the point of line `key` at `year`.
    pub fn hover_enter(&mut self, key: SeriesKey, year: i32) -> Option<&TooltipState> {
        let Some(series) = self.lines.iter().find(|series| series.key == key) else {
            self.tooltip.hover_leave();
            return None;
        };
        let Some(point) = series.points().iter().find(|point| point.year == year).copied() else {
            self.tooltip.hover_leave();
            return None;
        };
        let label = series.label.clone();
        let mapper = self.mapper();
        self.tooltip.hover_enter(
            point,
            label,
            mapper,
            self.config.viewport,
            self.formatter,
            FormatOptions::for_kind(self.config.value_kind),
        )
    }

    pub fn hover_leave(&mut self) {
        self.tooltip.hover_leave();
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.current()
    }

    /// Bar geometry for the last `recent_years_window` years of line `key`.
    #[must_use]
    pub fn recent_bars(&self, key: SeriesKey) -> Option<BarChartGeometry> {
        let series = self.lines.iter().find(|series| series.key == key)?;
        Some(project_recent_bars(
            series,
            self.config.recent_years_window,
            self.plot,
            self.config.value_padding_ratio,
        ))
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)
    }

    fn all_years(&self) -> Vec<i32> {
        self.lines
            .iter()
            .flat_map(|series| series.points())
            .chain(
                self.bands
                    .iter()
                    .flat_map(|band| band.lower().iter().chain(band.upper())),
            )
            .map(|point| point.year)
            .collect()
    }

    fn keyed_points(&self) -> impl Iterator<Item = (&SeriesKey, &[SeriesPoint])> {
        self.lines
            .iter()
            .map(|series| (&series.key, series.points()))
            .chain(self.bands.iter().flat_map(|band| {
                [(&band.key, band.lower()), (&band.key, band.upper())]
            }))
    }
}
