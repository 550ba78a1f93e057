use crate::core::{
    CoordinateMapper, Domain, SeriesKey, build_band_path, build_path, points_in_year_window,
    value_ticks, year_ticks,
};
use crate::render::{AxisTick, BandPath, ChartFrame, LinePath, Renderer, SelectionRect};

use super::{ChartConfig, ClimateChart, FormatOptions, XAxisKind};

/// Opacity of the oldest year when older years are faded.
const OLDEST_YEAR_OPACITY: f64 = 0.35;

impl<R: Renderer> ClimateChart<R> {
    /// Materializes the current state into a render-ready frame.
    #[must_use]
    pub fn build_frame(&self) -> ChartFrame {
        let domain = self.domain();
        let mapper = CoordinateMapper::new(domain, self.plot);
        let years = domain.year_domain();
        let visible_years = self.visible_years();

        let lines: Vec<LinePath> = self
            .lines
            .iter()
            .filter(|series| self.visibility.contains(&series.key))
            .map(|series| {
                let path = build_path(points_in_year_window(series.points(), years), mapper);
                LinePath {
                    key: series.key,
                    label: series.label.clone(),
                    insufficient_data: path.point_count < 2,
                    path,
                    opacity: year_opacity(&self.config, series.key, &visible_years),
                }
            })
            .collect();

        let bands: Vec<BandPath> = self
            .bands
            .iter()
            .filter(|band| self.visibility.contains(&band.key))
            .map(|band| {
                let path = build_band_path(
                    points_in_year_window(band.lower(), years),
                    points_in_year_window(band.upper(), years),
                    mapper,
                );
                BandPath {
                    key: band.key,
                    label: band.label.clone(),
                    insufficient_data: path.is_empty(),
                    path,
                }
            })
            .collect();

        let insufficient_data = lines.iter().all(|line| line.insufficient_data)
            && bands.iter().all(|band| band.insufficient_data);

        let selection = self.zoom.selection().map(|drag| SelectionRect {
            x: drag.left(),
            y: self.plot.top,
            width: drag.distance(),
            height: self.plot.height,
        });

        ChartFrame {
            viewport: self.config.viewport,
            plot: self.plot,
            domain,
            value_ticks: self.value_axis_ticks(mapper),
            x_ticks: self.x_axis_ticks(domain, mapper),
            lines,
            bands,
            tooltip: self.tooltip.current().cloned(),
            selection,
            visible_keys: self
                .series_keys()
                .into_iter()
                .filter(|key| self.visibility.contains(key))
                .collect(),
            zoom_window: self.zoom.window(),
            insufficient_data,
        }
    }

    fn value_axis_ticks(&self, mapper: CoordinateMapper) -> Vec<AxisTick> {
        let options = FormatOptions::for_kind(self.config.value_kind).without_unit();
        value_ticks(mapper.domain().value_domain())
            .into_iter()
            .map(|value| AxisTick {
                value,
                position: mapper.value_to_y(value),
                label: self.formatter.format(Some(value), options),
            })
            .collect()
    }

    fn x_axis_ticks(&self, domain: Domain, mapper: CoordinateMapper) -> Vec<AxisTick> {
        let target = match self.config.x_axis {
            XAxisKind::Year => self.config.year_tick_target,
            XAxisKind::Month => 12,
        };
        year_ticks(domain.year_domain(), target)
            .into_iter()
            .map(|position| {
                let label = match self.config.x_axis {
                    XAxisKind::Year => position.to_string(),
                    XAxisKind::Month => self
                        .formatter
                        .month_label(position)
                        .unwrap_or_else(|| position.to_string()),
                };
                AxisTick {
                    value: f64::from(position),
                    position: mapper.year_to_x(f64::from(position)),
                    label,
                }
            })
            .collect()
    }

    fn visible_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .visibility
            .iter()
            .filter_map(|key| match key {
                SeriesKey::Year(year) => Some(*year),
                _ => None,
            })
            .collect();
        years.sort_unstable();
        years
    }
}

/// Older visible years fade toward `OLDEST_YEAR_OPACITY` when enabled.
fn year_opacity(config: &ChartConfig, key: SeriesKey, visible_years: &[i32]) -> f64 {
    let SeriesKey::Year(year) = key else {
        return 1.0;
    };
    if !config.fade_older_years || visible_years.len() < 2 {
        return 1.0;
    }
    let Ok(rank) = visible_years.binary_search(&year) else {
        return 1.0;
    };
    let t = rank as f64 / (visible_years.len() - 1) as f64;
    OLDEST_YEAR_OPACITY + (1.0 - OLDEST_YEAR_OPACITY) * t
}
