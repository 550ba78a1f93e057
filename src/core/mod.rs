pub mod area_series;
pub mod bar_series;
pub mod dataset;
pub mod domain;
pub mod line_series;
pub mod primitives;
pub mod scale;
pub mod types;
pub mod windowing;

pub use area_series::build_band_path;
pub use bar_series::{BarChartGeometry, BarRect, last_years_window, project_recent_bars};
pub use dataset::{
    AnnualRow, MonthlyRow, annual_metric_series, city_keys, monthly_series_by_year,
    parse_annual_rows, parse_monthly_rows, rolling_mean, temperature_band,
};
pub use domain::{
    Domain, VALUE_AXIS_LIMIT, ValueDomain, YearDomain, ZoomWindow, clamp_to_axis,
    compute_value_domain, compute_value_domain_padded, compute_year_domain, value_ticks,
    year_ticks,
};
pub use line_series::{SeriesPath, build_path};
pub use scale::CoordinateMapper;
pub use types::{
    Band, Metric, PixelPoint, PlotArea, PlotPadding, Series, SeriesKey, SeriesPoint, Viewport,
};
pub use windowing::points_in_year_window;
