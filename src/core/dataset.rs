//! Ingestion of the climate rows served by the data backend.
//!
//! Rows arrive as loosely-typed JSON: the backend reshapes CSV records into
//! `{ "ville", "NOM_USUEL", "AAAA", "MM"?, "data": { "TMM", ... } }` where
//! every field is still a string. Metric fields coerce to `None` when they
//! cannot be read; rows missing their year, city or month are skipped whole.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::primitives::{coerce_integer, coerce_number};
use crate::core::{Band, Metric, Series, SeriesKey, SeriesPoint};
use crate::error::{ChartError, ChartResult};

const YEAR_FIELDS: &[&str] = &["AAAA", "year"];
const CITY_FIELDS: &[&str] = &["ville", "cityKey", "city_key"];
const MONTH_FIELDS: &[&str] = &["MM", "monthIndex", "month_index"];

/// Window of the trailing mean used for the smoothed temperature series.
pub const MOVING_AVERAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRow {
    pub year: i32,
    pub city_key: String,
    pub avg_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub rainfall: Option<f64>,
    pub hot_days: Option<f64>,
    pub avg_temp_ma5: Option<f64>,
}

impl AnnualRow {
    /// Reads one backend row, returning `None` when it must be skipped.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let row = value.as_object()?;
        let (year, city_key) = row_identity(row)?;
        Some(Self {
            year,
            city_key,
            avg_temp: metric_field(row, &["TMM", "avgTemp"]),
            max_temp: metric_field(row, &["TXAB", "maxTemp"]),
            min_temp: metric_field(row, &["TXMIN", "minTemp"]),
            rainfall: metric_field(row, &["RR", "rainfall"]),
            hot_days: metric_field(row, &["NBJTX25", "hotDays"]),
            avg_temp_ma5: metric_field(row, &["TMM_ma5", "avgTempMa5"]),
        })
    }

    #[must_use]
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::AvgTemp => self.avg_temp,
            Metric::MaxTemp => self.max_temp,
            Metric::MinTemp => self.min_temp,
            Metric::Rainfall => self.rainfall,
            Metric::HotDays => self.hot_days,
            Metric::AvgTempMa5 => self.avg_temp_ma5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub year: i32,
    pub city_key: String,
    /// Month of year, 1..=12.
    pub month_index: u8,
    pub avg_temp: Option<f64>,
}

impl MonthlyRow {
    #[must_use]
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let row = value.as_object()?;
        let (year, city_key) = row_identity(row)?;
        let month_index = first_field(row, MONTH_FIELDS)
            .and_then(coerce_integer)
            .and_then(|month| u8::try_from(month).ok())
            .filter(|month| (1..=12).contains(month))?;
        Some(Self {
            year,
            city_key,
            month_index,
            avg_temp: metric_field(row, &["TMM", "avgTemp"]),
        })
    }
}

pub fn parse_annual_rows(input: &str) -> ChartResult<Vec<AnnualRow>> {
    let values = parse_row_array(input, "annual")?;
    Ok(collect_rows(&values, "annual", AnnualRow::from_json_value))
}

pub fn parse_monthly_rows(input: &str) -> ChartResult<Vec<MonthlyRow>> {
    let values = parse_row_array(input, "monthly")?;
    Ok(collect_rows(&values, "monthly", MonthlyRow::from_json_value))
}

/// Distinct city keys, sorted.
#[must_use]
pub fn city_keys(rows: &[AnnualRow]) -> Vec<String> {
    rows.iter()
        .map(|row| row.city_key.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Builds the series of one metric for one city.
///
/// When no row of the city carries a smoothed temperature, `AvgTempMa5` is
/// derived from the average temperature with a trailing rolling mean.
#[must_use]
pub fn annual_metric_series(rows: &[AnnualRow], city_key: &str, metric: Metric) -> Series {
    let city_rows: Vec<&AnnualRow> = rows.iter().filter(|row| row.city_key == city_key).collect();
    let key = SeriesKey::Metric(metric);

    if metric == Metric::AvgTempMa5 && city_rows.iter().all(|row| row.avg_temp_ma5.is_none()) {
        let base = Series::new(
            SeriesKey::Metric(Metric::AvgTemp),
            Metric::AvgTemp.label(),
            city_rows
                .iter()
                .map(|row| SeriesPoint {
                    year: row.year,
                    value: row.avg_temp,
                })
                .collect(),
        );
        return Series::new(
            key,
            metric.label(),
            rolling_mean(base.points(), MOVING_AVERAGE_WINDOW),
        );
    }

    let points = city_rows
        .iter()
        .map(|row| SeriesPoint {
            year: row.year,
            value: row.metric(metric),
        })
        .collect();
    Series::new(key, metric.label(), points)
}

/// Min/max temperature envelope for one city.
#[must_use]
pub fn temperature_band(rows: &[AnnualRow], city_key: &str) -> Band {
    let lower = annual_metric_series(rows, city_key, Metric::MinTemp);
    let upper = annual_metric_series(rows, city_key, Metric::MaxTemp);
    let key = SeriesKey::Band {
        lower: Metric::MinTemp,
        upper: Metric::MaxTemp,
    };
    Band::new(
        key,
        key.to_string(),
        lower.points().to_vec(),
        upper.points().to_vec(),
    )
}

/// One series per year for a city, with month indices on the x axis.
#[must_use]
pub fn monthly_series_by_year(rows: &[MonthlyRow], city_key: &str) -> Vec<Series> {
    let mut by_year: BTreeMap<i32, Vec<SeriesPoint>> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.city_key == city_key) {
        by_year.entry(row.year).or_default().push(SeriesPoint {
            year: i32::from(row.month_index),
            value: row.avg_temp,
        });
    }
    by_year
        .into_iter()
        .map(|(year, points)| Series::new(SeriesKey::Year(year), year.to_string(), points))
        .collect()
}

/// Trailing mean over `window` consecutive points, rounded to one decimal.
///
/// A mean is produced only when the whole window holds finite values.
#[must_use]
pub fn rolling_mean(points: &[SeriesPoint], window: usize) -> Vec<SeriesPoint> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let value = (window > 0 && index + 1 >= window)
                .then(|| &points[index + 1 - window..=index])
                .and_then(|slice| {
                    slice
                        .iter()
                        .map(|p| p.finite_value())
                        .sum::<Option<f64>>()
                })
                .map(|sum| (sum / window as f64 * 10.0).round() / 10.0);
            SeriesPoint {
                year: point.year,
                value,
            }
        })
        .collect()
}

fn parse_row_array(input: &str, kind: &str) -> ChartResult<Vec<Value>> {
    let value: Value = serde_json::from_str(input).map_err(|e| {
        ChartError::InvalidData(format!("failed to parse {kind} rows json payload: {e}"))
    })?;
    match value {
        Value::Array(values) => Ok(values),
        _ => Err(ChartError::InvalidData(format!(
            "{kind} rows payload must be a json array"
        ))),
    }
}

fn collect_rows<T>(values: &[Value], kind: &str, read: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    let rows: Vec<T> = values.iter().filter_map(read).collect();
    let skipped = values.len() - rows.len();
    if skipped > 0 {
        debug!(kind, skipped, kept = rows.len(), "skipped unreadable rows");
    }
    rows
}

fn row_identity(row: &Map<String, Value>) -> Option<(i32, String)> {
    let year = first_field(row, YEAR_FIELDS)
        .and_then(coerce_integer)
        .and_then(|year| i32::try_from(year).ok())?;
    let city_key = first_field(row, CITY_FIELDS)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|city| !city.is_empty())?;
    Some((year, city_key.to_owned()))
}

fn first_field<'a>(row: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| row.get(*name))
}

fn metric_field(row: &Map<String, Value>, names: &[&str]) -> Option<f64> {
    let nested = row.get("data").and_then(Value::as_object);
    names.iter().find_map(|name| {
        nested
            .and_then(|data| data.get(*name))
            .or_else(|| row.get(*name))
            .and_then(coerce_number)
    })
}
