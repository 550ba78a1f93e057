use climate_chart::core::{
    Metric, SeriesKey, SeriesPoint, annual_metric_series, city_keys, monthly_series_by_year,
    parse_annual_rows, parse_monthly_rows, rolling_mean, temperature_band,
};

const ANNUAL_PAYLOAD: &str = r#"[
    {"ville": "paris", "NOM_USUEL": "PARIS-MONTSOURIS", "AAAA": "2001",
     "data": {"TMM": "12.4", "TXAB": "35.1", "TXMIN": "-2,5", "NBJTX25": "40",
              "RR": "650.2", "RRAB": "40.1", "TMM_ma5": ""}},
    {"ville": "paris", "NOM_USUEL": "PARIS-MONTSOURIS", "AAAA": "not-a-year",
     "data": {"TMM": "11.0"}},
    {"ville": "   ", "NOM_USUEL": "NOWHERE", "AAAA": "2002", "data": {"TMM": "9.0"}},
    {"ville": "lyon", "NOM_USUEL": "LYON-BRON", "AAAA": 2002,
     "data": {"TMM": "n/a", "TXAB": 31, "NBJTX25": null}},
    {"ville": "lyon", "AAAA": "2003", "TMM": "13.1"},
    "not an object"
]"#;

fn annual_row(year: i32, avg_temp: Option<f64>) -> serde_json::Value {
    serde_json::json!({
        "ville": "paris",
        "AAAA": year.to_string(),
        "data": { "TMM": avg_temp.map(|v| v.to_string()).unwrap_or_default() }
    })
}

#[test]
fn parses_backend_rows_and_coerces_fields() {
    let rows = parse_annual_rows(ANNUAL_PAYLOAD).expect("parse rows");
    assert_eq!(rows.len(), 3);

    let paris = &rows[0];
    assert_eq!(paris.year, 2001);
    assert_eq!(paris.city_key, "paris");
    assert_eq!(paris.avg_temp, Some(12.4));
    assert_eq!(paris.max_temp, Some(35.1));
    assert_eq!(paris.min_temp, Some(-2.5));
    assert_eq!(paris.hot_days, Some(40.0));
    assert_eq!(paris.rainfall, Some(650.2));
    assert_eq!(paris.avg_temp_ma5, None);

    let lyon = &rows[1];
    assert_eq!(lyon.year, 2002);
    assert_eq!(lyon.avg_temp, None);
    assert_eq!(lyon.max_temp, Some(31.0));
    assert_eq!(lyon.hot_days, None);

    assert_eq!(rows[2].avg_temp, Some(13.1));
}

#[test]
fn non_array_payload_is_rejected() {
    assert!(parse_annual_rows(r#"{"ville": "paris"}"#).is_err());
    assert!(parse_annual_rows("[1, 2").is_err());
    assert!(parse_monthly_rows("42").is_err());
}

#[test]
fn monthly_rows_require_a_valid_month() {
    let payload = r#"[
        {"ville": "paris", "AAAA": "2001", "MM": "07", "MOIS": "Juillet", "data": {"TMM": "21.5"}},
        {"ville": "paris", "AAAA": "2001", "MM": "13", "data": {"TMM": "1.0"}},
        {"ville": "paris", "AAAA": "2001", "MM": "x", "data": {"TMM": "1.0"}},
        {"ville": "paris", "AAAA": "2001", "data": {"TMM": "1.0"}}
    ]"#;

    let rows = parse_monthly_rows(payload).expect("parse rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].month_index, 7);
    assert_eq!(rows[0].avg_temp, Some(21.5));
}

#[test]
fn city_keys_are_sorted_and_distinct() {
    let rows = parse_annual_rows(ANNUAL_PAYLOAD).expect("parse rows");
    assert_eq!(city_keys(&rows), vec!["lyon".to_owned(), "paris".to_owned()]);
}

#[test]
fn metric_series_filters_by_city() {
    let rows = parse_annual_rows(ANNUAL_PAYLOAD).expect("parse rows");
    let series = annual_metric_series(&rows, "lyon", Metric::AvgTemp);

    assert_eq!(series.key, SeriesKey::Metric(Metric::AvgTemp));
    assert_eq!(
        series.points(),
        &[SeriesPoint::missing(2002), SeriesPoint::new(2003, 13.1)]
    );
}

#[test]
fn smoothed_series_is_derived_when_absent() {
    let payload = serde_json::Value::Array(
        (2000..=2006)
            .map(|year| annual_row(year, Some(f64::from(year - 1990))))
            .collect(),
    );
    let rows = parse_annual_rows(&payload.to_string()).expect("parse rows");

    let series = annual_metric_series(&rows, "paris", Metric::AvgTempMa5);
    let values: Vec<Option<f64>> = series.points().iter().map(|p| p.value).collect();
    assert_eq!(
        values,
        vec![None, None, None, None, Some(12.0), Some(13.0), Some(14.0)]
    );
}

#[test]
fn rolling_mean_needs_a_full_window() {
    let points = [
        SeriesPoint::new(2000, 1.0),
        SeriesPoint::new(2001, 2.0),
        SeriesPoint::missing(2002),
        SeriesPoint::new(2003, 4.0),
        SeriesPoint::new(2004, 5.0),
    ];

    let smoothed = rolling_mean(&points, 2);
    let values: Vec<Option<f64>> = smoothed.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![None, Some(1.5), None, None, Some(4.5)]);
}

#[test]
fn temperature_band_pairs_min_and_max() {
    let rows = parse_annual_rows(ANNUAL_PAYLOAD).expect("parse rows");
    let band = temperature_band(&rows, "paris");

    assert_eq!(
        band.key,
        SeriesKey::Band {
            lower: Metric::MinTemp,
            upper: Metric::MaxTemp
        }
    );
    assert_eq!(band.lower(), &[SeriesPoint::new(2001, -2.5)]);
    assert_eq!(band.upper(), &[SeriesPoint::new(2001, 35.1)]);
}

#[test]
fn monthly_rows_become_one_series_per_year() {
    let payload = r#"[
        {"ville": "paris", "AAAA": "2002", "MM": "2", "data": {"TMM": "6.0"}},
        {"ville": "paris", "AAAA": "2001", "MM": "1", "data": {"TMM": "4.0"}},
        {"ville": "paris", "AAAA": "2002", "MM": "1", "data": {"TMM": "5.0"}},
        {"ville": "lyon", "AAAA": "2002", "MM": "1", "data": {"TMM": "3.0"}}
    ]"#;
    let rows = parse_monthly_rows(payload).expect("parse rows");

    let series = monthly_series_by_year(&rows, "paris");
    let keys: Vec<SeriesKey> = series.iter().map(|s| s.key).collect();
    assert_eq!(keys, vec![SeriesKey::Year(2001), SeriesKey::Year(2002)]);
    assert_eq!(series[1].label, "2002");
    assert_eq!(
        series[1].points(),
        &[SeriesPoint::new(1, 5.0), SeriesPoint::new(2, 6.0)]
    );
}
