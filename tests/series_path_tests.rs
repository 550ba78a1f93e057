use climate_chart::core::{
    CoordinateMapper, Domain, PlotArea, PlotPadding, SeriesPoint, ValueDomain, Viewport,
    YearDomain, build_band_path, build_path,
};

fn unit_mapper() -> CoordinateMapper {
    let values = ValueDomain {
        min: 0.0,
        max: 20.0,
        tick_step: 5.0,
    };
    CoordinateMapper::new(
        Domain::new(values, YearDomain::new(2020, 2022)),
        PlotArea::new(0.0, 0.0, 200.0, 100.0),
    )
}

#[test]
fn contiguous_points_form_one_polyline() {
    let points = [
        SeriesPoint::new(2020, 10.0),
        SeriesPoint::new(2021, 20.0),
        SeriesPoint::new(2022, 0.0),
    ];

    let path = build_path(&points, unit_mapper());
    assert_eq!(path.d, "M0.00,50.00 L100.00,0.00 L200.00,100.00");
    assert_eq!(path.point_count, 3);
    assert_eq!(path.segment_count, 1);
}

#[test]
fn missing_value_splits_the_path() {
    let points = [
        SeriesPoint::new(2020, 10.0),
        SeriesPoint::missing(2021),
        SeriesPoint::new(2022, 12.0),
    ];

    let path = build_path(&points, unit_mapper());
    assert_eq!(path.d, "M0.00,50.00 M200.00,40.00");
    assert_eq!(path.segment_count, 2);
    assert!(!path.d.contains('L'));
}

#[test]
fn non_finite_values_are_treated_as_missing() {
    let points = [
        SeriesPoint::new(2020, 10.0),
        SeriesPoint::new(2021, f64::NAN),
        SeriesPoint::new(2022, 12.0),
    ];

    let path = build_path(&points, unit_mapper());
    assert_eq!(path.point_count, 2);
    assert_eq!(path.segment_count, 2);
}

#[test]
fn all_missing_points_give_empty_path() {
    let points = [SeriesPoint::missing(2020), SeriesPoint::missing(2021)];

    let path = build_path(&points, unit_mapper());
    assert!(path.is_empty());
    assert_eq!(path.point_count, 0);
    assert!(build_path(&[], unit_mapper()).is_empty());
}

#[test]
fn trailing_missing_point_is_excluded_from_dashboard_path() {
    let plot = PlotArea::from_viewport(Viewport::new(840, 320), PlotPadding::default());
    let values = ValueDomain {
        min: -1.0,
        max: 11.0,
        tick_step: 3.0,
    };
    let mapper = CoordinateMapper::new(Domain::new(values, YearDomain::new(2000, 2002)), plot);
    let points = [
        SeriesPoint::new(2000, 5.0),
        SeriesPoint::new(2001, 7.0),
        SeriesPoint::missing(2002),
    ];

    let path = build_path(&points, mapper);
    assert_eq!(path.point_count, 2);
    assert_eq!(path.d.matches(['M', 'L']).count(), 2);
}

#[test]
fn band_traces_upper_then_lower_reversed() {
    let lower = [
        SeriesPoint::new(2020, 0.0),
        SeriesPoint::new(2021, 5.0),
        SeriesPoint::missing(2022),
    ];
    let upper = [
        SeriesPoint::new(2020, 10.0),
        SeriesPoint::new(2021, 15.0),
        SeriesPoint::new(2022, 20.0),
    ];

    let path = build_band_path(&lower, &upper, unit_mapper());
    assert_eq!(
        path.d,
        "M0.00,50.00 L100.00,25.00 L100.00,75.00 L0.00,100.00 Z"
    );
    assert_eq!(path.point_count, 2);
    assert_eq!(path.segment_count, 1);
}

#[test]
fn band_with_one_qualifying_year_is_empty() {
    let lower = [SeriesPoint::new(2020, 0.0), SeriesPoint::missing(2021)];
    let upper = [SeriesPoint::new(2020, 10.0), SeriesPoint::new(2021, 15.0)];

    assert!(build_band_path(&lower, &upper, unit_mapper()).is_empty());
    assert!(build_band_path(&[], &upper, unit_mapper()).is_empty());
}

#[test]
fn band_only_pairs_matching_years() {
    let lower = [SeriesPoint::new(2020, 0.0), SeriesPoint::new(2022, 4.0)];
    let upper = [
        SeriesPoint::new(2020, 10.0),
        SeriesPoint::new(2021, 12.0),
        SeriesPoint::new(2022, 14.0),
    ];

    let path = build_band_path(&lower, &upper, unit_mapper());
    assert_eq!(path.point_count, 2);
    assert!(!path.d.contains("100.00,40.00"));
}
