use climate_chart::core::{
    CoordinateMapper, Domain, Metric, PlotArea, SeriesKey, SeriesPoint, ValueDomain, YearDomain,
    build_path, clamp_to_axis, compute_value_domain, compute_year_domain, value_ticks, year_ticks,
};
use climate_chart::interaction::VisibilitySet;
use proptest::prelude::*;

const KEY: SeriesKey = SeriesKey::Metric(Metric::AvgTemp);

fn points_from(values: &[Option<f64>]) -> Vec<SeriesPoint> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let year = 1950 + i32::try_from(index).expect("small index");
            match value {
                Some(value) => SeriesPoint::new(year, *value),
                None => SeriesPoint::missing(year),
            }
        })
        .collect()
}

fn assert_domain_invariants(values: &[Option<f64>]) -> Result<(), TestCaseError> {
    let points = points_from(values);
    let visible = VisibilitySet::from_keys([KEY]);
    let domain = compute_value_domain([(&KEY, points.as_slice())], &visible);

    prop_assert!(domain.min.is_finite() && domain.max.is_finite());
    prop_assert!(domain.min <= 0.0);
    prop_assert!(domain.max >= 0.0);
    prop_assert!(domain.tick_step >= 1.0 && domain.tick_step.is_finite());
    prop_assert_eq!(domain.max - domain.min, domain.tick_step * 4.0);

    for value in values.iter().flatten() {
        let value = clamp_to_axis(*value);
        prop_assert!(value >= domain.min && value <= domain.max);
    }
    prop_assert_eq!(value_ticks(domain).len(), 5);

    let mapper = CoordinateMapper::new(
        Domain::new(domain, YearDomain::new(1950, 2050)),
        PlotArea::new(56.0, 24.0, 752.0, 256.0),
    );
    prop_assert!(!build_path(&points, mapper).has_non_finite_coordinate());
    Ok(())
}

proptest! {
    #[test]
    fn value_domain_invariants_hold_for_any_finite_values(
        values in proptest::collection::vec(proptest::option::of(-1e308f64..1e308), 1..40)
    ) {
        assert_domain_invariants(&values)?;
    }

    #[test]
    fn year_ticks_stay_in_range_for_any_bounds(
        a in proptest::num::i32::ANY,
        b in proptest::num::i32::ANY,
        target in 1u32..24
    ) {
        let domain = YearDomain::new(a.min(b), a.max(b));
        let ticks = year_ticks(domain, target);
        prop_assert!(!ticks.is_empty());
        prop_assert_eq!(ticks.first().copied(), Some(domain.min));
        prop_assert!(ticks.iter().all(|year| *year >= domain.min && *year <= domain.max));
        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn value_domain_straddles_zero_and_contains_all_values(
        values in proptest::collection::vec(proptest::option::of(-5_000.0f64..5_000.0), 1..80)
    ) {
        let points = points_from(&values);
        let visible = VisibilitySet::from_keys([KEY]);
        let domain = compute_value_domain([(&KEY, points.as_slice())], &visible);

        prop_assert!(domain.min <= 0.0);
        prop_assert!(domain.max >= 0.0);
        prop_assert!(domain.tick_step >= 1.0);
        prop_assert_eq!(domain.max - domain.min, domain.tick_step * 4.0);
        prop_assert_eq!(domain.min.fract(), 0.0);

        for value in values.iter().flatten() {
            prop_assert!(*value >= domain.min && *value <= domain.max);
        }
        prop_assert_eq!(value_ticks(domain).len(), 5);
    }

    #[test]
    fn value_domain_is_deterministic(
        values in proptest::collection::vec(proptest::option::of(-100.0f64..100.0), 0..40)
    ) {
        let points = points_from(&values);
        let visible = VisibilitySet::from_keys([KEY]);
        let first = compute_value_domain([(&KEY, points.as_slice())], &visible);
        let second = compute_value_domain([(&KEY, points.as_slice())], &visible);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn year_domain_is_exact_extent(
        years in proptest::collection::vec(1800i32..2200, 1..64)
    ) {
        let domain = compute_year_domain(&years, None);
        prop_assert_eq!(domain.min, *years.iter().min().expect("non-empty"));
        prop_assert_eq!(domain.max, *years.iter().max().expect("non-empty"));
    }

    #[test]
    fn pixel_round_trip_recovers_year(
        year_min in 1800i32..2000,
        span in 1i32..200,
        offset in 0.0f64..1.0,
        width in 50.0f64..2_000.0
    ) {
        let years = YearDomain::new(year_min, year_min + span);
        let values = ValueDomain::degenerate();
        let mapper = CoordinateMapper::new(
            Domain::new(values, years),
            PlotArea::new(40.0, 10.0, width, 300.0),
        );

        let year = f64::from(year_min) + offset * f64::from(span);
        let x = mapper.year_to_x(year);
        prop_assert!(x >= 40.0 - 1e-9 && x <= 40.0 + width + 1e-9);
        prop_assert!((mapper.from_pixel_x(x) - year).abs() < 1e-6);
    }

    #[test]
    fn from_pixel_x_never_leaves_the_domain(
        pixel_x in proptest::num::f64::ANY,
        span in 0i32..100
    ) {
        let years = YearDomain::new(2000, 2000 + span);
        let values = ValueDomain::degenerate();
        let mapper = CoordinateMapper::new(
            Domain::new(values, years),
            PlotArea::new(56.0, 24.0, 752.0, 256.0),
        );

        let year = mapper.from_pixel_x(pixel_x);
        prop_assert!(year >= 2000.0 && year <= f64::from(2000 + span));
    }
}
