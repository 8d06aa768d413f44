use approx::assert_relative_eq;
use proptest::prelude::*;
use stackgrid::ChartError;
use stackgrid::core::{
    AxisValue, MIN_BAND_WIDTH, OutOfDomainPolicy, Scale, ScaleDomain, ScaleMode,
};

fn continuous(min: f64, max: f64, r0: f64, r1: f64) -> Scale {
    let mut scale = Scale::continuous("key");
    scale
        .set_domain(ScaleDomain::continuous(min, max))
        .expect("domain");
    scale.set_range(r0, r1).expect("range");
    scale
}

#[test]
fn continuous_scale_maps_and_inverts() {
    let scale = continuous(0.0, 10.0, 0.0, 200.0);
    assert_relative_eq!(scale.map_number(2.5).expect("map"), 50.0);
    assert_relative_eq!(scale.invert(150.0).expect("invert"), 7.5);
}

#[test]
fn inverted_range_maps_bottom_up() {
    let scale = continuous(0.0, 100.0, 400.0, 0.0);
    assert_relative_eq!(scale.map_number(0.0).expect("map"), 400.0);
    assert_relative_eq!(scale.map_number(25.0).expect("map"), 300.0);
}

#[test]
fn coordinate_queries_require_a_domain() {
    let scale = Scale::continuous("value");
    let err = scale.map_number(1.0).expect_err("no domain");
    assert!(matches!(err, ChartError::DomainNotSet { axis: "value" }));
}

#[test]
fn out_of_domain_policy_controls_mapping() {
    let mut scale = continuous(0.0, 10.0, 0.0, 100.0);
    assert_relative_eq!(scale.map_number(20.0).expect("extrapolate"), 200.0);

    scale.set_out_of_domain_policy(OutOfDomainPolicy::Clamp);
    assert_relative_eq!(scale.map_number(20.0).expect("clamp"), 100.0);

    scale.set_out_of_domain_policy(OutOfDomainPolicy::Reject);
    let err = scale.map_number(20.0).expect_err("reject");
    assert!(matches!(err, ChartError::OutOfDomain { .. }));
}

#[test]
fn domain_kind_must_match_mode() {
    let mut scale = Scale::continuous("key");
    assert!(scale.set_domain(ScaleDomain::ordinal(["a"])).is_err());
    let mut ordinal = Scale::ordinal("key");
    assert!(ordinal.set_domain(ScaleDomain::continuous(0.0, 1.0)).is_err());
    assert!(scale.set_domain(ScaleDomain::continuous(f64::NAN, 1.0)).is_err());
}

#[test]
fn ordinal_scale_lays_out_equal_bands() {
    let mut scale = Scale::new("key", ScaleMode::Ordinal);
    scale
        .set_domain(ScaleDomain::ordinal(["a", "b", "c", "d"]))
        .expect("domain");
    scale.set_range(0.0, 400.0).expect("range");

    assert_relative_eq!(scale.ordinal_band_width(), 100.0);
    assert_relative_eq!(scale.map(&AxisValue::category("a")).expect("a"), 0.0);
    assert_relative_eq!(scale.map(&AxisValue::category("c")).expect("c"), 200.0);

    scale.set_padding(20.0, 0.0).expect("padding");
    // (400 - 3 * 20) / 4
    assert_relative_eq!(scale.ordinal_band_width(), 85.0);
    assert_relative_eq!(scale.map(&AxisValue::category("b")).expect("b"), 105.0);
}

#[test]
fn unknown_ordinal_key_follows_policy() {
    let mut scale = Scale::ordinal("key");
    scale
        .set_domain(ScaleDomain::ordinal(["a"]))
        .expect("domain");
    scale.set_range(10.0, 110.0).expect("range");
    assert_relative_eq!(scale.map(&AxisValue::category("z")).expect("fallback"), 10.0);

    scale.set_out_of_domain_policy(OutOfDomainPolicy::Reject);
    assert!(matches!(
        scale.map(&AxisValue::category("z")),
        Err(ChartError::OutOfDomain { .. })
    ));
}

#[test]
fn band_width_floors_to_integer_and_minimum() {
    let mut scale = continuous(0.0, 10.0, 0.0, 100.0);
    scale.set_padding(2.0, 0.0).expect("padding");
    // (100 - 9 * 2) / 10 = 8.2
    assert_eq!(scale.band_width(10), 8.0);

    assert_eq!(scale.band_width(0), MIN_BAND_WIDTH);
    assert_eq!(scale.band_width(1_000), MIN_BAND_WIDTH);

    scale.set_range(50.0, 50.0).expect("empty range");
    assert_eq!(scale.band_width(5), MIN_BAND_WIDTH);
}

#[test]
fn outer_padding_reduces_band_width() {
    let mut scale = continuous(0.0, 4.0, 0.0, 100.0);
    scale.set_padding(0.0, 10.0).expect("padding");
    // 100 / 4 - 2 * 10 / 4
    assert_eq!(scale.band_width(4), 20.0);
}

#[test]
fn ticks_are_nice_and_inside_domain() {
    let scale = continuous(0.0, 100.0, 0.0, 500.0);
    let ticks: Vec<f64> = scale
        .ticks(5)
        .iter()
        .filter_map(AxisValue::as_f64)
        .collect();
    assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

    let mut ordinal = Scale::ordinal("key");
    ordinal
        .set_domain(ScaleDomain::ordinal(["x", "y"]))
        .expect("domain");
    assert_eq!(
        ordinal.ticks(10),
        vec![AxisValue::category("x"), AxisValue::category("y")]
    );
}

proptest! {
    #[test]
    fn band_width_never_below_floor(
        unit_count in 0usize..10_000,
        r0 in -10_000.0f64..10_000.0,
        extent in 0.0f64..10_000.0,
        inner in 0.0f64..50.0,
        outer in 0.0f64..50.0
    ) {
        let mut scale = continuous(0.0, 1.0, r0, r0 + extent);
        scale.set_padding(inner, outer).expect("padding");
        let width = scale.band_width(unit_count);
        prop_assert!(width >= MIN_BAND_WIDTH);
        prop_assert!(width.fract() == 0.0);
        if unit_count == 0 || extent == 0.0 {
            prop_assert_eq!(width, MIN_BAND_WIDTH);
        }
    }

    #[test]
    fn continuous_round_trip(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        factor in 0.0f64..1.0
    ) {
        let scale = continuous(min, min + span, 0.0, 2048.0);
        let value = min + factor * span;
        let px = scale.map_number(value).expect("map");
        let recovered = scale.invert(px).expect("invert");
        prop_assert!((recovered - value).abs() <= 1e-6);
    }
}
