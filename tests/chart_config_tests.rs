use stackgrid::api::{
    BarBehavior, ChartConfig, ChartEngine, DEFAULT_EVENT_DELAY_MS, KeyAxisConfig, ZoomBehavior,
};
use stackgrid::core::{
    AxisPadding, KeyUnits, Margins, Orientation, OutOfDomainPolicy, ScaleDomain, ScaleMode,
    Viewport,
};
use stackgrid::render::NullRenderer;
use stackgrid::{ChartError, ChartResult};

fn build(config: ChartConfig) -> ChartResult<ChartEngine<NullRenderer>> {
    ChartEngine::new(NullRenderer::default(), config)
}

#[test]
fn config_json_round_trip() {
    let config = ChartConfig::new(Viewport::new(640, 320))
        .with_margins(Margins::uniform(12.0))
        .with_orientation(Orientation::Horizontal)
        .with_key_domain(-5.0, 25.0)
        .with_key_units(KeyUnits::Precision(0.25))
        .with_value_padding(AxisPadding::Percent(5.0))
        .with_zoom_behavior(ZoomBehavior {
            mouse_zoomable: true,
            zoom_out_restrict: false,
            min_zoom: Some(1.0),
            max_zoom: Some(8.0),
        })
        .with_event_delay_ms(75)
        .with_out_of_domain_policy(OutOfDomainPolicy::Clamp);

    let json = config.to_json_string().expect("serialize");
    let restored = ChartConfig::from_json_str(&json).expect("deserialize");
    assert_eq!(restored, config);
}

#[test]
fn missing_fields_take_defaults() {
    let config =
        ChartConfig::from_json_str(r#"{ "viewport": { "width": 300, "height": 200 } }"#)
            .expect("deserialize");

    assert_eq!(config.event_delay_ms, DEFAULT_EVENT_DELAY_MS);
    assert_eq!(config.event_delay_ms, 40);
    assert_eq!(config.key_axis, KeyAxisConfig::default());
    assert_eq!(config.key_axis.tick_count, 10);
    assert_eq!(config.bar, BarBehavior::default());
    assert_eq!(config.bar.gap_px, 2.0);
    assert!(config.brush.enabled);
    assert!(config.zoom.zoom_out_restrict);
    assert!(!config.zoom.mouse_zoomable);
}

#[test]
fn malformed_json_is_invalid_data() {
    assert!(matches!(
        ChartConfig::from_json_str("{ not json"),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn engine_reports_current_config() {
    let config = ChartConfig::new(Viewport::new(400, 300))
        .with_key_domain(0.0, 50.0)
        .with_event_delay_ms(10);
    let mut engine = build(config.clone()).expect("engine init");
    assert_eq!(engine.config(), config);

    engine
        .set_key_padding(AxisPadding::Absolute(3.0))
        .expect("padding");
    engine.resize(Viewport::new(800, 600)).expect("resize");
    let current = engine.config();
    assert_eq!(current.key_axis.padding, AxisPadding::Absolute(3.0));
    assert_eq!(current.viewport, Viewport::new(800, 600));
    assert_eq!(current.event_delay_ms, 10);
}

#[test]
fn invalid_viewport_is_rejected() {
    let result = build(ChartConfig::new(Viewport::new(0, 200)));
    assert!(matches!(
        result,
        Err(ChartError::InvalidViewport {
            width: 0,
            height: 200
        })
    ));
}

#[test]
fn invalid_behaviors_are_rejected() {
    let negative_gap = ChartConfig::new(Viewport::new(100, 100)).with_bar_behavior(BarBehavior {
        gap_px: -2.0,
        ..BarBehavior::default()
    });
    assert!(matches!(build(negative_gap), Err(ChartError::InvalidData(_))));

    let inverted_zoom =
        ChartConfig::new(Viewport::new(100, 100)).with_zoom_behavior(ZoomBehavior {
            min_zoom: Some(5.0),
            max_zoom: Some(2.0),
            ..ZoomBehavior::default()
        });
    assert!(build(inverted_zoom).is_err());

    let zero_zoom = ChartConfig::new(Viewport::new(100, 100)).with_zoom_behavior(ZoomBehavior {
        max_zoom: Some(0.0),
        ..ZoomBehavior::default()
    });
    assert!(build(zero_zoom).is_err());

    let negative_margin =
        ChartConfig::new(Viewport::new(100, 100)).with_margins(Margins::uniform(-1.0));
    assert!(build(negative_margin).is_err());

    let bad_padding = ChartConfig::new(Viewport::new(100, 100))
        .with_value_padding(AxisPadding::Percent(f64::NAN));
    assert!(build(bad_padding).is_err());
}

#[test]
fn key_domain_kind_must_match_mode() {
    let mut config = ChartConfig::new(Viewport::new(100, 100));
    config.key_axis.mode = ScaleMode::Ordinal;
    config.key_axis.domain = Some(ScaleDomain::continuous(0.0, 1.0));
    assert!(matches!(build(config), Err(ChartError::InvalidData(_))));

    let mut config = ChartConfig::new(Viewport::new(100, 100));
    config.key_axis.domain = Some(ScaleDomain::ordinal(["a", "b"]));
    assert!(matches!(build(config), Err(ChartError::InvalidData(_))));

    let mut config = ChartConfig::new(Viewport::new(100, 100)).with_ordinal_keys();
    config.key_axis.domain = Some(ScaleDomain::ordinal(["a", "b"]));
    let engine = build(config).expect("ordinal domain");
    assert!(engine.key_domain().same_as(&ScaleDomain::ordinal(["a", "b"])));
    assert_eq!(engine.original_key_domain(), None);
}

#[test]
fn non_finite_domains_are_rejected() {
    let config = ChartConfig::new(Viewport::new(100, 100)).with_key_domain(0.0, f64::INFINITY);
    assert!(build(config).is_err());

    let config = ChartConfig::new(Viewport::new(100, 100)).with_value_domain(0.0, f64::INFINITY);
    assert!(build(config).is_err());
}
