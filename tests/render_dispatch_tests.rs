use std::rc::Rc;
use std::time::Instant;

use stackgrid::ChartError;
use stackgrid::api::{BarBehavior, ChartConfig, ChartEngine, ZoomBehavior};
use stackgrid::core::{
    AxisPadding, DataSource, KeyUnits, Margins, MemorySource, Orientation, Viewport,
};
use stackgrid::render::{NullRenderer, RenderFrame, RenderPass};

fn counts(keys: std::ops::RangeInclusive<i32>) -> Rc<dyn DataSource> {
    Rc::new(MemorySource::from_pairs(keys.map(|key| (f64::from(key), 1.0))))
}

fn fixed_config() -> ChartConfig {
    ChartConfig::new(Viewport::new(100, 100))
        .with_margins(Margins::uniform(0.0))
        .with_key_domain(0.0, 10.0)
        .with_value_domain(0.0, 4.0)
}

fn engine_with(config: ChartConfig, source: Rc<dyn DataSource>) -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_source(source, Some("counts"));
    engine
}

fn last_frame(engine: &ChartEngine<NullRenderer>) -> &RenderFrame {
    engine.renderer().last_frame.as_ref().expect("frame")
}

#[test]
fn render_emits_both_axes_and_redraw_skips_fixed_ones() {
    let mut engine = engine_with(fixed_config(), counts(0..=9));

    engine.render().expect("render");
    assert!(engine.is_rendered());
    let frame = last_frame(&engine);
    assert_eq!(frame.pass, RenderPass::Render);
    assert!(frame.key_axis.is_some());
    assert!(frame.value_axis.is_some());
    assert_eq!(frame.bars.len(), 10);

    engine
        .brush_update(2.0, 5.0, Instant::now())
        .expect("brush");
    engine.flush_events().expect("flush");
    let frame = last_frame(&engine);
    assert_eq!(frame.pass, RenderPass::Redraw);
    assert!(frame.key_axis.is_none());
    assert!(frame.value_axis.is_none());
    assert_eq!(frame.selected_count(), 3);
    assert_eq!(engine.renderer().render_count, 1);
    assert_eq!(engine.renderer().redraw_count, 1);
}

#[test]
fn redraw_before_render_runs_a_full_render() {
    let mut engine = engine_with(fixed_config(), counts(0..=3));
    engine.redraw().expect("redraw");
    assert_eq!(engine.renderer().render_count, 1);
    assert_eq!(engine.renderer().redraw_count, 0);
    assert_eq!(last_frame(&engine).pass, RenderPass::Render);
}

#[test]
fn resize_re_emits_both_axes() {
    let mut engine = engine_with(fixed_config(), counts(0..=3));
    engine.render().expect("render");

    engine.resize(Viewport::new(200, 50)).expect("resize");
    engine.redraw().expect("redraw");
    let frame = last_frame(&engine);
    assert!(frame.key_axis.is_some());
    assert!(frame.value_axis.is_some());
    assert_eq!(frame.key_scale.range(), (0.0, 200.0));
    assert_eq!(frame.value_scale.range(), (50.0, 0.0));

    engine.redraw().expect("redraw");
    let frame = last_frame(&engine);
    assert!(frame.key_axis.is_none());
    assert!(frame.value_axis.is_none());

    assert!(matches!(
        engine.resize(Viewport::new(0, 10)),
        Err(ChartError::InvalidViewport { .. })
    ));
}

#[test]
fn elastic_value_axis_is_always_emitted() {
    let config = ChartConfig::new(Viewport::new(100, 100))
        .with_margins(Margins::uniform(0.0))
        .with_key_domain(0.0, 10.0)
        .with_elastic_values(true);
    let mut engine = engine_with(config, counts(0..=9));
    engine.render().expect("render");
    assert_eq!(engine.value_domain(), Some((0.0, 1.0)));

    engine.redraw().expect("redraw");
    let frame = last_frame(&engine);
    assert!(frame.key_axis.is_none());
    assert!(frame.value_axis.is_some());
}

#[test]
fn zoom_on_rendered_chart_redraws_key_axis() {
    let config = fixed_config().with_zoom_behavior(ZoomBehavior {
        mouse_zoomable: true,
        ..ZoomBehavior::default()
    });
    let mut engine = engine_with(config, counts(0..=9));
    engine.render().expect("render");

    engine.zoom_by(2.0, 5.0).expect("zoom");
    assert_eq!(engine.renderer().redraw_count, 1);
    let frame = last_frame(&engine);
    assert!(frame.refocused);
    let key_axis = frame.key_axis.as_ref().expect("key axis emitted");
    assert_eq!(key_axis.domain.as_continuous(), Some((2.5, 7.5)));
    assert!(frame.value_axis.is_none());
}

#[test]
fn render_without_any_domain_fails() {
    let config = ChartConfig::new(Viewport::new(100, 100));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    assert!(matches!(
        engine.render(),
        Err(ChartError::DomainNotSet { axis: "key" })
    ));

    let config = ChartConfig::new(Viewport::new(100, 100)).with_key_domain(0.0, 1.0);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    assert!(matches!(
        engine.render(),
        Err(ChartError::DomainNotSet { axis: "value" })
    ));
    assert!(!engine.is_rendered());
}

#[test]
fn elastic_keys_add_resolution_to_the_max() {
    let config = ChartConfig::new(Viewport::new(100, 100))
        .with_margins(Margins::uniform(0.0))
        .with_elastic_keys(true)
        .with_key_units(KeyUnits::Precision(0.5))
        .with_elastic_values(true);
    let mut engine = engine_with(config, counts(0..=4));
    engine.render().expect("render");

    assert_eq!(engine.key_domain().as_continuous(), Some((0.0, 4.5)));
    assert_eq!(engine.original_key_domain(), Some((0.0, 4.5)));
    assert_eq!(engine.unit_count(), 9);
}

#[test]
fn elastic_keys_respect_padding() {
    let config = ChartConfig::new(Viewport::new(100, 100))
        .with_margins(Margins::uniform(0.0))
        .with_elastic_keys(true)
        .with_key_padding(AxisPadding::Absolute(1.0))
        .with_elastic_values(true);
    let mut engine = engine_with(config, counts(0..=4));
    engine.render().expect("render");
    assert_eq!(engine.key_domain().as_continuous(), Some((-1.0, 5.0)));
}

#[test]
fn elastic_keys_hold_while_refocused() {
    let config = ChartConfig::new(Viewport::new(100, 100))
        .with_margins(Margins::uniform(0.0))
        .with_elastic_keys(true)
        .with_elastic_values(true);
    let source = Rc::new(MemorySource::from_pairs((0..=10).map(|key| (f64::from(key), 1.0))));
    let dyn_source: Rc<dyn DataSource> = source.clone();
    let mut engine = engine_with(config, dyn_source);
    engine.render().expect("render");
    assert_eq!(engine.key_domain().as_continuous(), Some((0.0, 10.0)));

    engine.focus(Some((2.0, 4.0))).expect("focus");
    source.replace_records(
        (0..=20)
            .map(|key| stackgrid::core::Record::new(f64::from(key), 1.0))
            .collect(),
    );
    engine.redraw().expect("redraw");
    assert_eq!(engine.key_domain().as_continuous(), Some((2.0, 4.0)));

    engine.reset_zoom().expect("reset");
    engine.redraw().expect("redraw");
    assert_eq!(engine.key_domain().as_continuous(), Some((0.0, 20.0)));
    assert_eq!(engine.original_key_domain(), Some((0.0, 20.0)));
}

#[test]
fn bar_thickness_follows_unit_count_and_floor() {
    let mut engine = engine_with(fixed_config(), counts(0..=9));
    assert_eq!(engine.unit_count(), 10);
    // (100 - 9 * 2) / 10 floored
    assert_eq!(engine.bar_thickness(), 8.0);

    engine
        .set_key_domain(stackgrid::core::ScaleDomain::continuous(0.0, 1_000.0))
        .expect("domain");
    assert_eq!(engine.unit_count(), 1_000);
    assert_eq!(engine.bar_thickness(), 1.0);

    engine
        .set_bar_behavior(BarBehavior {
            gap_px: -1.0,
            ..BarBehavior::default()
        })
        .expect_err("negative gap");
}

#[test]
fn highlights_align_with_stacked_layers() {
    let mut engine = engine_with(fixed_config(), counts(0..=9));
    engine.add_layer(counts(0..=4), Some("second"), None);
    engine.render().expect("render");

    let frame = last_frame(&engine);
    assert_eq!(frame.layers.len(), 2);
    assert_eq!(frame.highlights.len(), 2);
    for (layer, row) in frame.layers.iter().zip(&frame.highlights) {
        assert_eq!(layer.points.len(), row.len());
    }
    assert_eq!(frame.bars.len(), 15);
    assert!(frame.bars.iter().all(|bar| bar.width == 8.0));
}

#[test]
fn horizontal_orientation_swaps_pixel_ranges() {
    let config = ChartConfig::new(Viewport::new(200, 100))
        .with_margins(Margins::uniform(0.0))
        .with_orientation(Orientation::Horizontal)
        .with_key_domain(0.0, 10.0)
        .with_value_domain(0.0, 4.0);
    let mut engine = engine_with(config, counts(0..=9));
    engine.render().expect("render");

    assert_eq!(engine.key_scale().range(), (0.0, 100.0));
    assert_eq!(engine.value_scale().range(), (0.0, 200.0));
    let frame = last_frame(&engine);
    assert!(frame.bars.iter().all(|bar| bar.height == frame.bar_thickness));

    engine
        .set_orientation(Orientation::Vertical)
        .expect("orientation");
    assert_eq!(engine.key_scale().range(), (0.0, 200.0));
    assert_eq!(engine.value_scale().range(), (100.0, 0.0));
}
