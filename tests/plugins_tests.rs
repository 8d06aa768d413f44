use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use stackgrid::api::{ChartConfig, ChartEngine, ChartEvent, ChartPlugin, PluginContext, ZoomBehavior};
use stackgrid::core::{DataSource, Filter, Margins, MemorySource, Viewport};
use stackgrid::interaction::InteractionMode;
use stackgrid::render::NullRenderer;

type Journal = Rc<RefCell<Vec<(ChartEvent, PluginContext)>>>;

struct RecordingPlugin {
    id: String,
    journal: Journal,
}

impl RecordingPlugin {
    fn new(id: &str) -> (Self, Journal) {
        let journal = Journal::default();
        (
            Self {
                id: id.to_owned(),
                journal: Rc::clone(&journal),
            },
            journal,
        )
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &ChartEvent, context: PluginContext) {
        self.journal.borrow_mut().push((event.clone(), context));
    }
}

fn engine() -> ChartEngine<NullRenderer> {
    let config = ChartConfig::new(Viewport::new(100, 100))
        .with_margins(Margins::uniform(0.0))
        .with_key_domain(0.0, 10.0)
        .with_value_domain(0.0, 4.0)
        .with_zoom_behavior(ZoomBehavior {
            mouse_zoomable: true,
            ..ZoomBehavior::default()
        });
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn source() -> Rc<dyn DataSource> {
    Rc::new(MemorySource::from_pairs((0..10).map(|key| (f64::from(key), 1.0))))
}

#[test]
fn plugin_receives_lifecycle_events_in_order() {
    let mut engine = engine();
    let (plugin, journal) = RecordingPlugin::new("recorder");
    engine.register_plugin(Box::new(plugin)).expect("register");

    engine.add_layer(source(), Some("counts"), None);
    engine.render().expect("render");
    engine.brush_start().expect("brush start");
    engine
        .brush_update(2.0, 6.0, Instant::now())
        .expect("brush");
    engine.brush_end();
    engine.flush_events().expect("flush");

    let events: Vec<ChartEvent> = journal
        .borrow()
        .iter()
        .map(|(event, _)| event.clone())
        .collect();
    assert_eq!(
        events,
        vec![
            ChartEvent::LayersChanged {
                layers: 1,
                visible: 1
            },
            ChartEvent::DomainChanged { axis: "key" },
            ChartEvent::Rendered,
            ChartEvent::BrushStarted,
            ChartEvent::FilterChanged {
                filter: Some(Filter::range(2.0, 6.0))
            },
            ChartEvent::BrushEnded,
            ChartEvent::Redrawn,
        ]
    );

    let journal = journal.borrow();
    let (_, filter_context) = &journal[4];
    assert!(filter_context.has_filter);
    assert_eq!(filter_context.interaction_mode, InteractionMode::Brushing);
    let (_, last_context) = journal.last().expect("events recorded");
    assert_eq!(last_context.interaction_mode, InteractionMode::Idle);
    assert_eq!(last_context.key_domain, Some((0.0, 10.0)));
    assert_eq!(last_context.layer_count, 1);
}

#[test]
fn zoom_events_report_refocus_state() {
    let mut engine = engine();
    let (plugin, journal) = RecordingPlugin::new("zoom");
    engine.register_plugin(Box::new(plugin)).expect("register");

    engine.zoom_by(2.0, 5.0).expect("zoom");
    engine.reset_zoom().expect("reset");

    let zooms: Vec<ChartEvent> = journal
        .borrow()
        .iter()
        .filter(|(event, _)| matches!(event, ChartEvent::Zoomed { .. }))
        .map(|(event, _)| event.clone())
        .collect();
    assert_eq!(
        zooms,
        vec![
            ChartEvent::Zoomed {
                start: 2.5,
                end: 7.5,
                refocused: true
            },
            ChartEvent::Zoomed {
                start: 0.0,
                end: 10.0,
                refocused: false
            },
        ]
    );
}

#[test]
fn plugin_ids_must_be_unique_and_non_empty() {
    let mut engine = engine();
    let (first, _) = RecordingPlugin::new("legend");
    let (duplicate, _) = RecordingPlugin::new("legend");
    let (anonymous, _) = RecordingPlugin::new("");

    engine.register_plugin(Box::new(first)).expect("register");
    assert!(engine.register_plugin(Box::new(duplicate)).is_err());
    assert!(engine.register_plugin(Box::new(anonymous)).is_err());
    assert_eq!(engine.plugin_count(), 1);
    assert!(engine.has_plugin("legend"));

    assert!(engine.unregister_plugin("legend"));
    assert!(!engine.unregister_plugin("legend"));
    assert_eq!(engine.plugin_count(), 0);
}

#[test]
fn unregistered_plugin_stops_receiving_events() {
    let mut engine = engine();
    let (plugin, journal) = RecordingPlugin::new("short-lived");
    engine.register_plugin(Box::new(plugin)).expect("register");
    engine.add_layer(source(), None, None);
    assert!(engine.unregister_plugin("short-lived"));

    engine.hide_layer("0");
    assert_eq!(journal.borrow().len(), 1);
}
