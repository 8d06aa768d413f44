use serde::{Deserialize, Serialize};

use crate::core::{Filter, Orientation, Viewport};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub orientation: Orientation,
    /// `None` for ordinal or unset key axes.
    pub key_domain: Option<(f64, f64)>,
    pub value_domain: Option<(f64, f64)>,
    pub layer_count: usize,
    pub interaction_mode: InteractionMode,
    pub refocused: bool,
    pub has_filter: bool,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartEvent {
    LayersChanged { layers: usize, visible: usize },
    DomainChanged { axis: &'static str },
    FilterChanged { filter: Option<Filter> },
    BrushStarted,
    BrushEnded,
    Zoomed { start: f64, end: f64, refocused: bool },
    Rendered,
    Redrawn,
}

/// Observer hook for host-side logic (legends, reset-zoom affordances,
/// analytics).
///
/// Plugins see events and a context snapshot; they never mutate the engine.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent, context: PluginContext);
}
