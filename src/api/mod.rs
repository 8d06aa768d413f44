mod axis_controller;
mod brush_controller;
mod chart_behavior;
mod chart_group;
mod chart_model;
mod chart_runtime;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_core;
mod engine_init;
mod layer_controller;
mod layout_cache;
mod plugin_dispatch;
mod plugin_registry;
mod render_coordinator;
mod render_frame_builder;
mod validation;
mod zoom_controller;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use chart_group::ChartGroup;
pub use engine::ChartEngine;
pub use engine_config::{
    BarBehavior, BrushBehavior, ChartConfig, DEFAULT_EVENT_DELAY_MS, KeyAxisConfig,
    ValueAxisConfig, ZoomBehavior,
};

pub use crate::extensions::{ChartEvent, ChartPlugin, PluginContext};

/// Rounding applied to brush extents before they become filters.
pub type RoundFn = std::rc::Rc<dyn Fn(f64) -> f64>;

/// Handle for a chart registered in a [`ChartGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartId(u32);

impl ChartId {
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart#{}", self.0)
    }
}
