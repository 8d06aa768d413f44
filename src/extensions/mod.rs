//! Observer hooks for host applications.

mod plugins;

pub use plugins::{ChartEvent, ChartPlugin, PluginContext};
