use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartPlugin;
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Adds an observer. Ids must be non-empty and unique per chart.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        let id = plugin.id();
        if id.is_empty() {
            return Err(ChartError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.plugin_position(id).is_some() {
            return Err(ChartError::InvalidData(format!(
                "plugin `{id}` is already registered on this chart"
            )));
        }
        debug!(plugin = id, "registered plugin");
        self.core.runtime.plugins.push(plugin);
        Ok(())
    }

    /// Drops the plugin registered as `plugin_id`. Returns `true` when one
    /// was removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        let Some(position) = self.plugin_position(plugin_id) else {
            return false;
        };
        self.core.runtime.plugins.remove(position);
        debug!(plugin = plugin_id, "unregistered plugin");
        true
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.core.runtime.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugin_position(plugin_id).is_some()
    }

    /// Registered plugin ids in dispatch order.
    pub fn plugin_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.core.runtime.plugins.iter().map(|plugin| plugin.id())
    }

    fn plugin_position(&self, plugin_id: &str) -> Option<usize> {
        self.core
            .runtime
            .plugins
            .iter()
            .position(|plugin| plugin.id() == plugin_id)
    }
}
