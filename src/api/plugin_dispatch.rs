use crate::extensions::{ChartEvent, PluginContext};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        let model = &self.core.model;
        PluginContext {
            viewport: model.viewport,
            orientation: model.orientation,
            key_domain: model.key_scale.domain().as_continuous(),
            value_domain: model.value_scale.domain().as_continuous(),
            layer_count: model.stack.layer_count(),
            interaction_mode: model.interaction.mode(),
            refocused: model.interaction.refocused(),
            has_filter: model.filter.is_some(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: ChartEvent) {
        if self.core.runtime.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.core.runtime.plugins {
            plugin.on_event(&event, context);
        }
    }
}
