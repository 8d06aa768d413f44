use std::rc::Rc;

use crate::core::{
    DataPoint, DataSource, DomainFilter, KeyAccessor, Layer, LegendEntry, ScaleMode,
    StackedLayer, StackingEngine, TitleAccessor, ValueAccessor,
};
use crate::render::Renderer;

use super::{ChartEngine, ChartEvent};

impl<R: Renderer> ChartEngine<R> {
    /// Rebinds the chart to a new primary source.
    ///
    /// Clears every layer, registers `source` as the first one and makes it
    /// the dimension that receives this chart's filter.
    pub fn set_source(&mut self, source: Rc<dyn DataSource>, name: Option<&str>) -> String {
        if let Some(filter) = &self.core.model.filter {
            source.set_filter(Some(filter.clone()));
        }
        self.core.model.dimension = Some(Rc::clone(&source));
        let id = self.core.model.stack.set_source(source, name);
        self.rescale();
        self.emit_layers_changed();
        id
    }

    /// Replaces the source that receives this chart's filter.
    pub fn set_dimension(&mut self, dimension: Rc<dyn DataSource>) {
        dimension.set_filter(self.core.model.filter.clone());
        self.core.model.dimension = Some(dimension);
    }

    /// Appends a stack layer and returns its id.
    ///
    /// The first layer's source doubles as the filter dimension when none
    /// was set.
    pub fn add_layer(
        &mut self,
        source: Rc<dyn DataSource>,
        name: Option<&str>,
        accessor: Option<ValueAccessor>,
    ) -> String {
        if self.core.model.dimension.is_none() {
            self.core.model.dimension = Some(Rc::clone(&source));
        }
        let id = self.core.model.stack.add_layer(source, name, accessor);
        self.emit_layers_changed();
        id
    }

    pub fn clear_layers(&mut self) {
        self.core.model.stack.clear_layers();
        self.emit_layers_changed();
    }

    /// Registered layers in registration order.
    pub fn layers(&self) -> impl ExactSizeIterator<Item = &Layer> {
        self.core.model.stack.layers()
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.core.model.stack.layer_count()
    }

    /// Hides a layer; unknown ids are ignored. The chart is not redrawn.
    pub fn hide_layer(&mut self, id: &str) -> bool {
        let changed = self.core.model.stack.hide_layer(id);
        if changed {
            self.emit_layers_changed();
        }
        changed
    }

    /// Shows a layer; unknown ids are ignored. The chart is not redrawn.
    pub fn show_layer(&mut self, id: &str) -> bool {
        let changed = self.core.model.stack.show_layer(id);
        if changed {
            self.emit_layers_changed();
        }
        changed
    }

    pub fn toggle_hidden(&mut self, id: &str) -> bool {
        let changed = self.core.model.stack.toggle_hidden(id);
        if changed {
            self.emit_layers_changed();
        }
        changed
    }

    #[must_use]
    pub fn is_hidden(&self, id: &str) -> bool {
        self.core.model.stack.is_hidden(id)
    }

    #[must_use]
    pub fn legendables(&self) -> Vec<LegendEntry> {
        self.core.model.stack.legendables()
    }

    /// Chart-wide value accessor used by layers without their own.
    pub fn set_value_accessor(&mut self, accessor: ValueAccessor) {
        self.core.model.stack.set_default_value_accessor(accessor);
    }

    pub fn set_key_accessor(&mut self, accessor: KeyAccessor) {
        self.core.model.stack.set_key_accessor(accessor);
    }

    /// Canonical ordering of ordinal keys.
    pub fn set_ordering(&mut self, ordering: KeyAccessor) {
        self.core.model.stack.set_ordering(ordering);
    }

    pub fn set_title_accessor(&mut self, accessor: Option<TitleAccessor>) {
        self.core.model.stack.set_default_title_accessor(accessor);
    }

    /// Sets a per-layer title accessor. Returns `false` for unknown ids.
    pub fn set_layer_title_accessor(&mut self, id: &str, accessor: TitleAccessor) -> bool {
        match self.core.model.stack.layer_mut(id) {
            Some(layer) => {
                layer.title_accessor = Some(accessor);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn title(&self, point: &DataPoint) -> String {
        self.core.model.stack.title(point)
    }

    #[must_use]
    pub fn stack(&self) -> &StackingEngine {
        &self.core.model.stack
    }

    /// Stacks the current source snapshots without rendering.
    #[must_use]
    pub fn compute_stacked_layers(&self) -> Vec<StackedLayer> {
        self.core
            .model
            .stack
            .compute_stacked_layers(&self.stacking_domain_filter())
    }

    /// Layers produced by the last render or redraw.
    #[must_use]
    pub fn stacked_layers(&self) -> &[StackedLayer] {
        &self.core.model.stacked
    }

    #[must_use]
    pub fn layer_points(&self, id: &str) -> Option<Vec<DataPoint>> {
        self.core.model.stack.layer_points(id)
    }

    pub(super) fn recompute_stacked_layers(&mut self) {
        self.core.model.stacked = self.compute_stacked_layers();
    }

    /// Points outside a fixed continuous key domain are dropped; ordinal and
    /// (unzoomed) elastic axes keep everything.
    fn stacking_domain_filter(&self) -> DomainFilter {
        let model = &self.core.model;
        let elastic =
            self.core.behavior.key_axis.elastic && !model.interaction.refocused();
        if model.key_scale.mode() == ScaleMode::Ordinal || elastic {
            return DomainFilter::All;
        }
        match model.key_scale.domain().as_continuous() {
            Some((min, max)) => DomainFilter::Range { min, max },
            None => DomainFilter::All,
        }
    }

    fn emit_layers_changed(&mut self) {
        let stack = &self.core.model.stack;
        let event = ChartEvent::LayersChanged {
            layers: stack.layer_count(),
            visible: stack.layers().filter(|layer| !layer.hidden).count(),
        };
        self.emit_plugin_event(event);
    }
}
