use std::rc::Rc;

use crate::core::{
    DataSource, Filter, Margins, Orientation, Scale, ScaleDomain, StackedLayer, StackingEngine,
    Viewport,
};
use crate::interaction::InteractionState;

/// Mutable chart state: geometry, scales, layers, filter and brush/zoom.
pub(super) struct ChartModel {
    pub(super) viewport: Viewport,
    pub(super) margins: Margins,
    pub(super) orientation: Orientation,
    pub(super) key_scale: Scale,
    pub(super) value_scale: Scale,
    pub(super) stack: StackingEngine,
    /// Source that receives this chart's filter.
    pub(super) dimension: Option<Rc<dyn DataSource>>,
    pub(super) filter: Option<Filter>,
    pub(super) interaction: InteractionState,
    /// Layers produced by the last render or redraw pass.
    pub(super) stacked: Vec<StackedLayer>,
    /// Key domain seen by the last axis preparation.
    pub(super) last_key_domain: ScaleDomain,
}

impl ChartModel {
    /// Plot length along the key axis.
    #[must_use]
    pub(super) fn key_axis_length(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.margins.effective_width(self.viewport),
            Orientation::Horizontal => self.margins.effective_height(self.viewport),
        }
    }

    /// Plot length along the value axis.
    #[must_use]
    pub(super) fn value_axis_length(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.margins.effective_height(self.viewport),
            Orientation::Horizontal => self.margins.effective_width(self.viewport),
        }
    }

    /// Pixel range of the key axis. Keys grow left-to-right or top-to-bottom.
    #[must_use]
    pub(super) fn key_range(&self) -> (f64, f64) {
        (0.0, self.key_axis_length())
    }

    /// Pixel range of the value axis. Vertical charts grow upwards.
    #[must_use]
    pub(super) fn value_range(&self) -> (f64, f64) {
        let length = self.value_axis_length();
        match self.orientation {
            Orientation::Vertical => (length, 0.0),
            Orientation::Horizontal => (0.0, length),
        }
    }
}
