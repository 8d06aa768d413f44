use crate::core::{Margins, Orientation, Scale, ScaleDomain, Viewport};
use crate::error::ChartResult;
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::{ChartConfig, ChartEngine};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.model.viewport
    }

    #[must_use]
    pub fn margins(&self) -> Margins {
        self.core.model.margins
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.core.model.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> ChartResult<()> {
        if self.core.model.orientation == orientation {
            return Ok(());
        }
        self.core.model.orientation = orientation;
        self.apply_geometry()
    }

    #[must_use]
    pub fn key_scale(&self) -> &Scale {
        &self.core.model.key_scale
    }

    #[must_use]
    pub fn value_scale(&self) -> &Scale {
        &self.core.model.value_scale
    }

    #[must_use]
    pub fn key_domain(&self) -> &ScaleDomain {
        self.core.model.key_scale.domain()
    }

    #[must_use]
    pub fn value_domain(&self) -> Option<(f64, f64)> {
        self.core.model.value_scale.domain().as_continuous()
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.core.model.interaction
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.core.runtime.rendered
    }

    /// Current configuration, including setter changes made after creation.
    #[must_use]
    pub fn config(&self) -> ChartConfig {
        let model = &self.core.model;
        let behavior = &self.core.behavior;
        ChartConfig {
            viewport: model.viewport,
            margins: model.margins,
            orientation: model.orientation,
            key_axis: behavior.key_axis.clone(),
            value_axis: behavior.value_axis,
            bar: behavior.bar,
            brush: behavior.brush,
            zoom: behavior.zoom,
            event_delay_ms: u64::try_from(self.core.runtime.trigger.delay().as_millis())
                .unwrap_or(u64::MAX),
            out_of_domain_policy: model.key_scale.out_of_domain_policy(),
        }
    }
}
