use tracing::{debug, trace};

use crate::core::{
    AxisPadding, KeyUnits, Margins, ScaleDomain, ScaleMode, StackingEngine, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{AxisFrame, AxisTick, Renderer};

use super::validation::{
    validate_bar_behavior, validate_continuous_domain, validate_key_axis_config,
};
use super::{BarBehavior, ChartEngine, ChartEvent, KeyAxisConfig};

impl<R: Renderer> ChartEngine<R> {
    /// Derives the key axis domain for the current pass.
    ///
    /// Ordinal axes take the canonical key ordering (every pass when
    /// elastic, otherwise only while the domain is empty). Continuous elastic
    /// axes fit the stacked key extent unless the chart is zoomed. Returns
    /// `true` when the domain differs from the one seen by the previous pass.
    pub(super) fn prepare_secondary_axis(&mut self, initial: bool) -> ChartResult<bool> {
        let elastic = self.core.behavior.key_axis.elastic;
        match self.core.model.key_scale.mode() {
            ScaleMode::Ordinal => {
                if elastic || self.core.model.key_scale.domain().is_empty() {
                    let model = &self.core.model;
                    let ordered = model.stack.ordered_domain(&model.stacked);
                    self.core
                        .model
                        .key_scale
                        .set_domain(ScaleDomain::ordinal(ordered))?;
                }
            }
            ScaleMode::Continuous => {
                if elastic && !self.core.model.interaction.refocused() {
                    if let Some((min, max)) = self.elastic_key_domain() {
                        self.core
                            .model
                            .key_scale
                            .set_domain(ScaleDomain::continuous(min, max))?;
                        self.core
                            .model
                            .interaction
                            .set_original_domain(Some((min.min(max), min.max(max))));
                    }
                }
                if !self.core.model.key_scale.domain().is_set() {
                    return Err(ChartError::DomainNotSet { axis: "key" });
                }
                if self.core.model.interaction.original_domain().is_none() {
                    let domain = self.core.model.key_scale.domain().as_continuous();
                    self.core.model.interaction.set_original_domain(domain);
                }
            }
        }

        let (r0, r1) = self.core.model.key_range();
        self.core.model.key_scale.set_range(r0, r1)?;

        let changed = !self
            .core
            .model
            .key_scale
            .domain()
            .same_as(&self.core.model.last_key_domain);
        if changed || initial {
            self.rescale();
            self.core.model.last_key_domain = self.core.model.key_scale.domain().clone();
        }
        if changed {
            debug!(domain = ?self.core.model.key_scale.domain(), "key axis domain changed");
            self.emit_plugin_event(ChartEvent::DomainChanged { axis: "key" });
        }
        Ok(changed)
    }

    /// Captures the original key domain ahead of the first pass: the elastic
    /// extent of the current layers, or the fixed domain.
    pub(super) fn capture_original_key_domain(&mut self) {
        if self.core.model.interaction.original_domain().is_some() {
            return;
        }
        let captured = if self.core.behavior.key_axis.elastic {
            self.recompute_stacked_layers();
            self.elastic_key_domain()
        } else {
            self.core.model.key_scale.domain().as_continuous()
        };
        if let Some((min, max)) = captured {
            let domain = (min.min(max), min.max(max));
            debug!(domain = ?domain, "captured original key domain");
            self.core.model.interaction.set_original_domain(Some(domain));
        }
    }

    /// Elastic continuous key domain: padded stacked key extent, with the
    /// units' resolution added to the max so the last bar keeps its slot.
    fn elastic_key_domain(&self) -> Option<(f64, f64)> {
        let model = &self.core.model;
        let min = model.stack.key_axis_min(&model.stacked)?;
        let mut max = model.stack.key_axis_max(&model.stacked)?;
        if let Some(resolution) = self.core.behavior.key_axis.units.resolution() {
            max += resolution;
        }
        Some((min, max))
    }

    /// Derives the value axis domain. Returns `true` when it changed.
    pub(super) fn prepare_primary_axis(&mut self) -> ChartResult<bool> {
        let previous = self.core.model.value_scale.domain().as_continuous();
        if self.core.behavior.value_axis.elastic || previous.is_none() {
            let model = &self.core.model;
            let extent = model
                .stack
                .value_axis_min(&model.stacked)
                .zip(model.stack.value_axis_max(&model.stacked));
            match extent {
                Some((min, max)) => {
                    self.core
                        .model
                        .value_scale
                        .set_domain(ScaleDomain::continuous(min, max))?;
                }
                None if previous.is_none() => {
                    return Err(ChartError::DomainNotSet { axis: "value" });
                }
                None => trace!("no stacked values; keeping previous value domain"),
            }
        }

        let (r0, r1) = self.core.model.value_range();
        self.core.model.value_scale.set_range(r0, r1)?;

        let changed = self.core.model.value_scale.domain().as_continuous() != previous;
        if changed {
            debug!(domain = ?self.core.model.value_scale.domain(), "value axis domain changed");
            self.emit_plugin_event(ChartEvent::DomainChanged { axis: "value" });
        }
        Ok(changed)
    }

    /// Drops every cached domain-derived layout value. Idempotent.
    pub fn rescale(&mut self) {
        self.core.runtime.layout.invalidate();
        trace!("layout cache invalidated");
    }

    /// Number of key-axis units in the current key domain.
    pub fn unit_count(&mut self) -> usize {
        if let Some(count) = self.core.runtime.layout.unit_count() {
            return count;
        }
        let count = self
            .core
            .behavior
            .key_axis
            .units
            .count(self.core.model.key_scale.domain());
        self.core.runtime.layout.store_unit_count(count);
        count
    }

    /// Bar thickness along the key axis, never below one display unit.
    pub fn bar_thickness(&mut self) -> f64 {
        if let Some(thickness) = self.core.runtime.layout.bar_thickness() {
            return thickness;
        }
        let unit_count = self.unit_count();
        let thickness = self.core.model.key_scale.band_width(unit_count);
        self.core.runtime.layout.store_bar_thickness(thickness);
        thickness
    }

    /// Fixes the key domain. A continuous domain also becomes the original
    /// domain that zoom resets return to.
    pub fn set_key_domain(&mut self, domain: ScaleDomain) -> ChartResult<()> {
        let config = KeyAxisConfig {
            domain: Some(domain.clone()),
            mode: self.core.model.key_scale.mode(),
            ..self.core.behavior.key_axis.clone()
        };
        validate_key_axis_config(&config)?;

        self.core.model.key_scale.set_domain(domain.clone())?;
        let original = domain.as_continuous();
        self.core.model.interaction.set_original_domain(original);
        self.core.model.interaction.update_refocused(original);
        self.core.behavior.key_axis.domain = Some(domain);
        self.rescale();
        self.emit_plugin_event(ChartEvent::DomainChanged { axis: "key" });
        Ok(())
    }

    pub fn set_value_domain(&mut self, min: f64, max: f64) -> ChartResult<()> {
        validate_continuous_domain(min, max, "value")?;
        self.core
            .model
            .value_scale
            .set_domain(ScaleDomain::continuous(min, max))?;
        self.core.behavior.value_axis.domain = Some((min.min(max), min.max(max)));
        self.rescale();
        self.emit_plugin_event(ChartEvent::DomainChanged { axis: "value" });
        Ok(())
    }

    /// Switches the key axis between continuous and ordinal. The domain is
    /// dropped and rebuilt by the next pass.
    pub fn set_key_mode(&mut self, mode: ScaleMode) {
        if self.core.model.key_scale.mode() == mode {
            return;
        }
        self.core.model.key_scale.set_mode(mode);
        self.core.behavior.key_axis.mode = mode;
        self.core.behavior.key_axis.domain = None;
        if mode == ScaleMode::Ordinal {
            self.core.behavior.key_axis.units = KeyUnits::Ordinal;
        }
        self.core.model.interaction.set_original_domain(None);
        self.core.model.interaction.update_refocused(None);
        self.rescale();
    }

    pub fn set_key_elastic(&mut self, elastic: bool) {
        self.core.behavior.key_axis.elastic = elastic;
    }

    pub fn set_value_elastic(&mut self, elastic: bool) {
        self.core.behavior.value_axis.elastic = elastic;
    }

    pub fn set_key_units(&mut self, units: KeyUnits) {
        self.core.behavior.key_axis.units = units;
        self.rescale();
    }

    pub fn set_key_padding(&mut self, padding: AxisPadding) -> ChartResult<()> {
        self.core.model.stack.set_key_padding(padding)?;
        self.core.behavior.key_axis.padding = padding;
        Ok(())
    }

    pub fn set_value_padding(&mut self, padding: AxisPadding) -> ChartResult<()> {
        self.core.model.stack.set_value_padding(padding)?;
        self.core.behavior.value_axis.padding = padding;
        Ok(())
    }

    pub fn set_bar_behavior(&mut self, bar: BarBehavior) -> ChartResult<()> {
        validate_bar_behavior(bar)?;
        self.core
            .model
            .key_scale
            .set_padding(bar.gap_px, bar.outer_padding_px)?;
        self.core.behavior.bar = bar;
        self.rescale();
        Ok(())
    }

    /// Resizes the chart. The next pass re-emits both axes.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.core.model.viewport = viewport;
        self.apply_geometry()
    }

    pub fn set_margins(&mut self, margins: Margins) -> ChartResult<()> {
        if ![margins.top, margins.right, margins.bottom, margins.left]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
        {
            return Err(ChartError::InvalidData(
                "chart margins must be finite and >= 0".to_owned(),
            ));
        }
        self.core.model.margins = margins;
        self.apply_geometry()
    }

    pub(super) fn apply_geometry(&mut self) -> ChartResult<()> {
        let (key_r0, key_r1) = self.core.model.key_range();
        self.core.model.key_scale.set_range(key_r0, key_r1)?;
        let (value_r0, value_r1) = self.core.model.value_range();
        self.core.model.value_scale.set_range(value_r0, value_r1)?;
        self.core.runtime.resizing = true;
        self.rescale();
        debug!(
            width = self.core.model.viewport.width,
            height = self.core.model.viewport.height,
            "chart geometry changed"
        );
        Ok(())
    }

    /// Tick metadata for the key axis; `None` before a domain exists.
    #[must_use]
    pub fn key_axis_frame(&self) -> Option<AxisFrame> {
        let scale = &self.core.model.key_scale;
        if !scale.domain().is_set() {
            return None;
        }
        let half_band = if scale.is_ordinal() {
            scale.ordinal_band_width() / 2.0
        } else {
            0.0
        };
        let ticks = scale
            .ticks(self.core.behavior.key_axis.tick_count)
            .into_iter()
            .filter_map(|value| {
                let position = scale.map(&value).ok()? + half_band;
                Some(AxisTick { value, position })
            })
            .collect();
        Some(AxisFrame {
            domain: scale.domain().clone(),
            range: scale.range(),
            ticks,
        })
    }

    /// Tick metadata for the value axis; `None` before a domain exists.
    #[must_use]
    pub fn value_axis_frame(&self) -> Option<AxisFrame> {
        let scale = &self.core.model.value_scale;
        if !scale.domain().is_set() {
            return None;
        }
        let ticks = scale
            .ticks(self.core.behavior.value_axis.tick_count)
            .into_iter()
            .filter_map(|value| {
                let position = scale.map(&value).ok()?;
                Some(AxisTick { value, position })
            })
            .collect();
        Some(AxisFrame {
            domain: scale.domain().clone(),
            range: scale.range(),
            ticks,
        })
    }

    /// Raw key extent of the last computed layers, before padding.
    #[must_use]
    pub fn stacked_key_extent(&self) -> Option<(f64, f64)> {
        StackingEngine::key_extent(&self.core.model.stacked)
    }

    /// Raw value extent of the last computed layers, before padding.
    #[must_use]
    pub fn stacked_value_extent(&self) -> Option<(f64, f64)> {
        StackingEngine::value_extent(&self.core.model.stacked)
    }
}
