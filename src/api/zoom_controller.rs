use tracing::{debug, trace};

use crate::core::{Filter, ScaleDomain, ScaleMode};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::chart_runtime::ZoomRedraw;
use super::validation::{validate_zoom_behavior, validate_zoom_input};
use super::{ChartEngine, ChartEvent, ZoomBehavior};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn zoom_behavior(&self) -> ZoomBehavior {
        self.core.behavior.zoom
    }

    pub fn set_zoom_behavior(&mut self, zoom: ZoomBehavior) -> ChartResult<()> {
        validate_zoom_behavior(zoom)?;
        self.core.behavior.zoom = zoom;
        Ok(())
    }

    /// Zooms the key axis around `anchor` (domain units).
    ///
    /// `factor > 1` zooms in. Returns `false` when mouse zoom is disabled.
    pub fn zoom_by(&mut self, factor: f64, anchor: f64) -> ChartResult<bool> {
        validate_zoom_input(factor, anchor)?;
        if !self.core.behavior.zoom.mouse_zoomable {
            trace!("ignoring zoom gesture; mouse zoom disabled");
            return Ok(false);
        }
        let (start, end) = self.continuous_key_domain()?;
        let span = end - start;
        let ratio = if span > 0.0 {
            (anchor - start) / span
        } else {
            0.5
        };
        let target_span = span / factor;
        let target_start = anchor - ratio * target_span;

        self.core.model.interaction.on_zoom_start();
        let result = self.apply_zoom_domain(
            target_start,
            target_start + target_span,
            ZoomRedraw::Immediate,
        );
        self.core.model.interaction.on_zoom_end();
        result.map(|()| true)
    }

    /// Shifts the key domain by `delta` domain units.
    ///
    /// Returns `false` when mouse zoom is disabled.
    pub fn pan_by(&mut self, delta: f64) -> ChartResult<bool> {
        if !delta.is_finite() {
            return Err(ChartError::InvalidData("pan delta must be finite".to_owned()));
        }
        if !self.core.behavior.zoom.mouse_zoomable {
            trace!("ignoring pan gesture; mouse zoom disabled");
            return Ok(false);
        }
        let (start, end) = self.continuous_key_domain()?;

        self.core.model.interaction.on_zoom_start();
        let result = self.apply_zoom_domain(start + delta, end + delta, ZoomRedraw::Immediate);
        self.core.model.interaction.on_zoom_end();
        result.map(|()| true)
    }

    /// Snaps the key domain to `range`, or back to the original domain for
    /// `None`, then runs the zoom pass (constraints, filter, redraw).
    pub fn focus(&mut self, range: Option<(f64, f64)>) -> ChartResult<()> {
        self.focus_with(range, ZoomRedraw::Immediate)
    }

    pub(super) fn focus_with(
        &mut self,
        range: Option<(f64, f64)>,
        redraw: ZoomRedraw,
    ) -> ChartResult<()> {
        if self.core.model.key_scale.mode() == ScaleMode::Ordinal {
            return Err(ChartError::InvalidData(
                "focus requires a continuous key axis".to_owned(),
            ));
        }
        let (start, end) = match range {
            Some((start, end)) => {
                if !start.is_finite() || !end.is_finite() {
                    return Err(ChartError::InvalidData(
                        "focus range must be finite".to_owned(),
                    ));
                }
                // refocusing needs a domain to differ from
                self.capture_original_key_domain();
                (start.min(end), start.max(end))
            }
            None => self
                .core
                .model
                .interaction
                .original_domain()
                .ok_or(ChartError::DomainNotSet { axis: "key" })?,
        };
        debug!(start, end, reset = range.is_none(), "focusing key axis");
        self.apply_zoom_domain(start, end, redraw)
    }

    /// Restores the original key domain.
    pub fn reset_zoom(&mut self) -> ChartResult<()> {
        self.focus(None)
    }

    /// `true` while the key domain differs from the original domain.
    #[must_use]
    pub fn is_refocused(&self) -> bool {
        self.core.model.interaction.refocused()
    }

    #[must_use]
    pub fn original_key_domain(&self) -> Option<(f64, f64)> {
        self.core.model.interaction.original_domain()
    }

    pub(super) fn set_range_constraint(&mut self, constraint: Option<(f64, f64)>) {
        self.core.behavior.range_constraint = constraint;
    }

    fn apply_zoom_domain(&mut self, start: f64, end: f64, redraw: ZoomRedraw) -> ChartResult<()> {
        self.core
            .model
            .key_scale
            .set_domain(ScaleDomain::continuous(start, end))?;
        self.handle_zoom(redraw)
    }

    /// Constrains the freshly set domain and replaces the filter with a range
    /// filter matching it (cleared when back at the original domain).
    /// `redraw` decides when the filter reaches the dimension and when the
    /// chart redraws.
    fn handle_zoom(&mut self, redraw: ZoomRedraw) -> ChartResult<()> {
        let (mut start, mut end) = self.continuous_key_domain()?;
        let original = self.core.model.interaction.original_domain();

        if let Some(original) = original {
            (start, end) = apply_scale_extent((start, end), original, self.core.behavior.zoom);
        }
        if self.core.behavior.zoom.zoom_out_restrict {
            if let Some(constraint) = zoom_constraint(original, self.core.behavior.range_constraint)
            {
                (start, end) = constrain((start, end), constraint);
            }
        }

        self.core
            .model
            .key_scale
            .set_domain(ScaleDomain::continuous(start, end))?;
        self.rescale();
        self.core
            .model
            .interaction
            .update_refocused(Some((start, end)));
        let refocused = self.core.model.interaction.refocused();

        let filter = refocused.then(|| Filter::range(start, end));
        match redraw {
            ZoomRedraw::Debounced(_) => self.stage_filter(filter),
            ZoomRedraw::Immediate | ZoomRedraw::Deferred => self.replace_filter(filter),
        }
        self.core.runtime.link_signals.zoomed = true;

        debug!(start, end, refocused, "key axis zoomed");
        self.emit_plugin_event(ChartEvent::Zoomed {
            start,
            end,
            refocused,
        });

        match redraw {
            ZoomRedraw::Immediate if self.core.runtime.rendered => self.redraw()?,
            ZoomRedraw::Debounced(now) => {
                let superseded = self.schedule_pending(now);
                trace!(superseded, "zoom pass scheduled redraw");
            }
            ZoomRedraw::Immediate | ZoomRedraw::Deferred => {}
        }
        Ok(())
    }

    fn continuous_key_domain(&self) -> ChartResult<(f64, f64)> {
        match self.core.model.key_scale.domain() {
            ScaleDomain::Unset => Err(ChartError::DomainNotSet { axis: "key" }),
            ScaleDomain::Continuous { min, max } => Ok((*min, *max)),
            ScaleDomain::Ordinal(_) => Err(ChartError::InvalidData(
                "zoom requires a continuous key axis".to_owned(),
            )),
        }
    }
}

/// Intersection of the original domain and the range chart's domain.
fn zoom_constraint(
    original: Option<(f64, f64)>,
    range_chart: Option<(f64, f64)>,
) -> Option<(f64, f64)> {
    match (original, range_chart) {
        (Some(original), Some(range_chart)) => {
            let start = original.0.max(range_chart.0);
            let end = original.1.min(range_chart.1);
            if end >= start {
                Some((start, end))
            } else {
                Some(original)
            }
        }
        (Some(bounds), None) | (None, Some(bounds)) => Some(bounds),
        (None, None) => None,
    }
}

/// Clips `domain` into `constraint`. A domain left empty by the clip falls
/// back to the whole constraint.
fn constrain(domain: (f64, f64), constraint: (f64, f64)) -> (f64, f64) {
    let start = domain.0.max(constraint.0);
    let end = domain.1.min(constraint.1);
    if end > start {
        (start, end)
    } else {
        constraint
    }
}

/// Keeps the span within `[original / max_zoom, original / min_zoom]`,
/// resizing around the domain center.
fn apply_scale_extent(domain: (f64, f64), original: (f64, f64), zoom: ZoomBehavior) -> (f64, f64) {
    let original_span = original.1 - original.0;
    if original_span <= 0.0 {
        return domain;
    }
    let span = domain.1 - domain.0;
    let mut target_span = span;
    if let Some(max_zoom) = zoom.max_zoom {
        target_span = target_span.max(original_span / max_zoom);
    }
    if let Some(min_zoom) = zoom.min_zoom {
        target_span = target_span.min(original_span / min_zoom);
    }
    if target_span == span {
        return domain;
    }
    let center = (domain.0 + domain.1) / 2.0;
    (center - target_span / 2.0, center + target_span / 2.0)
}
