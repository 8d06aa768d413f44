use std::time::Instant;

use tracing::{debug, trace};

use crate::core::{Filter, ScaleMode, StackedLayer};
use crate::error::{ChartError, ChartResult};
use crate::interaction::BrushExtent;
use crate::render::{Highlight, Renderer};

use super::chart_runtime::{LinkSignals, PendingAction};
use super::{BrushBehavior, ChartEngine, ChartEvent, RoundFn};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn brush_behavior(&self) -> BrushBehavior {
        self.core.behavior.brush
    }

    pub fn set_brush_behavior(&mut self, brush: BrushBehavior) {
        self.core.behavior.brush = brush;
        if !brush.enabled {
            self.core.model.interaction.set_brush_extent(None);
        }
    }

    /// Rounding applied to both ends of every brush extent.
    pub fn set_round(&mut self, round: Option<RoundFn>) {
        self.core.behavior.round = round;
    }

    pub fn brush_start(&mut self) -> ChartResult<()> {
        self.ensure_brushable()?;
        self.core.model.interaction.on_brush_start();
        debug!("brush started");
        self.emit_plugin_event(ChartEvent::BrushStarted);
        Ok(())
    }

    /// Applies an intermediate brush extent in key-domain units.
    ///
    /// The (rounded) extent becomes this chart's range filter immediately; an
    /// empty or inverted extent clears the filter. Pushing the filter to the
    /// dimension and the redraw are debounced: both run once the event delay
    /// has passed without a newer update (see [`ChartEngine::fire_due_events`]).
    pub fn brush_update(&mut self, start: f64, end: f64, now: Instant) -> ChartResult<()> {
        self.ensure_brushable()?;
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidData(
                "brush extent must be finite".to_owned(),
            ));
        }

        self.core.model.interaction.on_brush_start();
        let mut extent = BrushExtent::new(start, end);
        if let Some(round) = &self.core.behavior.round {
            extent = extent.rounded(|value| round(value));
        }
        self.core.model.interaction.set_brush_extent(Some(extent));

        let filter = if extent.is_empty() {
            None
        } else {
            Some(Filter::range(extent.start, extent.end))
        };
        self.store_filter(filter);

        let superseded = self.schedule_pending(now);
        trace!(
            start = extent.start,
            end = extent.end,
            superseded,
            "brush update scheduled filter"
        );
        Ok(())
    }

    /// Brush update from display positions along the key axis.
    pub fn brush_update_pixels(&mut self, start_px: f64, end_px: f64, now: Instant) -> ChartResult<()> {
        self.ensure_brushable()?;
        let scale = &self.core.model.key_scale;
        let start = scale.invert(start_px)?;
        let end = scale.invert(end_px)?;
        self.brush_update(start, end, now)
    }

    pub fn brush_end(&mut self) {
        self.core.model.interaction.on_brush_end();
        debug!(filter = ?self.core.model.filter, "brush ended");
        self.emit_plugin_event(ChartEvent::BrushEnded);
    }

    #[must_use]
    pub fn filter(&self) -> Option<&Filter> {
        self.core.model.filter.as_ref()
    }

    #[must_use]
    pub fn has_filter(&self) -> bool {
        self.core.model.filter.is_some()
    }

    /// Replaces (`Some`) or clears (`None`) the chart filter and aligns the
    /// brush display with it. Does not redraw.
    pub fn replace_filter(&mut self, filter: Option<Filter>) {
        self.align_brush_with(filter.as_ref());
        self.apply_filter(filter);
    }

    /// Like [`ChartEngine::replace_filter`], but leaves the dimension
    /// untouched until the pending action fires.
    pub(super) fn stage_filter(&mut self, filter: Option<Filter>) {
        self.align_brush_with(filter.as_ref());
        self.store_filter(filter);
    }

    /// Clears the chart filter.
    pub fn filter_all(&mut self) {
        self.replace_filter(None);
    }

    /// Runs the pending debounced action if its delay has elapsed.
    ///
    /// Returns `true` when it ran.
    pub fn fire_due_events(&mut self, now: Instant) -> ChartResult<bool> {
        if !self.settle_due_action(now) {
            return Ok(false);
        }
        debug!("debounced redraw fired");
        self.redraw()?;
        Ok(true)
    }

    /// Runs the pending debounced action regardless of its delay.
    pub fn flush_events(&mut self) -> ChartResult<bool> {
        if !self.settle_pending_action() {
            return Ok(false);
        }
        debug!("debounced redraw flushed");
        self.redraw()?;
        Ok(true)
    }

    #[must_use]
    pub fn has_pending_event(&self) -> bool {
        self.core.runtime.trigger.is_pending()
    }

    #[must_use]
    pub fn pending_event_deadline(&self) -> Option<Instant> {
        self.core.runtime.trigger.deadline()
    }

    /// Schedules the filter push and redraw. Returns `true` when a pending
    /// action was superseded.
    pub(super) fn schedule_pending(&mut self, now: Instant) -> bool {
        self.core
            .runtime
            .trigger
            .schedule(now, PendingAction::ApplyFilter)
    }

    /// Takes the due action and settles everything but the redraw, which is
    /// left to the caller. Returns `true` when an action was taken.
    pub(super) fn settle_due_action(&mut self, now: Instant) -> bool {
        let action = self.core.runtime.trigger.take_due(now);
        self.settle(action)
    }

    pub(super) fn settle_pending_action(&mut self) -> bool {
        let action = self.core.runtime.trigger.flush();
        self.settle(action)
    }

    fn settle(&mut self, action: Option<PendingAction>) -> bool {
        match action {
            Some(PendingAction::ApplyFilter) => {
                self.push_dimension_filter();
                true
            }
            None => false,
        }
    }

    /// Shows `extent` as the brush without touching the filter.
    pub(super) fn set_brush_display(&mut self, extent: Option<BrushExtent>) {
        if self.core.behavior.brush.enabled {
            self.core.model.interaction.set_brush_extent(extent);
        }
    }

    pub(super) fn take_link_signals(&mut self) -> LinkSignals {
        std::mem::take(&mut self.core.runtime.link_signals)
    }

    /// Stores `filter` and pushes it to the dimension. Returns `true` when
    /// it differs from the active one.
    fn apply_filter(&mut self, filter: Option<Filter>) -> bool {
        let changed = self.store_filter(filter);
        self.push_dimension_filter();
        changed
    }

    /// Stores `filter` on the chart only. Returns `true` when it differs
    /// from the active one.
    fn store_filter(&mut self, filter: Option<Filter>) -> bool {
        if self.core.model.filter == filter {
            return false;
        }
        self.core.model.filter = filter.clone();
        self.core.runtime.link_signals.filter_changed = true;
        debug!(filter = ?filter, "chart filter replaced");
        self.emit_plugin_event(ChartEvent::FilterChanged { filter });
        true
    }

    /// Brings the dimension's filter in line with the chart filter.
    fn push_dimension_filter(&self) {
        let Some(dimension) = &self.core.model.dimension else {
            trace!("chart has no dimension; filter kept locally");
            return;
        };
        if dimension.filter() != self.core.model.filter {
            dimension.set_filter(self.core.model.filter.clone());
        }
    }

    fn align_brush_with(&mut self, filter: Option<&Filter>) {
        if self.core.behavior.brush.enabled {
            let extent = filter
                .and_then(Filter::as_range)
                .map(|(start, end)| BrushExtent::new(start, end));
            self.core.model.interaction.set_brush_extent(extent);
        }
    }

    /// Selection state of every point of `layers` under the active filter.
    pub(super) fn classify_highlights(&self, layers: &[StackedLayer]) -> Vec<Vec<Highlight>> {
        let active = self
            .core
            .model
            .filter
            .as_ref()
            .filter(|_| self.core.behavior.brush.fade_deselected);
        layers
            .iter()
            .map(|layer| {
                layer
                    .points
                    .iter()
                    .map(|point| match active {
                        None => Highlight::Neutral,
                        Some(filter) if filter.contains(&point.key) => Highlight::Selected,
                        Some(_) => Highlight::Deselected,
                    })
                    .collect()
            })
            .collect()
    }

    fn ensure_brushable(&self) -> ChartResult<()> {
        if !self.core.behavior.brush.enabled {
            return Err(ChartError::InvalidData("brush is disabled".to_owned()));
        }
        if self.core.model.key_scale.mode() == ScaleMode::Ordinal {
            return Err(ChartError::InvalidData(
                "brushing requires a continuous key axis".to_owned(),
            ));
        }
        Ok(())
    }
}
