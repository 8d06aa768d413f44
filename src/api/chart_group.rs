use std::time::Instant;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::Filter;
use crate::error::{ChartError, ChartResult};
use crate::interaction::BrushExtent;
use crate::render::Renderer;

use super::chart_runtime::ZoomRedraw;
use super::{ChartEngine, ChartId};

/// Upper bound on link propagation rounds for one change.
const MAX_LINK_ROUNDS: usize = 8;

/// Charts that share filters and redraw together, with optional
/// range/focus links.
///
/// Linking is one-way: a change of the range chart's filter refocuses its
/// focus charts; a focus chart's zoom only re-aligns the range chart's brush.
/// Every mutation goes through the group so link propagation stays ordered.
pub struct ChartGroup<R: Renderer> {
    charts: IndexMap<ChartId, ChartEngine<R>>,
    /// focus chart -> range chart
    range_links: IndexMap<ChartId, ChartId>,
    next_id: u32,
}

impl<R: Renderer> Default for ChartGroup<R> {
    fn default() -> Self {
        Self {
            charts: IndexMap::new(),
            range_links: IndexMap::new(),
            next_id: 0,
        }
    }
}

impl<R: Renderer> ChartGroup<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chart(&mut self, chart: ChartEngine<R>) -> ChartId {
        let id = ChartId(self.next_id);
        self.next_id += 1;
        self.charts.insert(id, chart);
        debug!(chart = %id, count = self.charts.len(), "registered chart");
        id
    }

    /// Removes a chart and every link it takes part in.
    pub fn remove_chart(&mut self, id: ChartId) -> ChartResult<ChartEngine<R>> {
        let chart = self
            .charts
            .shift_remove(&id)
            .ok_or(ChartError::UnknownChart(id))?;
        let orphaned: Vec<ChartId> = self
            .range_links
            .iter()
            .filter(|(_, range)| **range == id)
            .map(|(focus, _)| *focus)
            .collect();
        self.range_links
            .retain(|focus, range| *focus != id && *range != id);
        for focus in orphaned {
            if let Some(chart) = self.charts.get_mut(&focus) {
                chart.set_range_constraint(None);
            }
        }
        Ok(chart)
    }

    pub fn chart(&self, id: ChartId) -> ChartResult<&ChartEngine<R>> {
        self.charts.get(&id).ok_or(ChartError::UnknownChart(id))
    }

    /// Direct access to a chart. Changes made this way are not propagated
    /// to linked charts until the next group operation.
    pub fn chart_mut(&mut self, id: ChartId) -> ChartResult<&mut ChartEngine<R>> {
        self.charts.get_mut(&id).ok_or(ChartError::UnknownChart(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ChartId> + '_ {
        self.charts.keys().copied()
    }

    /// Makes `range` the range chart of `focus`, replacing any previous one.
    pub fn set_range_chart(&mut self, focus: ChartId, range: ChartId) -> ChartResult<()> {
        if focus == range {
            return Err(ChartError::InvalidLink(format!(
                "{focus} cannot be its own range chart"
            )));
        }
        self.chart(focus)?;
        self.chart(range)?;
        if let Some(previous) = self.range_links.insert(focus, range) {
            debug!(focus = %focus, previous = %previous, range = %range, "replaced range chart");
        } else {
            debug!(focus = %focus, range = %range, "linked range chart");
        }
        self.sync_range_constraint(focus)
    }

    /// Unlinks `focus` from its range chart, returning the old range chart.
    pub fn clear_range_chart(&mut self, focus: ChartId) -> Option<ChartId> {
        let previous = self.range_links.shift_remove(&focus)?;
        if let Some(chart) = self.charts.get_mut(&focus) {
            chart.set_range_constraint(None);
        }
        Some(previous)
    }

    #[must_use]
    pub fn range_chart_of(&self, focus: ChartId) -> Option<ChartId> {
        self.range_links.get(&focus).copied()
    }

    #[must_use]
    pub fn focus_charts_of(&self, range: ChartId) -> Vec<ChartId> {
        self.range_links
            .iter()
            .filter(|(_, linked)| **linked == range)
            .map(|(focus, _)| *focus)
            .collect()
    }

    pub fn brush_start(&mut self, id: ChartId) -> ChartResult<()> {
        self.chart_mut(id)?.brush_start()
    }

    /// Brush update on `id`. Linked focus charts take the new domain
    /// immediately; filter pushes and the group-wide redraw are debounced.
    pub fn brush_update(
        &mut self,
        id: ChartId,
        start: f64,
        end: f64,
        now: Instant,
    ) -> ChartResult<()> {
        self.chart_mut(id)?.brush_update(start, end, now)?;
        self.propagate_links(ZoomRedraw::Debounced(now))
    }

    pub fn brush_end(&mut self, id: ChartId) -> ChartResult<()> {
        self.chart_mut(id)?.brush_end();
        Ok(())
    }

    /// Replaces a chart's filter, propagates links and redraws every chart.
    pub fn replace_filter(&mut self, id: ChartId, filter: Option<Filter>) -> ChartResult<()> {
        self.chart_mut(id)?.replace_filter(filter);
        self.propagate_links(ZoomRedraw::Deferred)?;
        self.redraw_all()
    }

    /// Clears every chart's filter and redraws the group.
    pub fn filter_all(&mut self) -> ChartResult<()> {
        for chart in self.charts.values_mut() {
            chart.filter_all();
        }
        self.propagate_links(ZoomRedraw::Deferred)?;
        self.redraw_all()
    }

    pub fn zoom_by(&mut self, id: ChartId, factor: f64, anchor: f64) -> ChartResult<bool> {
        self.sync_range_constraint(id)?;
        let zoomed = self.chart_mut(id)?.zoom_by(factor, anchor)?;
        self.propagate_links(ZoomRedraw::Immediate)?;
        Ok(zoomed)
    }

    pub fn pan_by(&mut self, id: ChartId, delta: f64) -> ChartResult<bool> {
        self.sync_range_constraint(id)?;
        let panned = self.chart_mut(id)?.pan_by(delta)?;
        self.propagate_links(ZoomRedraw::Immediate)?;
        Ok(panned)
    }

    pub fn focus(&mut self, id: ChartId, range: Option<(f64, f64)>) -> ChartResult<()> {
        self.sync_range_constraint(id)?;
        self.chart_mut(id)?.focus(range)?;
        self.propagate_links(ZoomRedraw::Immediate)
    }

    /// Fires due debounced triggers. Any fired trigger redraws the whole
    /// group once.
    pub fn fire_due_events(&mut self, now: Instant) -> ChartResult<bool> {
        let mut fired = false;
        for chart in self.charts.values_mut() {
            fired |= chart.settle_due_action(now);
        }
        if fired {
            self.redraw_all()?;
        }
        Ok(fired)
    }

    /// Fires every pending trigger regardless of its delay.
    pub fn flush_events(&mut self) -> ChartResult<bool> {
        let mut fired = false;
        for chart in self.charts.values_mut() {
            fired |= chart.settle_pending_action();
        }
        if fired {
            self.redraw_all()?;
        }
        Ok(fired)
    }

    pub fn render_all(&mut self) -> ChartResult<()> {
        for chart in self.charts.values_mut() {
            chart.render()?;
        }
        Ok(())
    }

    /// Redraws every chart; charts never rendered get a full render.
    pub fn redraw_all(&mut self) -> ChartResult<()> {
        for chart in self.charts.values_mut() {
            chart.redraw()?;
        }
        Ok(())
    }

    /// Settles link signals; `redraw` applies to refocused focus charts.
    fn propagate_links(&mut self, redraw: ZoomRedraw) -> ChartResult<()> {
        for _ in 0..MAX_LINK_ROUNDS {
            let signaled: Vec<_> = self
                .charts
                .iter_mut()
                .map(|(id, chart)| (*id, chart.take_link_signals()))
                .filter(|(_, signals)| !signals.is_empty())
                .collect();
            if signaled.is_empty() {
                return Ok(());
            }

            for (id, signals) in signaled {
                if signals.filter_changed {
                    for focus in self.focus_charts_of(id) {
                        self.refocus_from_range(focus, id, redraw)?;
                    }
                }
                if signals.zoomed {
                    if let Some(range) = self.range_chart_of(id) {
                        self.align_range_brush(range, id)?;
                    }
                }
            }
        }
        warn!(rounds = MAX_LINK_ROUNDS, "chart link propagation did not settle");
        Ok(())
    }

    fn refocus_from_range(
        &mut self,
        focus: ChartId,
        range: ChartId,
        redraw: ZoomRedraw,
    ) -> ChartResult<()> {
        self.sync_range_constraint(focus)?;
        let range_filter = self.chart(range)?.filter().cloned();
        let focus_chart = self.chart_mut(focus)?;
        if focus_chart.filter() == range_filter.as_ref() {
            trace!(focus = %focus, range = %range, "focus chart already matches range filter");
            return Ok(());
        }
        let target = range_filter.as_ref().and_then(Filter::as_range);
        debug!(focus = %focus, range = %range, target = ?target, "refocusing from range chart");
        focus_chart.focus_with(target, redraw)
    }

    fn align_range_brush(&mut self, range: ChartId, focus: ChartId) -> ChartResult<()> {
        let focus_chart = self.chart(focus)?;
        let extent = if focus_chart.is_refocused() {
            focus_chart
                .key_domain()
                .as_continuous()
                .map(|(start, end)| BrushExtent::new(start, end))
        } else {
            None
        };
        self.chart_mut(range)?.set_brush_display(extent);
        Ok(())
    }

    fn sync_range_constraint(&mut self, focus: ChartId) -> ChartResult<()> {
        let constraint = match self.range_chart_of(focus) {
            Some(range) => self.chart(range)?.key_domain().as_continuous(),
            None => None,
        };
        self.chart_mut(focus)?.set_range_constraint(constraint);
        Ok(())
    }
}
