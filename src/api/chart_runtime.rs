use std::time::Instant;

use crate::extensions::ChartPlugin;
use crate::interaction::EventTrigger;

use super::layout_cache::LayoutCache;

/// Deferred work scheduled by brush gestures and linked refocusing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PendingAction {
    /// Pushes the chart filter to its dimension, then redraws.
    ApplyFilter,
}

/// When a zoom pass redraws the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ZoomRedraw {
    /// Filter push and redraw happen within the pass.
    Immediate,
    /// Filter push and redraw are scheduled on the event trigger.
    Debounced(Instant),
    /// Filter is pushed; the caller redraws.
    Deferred,
}

/// Changes a [`super::ChartGroup`] propagates to linked charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct LinkSignals {
    pub(super) filter_changed: bool,
    pub(super) zoomed: bool,
}

impl LinkSignals {
    #[must_use]
    pub(super) fn is_empty(self) -> bool {
        !self.filter_changed && !self.zoomed
    }
}

/// Runtime orchestration state grouped separately from model/behavior.
pub(super) struct ChartRuntimeState {
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    pub(super) trigger: EventTrigger<PendingAction>,
    pub(super) layout: LayoutCache,
    pub(super) rendered: bool,
    pub(super) resizing: bool,
    pub(super) link_signals: LinkSignals,
}
