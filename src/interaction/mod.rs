mod debounce;

pub use debounce::EventTrigger;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Brushing,
    Zooming,
}

/// Brush selection in key-axis domain units.
///
/// `end <= start` is the empty (unfiltered) selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushExtent {
    pub start: f64,
    pub end: f64,
}

impl BrushExtent {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.end > self.start)
    }

    #[must_use]
    pub fn rounded(self, round: impl Fn(f64) -> f64) -> Self {
        Self {
            start: round(self.start),
            end: round(self.end),
        }
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.start, self.end)
    }
}

/// Zoom bookkeeping for the key axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ZoomState {
    /// Domain before any zoom, used for resets and zoom-out restriction.
    pub original_domain: Option<(f64, f64)>,
    /// `true` while the current domain differs from `original_domain`.
    pub refocused: bool,
}

/// Public brush/zoom state exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    brush: Option<BrushExtent>,
    zoom: ZoomState,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    /// Brush selection currently displayed, if any.
    #[must_use]
    pub fn brush_extent(self) -> Option<BrushExtent> {
        self.brush
    }

    pub fn set_brush_extent(&mut self, extent: Option<BrushExtent>) {
        self.brush = extent.filter(|extent| !extent.is_empty());
    }

    #[must_use]
    pub fn zoom(self) -> ZoomState {
        self.zoom
    }

    #[must_use]
    pub fn refocused(self) -> bool {
        self.zoom.refocused
    }

    #[must_use]
    pub fn original_domain(self) -> Option<(f64, f64)> {
        self.zoom.original_domain
    }

    pub fn set_original_domain(&mut self, domain: Option<(f64, f64)>) {
        self.zoom.original_domain = domain;
    }

    /// Recomputes `refocused` against the original domain.
    pub fn update_refocused(&mut self, current: Option<(f64, f64)>) {
        self.zoom.refocused = match (current, self.zoom.original_domain) {
            (Some(current), Some(original)) => current != original,
            _ => false,
        };
    }

    pub fn on_brush_start(&mut self) {
        self.mode = InteractionMode::Brushing;
    }

    pub fn on_brush_end(&mut self) {
        if self.mode == InteractionMode::Brushing {
            self.mode = InteractionMode::Idle;
        }
    }

    pub fn on_zoom_start(&mut self) {
        self.mode = InteractionMode::Zooming;
    }

    pub fn on_zoom_end(&mut self) {
        if self.mode == InteractionMode::Zooming {
            self.mode = InteractionMode::Idle;
        }
    }
}
