use serde::{Deserialize, Serialize};

use crate::core::{AxisPadding, KeyUnits, Margins, Orientation, OutOfDomainPolicy, ScaleDomain, ScaleMode, Viewport};
use crate::error::{ChartError, ChartResult};

/// Delay used to coalesce brush updates into one downstream redraw.
pub const DEFAULT_EVENT_DELAY_MS: u64 = 40;

/// Key (category/time) axis setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyAxisConfig {
    #[serde(default)]
    pub mode: ScaleMode,
    /// Recompute the domain from data on every render.
    #[serde(default)]
    pub elastic: bool,
    #[serde(default)]
    pub padding: AxisPadding,
    #[serde(default)]
    pub units: KeyUnits,
    /// Explicit domain; also the original domain zoom resets to.
    #[serde(default)]
    pub domain: Option<ScaleDomain>,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
}

impl Default for KeyAxisConfig {
    fn default() -> Self {
        Self {
            mode: ScaleMode::Continuous,
            elastic: false,
            padding: AxisPadding::default(),
            units: KeyUnits::default(),
            domain: None,
            tick_count: default_tick_count(),
        }
    }
}

/// Value axis setup. The value axis is always continuous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAxisConfig {
    #[serde(default)]
    pub elastic: bool,
    #[serde(default)]
    pub padding: AxisPadding,
    #[serde(default)]
    pub domain: Option<(f64, f64)>,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
}

impl Default for ValueAxisConfig {
    fn default() -> Self {
        Self {
            elastic: false,
            padding: AxisPadding::default(),
            domain: None,
            tick_count: default_tick_count(),
        }
    }
}

/// Bar thickness inputs, in display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarBehavior {
    pub gap_px: f64,
    pub outer_padding_px: f64,
    pub center_bar: bool,
}

impl Default for BarBehavior {
    fn default() -> Self {
        Self {
            gap_px: 2.0,
            outer_padding_px: 0.0,
            center_bar: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushBehavior {
    pub enabled: bool,
    /// Classify points as selected/deselected while a filter is active.
    pub fade_deselected: bool,
}

impl Default for BrushBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            fade_deselected: true,
        }
    }
}

/// Zoom gesture policy.
///
/// `min_zoom`/`max_zoom` bound the zoom factor relative to the original
/// domain: the visible span stays within
/// `[original_span / max_zoom, original_span / min_zoom]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBehavior {
    pub mouse_zoomable: bool,
    /// Keep the domain inside the original domain (and the range chart's domain).
    pub zoom_out_restrict: bool,
    #[serde(default)]
    pub min_zoom: Option<f64>,
    #[serde(default)]
    pub max_zoom: Option<f64>,
}

impl Default for ZoomBehavior {
    fn default() -> Self {
        Self {
            mouse_zoomable: false,
            zoom_out_restrict: true,
            min_zoom: None,
            max_zoom: None,
        }
    }
}

/// Public chart bootstrap configuration.
///
/// Serializable so host applications can persist/load chart setup. Accessor
/// functions are installed on the engine separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub key_axis: KeyAxisConfig,
    #[serde(default)]
    pub value_axis: ValueAxisConfig,
    #[serde(default)]
    pub bar: BarBehavior,
    #[serde(default)]
    pub brush: BrushBehavior,
    #[serde(default)]
    pub zoom: ZoomBehavior,
    #[serde(default = "default_event_delay_ms")]
    pub event_delay_ms: u64,
    #[serde(default)]
    pub out_of_domain_policy: OutOfDomainPolicy,
}

impl ChartConfig {
    /// Creates a config with default axes and behaviors.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margins: Margins::default(),
            orientation: Orientation::default(),
            key_axis: KeyAxisConfig::default(),
            value_axis: ValueAxisConfig::default(),
            bar: BarBehavior::default(),
            brush: BrushBehavior::default(),
            zoom: ZoomBehavior::default(),
            event_delay_ms: default_event_delay_ms(),
            out_of_domain_policy: OutOfDomainPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Fixed continuous key domain.
    #[must_use]
    pub fn with_key_domain(mut self, start: f64, end: f64) -> Self {
        self.key_axis.mode = ScaleMode::Continuous;
        self.key_axis.domain = Some(ScaleDomain::continuous(start, end));
        self
    }

    /// Ordinal key axis; the domain follows the data.
    #[must_use]
    pub fn with_ordinal_keys(mut self) -> Self {
        self.key_axis.mode = ScaleMode::Ordinal;
        self.key_axis.units = KeyUnits::Ordinal;
        self.key_axis.domain = None;
        self
    }

    #[must_use]
    pub fn with_elastic_keys(mut self, elastic: bool) -> Self {
        self.key_axis.elastic = elastic;
        self
    }

    #[must_use]
    pub fn with_key_units(mut self, units: KeyUnits) -> Self {
        self.key_axis.units = units;
        self
    }

    #[must_use]
    pub fn with_key_padding(mut self, padding: AxisPadding) -> Self {
        self.key_axis.padding = padding;
        self
    }

    #[must_use]
    pub fn with_value_domain(mut self, min: f64, max: f64) -> Self {
        self.value_axis.domain = Some((min.min(max), min.max(max)));
        self
    }

    #[must_use]
    pub fn with_elastic_values(mut self, elastic: bool) -> Self {
        self.value_axis.elastic = elastic;
        self
    }

    #[must_use]
    pub fn with_value_padding(mut self, padding: AxisPadding) -> Self {
        self.value_axis.padding = padding;
        self
    }

    #[must_use]
    pub fn with_bar_behavior(mut self, bar: BarBehavior) -> Self {
        self.bar = bar;
        self
    }

    #[must_use]
    pub fn with_brush_behavior(mut self, brush: BrushBehavior) -> Self {
        self.brush = brush;
        self
    }

    #[must_use]
    pub fn with_zoom_behavior(mut self, zoom: ZoomBehavior) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_event_delay_ms(mut self, delay_ms: u64) -> Self {
        self.event_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_out_of_domain_policy(mut self, policy: OutOfDomainPolicy) -> Self {
        self.out_of_domain_policy = policy;
        self
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidData(format!("config serialization failed: {err}")))
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| ChartError::InvalidData(format!("invalid chart config json: {err}")))
    }
}

fn default_tick_count() -> usize {
    10
}

fn default_event_delay_ms() -> u64 {
    DEFAULT_EVENT_DELAY_MS
}
