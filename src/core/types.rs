use std::fmt;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_seconds;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plot area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 50.0,
            bottom: 30.0,
            left: 30.0,
        }
    }
}

impl Margins {
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Plot width after margins, never negative.
    #[must_use]
    pub fn effective_width(self, viewport: Viewport) -> f64 {
        (f64::from(viewport.width) - self.left - self.right).max(0.0)
    }

    /// Plot height after margins, never negative.
    #[must_use]
    pub fn effective_height(self, viewport: Viewport) -> f64 {
        (f64::from(viewport.height) - self.top - self.bottom).max(0.0)
    }
}

/// Direction in which bars grow.
///
/// `Vertical` places the key axis along x and stacks values upwards.
/// `Horizontal` places the key axis along y and stacks values rightwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// A key or value position on an axis.
///
/// Quantitative and temporal keys are numbers (temporal keys are unix
/// seconds); ordinal keys are categories. The ordering puts every number
/// before every category so mixed sets still sort deterministically.
/// Serialized as a bare JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(OrderedFloat<f64>),
    Category(String),
}

impl AxisValue {
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    #[must_use]
    pub fn category(value: impl Into<String>) -> Self {
        Self::Category(value.into())
    }

    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        Self::number(datetime_to_unix_seconds(time))
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value.into_inner()),
            Self::Category(_) => None,
        }
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Category(value) => Some(value),
        }
    }
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value.into_inner()),
            Self::Category(value) => f.write_str(value),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        Self::category(value)
    }
}

impl From<String> for AxisValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}
