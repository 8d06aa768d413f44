//! stackgrid: coordinate-grid state engine for stacked bar charts.
//!
//! The crate turns independently filtered data series into stacked layers,
//! derives key/value axis domains and scales, and keeps brush selections,
//! zoom and range/focus chart pairs consistent. Drawing is delegated to a
//! [`render::Renderer`] that receives fully resolved frames.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEngine, ChartGroup, ChartId};
pub use error::{ChartError, ChartResult};
