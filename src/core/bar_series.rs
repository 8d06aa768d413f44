use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{AxisValue, DataPoint, Orientation, Scale, StackedLayer};
use crate::error::{ChartError, ChartResult};

/// Deterministic rectangle for one stacked bar segment, in plot coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBar {
    pub layer_id: String,
    pub color_key: usize,
    pub key: AxisValue,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Bar placement options for [`project_stacked_bars`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub orientation: Orientation,
    /// Bar thickness along the key axis, already floored by the scale.
    pub thickness: f64,
    /// Centers bars on continuous keys instead of starting them at the key.
    pub center_bar: bool,
}

/// Projects stacked layers into bar rectangles.
///
/// Each segment spans from `baseline` to `baseline + value` on the value
/// axis. Points without a value (hidden layers, missing values) produce no
/// bar.
pub fn project_stacked_bars(
    layers: &[StackedLayer],
    key_scale: &Scale,
    value_scale: &Scale,
    layout: BarLayout,
) -> ChartResult<Vec<StackedBar>> {
    if !layout.thickness.is_finite() || layout.thickness <= 0.0 {
        return Err(ChartError::InvalidData(
            "bar thickness must be finite and > 0".to_owned(),
        ));
    }

    let segments: Vec<(&StackedLayer, &DataPoint)> = layers
        .iter()
        .flat_map(|layer| layer.points.iter().map(move |point| (layer, point)))
        .filter(|(_, point)| point.value.is_some())
        .collect();

    #[cfg(feature = "parallel-projection")]
    {
        let projected: Vec<ChartResult<StackedBar>> = segments
            .par_iter()
            .map(|(layer, point)| project_segment(layer, point, key_scale, value_scale, layout))
            .collect();
        projected.into_iter().collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        segments
            .into_iter()
            .map(|(layer, point)| project_segment(layer, point, key_scale, value_scale, layout))
            .collect()
    }
}

fn project_segment(
    layer: &StackedLayer,
    point: &DataPoint,
    key_scale: &Scale,
    value_scale: &Scale,
    layout: BarLayout,
) -> ChartResult<StackedBar> {
    let mut key_start = key_scale.map(&point.key)?;
    if layout.center_bar && !key_scale.is_ordinal() {
        key_start -= layout.thickness / 2.0;
    }
    let base = value_scale.map_number(point.baseline)?;
    let top = value_scale.map_number(point.top())?;
    let value_start = base.min(top);
    let value_length = (top - base).abs();

    let (x, y, width, height) = match layout.orientation {
        Orientation::Vertical => (key_start, value_start, layout.thickness, value_length),
        Orientation::Horizontal => (value_start, key_start, value_length, layout.thickness),
    };

    Ok(StackedBar {
        layer_id: layer.id.clone(),
        color_key: layer.color_key,
        key: point.key.clone(),
        x,
        y,
        width,
        height,
    })
}
