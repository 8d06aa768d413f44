use serde::{Deserialize, Serialize};

use crate::core::{AxisValue, Margins, Orientation, Scale, ScaleDomain, StackedBar, StackedLayer, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::BrushExtent;

/// Which half of the render contract produced a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderPass {
    /// Initial construction: axes, geometry and brush are all built.
    Render,
    /// Filter-driven update: axes only when present in the frame.
    Redraw,
}

/// Selection state of one data point under the deselected-area policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Highlight {
    /// No filter is active.
    Neutral,
    Selected,
    Deselected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: AxisValue,
    pub position: f64,
}

/// Axis label/gridline request for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub domain: ScaleDomain,
    pub range: (f64, f64),
    pub ticks: Vec<AxisTick>,
}

/// Read-only scene for one render or redraw pass.
///
/// `highlights[i][j]` classifies `layers[i].points[j]`. An axis set to
/// `None` means the collaborator keeps whatever it drew for that axis last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub pass: RenderPass,
    pub viewport: Viewport,
    pub margins: Margins,
    pub orientation: Orientation,
    pub key_scale: Scale,
    pub value_scale: Scale,
    pub layers: Vec<StackedLayer>,
    pub bars: Vec<StackedBar>,
    pub bar_thickness: f64,
    pub highlights: Vec<Vec<Highlight>>,
    pub key_axis: Option<AxisFrame>,
    pub value_axis: Option<AxisFrame>,
    pub brush_extent: Option<BrushExtent>,
    pub refocused: bool,
}

impl RenderFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        if self.highlights.len() != self.layers.len() {
            return Err(ChartError::InvalidData(
                "highlight rows must match stacked layers".to_owned(),
            ));
        }

        for bar in &self.bars {
            if !(bar.x.is_finite()
                && bar.y.is_finite()
                && bar.width.is_finite()
                && bar.height.is_finite())
            {
                return Err(ChartError::InvalidData(format!(
                    "bar geometry for layer {} must be finite",
                    bar.layer_id
                )));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.count_highlight(Highlight::Selected)
    }

    #[must_use]
    pub fn deselected_count(&self) -> usize {
        self.count_highlight(Highlight::Deselected)
    }

    fn count_highlight(&self, wanted: Highlight) -> usize {
        self.highlights
            .iter()
            .flatten()
            .filter(|highlight| **highlight == wanted)
            .count()
    }
}
