use crate::core::{BarLayout, project_stacked_bars};
use crate::error::ChartResult;
use crate::render::{RenderFrame, RenderPass, Renderer};

use super::ChartEngine;

pub(super) fn build_render_frame<R: Renderer>(
    engine: &mut ChartEngine<R>,
    pass: RenderPass,
    emit_key_axis: bool,
    emit_value_axis: bool,
) -> ChartResult<RenderFrame> {
    let thickness = engine.bar_thickness();
    let model = &engine.core.model;
    let layout = BarLayout {
        orientation: model.orientation,
        thickness,
        center_bar: engine.core.behavior.bar.center_bar,
    };
    let bars = project_stacked_bars(&model.stacked, &model.key_scale, &model.value_scale, layout)?;

    Ok(RenderFrame {
        pass,
        viewport: model.viewport,
        margins: model.margins,
        orientation: model.orientation,
        key_scale: model.key_scale.clone(),
        value_scale: model.value_scale.clone(),
        layers: model.stacked.clone(),
        bars,
        bar_thickness: thickness,
        highlights: engine.classify_highlights(&model.stacked),
        key_axis: if emit_key_axis {
            engine.key_axis_frame()
        } else {
            None
        },
        value_axis: if emit_value_axis {
            engine.value_axis_frame()
        } else {
            None
        },
        brush_extent: model.interaction.brush_extent(),
        refocused: model.interaction.refocused(),
    })
}
