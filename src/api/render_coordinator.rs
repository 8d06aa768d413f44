use tracing::debug;

use crate::error::ChartResult;
use crate::render::{RenderPass, Renderer};

use super::render_frame_builder::build_render_frame;
use super::{ChartEngine, ChartEvent};

/// Two-phase render dispatch.
///
/// `render` rebuilds everything. `redraw` re-emits an axis only when it is
/// elastic, the chart was resized, or its domain changed since the last pass;
/// brush state and highlights are refreshed on every pass.
pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    pub(super) fn render<R: Renderer>(engine: &mut ChartEngine<R>) -> ChartResult<()> {
        run_pass(engine, RenderPass::Render)
    }

    pub(super) fn redraw<R: Renderer>(engine: &mut ChartEngine<R>) -> ChartResult<()> {
        if !engine.core.runtime.rendered {
            return run_pass(engine, RenderPass::Render);
        }
        run_pass(engine, RenderPass::Redraw)
    }
}

fn run_pass<R: Renderer>(engine: &mut ChartEngine<R>, pass: RenderPass) -> ChartResult<()> {
    let initial = pass == RenderPass::Render;

    engine.recompute_stacked_layers();
    let key_changed = engine.prepare_secondary_axis(initial)?;
    let value_changed = engine.prepare_primary_axis()?;

    let axes_dirty = engine.core.runtime.layout.take_axes_dirty();
    let resizing = std::mem::take(&mut engine.core.runtime.resizing);
    let behavior = &engine.core.behavior;
    let emit_key_axis =
        initial || resizing || key_changed || axes_dirty || behavior.key_axis.elastic;
    let emit_value_axis = initial || resizing || value_changed || behavior.value_axis.elastic;

    let frame = build_render_frame(engine, pass, emit_key_axis, emit_value_axis)?;
    engine.renderer.render(&frame)?;
    engine.core.runtime.rendered = true;

    debug!(
        pass = ?pass,
        layers = frame.layers.len(),
        bars = frame.bars.len(),
        emit_key_axis,
        emit_value_axis,
        "chart pass completed"
    );
    let event = match pass {
        RenderPass::Render => ChartEvent::Rendered,
        RenderPass::Redraw => ChartEvent::Redrawn,
    };
    engine.emit_plugin_event(event);
    Ok(())
}
