use crate::error::ChartResult;
use crate::render::Renderer;

use super::{engine_core::EngineCore, render_coordinator::RenderCoordinator};

/// Coordinate-grid chart facade consumed by host applications.
///
/// `ChartEngine` owns the key/value scales, the layer stack, the active
/// filter and brush/zoom state, and hands resolved frames to its renderer.
/// Rendering is two-phase: [`ChartEngine::render`] builds everything,
/// [`ChartEngine::redraw`] updates an already rendered chart.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> ChartEngine<R> {
    /// Full render: recomputes layers, prepares both axes and emits every
    /// frame section.
    pub fn render(&mut self) -> ChartResult<()> {
        RenderCoordinator::render(self)
    }

    /// Incremental update. Falls back to [`ChartEngine::render`] when the
    /// chart has never been rendered.
    pub fn redraw(&mut self) -> ChartResult<()> {
        RenderCoordinator::redraw(self)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
