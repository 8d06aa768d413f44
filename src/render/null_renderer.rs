use crate::error::ChartResult;
use crate::render::{RenderFrame, RenderPass, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frames and keeps the latest one so tests can inspect
/// exactly what a backend would have received.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub redraw_count: usize,
    pub last_bar_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        match frame.pass {
            RenderPass::Render => self.render_count += 1,
            RenderPass::Redraw => self.redraw_count += 1,
        }
        self.last_bar_count = frame.bars.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
