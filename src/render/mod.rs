mod frame;
mod null_renderer;

pub use frame::{AxisFrame, AxisTick, Highlight, RenderFrame, RenderPass};
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering collaborator.
///
/// Backends receive a fully resolved `RenderFrame` (scales, stacked layers,
/// axis metadata, brush state) and translate it into visual primitives. They
/// must treat the frame as read-only.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
