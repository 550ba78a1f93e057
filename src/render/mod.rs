mod frame;
mod null_renderer;

pub use frame::{AxisTick, BandPath, ChartFrame, LinePath, SelectionRect};
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `ChartFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()>;
}
