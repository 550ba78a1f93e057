use crate::error::ChartResult;
use crate::render::{ChartFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_band_count: usize,
    pub last_tick_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame
            .lines
            .iter()
            .filter(|line| !line.path.is_empty())
            .count();
        self.last_band_count = frame
            .bands
            .iter()
            .filter(|band| !band.path.is_empty())
            .count();
        self.last_tick_count = frame.value_ticks.len() + frame.x_ticks.len();
        Ok(())
    }
}
