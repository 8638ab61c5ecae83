use std::path::Path;

use crate::{error::EnvResult, gym::Position};

mod theme;
pub mod trading;

pub use trading::ChartRenderer;

/// Read-only snapshot of an episode handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub prices: &'a [f64],
    pub position_history: &'a [Option<Position>],
    pub start_tick: usize,
    pub current_tick: usize,
    pub total_reward: f64,
    pub total_value: f64,
}

impl RenderView<'_> {
    pub fn caption(&self) -> String {
        format!(
            "Total Reward: {:.6} ~ Total Value: {:.6}",
            self.total_reward, self.total_value
        )
    }

    pub fn position_at(&self, tick: usize) -> Option<Position> {
        self.position_history.get(tick).copied().flatten()
    }
}

/// Draws episodes. Lives outside the environment, which only hands out [`RenderView`]s.
pub trait Renderer {
    /// Adds the current tick to the drawing.
    fn render(&mut self, view: &RenderView) -> EnvResult<()>;

    /// Redraws every tick visited so far.
    fn render_all(&mut self, view: &RenderView) -> EnvResult<()>;

    fn save(&mut self, path: &Path) -> EnvResult<()>;

    fn close(&mut self) {}
}
