#[allow(clippy::module_inception)]
mod env;
mod obs;
mod state;

pub use env::{Step, TradingEnv};
pub use obs::window;
pub use state::EpisodeState;
