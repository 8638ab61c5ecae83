pub mod accounting;
pub mod charts;
pub mod config;
pub mod constants;
pub mod data;
pub mod env;
pub mod error;
pub mod gym;
pub mod history;
pub mod reward;
pub mod types;
pub mod variants;

pub use config::{EnvConfig, FrameBound};
pub use env::{EpisodeState, Step, TradingEnv};
pub use error::{EnvError, EnvResult};
pub use gym::{Action, Position};
pub use variants::{Stocks, StocksConfig, TradingVariant};
