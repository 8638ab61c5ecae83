use crate::{
    config::EnvConfig,
    data::PriceFrame,
    env::EpisodeState,
    error::{EnvError, EnvResult},
    gym::Action,
    types::{FeatureMatrix, PriceSeries},
};

pub mod stocks;

pub use stocks::{Stocks, StocksConfig};

/// Market-specific half of an environment. Derives prices and features from the source
/// table, then scores and values each step.
pub trait TradingVariant {
    fn name(&self) -> &'static str;

    /// Slices the source to the configured frame and builds the aligned feature rows.
    fn process_data(
        &self,
        frame: &PriceFrame,
        config: &EnvConfig,
    ) -> EnvResult<(PriceSeries, FeatureMatrix)>;

    /// Called after the tick advanced. May apply the trade to `state`.
    fn calculate_reward(
        &mut self,
        action: Action,
        state: &mut EpisodeState,
        prices: &PriceSeries,
    ) -> f64;

    /// Called after the reward. Must leave `state.total_value` marked at the current price.
    fn update_value(&mut self, action: Action, state: &mut EpisodeState, prices: &PriceSeries);

    /// Best achievable profit ratio over `start_tick..=end_tick`, ignoring fees.
    fn max_possible_profit(
        &self,
        _prices: &PriceSeries,
        _start_tick: usize,
        _end_tick: usize,
    ) -> EnvResult<f64> {
        Err(EnvError::UnsupportedOperation("max_possible_profit"))
    }
}
