use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{
    accounting::{AccountingPolicy, Settlement},
    config::EnvConfig,
    data::PriceFrame,
    env::EpisodeState,
    error::EnvResult,
    gym::{Action, Position},
    reward::RewardPolicy,
    types::{FeatureMatrix, PriceSeries},
    variants::TradingVariant,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StocksConfig {
    pub reward: RewardPolicy,
    pub accounting: AccountingPolicy,
    pub settlement: Settlement,
}

/// Long-only stock trading on closing prices, with `[price, price_delta]` features.
#[derive(Debug, Clone, Default)]
pub struct Stocks {
    config: StocksConfig,
    /// Set when this step's trade opened a long, so the end-of-episode close out skips it
    opened_this_step: bool,
}

impl Stocks {
    pub const FEATURE_WIDTH: usize = 2;

    pub fn new(config: StocksConfig) -> Self {
        Self {
            config,
            opened_this_step: false,
        }
    }

    pub fn config(&self) -> &StocksConfig {
        &self.config
    }

    fn settle(&mut self, action: Action, state: &mut EpisodeState, prices: &PriceSeries) {
        if self.config.accounting.settle(action, state, prices) && state.position == Position::High {
            self.opened_this_step = true;
        }
    }
}

impl TradingVariant for Stocks {
    fn name(&self) -> &'static str {
        "stocks"
    }

    fn process_data(
        &self,
        frame: &PriceFrame,
        config: &EnvConfig,
    ) -> EnvResult<(PriceSeries, FeatureMatrix)> {
        let closes = frame.close()?;
        let range = config
            .frame_bound
            .slice_range(config.window_size, closes.len())?;
        let prices: PriceSeries = closes[range].to_vec();

        // Differences are taken after slicing, so row 0 has no predecessor and gets 0
        let features = Array2::from_shape_fn((prices.len(), Self::FEATURE_WIDTH), |(row, col)| {
            match col {
                0 => prices[row],
                _ if row == 0 => 0.,
                _ => prices[row] - prices[row - 1],
            }
        });

        Ok((prices, features))
    }

    fn calculate_reward(
        &mut self,
        action: Action,
        state: &mut EpisodeState,
        prices: &PriceSeries,
    ) -> f64 {
        self.opened_this_step = false;
        let reward = self
            .config
            .reward
            .reward(action, state.position, state, prices);

        if self.config.settlement == Settlement::OnReward {
            self.settle(action, state, prices);
        }

        reward
    }

    fn update_value(&mut self, action: Action, state: &mut EpisodeState, prices: &PriceSeries) {
        if self.config.settlement == Settlement::OnValue {
            self.settle(action, state, prices);
        }

        if state.done && !self.opened_this_step {
            self.config.accounting.close_out(state, prices);
        }

        state.mark_to_market(prices);
    }

    fn max_possible_profit(
        &self,
        prices: &PriceSeries,
        start_tick: usize,
        end_tick: usize,
    ) -> EnvResult<f64> {
        let mut tick = start_tick;
        let mut last_trade_tick = start_tick - 1;
        let mut profit = 1.;

        while tick <= end_tick {
            let rising = prices[tick] >= prices[tick - 1];
            while tick <= end_tick && (prices[tick] >= prices[tick - 1]) == rising {
                tick += 1;
            }

            if rising {
                profit = profit / prices[last_trade_tick] * prices[tick - 1];
            }
            last_trade_tick = tick - 1;
        }

        Ok(profit)
    }
}
