use serde::{Deserialize, Serialize};

use crate::{
    constants::scores,
    env::EpisodeState,
    gym::{Action, Position},
    types::PriceSeries,
};

/// How a step is scored. Both policies read the position held before the step's trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    /// Raw price move since the last trade, whatever the action was
    #[default]
    PriceDelta,
    /// Fixed scores for trading in the direction the price then moved
    Directional,
}

impl RewardPolicy {
    pub fn reward(
        self,
        action: Action,
        position: Position,
        state: &EpisodeState,
        prices: &PriceSeries,
    ) -> f64 {
        match self {
            RewardPolicy::PriceDelta => price_delta_reward(state, prices),
            RewardPolicy::Directional => {
                let delta = state.current_price(prices) - state.previous_price(prices);
                directional_reward(action, position, delta)
            }
        }
    }
}

pub fn price_delta_reward(state: &EpisodeState, prices: &PriceSeries) -> f64 {
    state.current_price(prices) - state.last_trade_price(prices)
}

/// `delta` is the price move into the current tick.
pub fn directional_reward(action: Action, position: Position, delta: f64) -> f64 {
    let score = |favourable: bool| {
        if favourable {
            scores::CORRECT_TRADE
        } else {
            scores::WRONG_TRADE
        }
    };

    match (action, position) {
        (Action::Buy, Position::Low) => score(delta > 0.),
        (Action::Sell, Position::High) => score(delta < 0.),
        // Buy while long or Sell while flat is not a trade
        (Action::Buy, _) | (Action::Sell, _) => 0.,
        (Action::Hold, Position::High) if delta >= 0. => scores::HOLD_GAIN,
        (Action::Hold, _) => scores::HOLD_IDLE,
    }
}
