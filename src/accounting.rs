use serde::{Deserialize, Serialize};

use crate::{
    constants::fees,
    env::EpisodeState,
    gym::{Action, Position},
    types::PriceSeries,
};

/// How cash moves when the position changes. The two models are independent and never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccountingPolicy {
    /// Additive: buying debits `trade_units * price` from the pocket, selling credits it back
    Pocket { trade_units: f64 },
    /// Multiplicative: every closed long compounds `total_profit` net of both fees
    Shares { fee_ask: f64, fee_bid: f64 },
}

impl AccountingPolicy {
    pub fn pocket() -> Self {
        AccountingPolicy::Pocket {
            trade_units: Position::High.size() as f64,
        }
    }

    pub fn shares() -> Self {
        AccountingPolicy::Shares {
            fee_ask: fees::ASK_PERCENT,
            fee_bid: fees::BID_PERCENT,
        }
    }

    /// Moves the position for an actionable `action` and books the cash side.
    /// Returns whether a trade happened.
    pub fn settle(&self, action: Action, state: &mut EpisodeState, prices: &PriceSeries) -> bool {
        let from = state.position;
        let to = from.transition(action);
        if from == to {
            return false;
        }

        let price = state.current_price(prices);
        match *self {
            AccountingPolicy::Pocket { trade_units } => match to {
                Position::High => state.pocket -= trade_units * price,
                Position::Low => state.pocket += trade_units * price,
                Position::Middle => {}
            },
            AccountingPolicy::Shares { fee_ask, fee_bid } => {
                if from == Position::High {
                    state.total_profit = compound_round_trip(
                        state.total_profit,
                        state.last_trade_price(prices),
                        price,
                        fee_ask,
                        fee_bid,
                    );
                }
            }
        }

        state.position = to;
        true
    }

    /// Realises an open long at the current price without changing the position.
    pub fn close_out(&self, state: &mut EpisodeState, prices: &PriceSeries) {
        if state.position != Position::High {
            return;
        }

        if let AccountingPolicy::Shares { fee_ask, fee_bid } = *self {
            state.total_profit = compound_round_trip(
                state.total_profit,
                state.last_trade_price(prices),
                state.current_price(prices),
                fee_ask,
                fee_bid,
            );
        }
    }
}

impl Default for AccountingPolicy {
    fn default() -> Self {
        Self::pocket()
    }
}

/// Which hook applies the trade: reward calculation, or the value update after it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    #[default]
    OnReward,
    OnValue,
}

/// Converts `profit` into shares at `entry_price` net of the ask fee, then back at
/// `exit_price` net of the bid fee.
pub fn compound_round_trip(
    profit: f64,
    entry_price: f64,
    exit_price: f64,
    fee_ask: f64,
    fee_bid: f64,
) -> f64 {
    let shares = (profit * (1. - fee_ask)) / entry_price;
    (shares * (1. - fee_bid)) * exit_price
}
