use crate::{gym::Position, types::PriceSeries};

/// Book-keeping for one episode. Built by `reset()`, advanced only by `step()`.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeState {
    pub current_tick: usize,
    pub last_trade_tick: usize,
    pub position: Position,
    pub pocket: f64,
    /// `pocket + position.size * current_price`
    pub total_value: f64,
    pub total_reward: f64,
    /// Compounded ratio of the shares accounting, 1.0 means break-even
    pub total_profit: f64,
    /// `None` for the ticks before the episode start, so indices line up with prices
    pub position_history: Vec<Option<Position>>,
    pub done: bool,
}

impl EpisodeState {
    pub fn new(start_tick: usize, window_size: usize, pocket: f64) -> Self {
        let position = Position::Low;
        let mut position_history = vec![None; window_size];
        position_history.push(Some(position));

        Self {
            current_tick: start_tick,
            last_trade_tick: start_tick - 1,
            position,
            pocket,
            total_value: 0.,
            total_reward: 0.,
            total_profit: 1.,
            position_history,
            done: false,
        }
    }

    pub fn current_price(&self, prices: &PriceSeries) -> f64 {
        prices[self.current_tick]
    }

    pub fn previous_price(&self, prices: &PriceSeries) -> f64 {
        prices[self.current_tick - 1]
    }

    pub fn last_trade_price(&self, prices: &PriceSeries) -> f64 {
        prices[self.last_trade_tick]
    }

    pub fn mark_to_market(&mut self, prices: &PriceSeries) {
        self.total_value = self.pocket + self.position.value_with_price(self.current_price(prices));
    }
}
