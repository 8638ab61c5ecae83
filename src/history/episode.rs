use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::{env::EpisodeState, gym::Action};

/// Running tallies for an episode, reported when it ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub steps: usize,
    pub trades: usize,
    pub actions: EnumMap<Action, usize>,
    pub starting_pocket: f64,
    pub total_value: f64,
    pub total_reward: f64,
    pub total_profit: f64,
}

impl EpisodeSummary {
    pub fn new(episode: usize, starting_pocket: f64) -> Self {
        Self {
            episode,
            starting_pocket,
            total_value: starting_pocket,
            total_profit: 1.,
            ..Default::default()
        }
    }

    pub fn record(&mut self, action: Action, traded: bool, state: &EpisodeState) {
        self.steps += 1;
        self.actions[action] += 1;
        if traded {
            self.trades += 1;
        }
        self.total_value = state.total_value;
        self.total_reward = state.total_reward;
        self.total_profit = state.total_profit;
    }

    /// Change in value relative to the starting pocket
    pub fn value_change_percent(&self) -> f64 {
        if self.starting_pocket == 0. {
            return 0.;
        }
        (self.total_value - self.starting_pocket) / self.starting_pocket * 100.
    }
}
