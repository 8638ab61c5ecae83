use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::gym::{Action, Position};

/// Bookkeeping returned alongside every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub total_reward: f64,
    pub total_value: f64,
    /// Size of the position held after the step
    pub position: u32,
    pub action: u32,
}

impl StepInfo {
    pub const KEYS: [&'static str; 4] = ["total_reward", "total_value", "position", "action"];

    pub fn new(total_reward: f64, total_value: f64, position: Position, action: Action) -> Self {
        Self {
            total_reward,
            total_value,
            position: position.size(),
            action: action.into(),
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            (Self::KEYS[0], self.total_reward),
            (Self::KEYS[1], self.total_value),
            (Self::KEYS[2], self.position as f64),
            (Self::KEYS[3], self.action as f64),
        ]
    }
}

/// Every info field recorded during the episode, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoHistory {
    columns: HashMap<&'static str, Vec<f64>>,
}

impl InfoHistory {
    pub fn update(&mut self, info: &StepInfo) {
        if self.columns.is_empty() {
            self.columns = info
                .entries()
                .iter()
                .map(|(key, _)| (*key, Vec::new()))
                .collect();
        }

        for (key, value) in info.entries() {
            self.columns.entry(key).or_default().push(value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.columns.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &&'static str> {
        self.columns.keys()
    }

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.columns.clear();
    }
}
