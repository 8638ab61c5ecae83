use rand::Rng;

use crate::gym::action_discrete::Action;

/// Finite set of integer actions `0..n`, one per [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discrete {
    n: usize,
}

impl Discrete {
    pub fn actions() -> Self {
        Self { n: Action::size() }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= 0 && (value as usize) < self.n
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Action {
        Action::ALL[rng.gen_range(0..self.n)]
    }
}

/// Real-valued box of a fixed shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpace {
    pub low: f64,
    pub high: f64,
    pub shape: (usize, usize),
}

impl BoxSpace {
    pub fn unbounded(shape: (usize, usize)) -> Self {
        Self {
            low: f64::NEG_INFINITY,
            high: f64::INFINITY,
            shape,
        }
    }

    pub fn contains(&self, observation: &ndarray::Array2<f64>) -> bool {
        observation.dim() == self.shape
            && observation
                .iter()
                .all(|value| !value.is_nan() && *value >= self.low && *value <= self.high)
    }
}
