use serde::{Deserialize, Serialize};

use crate::{
    constants::STARTING_POCKET,
    error::{EnvError, EnvResult},
};

/// Half-open `[start, end)` range of source rows the episode trades over.
///
/// `window_size` rows before `start` are included so the first observation is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameBound {
    pub start: usize,
    pub end: usize,
}

impl FrameBound {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Checks the bound against `source_len` rows and returns the slice to take from the source.
    pub fn slice_range(&self, window_size: usize, source_len: usize) -> EnvResult<std::ops::Range<usize>> {
        let Some(first) = self.start.checked_sub(window_size) else {
            return Err(EnvError::Configuration(format!(
                "frame start {} leaves no room for a window of {window_size} ticks",
                self.start
            )));
        };
        // at least one step between the start tick and the end tick
        if self.end < self.start || self.end - self.start < 2 {
            return Err(EnvError::Configuration(format!(
                "frame [{}, {}) needs at least two ticks",
                self.start, self.end
            )));
        }
        if self.end > source_len {
            return Err(EnvError::Configuration(format!(
                "frame end {} is beyond the {source_len} rows of source data",
                self.end
            )));
        }

        Ok(first..self.end)
    }
}

impl TryFrom<&[usize]> for FrameBound {
    type Error = EnvError;

    fn try_from(values: &[usize]) -> Result<Self, Self::Error> {
        match values {
            [start, end] => Ok(Self::new(*start, *end)),
            _ => Err(EnvError::Configuration(format!(
                "frame bound needs exactly 2 values, got {}",
                values.len()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub window_size: usize,
    pub frame_bound: FrameBound,
    pub starting_pocket: f64,
    /// Seed for this instance's generator. Drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl EnvConfig {
    pub fn new(window_size: usize, frame_bound: FrameBound) -> Self {
        Self {
            window_size,
            frame_bound,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> EnvResult<()> {
        if self.window_size == 0 {
            return Err(EnvError::Configuration("window size must be positive".into()));
        }
        if !self.starting_pocket.is_finite() {
            return Err(EnvError::Configuration(format!(
                "starting pocket {} is not finite",
                self.starting_pocket
            )));
        }
        Ok(())
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            window_size: 10,
            frame_bound: FrameBound::new(10, 300),
            starting_pocket: STARTING_POCKET,
            seed: None,
        }
    }
}
