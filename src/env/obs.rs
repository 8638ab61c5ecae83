use ndarray::s;

use crate::types::{FeatureMatrix, Observation};

/// Rows `[tick - window_size, tick)` of `features`, the window that ends just before `tick`.
pub fn window(features: &FeatureMatrix, tick: usize, window_size: usize) -> Observation {
    features.slice(s![tick - window_size..tick, ..]).to_owned()
}
