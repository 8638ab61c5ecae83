use ndarray::Array2;

/// A list of closing prices, where the last index is the most recent
pub type PriceSeries = Vec<f64>;

/// One row of signal features per tick, aligned with [`PriceSeries`]
pub type FeatureMatrix = Array2<f64>;

/// `window_size` consecutive rows of the feature matrix
pub type Observation = Array2<f64>;
