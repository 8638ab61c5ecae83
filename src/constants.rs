/// Cash in the pocket at the start of every episode
pub const STARTING_POCKET: f64 = 100_000.;

pub mod fees {
    /// Fraction lost when converting shares back to cash
    pub const BID_PERCENT: f64 = 0.01;
    /// Fraction lost when converting cash into shares
    pub const ASK_PERCENT: f64 = 0.005;
}

pub mod scores {
    pub const CORRECT_TRADE: f64 = 1.;
    pub const WRONG_TRADE: f64 = -1.;
    pub const HOLD_GAIN: f64 = 0.25;
    pub const HOLD_IDLE: f64 = -0.25;
}

pub mod files {
    pub const DATA_PATH: &str = "data";
}

pub mod columns {
    pub const CLOSE: &str = "Close";
    pub const OPEN: &str = "Open";
    pub const HIGH: &str = "High";
    pub const LOW: &str = "Low";
    pub const VOLUME: &str = "Volume";
}

pub const CHART_DIMS: (u32, u32) = (1600, 780);
