pub mod episode;
pub mod info;

pub use episode::EpisodeSummary;
pub use info::{InfoHistory, StepInfo};
