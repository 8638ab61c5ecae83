pub mod frame;
pub mod historical;

pub use frame::{Bar, PriceFrame};
