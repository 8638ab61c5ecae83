pub mod action_discrete;
pub mod position;
pub mod space;

pub use action_discrete::Action;
pub use position::Position;
pub use space::{BoxSpace, Discrete};
