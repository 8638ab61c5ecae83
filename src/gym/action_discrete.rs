use enum_map::Enum;
use serde::{Deserialize, Serialize};

use crate::{error::EnvError, gym::position::Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Action {
    Sell,
    Buy,
    Hold,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Sell, Action::Buy, Action::Hold];

    pub fn size() -> usize {
        Self::ALL.len()
    }

    /// Whether acting from `position` changes it: Buy only from Low, Sell only from High.
    pub fn trades_from(self, position: Position) -> bool {
        matches!(
            (self, position),
            (Action::Buy, Position::Low) | (Action::Sell, Position::High)
        )
    }
}

impl TryFrom<i64> for Action {
    type Error = EnvError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Sell),
            1 => Ok(Action::Buy),
            2 => Ok(Action::Hold),
            _ => Err(EnvError::InvalidAction(value)),
        }
    }
}

impl TryFrom<u32> for Action {
    type Error = EnvError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Action::try_from(value as i64)
    }
}

impl From<Action> for u32 {
    fn from(action: Action) -> Self {
        match action {
            Action::Sell => 0,
            Action::Buy => 1,
            Action::Hold => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_codes_match_action_space() {
        for (code, action) in Action::ALL.iter().enumerate() {
            assert_eq!(Action::try_from(code as u32).unwrap(), *action);
            assert_eq!(u32::from(*action), code as u32);
        }
    }

    #[test]
    fn out_of_range_code_is_rejected() {
        assert!(matches!(
            Action::try_from(3_i64),
            Err(EnvError::InvalidAction(3))
        ));
        assert!(matches!(
            Action::try_from(-1_i64),
            Err(EnvError::InvalidAction(-1))
        ));
    }

    #[test]
    fn trades_only_from_opposite_side() {
        assert!(Action::Buy.trades_from(Position::Low));
        assert!(Action::Sell.trades_from(Position::High));

        assert!(!Action::Buy.trades_from(Position::High));
        assert!(!Action::Buy.trades_from(Position::Middle));
        assert!(!Action::Sell.trades_from(Position::Low));
        assert!(!Action::Sell.trades_from(Position::Middle));
        for position in Position::ALL {
            assert!(!Action::Hold.trades_from(position));
        }
    }
}
