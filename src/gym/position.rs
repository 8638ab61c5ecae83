use serde::{Deserialize, Serialize};

use crate::gym::action_discrete::Action;

/// Exposure held in the single asset. The size multiplies the current price when
/// marking the book to market.
///
/// `Middle` exists for callers that branch on it, no transition produces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Low,
    Middle,
    High,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Low, Position::Middle, Position::High];

    pub fn size(self) -> u32 {
        match self {
            Position::Low => 0,
            Position::Middle => 5,
            Position::High => 10,
        }
    }

    /// Low --Buy--> High, High --Sell--> Low, everything else stays put.
    pub fn transition(self, action: Action) -> Position {
        match (self, action) {
            (Position::Low, Action::Buy) => Position::High,
            (Position::High, Action::Sell) => Position::Low,
            (position, _) => position,
        }
    }

    pub fn value_with_price(self, price: f64) -> f64 {
        self.size() as f64 * price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        let expected = [
            (Position::Low, Action::Sell, Position::Low),
            (Position::Low, Action::Buy, Position::High),
            (Position::Low, Action::Hold, Position::Low),
            (Position::Middle, Action::Sell, Position::Middle),
            (Position::Middle, Action::Buy, Position::Middle),
            (Position::Middle, Action::Hold, Position::Middle),
            (Position::High, Action::Sell, Position::Low),
            (Position::High, Action::Buy, Position::High),
            (Position::High, Action::Hold, Position::High),
        ];

        for (from, action, to) in expected {
            assert_eq!(from.transition(action), to, "{from:?} --{action:?}-->");
            assert_eq!(from != to, action.trades_from(from));
        }
    }

    #[test]
    fn middle_is_never_a_transition_target() {
        for from in [Position::Low, Position::High] {
            for action in Action::ALL {
                assert_ne!(from.transition(action), Position::Middle);
            }
        }
    }

    #[test]
    fn sizes() {
        assert_eq!(Position::Low.size(), 0);
        assert_eq!(Position::Middle.size(), 5);
        assert_eq!(Position::High.size(), 10);
        assert_eq!(Position::High.value_with_price(12.5), 125.);
    }
}
