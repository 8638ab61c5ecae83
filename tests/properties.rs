#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use stock_gym::{
        accounting::AccountingPolicy, data::PriceFrame, reward::RewardPolicy, Action, EnvConfig,
        FrameBound, Position, Stocks, StocksConfig, TradingEnv,
    };

    /// Close prices plus a window and a frame bound that fit them.
    fn episode_setup() -> impl Strategy<Value = (Vec<f64>, usize, FrameBound)> {
        (1usize..8, 2usize..60)
            .prop_flat_map(|(window, span)| {
                let len = window + span;
                (
                    prop::collection::vec(1.0f64..1000.0, len),
                    Just(window),
                    window..len - 1,
                )
            })
            .prop_flat_map(|(closes, window, start)| {
                let len = closes.len();
                (Just(closes), Just(window), Just(start), (start + 2)..=len)
            })
            .prop_map(|(closes, window, start, end)| (closes, window, FrameBound::new(start, end)))
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![Just(Action::Sell), Just(Action::Buy), Just(Action::Hold)]
    }

    fn stocks() -> impl Strategy<Value = StocksConfig> {
        (
            prop_oneof![Just(RewardPolicy::PriceDelta), Just(RewardPolicy::Directional)],
            prop_oneof![Just(AccountingPolicy::pocket()), Just(AccountingPolicy::shares())],
        )
            .prop_map(|(reward, accounting)| StocksConfig {
                reward,
                accounting,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn episodes_keep_their_invariants(
            (closes, window, bound) in episode_setup(),
            stocks in stocks(),
            actions in prop::collection::vec(action(), 64),
        ) {
            let frame = PriceFrame::from_closes(closes).unwrap();
            let mut env = TradingEnv::new(&frame, EnvConfig::new(window, bound), Stocks::new(stocks)).unwrap();

            prop_assert_eq!(env.prices().len(), bound.end - bound.start + window);
            prop_assert_eq!(env.features().dim(), (env.prices().len(), Stocks::FEATURE_WIDTH));

            let observation = env.reset();
            prop_assert_eq!(observation.dim(), (window, Stocks::FEATURE_WIDTH));
            prop_assert_eq!(env.state().unwrap().total_value, env.config().starting_pocket);

            let mut steps = 0;
            for action in actions.iter().copied().cycle() {
                let before = env.state().unwrap().clone();
                let step = env.step(action).unwrap();
                let after = env.state().unwrap();
                steps += 1;

                prop_assert_eq!(after.current_tick, before.current_tick + 1);
                prop_assert_eq!(step.done, after.current_tick == env.end_tick());
                prop_assert_eq!(step.observation.dim(), env.shape());
                prop_assert!(after.last_trade_tick <= after.current_tick);
                prop_assert_ne!(after.position, Position::Middle);
                prop_assert_eq!(after.position, before.position.transition(action));
                prop_assert_eq!(after.position_history.len(), after.current_tick + 1);
                prop_assert!((after.total_reward - (before.total_reward + step.reward)).abs() < 1e-9);

                if let AccountingPolicy::Pocket { .. } = stocks.accounting {
                    let marked = after.pocket + after.position.value_with_price(env.prices()[after.current_tick]);
                    prop_assert_eq!(after.total_value, marked);
                }

                if step.done {
                    break;
                }
            }

            prop_assert_eq!(steps, env.end_tick() - env.start_tick());
            prop_assert!(env.step(Action::Hold).is_err());
        }

        #[test]
        fn transitions_follow_the_action(
            position in prop_oneof![Just(Position::Low), Just(Position::High)],
            action in action(),
        ) {
            let next = position.transition(action);
            let expected = match (position, action) {
                (Position::Low, Action::Buy) => Position::High,
                (Position::High, Action::Sell) => Position::Low,
                (position, _) => position,
            };

            prop_assert_eq!(next, expected);
            prop_assert_eq!(action.trades_from(position), next != position);
        }
    }
}
