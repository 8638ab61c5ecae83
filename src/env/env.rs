use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

use super::{obs, state::EpisodeState};
use crate::{
    charts::RenderView,
    config::EnvConfig,
    data::PriceFrame,
    error::{EnvError, EnvResult},
    gym::{Action, BoxSpace, Discrete},
    history::{EpisodeSummary, InfoHistory, StepInfo},
    types::{FeatureMatrix, Observation, PriceSeries},
    variants::TradingVariant,
};

/// The return value for a step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// Single-asset episode controller. Owns its state, history and random generator,
/// so separate instances never share anything. `step` needs `&mut self`, one writer at a time.
#[derive(Debug)]
pub struct TradingEnv<V: TradingVariant> {
    variant: V,
    config: EnvConfig,
    prices: PriceSeries,
    features: FeatureMatrix,
    shape: (usize, usize),
    action_space: Discrete,
    observation_space: BoxSpace,
    start_tick: usize,
    end_tick: usize,
    rng: StdRng,
    state: Option<EpisodeState>,
    history: InfoHistory,
    summary: EpisodeSummary,
    episode: usize,
}

impl<V: TradingVariant> TradingEnv<V> {
    pub fn new(frame: &PriceFrame, config: EnvConfig, variant: V) -> EnvResult<Self> {
        config.validate()?;
        let (prices, features) = variant.process_data(frame, &config)?;

        if features.nrows() != prices.len() {
            return Err(EnvError::MalformedInput(format!(
                "{} feature rows for {} prices",
                features.nrows(),
                prices.len()
            )));
        }

        let shape = (config.window_size, features.ncols());
        let start_tick = config.window_size;
        let end_tick = prices.len() - 1;
        let seed = config.seed.unwrap_or_else(rand::random);

        info!(
            variant = variant.name(),
            ticks = prices.len(),
            start_tick,
            end_tick,
            window_size = config.window_size,
            "created trading env"
        );

        Ok(Self {
            summary: EpisodeSummary::new(0, config.starting_pocket),
            variant,
            config,
            prices,
            features,
            shape,
            action_space: Discrete::actions(),
            observation_space: BoxSpace::unbounded(shape),
            start_tick,
            end_tick,
            rng: StdRng::seed_from_u64(seed),
            state: None,
            history: InfoHistory::default(),
            episode: 0,
        })
    }

    /// Reseeds this instance's generator and returns the seed used.
    pub fn seed(&mut self, seed: Option<u64>) -> u64 {
        let seed = seed.unwrap_or_else(rand::random);
        self.rng = StdRng::seed_from_u64(seed);
        seed
    }

    pub fn sample_action(&mut self) -> Action {
        self.action_space.sample(&mut self.rng)
    }

    pub fn reset(&mut self) -> Observation {
        // an episode counts once it has stepped
        if self.summary.steps > 0 {
            self.episode += 1;
        }

        let mut state = EpisodeState::new(
            self.start_tick,
            self.config.window_size,
            self.config.starting_pocket,
        );
        state.mark_to_market(&self.prices);

        self.history.clear();
        self.summary = EpisodeSummary::new(self.episode, self.config.starting_pocket);
        self.state = Some(state);

        debug!(episode = self.episode, tick = self.start_tick, "reset");
        self.observation()
    }

    pub fn step(&mut self, action: Action) -> EnvResult<Step> {
        let Some(state) = self.state.as_mut() else {
            warn!(?action, "step before reset");
            return Err(EnvError::EpisodeNotStarted);
        };
        if state.done {
            warn!(?action, tick = state.current_tick, "step after episode end");
            return Err(EnvError::PostTerminalStep {
                tick: state.current_tick,
            });
        }

        let trade = action.trades_from(state.position);

        state.current_tick += 1;
        state.done = state.current_tick == self.end_tick;

        let reward = self.variant.calculate_reward(action, state, &self.prices);
        state.total_reward += reward;

        self.variant.update_value(action, state, &self.prices);

        if trade {
            state.last_trade_tick = state.current_tick;
        }

        state.position_history.push(Some(state.position));

        let info = StepInfo::new(state.total_reward, state.total_value, state.position, action);
        let done = state.done;
        self.summary.record(action, trade, state);

        debug!(
            tick = state.current_tick,
            ?action,
            trade,
            reward,
            position = ?state.position,
            pocket = state.pocket,
            total_value = state.total_value,
            "step"
        );

        if done {
            info!(
                episode = self.episode,
                steps = self.summary.steps,
                trades = self.summary.trades,
                total_reward = state.total_reward,
                total_value = state.total_value,
                total_profit = state.total_profit,
                "episode done"
            );
        }

        self.update_history(&info);

        Ok(Step {
            observation: self.observation(),
            reward,
            done,
            info,
        })
    }

    /// Feature rows for the ticks before the current one.
    fn observation(&self) -> Observation {
        let tick = self
            .state
            .as_ref()
            .map_or(self.start_tick, |state| state.current_tick);
        obs::window(&self.features, tick, self.config.window_size)
    }

    fn update_history(&mut self, info: &StepInfo) {
        self.history.update(info);
    }

    pub fn max_possible_profit(&self) -> EnvResult<f64> {
        self.variant
            .max_possible_profit(&self.prices, self.start_tick, self.end_tick)
    }

    pub fn render_view(&self) -> Option<RenderView<'_>> {
        let state = self.state.as_ref()?;
        Some(RenderView {
            prices: &self.prices,
            position_history: &state.position_history,
            start_tick: self.start_tick,
            current_tick: state.current_tick,
            total_reward: state.total_reward,
            total_value: state.total_value,
        })
    }

    pub fn state(&self) -> Option<&EpisodeState> {
        self.state.as_ref()
    }

    pub fn history(&self) -> &InfoHistory {
        &self.history
    }

    pub fn summary(&self) -> &EpisodeSummary {
        &self.summary
    }

    pub fn is_done(&self) -> bool {
        self.state.as_ref().is_some_and(|state| state.done)
    }

    pub fn prices(&self) -> &PriceSeries {
        &self.prices
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn action_space(&self) -> &Discrete {
        &self.action_space
    }

    pub fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    pub fn start_tick(&self) -> usize {
        self.start_tick
    }

    pub fn end_tick(&self) -> usize {
        self.end_tick
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        accounting::AccountingPolicy,
        config::FrameBound,
        gym::Position,
        reward::RewardPolicy,
        variants::{Stocks, StocksConfig},
    };

    fn env_with(stocks: StocksConfig) -> TradingEnv<Stocks> {
        let frame = PriceFrame::from_closes(vec![10., 11., 9., 12., 15.]).unwrap();
        let mut config = EnvConfig::new(2, FrameBound::new(2, 5));
        config.seed = Some(1);
        TradingEnv::new(&frame, config, Stocks::new(stocks)).unwrap()
    }

    #[test]
    fn step_before_reset_is_rejected() {
        let mut env = env_with(StocksConfig::default());
        assert!(matches!(env.step(Action::Hold), Err(EnvError::EpisodeNotStarted)));
    }

    #[test]
    fn ticks_and_done() {
        let mut env = env_with(StocksConfig::default());
        assert_eq!((env.start_tick(), env.end_tick()), (2, 4));

        env.reset();
        let first = env.step(Action::Hold).unwrap();
        assert!(!first.done);
        assert_eq!(env.state().unwrap().current_tick, 3);

        let second = env.step(Action::Hold).unwrap();
        assert!(second.done);
        assert_eq!(env.state().unwrap().current_tick, 4);

        let result = env.step(Action::Hold);
        assert!(matches!(result, Err(EnvError::PostTerminalStep { tick: 4 })));
        assert_eq!(env.state().unwrap().current_tick, 4);
    }

    #[test]
    fn buy_then_sell_with_pocket_accounting() {
        let mut env = env_with(StocksConfig {
            reward: RewardPolicy::Directional,
            accounting: AccountingPolicy::Pocket { trade_units: 9. },
            ..Default::default()
        });
        let observation = env.reset();
        assert_eq!(observation, ndarray::array![[10., 0.], [11., 1.]]);

        // tick 3: 9 -> 12, the buy goes with the rise
        let buy = env.step(Action::Buy).unwrap();
        let state = env.state().unwrap();
        assert_eq!(buy.reward, 1.);
        assert_eq!(state.position, Position::High);
        assert_eq!(state.pocket, 100_000. - 9. * 12.);
        assert_eq!(state.last_trade_tick, 3);
        assert_eq!(state.total_value, state.pocket + 10. * 12.);
        assert_eq!(buy.observation, ndarray::array![[11., 1.], [9., -2.]]);

        // tick 4: 12 -> 15, selling into a rise is scored as wrong
        let sell = env.step(Action::Sell).unwrap();
        let state = env.state().unwrap();
        assert_eq!(sell.reward, -1.);
        assert!(sell.done);
        assert_eq!(state.position, Position::Low);
        assert_eq!(state.pocket, 100_000. - 9. * 12. + 9. * 15.);
        assert_eq!(state.total_value, state.pocket);
        assert_eq!(state.total_reward, 0.);
        assert_eq!(
            state.position_history,
            vec![None, None, Some(Position::Low), Some(Position::High), Some(Position::Low)]
        );
        assert_eq!(env.summary().trades, 2);
    }

    #[test]
    fn history_log_tracks_each_step() {
        let mut env = env_with(StocksConfig::default());
        env.reset();
        env.step(Action::Buy).unwrap();
        env.step(Action::Hold).unwrap();

        let history = env.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history.get("position").unwrap(), &[10., 10.]);
        assert_eq!(history.get("action").unwrap(), &[1., 2.]);

        env.reset();
        assert!(env.history().is_empty());
        assert_eq!(env.summary().episode, 1);
    }

    #[test]
    fn resets_without_steps_keep_the_episode_number() {
        let mut env = env_with(StocksConfig::default());
        env.reset();
        env.reset();
        assert_eq!(env.summary().episode, 0);

        env.step(Action::Hold).unwrap();
        env.reset();
        env.reset();
        assert_eq!(env.summary().episode, 1);
    }

    #[test]
    fn instances_sample_independently_of_each_other() {
        let mut a = env_with(StocksConfig::default());
        let mut b = env_with(StocksConfig::default());

        let left: Vec<Action> = (0..16).map(|_| a.sample_action()).collect();
        // draining `a` must not change what `b` draws
        let right: Vec<Action> = (0..16).map(|_| b.sample_action()).collect();
        assert_eq!(left, right);

        assert_eq!(a.seed(Some(9)), 9);
        assert_eq!(b.seed(Some(9)), 9);
        assert_eq!(a.sample_action(), b.sample_action());
    }
}
