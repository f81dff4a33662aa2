//! Tabular Q-learning agent with a frequency-decayed learning rate

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    nim::{Nim, StateSummary},
    ports::Player,
    q_learning::q_table::QTable,
    types::{HeapKey, Nimply},
    utils::build_rng,
};

/// Hyperparameters, fixed for the agent's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Fraction of moves spent on the least-tried action.
    pub exploration_rate: f64,
    /// Discount factor γ.
    pub discount_factor: f64,
    /// Magnitude of the terminal reward.
    pub max_reward: f64,
    /// Whether exploration is enabled at all; disable for evaluation play.
    pub explore: bool,
    /// RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            exploration_rate: 0.1,
            discount_factor: 0.9,
            max_reward: 10.0,
            explore: true,
            seed: None,
        }
    }
}

impl QLearningConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "exploration_rate must be in [0, 1], got {}",
                    self.exploration_rate
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "discount_factor must be in [0, 1], got {}",
                    self.discount_factor
                ),
            });
        }
        if !self.max_reward.is_finite() || self.max_reward <= 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!("max_reward must be positive and finite, got {}", self.max_reward),
            });
        }
        Ok(())
    }
}

/// Per-episode learning statistics, cleared at the start of every episode.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Sum of squared value-update deltas.
    pub sse: f64,
    /// Number of value updates applied.
    pub updated: usize,
    /// Number of states first seen this episode.
    pub discovered: usize,
}

impl EpisodeStats {
    /// Mean squared error of the episode's updates.
    pub fn mse(&self) -> f64 {
        if self.updated > 0 {
            self.sse / self.updated as f64
        } else {
            0.0
        }
    }
}

/// Tabular Q-learning player.
///
/// Value and frequency tables persist for the agent's whole lifetime and
/// are never reset between episodes; only the previous-ply pointers and
/// the per-episode statistics are cleared by [`Player::reset`].
#[derive(Debug)]
pub struct QLearningAgent {
    name: String,
    config: QLearningConfig,
    table: QTable,
    previous: Option<(HeapKey, Nimply)>,
    stats: EpisodeStats,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create an agent from a validated configuration.
    pub fn new(name: impl Into<String>, config: QLearningConfig) -> Result<Self> {
        config.validate()?;
        let rng = build_rng(config.seed);
        Ok(Self {
            name: name.into(),
            config,
            table: QTable::new(),
            previous: None,
            stats: EpisodeStats::default(),
            rng,
        })
    }

    /// The accumulated value and frequency tables.
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Statistics for the episode in progress.
    pub fn stats(&self) -> EpisodeStats {
        self.stats
    }

    /// Toggle exploration, e.g. off for evaluation matches.
    pub fn set_explore(&mut self, explore: bool) {
        self.config.explore = explore;
    }

    /// Immediate reward of a non-terminal state. Terminal rewards are
    /// applied by [`Player::finalize_episode`] instead.
    fn reward(&self, _state: &HeapKey) -> f64 {
        0.0
    }

    /// Decays with visitation so value estimates converge.
    fn learning_rate(&self, frequency: u32) -> f64 {
        let states = self.table.states() as f64;
        states / (states + f64::from(frequency))
    }

    /// Apply the temporal-difference update for the previous ply, now
    /// that the environment has answered with `current`.
    fn td_update(&mut self, current: &HeapKey) -> Result<()> {
        let Some((previous_state, previous_action)) = self.previous.clone() else {
            return Ok(());
        };

        let frequency = self.table.bump_frequency(&previous_state, previous_action)?;
        let old_value = self.table.value(&previous_state, previous_action)?;
        let target =
            self.reward(&previous_state) + self.config.discount_factor * self.table.max_value(current)?;
        let new_value = old_value + self.learning_rate(frequency) * (target - old_value);
        self.table.set_value(&previous_state, previous_action, new_value)?;

        self.stats.sse += (old_value - new_value).powi(2);
        self.stats.updated += 1;
        Ok(())
    }
}

impl Player for QLearningAgent {
    fn select_move(&mut self, state: &Nim) -> Result<Nimply> {
        if state.is_finished() {
            return Err(Error::NoMovesAvailable);
        }
        debug_assert!(
            self.previous
                .as_ref()
                .is_none_or(|(previous, _)| previous.rows() != state.rows()),
            "consecutive selections must see distinct states"
        );

        let current = HeapKey::from(state.rows());
        let actions = StateSummary::of(state).possible_moves;

        // seed table entries before any lookup touches them
        if self.table.ensure(&current, &actions, self.reward(&current)) {
            self.stats.discovered += 1;
        }

        self.td_update(&current)?;

        let action = if self.config.explore && self.rng.random::<f64>() < self.config.exploration_rate
        {
            // exploration: the action tried least often so far
            self.table.least_tried_action(&current, &actions)?
        } else {
            // exploitation: the highest-valued action, first-encountered
            // on ties - deliberately not randomized
            self.table.greedy_action(&current, &actions)?
        };

        self.previous = Some((current, action));
        Ok(action)
    }

    fn finalize_episode(&mut self, won: bool) -> Result<()> {
        let Some((state, action)) = self.previous.clone() else {
            return Err(Error::MissingTableEntry {
                state: "<no previous ply>".to_string(),
            });
        };
        let past_value = self.table.value(&state, action)?;
        let terminal_value = if won {
            self.config.max_reward
        } else {
            -self.config.max_reward
        };
        self.table.set_value(&state, action, terminal_value)?;
        if !won {
            // error statistics are tracked on the loss branch only
            self.stats.sse += (past_value - terminal_value).powi(2);
            self.stats.updated += 1;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) -> Result<()> {
        self.previous = None;
        self.stats = EpisodeStats::default();
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greedy_agent() -> QLearningAgent {
        let config = QLearningConfig {
            explore: false,
            seed: Some(42),
            ..QLearningConfig::default()
        };
        QLearningAgent::new("q", config).unwrap()
    }

    #[test]
    fn config_validation() {
        let bad = QLearningConfig {
            exploration_rate: 1.5,
            ..QLearningConfig::default()
        };
        assert!(QLearningAgent::new("q", bad).is_err());

        let bad = QLearningConfig {
            discount_factor: -0.1,
            ..QLearningConfig::default()
        };
        assert!(QLearningAgent::new("q", bad).is_err());

        let bad = QLearningConfig {
            max_reward: 0.0,
            ..QLearningConfig::default()
        };
        assert!(QLearningAgent::new("q", bad).is_err());
    }

    #[test]
    fn first_selection_seeds_every_legal_action() {
        let mut agent = greedy_agent();
        let state = Nim::from_rows(vec![1, 3, 5], None);
        agent.select_move(&state).unwrap();

        let key = HeapKey::from(&[1, 3, 5][..]);
        assert_eq!(agent.table().states(), 1);
        assert_eq!(agent.stats().discovered, 1);
        for (heap, &size) in [1u32, 3, 5].iter().enumerate() {
            for quantity in 1..=size {
                let action = Nimply::new(heap, quantity);
                assert_eq!(agent.table().value(&key, action).unwrap(), 0.0);
                assert_eq!(agent.table().frequency(&key, action).unwrap(), 0);
            }
        }
    }

    #[test]
    fn selection_on_empty_board_is_rejected() {
        let mut agent = greedy_agent();
        let state = Nim::from_rows(vec![0, 0], None);
        assert!(matches!(
            agent.select_move(&state).unwrap_err(),
            Error::NoMovesAvailable
        ));
    }

    #[test]
    fn winning_finalize_writes_the_max_reward_exactly() {
        let mut agent = greedy_agent();
        let state = Nim::from_rows(vec![1, 0, 0], None);
        let action = agent.select_move(&state).unwrap();
        assert_eq!(action, Nimply::new(0, 1));

        agent.finalize_episode(true).unwrap();
        let key = HeapKey::from(&[1, 0, 0][..]);
        assert_eq!(agent.table().value(&key, action).unwrap(), 10.0);
        // the win branch leaves error statistics untouched
        assert_eq!(agent.stats().updated, 0);
        assert_eq!(agent.stats().sse, 0.0);
    }

    #[test]
    fn losing_finalize_tracks_the_error() {
        let mut agent = greedy_agent();
        let state = Nim::from_rows(vec![1, 0, 0], None);
        let action = agent.select_move(&state).unwrap();

        agent.finalize_episode(false).unwrap();
        let key = HeapKey::from(&[1, 0, 0][..]);
        assert_eq!(agent.table().value(&key, action).unwrap(), -10.0);
        assert_eq!(agent.stats().updated, 1);
        assert_eq!(agent.stats().sse, 100.0);
    }

    #[test]
    fn finalize_without_a_ply_is_a_contract_violation() {
        let mut agent = greedy_agent();
        assert!(matches!(
            agent.finalize_episode(true).unwrap_err(),
            Error::MissingTableEntry { .. }
        ));
    }

    #[test]
    fn td_update_bootstraps_from_the_next_state() {
        let mut agent = greedy_agent();
        let single = Nim::from_rows(vec![1, 0, 0], None);
        let pair = Nim::from_rows(vec![1, 1, 0], None);

        // Episode 1: the lone ply from [1,0,0] wins and is credited +10.
        agent.select_move(&single).unwrap();
        agent.finalize_episode(true).unwrap();
        agent.reset().unwrap();

        // Episode 2: moving from [1,1,0] into [1,0,0] must pull value back
        // through the TD update: with 2 known states and a first visit,
        // α = 2/(2+1) and target = 0 + 0.9 · max Q[1,0,0] = 9.
        let action = agent.select_move(&pair).unwrap();
        agent.select_move(&single).unwrap();

        let key = HeapKey::from(&[1, 1, 0][..]);
        let expected = 0.0 + (2.0 / 3.0) * (9.0 - 0.0);
        assert!((agent.table().value(&key, action).unwrap() - expected).abs() < 1e-12);
        assert_eq!(agent.stats().updated, 1);
        assert!((agent.stats().sse - expected * expected).abs() < 1e-9);
        assert_eq!(
            agent.table().frequency(&key, action).unwrap(),
            1,
            "the previous ply's visit count is bumped by the update"
        );
    }

    #[test]
    fn reset_clears_pointers_and_stats_but_keeps_tables() {
        let mut agent = greedy_agent();
        let state = Nim::from_rows(vec![2, 0], None);
        agent.select_move(&state).unwrap();
        agent.finalize_episode(false).unwrap();

        agent.reset().unwrap();
        assert_eq!(agent.stats().updated, 0);
        assert_eq!(agent.stats().discovered, 0);
        assert_eq!(agent.table().states(), 1, "tables survive the reset");
        // with no previous ply, finalize is rejected again
        assert!(agent.finalize_episode(true).is_err());
    }

    #[test]
    fn forced_exploration_picks_the_least_tried_action() {
        let config = QLearningConfig {
            exploration_rate: 1.0,
            explore: true,
            seed: Some(7),
            ..QLearningConfig::default()
        };
        let mut agent = QLearningAgent::new("q", config).unwrap();
        let state = Nim::from_rows(vec![2, 0], None);

        // both actions untried: stable order picks (0,1) first
        let action = agent.select_move(&state).unwrap();
        assert_eq!(action, Nimply::new(0, 1));
    }
}
