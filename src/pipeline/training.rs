//! Training pipeline for the Q-learning agent

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    nim::Nim,
    pipeline::arena::{Arena, MatchConfig, Seat},
    ports::{Observer, Player},
    q_learning::{EpisodeStats, QLearningAgent},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub episodes: usize,

    /// Episodes won by the agent
    pub wins: usize,

    /// Episodes lost by the agent
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Q-value mean squared error of the final episode
    pub final_mse: f64,

    /// States discovered during the final episode
    pub final_discovered: usize,
}

impl TrainingResult {
    pub fn new(episodes: usize, wins: usize, final_stats: EpisodeStats) -> Self {
        let win_rate = if episodes > 0 {
            wins as f64 / episodes as f64
        } else {
            0.0
        };
        Self {
            episodes,
            wins,
            losses: episodes - wins,
            win_rate,
            final_mse: final_stats.mse(),
            final_discovered: final_stats.discovered,
        }
    }

    /// Save the result to a JSON file.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Episode loop for a learning agent against a fixed opponent.
///
/// Each episode resets both players, plays one game from a random
/// opening seat, and applies the terminal reward through exactly one
/// `finalize_episode` call. The agent's tables accumulate across every
/// episode of the run.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given agent and opponent.
    pub fn run(
        &mut self,
        agent: &mut QLearningAgent,
        opponent: &mut dyn Player,
        initial: &Nim,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }
        let mut arena = Arena::new(MatchConfig {
            games: 1,
            seed: self.config.seed.map(|seed| seed.wrapping_add(2)),
        });

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut wins = 0;
        let mut final_stats = EpisodeStats::default();
        for episode in 0..self.config.episodes {
            agent.reset()?;
            opponent.reset()?;

            let outcome = arena.play_random_opening(agent, opponent, initial)?;
            let won = outcome.winner == Seat::A;
            agent.finalize_episode(won)?;
            if won {
                wins += 1;
            }

            final_stats = agent.stats();
            for observer in &mut self.observers {
                observer.on_episode_end(episode, won, final_stats)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(self.config.episodes, wins, final_stats))
    }
}
