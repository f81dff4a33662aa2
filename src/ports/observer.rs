//! Observer port - abstraction for training observation
//!
//! Observers allow composable data collection during training without
//! coupling the training loop to specific output formats.

use crate::{Result, q_learning::EpisodeStats};

/// Observer trait for monitoring training runs.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. `on_episode_end(episode, won, stats)` - after each episode
/// 3. `on_training_end()` - once at the end
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with the agent's per-episode statistics.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to record outcomes or learning metrics.
    fn on_episode_end(&mut self, _episode: usize, _won: bool, _stats: EpisodeStats) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to finalize outputs or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
