//! Training observers: progress reporting and metrics collection

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Result, ports::Observer, q_learning::EpisodeStats};

/// Progress bar observer - shows episodes and the running win tally
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            losses: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, won: bool, _stats: EpisodeStats) -> Result<()> {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("W:{} L:{}", self.wins, self.losses));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("W:{} L:{}", self.wins, self.losses));
        }
        Ok(())
    }
}

/// Metrics observer - records per-episode learning statistics
///
/// Keeps one sample per episode: whether the episode was won, the
/// Q-value MSE of its updates, and how many states it discovered.
pub struct MetricsObserver {
    samples: Vec<EpisodeSample>,
}

/// One recorded training episode
#[derive(Debug, Clone, Copy)]
pub struct EpisodeSample {
    pub episode: usize,
    pub won: bool,
    pub mse: f64,
    pub discovered: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Recorded samples, one per episode, in order.
    pub fn samples(&self) -> &[EpisodeSample] {
        &self.samples
    }

    /// Win rate over the recorded episodes.
    pub fn win_rate(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().filter(|sample| sample.won).count() as f64 / self.samples.len() as f64
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, episode: usize, won: bool, stats: EpisodeStats) -> Result<()> {
        self.samples.push(EpisodeSample {
            episode,
            won,
            mse: stats.mse(),
            discovered: stats.discovered,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_observer_records_one_sample_per_episode() {
        let mut observer = MetricsObserver::new();
        observer.on_training_start(3).unwrap();
        for episode in 0..3 {
            let stats = EpisodeStats {
                sse: 4.0,
                updated: 2,
                discovered: episode,
            };
            observer.on_episode_end(episode, episode % 2 == 0, stats).unwrap();
        }
        observer.on_training_end().unwrap();

        assert_eq!(observer.samples().len(), 3);
        assert_eq!(observer.samples()[1].discovered, 1);
        assert_eq!(observer.samples()[0].mse, 2.0);
        assert!((observer.win_rate() - 2.0 / 3.0).abs() < 1e-12);
    }
}
