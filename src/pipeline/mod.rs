//! Match driving, baseline strategies, and the training pipeline

pub mod arena;
pub mod baselines;
pub mod observers;
pub mod training;

// Public re-exports
pub use arena::{Arena, GameOutcome, MatchConfig, MatchResult, Seat};
pub use baselines::{NimSumPlayer, RandomPlayer};
pub use observers::{EpisodeSample, MetricsObserver, ProgressObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Observer, Player};
