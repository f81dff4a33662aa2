//! Train the Q-learning agent against a fixed opponent

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    Result,
    nim::Nim,
    pipeline::{
        NimSumPlayer, ProgressObserver, RandomPlayer, TrainingConfig, TrainingPipeline,
    },
    ports::Player,
    q_learning::{QLearningAgent, QLearningConfig},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    /// Uniform random play
    Random,
    /// Critical-situation and nim-sum optimal play
    NimSum,
}

#[derive(Debug, Parser)]
#[command(name = "nimlab-train", about = "Train a Q-learning agent")]
pub struct TrainArgs {
    /// Number of heaps in the starting position (heap i holds 2i+1 objects)
    #[arg(long, default_value_t = 3)]
    pub heaps: usize,

    /// Optional per-move cap on removed objects
    #[arg(long)]
    pub cap: Option<u32>,

    /// Training episodes
    #[arg(long, default_value_t = 10_000)]
    pub episodes: usize,

    /// Opponent strategy
    #[arg(long, value_enum, default_value = "nim-sum")]
    pub opponent: OpponentKind,

    /// Fraction of moves spent on the least-tried action
    #[arg(long, default_value_t = 0.1)]
    pub exploration_rate: f64,

    /// Discount factor
    #[arg(long, default_value_t = 0.9)]
    pub discount_factor: f64,

    /// Terminal reward magnitude
    #[arg(long, default_value_t = 10.0)]
    pub max_reward: f64,

    /// RNG seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a JSON training summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let initial = Nim::new(args.heaps, args.cap);

    let config = QLearningConfig {
        exploration_rate: args.exploration_rate,
        discount_factor: args.discount_factor,
        max_reward: args.max_reward,
        explore: true,
        seed: args.seed,
    };
    let mut agent = QLearningAgent::new("q-learning", config)?;

    let mut opponent: Box<dyn Player> = match args.opponent {
        OpponentKind::Random => Box::new(RandomPlayer::new("random")),
        OpponentKind::NimSum => Box::new(NimSumPlayer::new("nim-sum")),
    };

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: args.episodes,
        seed: args.seed,
    });
    if !args.quiet {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = pipeline.run(&mut agent, opponent.as_mut(), &initial)?;

    println!(
        "trained {} episodes vs {}: {} wins ({:.1}%), final-episode MSE {:.4}, {} states known",
        result.episodes,
        opponent.name(),
        result.wins,
        result.win_rate * 100.0,
        result.final_mse,
        agent.table().states(),
    );

    if let Some(path) = &args.summary {
        result.save(path)?;
        println!("summary written to {}", path.display());
    }

    Ok(())
}
