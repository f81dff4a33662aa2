//! Pit two strategies against each other

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    Result,
    minimax::MinimaxAgent,
    nim::Nim,
    pipeline::{Arena, MatchConfig, NimSumPlayer, RandomPlayer},
    ports::Player,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Uniform random play
    Random,
    /// Critical-situation and nim-sum optimal play
    NimSum,
    /// Fixed-depth minimax search
    Minimax,
}

#[derive(Debug, Parser)]
#[command(name = "nimlab-compare", about = "Play two strategies head-to-head")]
pub struct CompareArgs {
    /// Seat A strategy
    #[arg(value_enum)]
    pub a: StrategyKind,

    /// Seat B strategy
    #[arg(value_enum)]
    pub b: StrategyKind,

    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    pub games: usize,

    /// Number of heaps in the starting position (heap i holds 2i+1 objects)
    #[arg(long, default_value_t = 3)]
    pub heaps: usize,

    /// Optional per-move cap on removed objects
    #[arg(long)]
    pub cap: Option<u32>,

    /// Move-pairs of minimax look-ahead
    #[arg(long, default_value_t = 1)]
    pub look_ahead: usize,

    /// RNG seed for a reproducible match
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a JSON match summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

fn build_player(kind: StrategyKind, name: &str, look_ahead: usize) -> Result<Box<dyn Player>> {
    Ok(match kind {
        StrategyKind::Random => Box::new(RandomPlayer::new(name)),
        StrategyKind::NimSum => Box::new(NimSumPlayer::new(name)),
        StrategyKind::Minimax => Box::new(MinimaxAgent::new(name, look_ahead)?),
    })
}

fn seat_name(kind: StrategyKind, seat: char) -> String {
    let base = match kind {
        StrategyKind::Random => "random",
        StrategyKind::NimSum => "nim-sum",
        StrategyKind::Minimax => "minimax",
    };
    format!("{base}-{seat}")
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let initial = Nim::new(args.heaps, args.cap);

    let mut a = build_player(args.a, &seat_name(args.a, 'a'), args.look_ahead)?;
    let mut b = build_player(args.b, &seat_name(args.b, 'b'), args.look_ahead)?;
    if let Some(seed) = args.seed {
        a.set_rng_seed(seed)?;
        b.set_rng_seed(seed.wrapping_add(1))?;
    }

    let mut arena = Arena::new(MatchConfig {
        games: args.games,
        seed: args.seed.map(|seed| seed.wrapping_add(2)),
    });
    let result = arena.run(a.as_mut(), b.as_mut(), &initial)?;

    println!("{} won {} times", a.name(), result.wins_a);
    println!("{} won {} times", b.name(), result.wins_b);

    if let Some(path) = &args.summary {
        result.save(path)?;
        println!("summary written to {}", path.display());
    }

    Ok(())
}
