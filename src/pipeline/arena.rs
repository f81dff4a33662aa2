//! Head-to-head match driver

use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{Result, nim::Nim, ports::Player, utils::build_rng};

/// The two seats in a head-to-head match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }
}

/// Outcome of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// The winning seat; its opponent emptied the board.
    pub winner: Seat,
    /// Total plies played.
    pub plies: usize,
}

/// Match configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of games to play.
    pub games: usize,
    /// Seed for the opening-seat draw.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: None,
        }
    }
}

/// Aggregate result of a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub games: usize,
    pub wins_a: usize,
    pub wins_b: usize,
    pub win_rate_a: f64,
}

impl MatchResult {
    pub fn new(games: usize, wins_a: usize) -> Self {
        let win_rate_a = if games > 0 {
            wins_a as f64 / games as f64
        } else {
            0.0
        };
        Self {
            games,
            wins_a,
            wins_b: games - wins_a,
            win_rate_a,
        }
    }

    /// Save the result to a JSON file.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Alternating-turns driver over the [`Player`] port.
///
/// The driver owns the live board: each turn it asks the mover for a ply
/// and applies it in place. The mover who empties the board loses.
pub struct Arena {
    config: MatchConfig,
    rng: StdRng,
}

impl Arena {
    pub fn new(config: MatchConfig) -> Self {
        let rng = build_rng(config.seed);
        Self { config, rng }
    }

    /// Play one game to completion from a copy of `initial`.
    pub fn play_game(
        &mut self,
        a: &mut dyn Player,
        b: &mut dyn Player,
        initial: &Nim,
        a_opens: bool,
    ) -> Result<GameOutcome> {
        let mut state = initial.clone();
        let mut plies = 0usize;
        let mut turn = if a_opens { Seat::A } else { Seat::B };
        loop {
            let mover: &mut dyn Player = match turn {
                Seat::A => &mut *a,
                Seat::B => &mut *b,
            };
            let ply = mover.select_move(&state)?;
            state.nimming(ply)?;
            plies += 1;
            if state.is_finished() {
                return Ok(GameOutcome {
                    winner: turn.other(),
                    plies,
                });
            }
            turn = turn.other();
        }
    }

    /// Play one game with a randomly drawn opening seat.
    pub fn play_random_opening(
        &mut self,
        a: &mut dyn Player,
        b: &mut dyn Player,
        initial: &Nim,
    ) -> Result<GameOutcome> {
        let a_opens = self.rng.random::<f64>() <= 0.5;
        self.play_game(a, b, initial, a_opens)
    }

    /// Play the configured number of games, resetting both players and
    /// redrawing the opening seat before each one.
    pub fn run(&mut self, a: &mut dyn Player, b: &mut dyn Player, initial: &Nim) -> Result<MatchResult> {
        let mut wins_a = 0;
        for _ in 0..self.config.games {
            a.reset()?;
            b.reset()?;
            let outcome = self.play_random_opening(a, b, initial)?;
            if outcome.winner == Seat::A {
                wins_a += 1;
            }
        }
        Ok(MatchResult::new(self.config.games, wins_a))
    }
}
