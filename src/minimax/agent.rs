//! Minimax player with a per-instance heuristic memo

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    error::{Error, Result},
    minimax::{heuristic::HeuristicMemo, search},
    nim::Nim,
    ports::Player,
    types::Nimply,
    utils::build_rng,
};

/// Fixed-depth minimax player.
///
/// The heuristic memo persists across moves within one match and is
/// flushed by [`Player::reset`]; the lookahead tree itself never outlives
/// a single selection.
#[derive(Debug)]
pub struct MinimaxAgent {
    name: String,
    look_ahead: usize,
    memo: HeuristicMemo,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl MinimaxAgent {
    /// Create an agent looking ahead `look_ahead` full move-pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when `look_ahead` is zero:
    /// a depth-0 tree has no children to select among.
    pub fn new(name: impl Into<String>, look_ahead: usize) -> Result<Self> {
        if look_ahead == 0 {
            return Err(Error::InvalidConfiguration {
                message: "look_ahead must be at least 1".to_string(),
            });
        }
        Ok(Self {
            name: name.into(),
            look_ahead,
            memo: HeuristicMemo::new(),
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// Memoized leaf evaluations accumulated so far.
    pub fn memo(&self) -> &HeuristicMemo {
        &self.memo
    }

    pub fn look_ahead(&self) -> usize {
        self.look_ahead
    }
}

impl Player for MinimaxAgent {
    fn select_move(&mut self, state: &Nim) -> Result<Nimply> {
        let outcome = search::search(state.rows(), self.look_ahead, &mut self.memo, &mut self.rng)?;
        Ok(outcome.ply)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) -> Result<()> {
        self.memo.clear();
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_look_ahead_is_rejected() {
        assert!(MinimaxAgent::new("minimax", 0).is_err());
    }

    #[test]
    fn memo_fills_during_play_and_flushes_on_reset() {
        let mut agent = MinimaxAgent::new("minimax", 1).unwrap().with_seed(11);
        let state = Nim::from_rows(vec![1, 3, 5], None);

        agent.select_move(&state).unwrap();
        assert!(!agent.memo().is_empty());

        agent.reset().unwrap();
        assert!(agent.memo().is_empty());
    }

    #[test]
    fn selected_ply_is_legal() {
        let mut agent = MinimaxAgent::new("minimax", 2).unwrap().with_seed(11);
        let mut state = Nim::from_rows(vec![2, 4, 1], None);
        let ply = agent.select_move(&state).unwrap();
        state.nimming(ply).unwrap();
    }
}
