//! Baseline strategies: uniform random play and nim-sum optimal play

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    nim::{CriticalSituation, Nim, StateSummary},
    ports::Player,
    types::Nimply,
    utils::build_rng,
};

/// Pick a non-empty heap uniformly, then a legal quantity uniformly.
///
/// Note this is not uniform over plies: every heap is equally likely
/// regardless of how many plies it offers.
fn random_ply<R: Rng>(state: &Nim, rng: &mut R) -> Result<Nimply> {
    let active: Vec<usize> = state
        .rows()
        .iter()
        .enumerate()
        .filter(|&(_, &size)| size > 0)
        .map(|(heap, _)| heap)
        .collect();
    let &heap = active.choose(rng).ok_or(Error::NoMovesAvailable)?;
    let mut limit = state.rows()[heap];
    if let Some(cap) = state.k() {
        limit = limit.min(cap);
    }
    Ok(Nimply::new(heap, rng.random_range(1..=limit)))
}

/// Uniform-random baseline player.
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(None),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Player for RandomPlayer {
    fn select_move(&mut self, state: &Nim) -> Result<Nimply> {
        random_ply(state, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Rule-based optimal player.
///
/// Critical situations are resolved to their forced ply first; otherwise
/// the player moves to a zero nim-sum when it can, picking uniformly among
/// the zeroing plies, and falls back to random play from lost positions.
pub struct NimSumPlayer {
    name: String,
    rng: StdRng,
}

impl NimSumPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(None),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Player for NimSumPlayer {
    fn select_move(&mut self, state: &Nim) -> Result<Nimply> {
        if state.is_finished() {
            return Err(Error::NoMovesAvailable);
        }
        if let Some(ply) = CriticalSituation::classify(state.rows()).forced_move(state.rows()) {
            return Ok(ply);
        }
        let summary = StateSummary::of(state);
        if let Some(&ply) = summary.winning_moves.choose(&mut self.rng) {
            return Ok(ply);
        }
        // nothing zeroes the nim-sum from here, take something at random
        random_ply(state, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ply_is_always_legal() {
        let mut player = RandomPlayer::new("random").with_seed(5);
        let state = Nim::from_rows(vec![0, 3, 1], Some(2));
        for _ in 0..50 {
            let ply = player.select_move(&state).unwrap();
            assert!(ply.heap == 1 || ply.heap == 2);
            assert!(ply.quantity >= 1);
            assert!(ply.quantity <= state.rows()[ply.heap]);
            assert!(ply.quantity <= 2);
        }
    }

    #[test]
    fn nim_sum_player_zeroes_the_nim_sum() {
        let mut player = NimSumPlayer::new("nim-sum").with_seed(5);
        let ply = player
            .select_move(&Nim::from_rows(vec![1, 3, 5], None))
            .unwrap();
        assert_eq!(ply, Nimply::new(2, 3));
    }

    #[test]
    fn nim_sum_player_resolves_critical_situations_first() {
        let mut player = NimSumPlayer::new("nim-sum").with_seed(5);
        // [1, 4, 1, 1]: even active count with one big heap - the forced
        // ply empties the big heap even though plain nim-sum play would
        // reduce it to 1 (nim-sum of the singles is 1).
        let ply = player
            .select_move(&Nim::from_rows(vec![1, 4, 1, 1], None))
            .unwrap();
        assert_eq!(ply, Nimply::new(1, 4));
    }

    #[test]
    fn nim_sum_player_rejects_an_empty_board() {
        let mut player = NimSumPlayer::new("nim-sum").with_seed(5);
        assert!(matches!(
            player.select_move(&Nim::from_rows(vec![0, 0], None)).unwrap_err(),
            Error::NoMovesAvailable
        ));
    }

    #[test]
    fn lost_positions_fall_back_to_random_play() {
        let mut player = NimSumPlayer::new("nim-sum").with_seed(5);
        // [2, 2] has nim-sum 0 and no critical code: any legal ply will do
        let state = Nim::from_rows(vec![2, 2], None);
        let ply = player.select_move(&state).unwrap();
        assert!(ply.quantity >= 1 && ply.quantity <= 2);
    }
}
