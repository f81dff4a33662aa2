//! Critical-situation classification for small-heap endgames
//!
//! A critical situation is an endgame pattern that can be resolved without
//! nim-sum computation. The classifier feeds both the minimax heuristic and
//! the rule-based optimal player, so it is recomputed fresh for every
//! queried state rather than derived from any cache.

use crate::types::Nimply;

/// Tactical category of a position, checked in priority order (first
/// match wins).
///
/// The first four codes resolve to exactly one forced ply; the remaining
/// codes either end the game or require nim-sum analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticalSituation {
    /// One heap above 1, the rest 0 or 1, even count of non-empty heaps
    /// (e.g. `[1, a, 1, 1, 0, 0]`): take the big heap entirely.
    BigHeapEvenActive,
    /// One heap above 1, the rest 0 or 1, odd count of non-empty heaps
    /// (e.g. `[1, a, 1, 0, 0]`): take the big heap down to 1.
    BigHeapOddActive,
    /// One heap above 1 and no singles (e.g. `[a, 0, 0]`): take it down
    /// to 1.
    LoneBigHeap,
    /// Only empty heaps and an even count of singles: take one object
    /// from the first single.
    EvenSingles,
    /// Empty board: the opponent emptied it and has already lost.
    Cleared,
    /// Only empty heaps and an odd count of singles: lost for the player
    /// to move.
    OddSingles,
    /// Anything else: settled by nim-sum analysis instead.
    Neutral,
}

impl CriticalSituation {
    /// Classify a heap vector.
    pub fn classify(rows: &[u32]) -> Self {
        let n_heaps = rows.len();
        let zeros = rows.iter().filter(|&&row| row == 0).count();
        let ones = rows.iter().filter(|&&row| row == 1).count();
        let active = n_heaps - zeros;
        let above_one = active - ones;

        if active % 2 == 0 && above_one == 1 {
            return Self::BigHeapEvenActive;
        }
        if active % 2 == 1 && above_one == 1 {
            return Self::BigHeapOddActive;
        }
        if above_one == 1 && ones == 0 {
            return Self::LoneBigHeap;
        }
        if ones % 2 == 0 && zeros + ones == n_heaps {
            return Self::EvenSingles;
        }
        if zeros == n_heaps {
            return Self::Cleared;
        }
        if ones % 2 == 1 && zeros + ones == n_heaps {
            return Self::OddSingles;
        }
        Self::Neutral
    }

    /// Resolve an actionable code to its one forced ply.
    ///
    /// Returns `None` for codes with no forced ply: a cleared board has
    /// no move at all, an odd-singles position is lost however the mover
    /// plays, and neutral positions need nim-sum analysis.
    pub fn forced_move(self, rows: &[u32]) -> Option<Nimply> {
        match self {
            Self::BigHeapEvenActive => {
                let (heap, &size) = argmax(rows)?;
                Some(Nimply::new(heap, size))
            }
            Self::BigHeapOddActive | Self::LoneBigHeap => {
                let (heap, &size) = argmax(rows)?;
                Some(Nimply::new(heap, size - 1))
            }
            Self::EvenSingles => rows
                .iter()
                .position(|&row| row == 1)
                .map(|heap| Nimply::new(heap, 1)),
            Self::Cleared | Self::OddSingles | Self::Neutral => None,
        }
    }
}

/// First-encountered largest heap.
fn argmax(rows: &[u32]) -> Option<(usize, &u32)> {
    rows.iter()
        .enumerate()
        .max_by_key(|&(heap, &size)| (size, std::cmp::Reverse(heap)))
}
