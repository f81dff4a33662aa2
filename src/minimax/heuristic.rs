//! Leaf evaluation with per-agent memoization

use std::collections::HashMap;

use crate::{
    nim::{CriticalSituation, nim_sum},
    types::HeapKey,
};

/// Memo mapping heap vectors to heuristic scores.
///
/// Owned by a single minimax agent: it persists across moves within one
/// match, is flushed on agent reset, and entries are never evicted.
pub type HeuristicMemo = HashMap<HeapKey, f64>;

/// Score a leaf position from the perspective of the player to move.
///
/// Actionable critical codes mean a forced win is reachable from here;
/// an odd count of singles is lost outright; neutral positions fall back
/// to nim-sum parity (`+1` when the mover can zero the nim-sum, `-1`
/// when it is already zero). Terminal all-zero boards are never scored
/// here: the search assigns those exact values itself.
pub fn evaluate(rows: &[u32], memo: &mut HeuristicMemo) -> f64 {
    let key = HeapKey::from(rows);
    if let Some(&cached) = memo.get(&key) {
        return cached;
    }
    let value = match CriticalSituation::classify(rows) {
        CriticalSituation::OddSingles => f64::NEG_INFINITY,
        CriticalSituation::Neutral => {
            if nim_sum(rows) == 0 {
                -1.0
            } else {
                1.0
            }
        }
        _ => f64::INFINITY,
    };
    memo.insert(key, value);
    value
}
