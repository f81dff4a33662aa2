//! Cooked facts about a position, computed fresh per query

use crate::{nim::Nim, types::Nimply};

/// Bitwise XOR reduction over heap sizes.
///
/// A zero nim-sum marks a theoretically lost position for the player to
/// move under optimal opposition.
pub fn nim_sum(rows: &[u32]) -> u32 {
    rows.iter().fold(0, |acc, &row| acc ^ row)
}

/// Named facts about a position, derived from the heap vector.
///
/// This is an explicit record rather than a string-keyed map: every
/// consumer names the field it needs and nothing else.
#[derive(Debug, Clone)]
pub struct StateSummary {
    /// Every legal ply, in (heap, quantity) generation order. Honors the
    /// per-move cap when one is configured.
    pub possible_moves: Vec<Nimply>,
    /// Number of non-empty heaps.
    pub active_rows: usize,
    /// XOR over all heap sizes.
    pub nim_sum: u32,
    /// Index of the smallest non-empty heap, if any.
    pub shortest_row: Option<usize>,
    /// Index of the largest heap, if any.
    pub longest_row: Option<usize>,
    /// Legal plies that leave the opponent with a zero nim-sum.
    pub winning_moves: Vec<Nimply>,
}

impl StateSummary {
    /// Cook a summary for `state`.
    pub fn of(state: &Nim) -> Self {
        let rows = state.rows();
        let cap = state.k();

        let possible_moves: Vec<Nimply> = rows
            .iter()
            .enumerate()
            .flat_map(|(heap, &size)| (1..=size).map(move |quantity| Nimply::new(heap, quantity)))
            .filter(|ply| cap.is_none_or(|cap| ply.quantity <= cap))
            .collect();

        let nim_sum = nim_sum(rows);

        // Removing q from heap h zeroes the nim-sum iff the new size equals
        // the XOR of the rest, i.e. nim_sum ^ rows[h].
        let winning_moves = possible_moves
            .iter()
            .copied()
            .filter(|ply| rows[ply.heap] - ply.quantity == nim_sum ^ rows[ply.heap])
            .collect();

        let shortest_row = rows
            .iter()
            .enumerate()
            .filter(|&(_, &size)| size > 0)
            .min_by_key(|&(_, &size)| size)
            .map(|(heap, _)| heap);
        let longest_row = rows
            .iter()
            .enumerate()
            .max_by_key(|&(heap, &size)| (size, std::cmp::Reverse(heap)))
            .map(|(heap, _)| heap);

        Self {
            possible_moves,
            active_rows: rows.iter().filter(|&&size| size > 0).count(),
            nim_sum,
            shortest_row,
            longest_row,
            winning_moves,
        }
    }
}
