//! Nim heap state with in-place move application

use std::fmt;

use crate::{
    error::{Error, Result},
    types::Nimply,
};

/// A Nim position: one object count per heap, with an optional per-move cap.
///
/// The heap vector is mutated in place as a game progresses; fresh vectors
/// are materialized only while building a lookahead tree, which is
/// discarded after each move selection.
///
/// Play convention: the player who empties the last heap loses.
///
/// # Examples
///
/// ```
/// use nimlab::nim::Nim;
/// use nimlab::types::Nimply;
///
/// let mut state = Nim::from_rows(vec![1, 3, 5], None);
/// state.nimming(Nimply::new(2, 3)).unwrap();
/// assert_eq!(state.rows(), &[1, 3, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nim {
    rows: Vec<u32>,
    k: Option<u32>,
}

impl Nim {
    /// Classic layout: heap `i` starts with `2·i + 1` objects.
    pub fn new(num_rows: usize, k: Option<u32>) -> Self {
        Self {
            rows: (0..num_rows).map(|i| i as u32 * 2 + 1).collect(),
            k,
        }
    }

    /// Explicit heap sizes.
    pub fn from_rows(rows: Vec<u32>, k: Option<u32>) -> Self {
        Self { rows, k }
    }

    /// Current heap sizes, in board order.
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    /// Per-move cap on removed objects, if configured.
    pub fn k(&self) -> Option<u32> {
        self.k
    }

    /// Total objects left on the board.
    pub fn total(&self) -> u32 {
        self.rows.iter().sum()
    }

    /// Whether the board is empty. The player who emptied it has lost.
    pub fn is_finished(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }

    /// Apply a ply in place. Illegal plies are rejected, never clamped.
    ///
    /// # Errors
    ///
    /// * [`Error::HeapOutOfRange`] if the heap index does not exist
    /// * [`Error::IllegalMove`] if the quantity exceeds the heap's size
    /// * [`Error::ExceedsCap`] if the quantity exceeds the per-move cap
    pub fn nimming(&mut self, ply: Nimply) -> Result<()> {
        let available = *self.rows.get(ply.heap).ok_or(Error::HeapOutOfRange {
            heap: ply.heap,
            heaps: self.rows.len(),
        })?;
        if ply.quantity > available {
            return Err(Error::IllegalMove {
                heap: ply.heap,
                quantity: ply.quantity,
                available,
            });
        }
        if let Some(cap) = self.k {
            if ply.quantity > cap {
                return Err(Error::ExceedsCap {
                    quantity: ply.quantity,
                    cap,
                });
            }
        }
        self.rows[ply.heap] -= ply.quantity;
        Ok(())
    }
}

impl fmt::Display for Nim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{row}")?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn classic_layout_is_odd_rows() {
        let state = Nim::new(4, None);
        assert_eq!(state.rows(), &[1, 3, 5, 7]);
        assert_eq!(state.total(), 16);
        assert!(!state.is_finished());
    }

    #[test]
    fn nimming_subtracts_in_place() {
        let mut state = Nim::from_rows(vec![1, 3, 5], None);
        state.nimming(Nimply::new(1, 2)).unwrap();
        assert_eq!(state.rows(), &[1, 1, 5]);
    }

    #[test]
    fn nimming_rejects_oversized_quantity() {
        let mut state = Nim::from_rows(vec![1, 3], None);
        let err = state.nimming(Nimply::new(0, 2)).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { heap: 0, .. }));
        // never clamped
        assert_eq!(state.rows(), &[1, 3]);
    }

    #[test]
    fn nimming_rejects_capped_quantity() {
        let mut state = Nim::from_rows(vec![1, 3, 5], Some(2));
        let err = state.nimming(Nimply::new(2, 3)).unwrap_err();
        assert!(matches!(err, Error::ExceedsCap { quantity: 3, cap: 2 }));
        assert_eq!(state.rows(), &[1, 3, 5]);
    }

    #[test]
    fn nimming_rejects_bad_heap_index() {
        let mut state = Nim::from_rows(vec![1, 3], None);
        let err = state.nimming(Nimply::new(5, 1)).unwrap_err();
        assert!(matches!(err, Error::HeapOutOfRange { heap: 5, heaps: 2 }));
    }

    #[test]
    fn finished_when_all_heaps_empty() {
        let mut state = Nim::from_rows(vec![0, 1], None);
        assert!(!state.is_finished());
        state.nimming(Nimply::new(1, 1)).unwrap();
        assert!(state.is_finished());
    }

    #[test]
    fn display_matches_row_order() {
        let state = Nim::from_rows(vec![1, 3, 5], None);
        assert_eq!(state.to_string(), "<1 3 5>");
    }
}
