//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single ply: remove `quantity` objects from heap `heap`.
///
/// A ply is legal iff `quantity` does not exceed the target heap's size
/// and, when a per-move cap is configured, does not exceed the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Nimply {
    pub heap: usize,
    pub quantity: u32,
}

impl Nimply {
    /// Create a new ply.
    pub fn new(heap: usize, quantity: u32) -> Self {
        Self { heap, quantity }
    }
}

impl fmt::Display for Nimply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from heap {}", self.quantity, self.heap)
    }
}

/// An order-sensitive, value-compared key over heap sizes.
///
/// Memo and Q-table lookups must hit whenever two distinct state objects
/// hold equal contents, so tables are keyed by the heap vector itself
/// rather than by object identity.
///
/// # Examples
///
/// ```
/// use nimlab::types::HeapKey;
///
/// let a = HeapKey::from(&[1, 3, 5][..]);
/// let b = HeapKey::from(vec![1, 3, 5]);
/// assert_eq!(a, b);
/// assert_ne!(a, HeapKey::from(&[5, 3, 1][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeapKey(Box<[u32]>);

impl HeapKey {
    /// The heap sizes this key was built from.
    pub fn rows(&self) -> &[u32] {
        &self.0
    }
}

impl From<&[u32]> for HeapKey {
    fn from(rows: &[u32]) -> Self {
        HeapKey(rows.into())
    }
}

impl From<Vec<u32>> for HeapKey {
    fn from(rows: Vec<u32>) -> Self {
        HeapKey(rows.into_boxed_slice())
    }
}

impl fmt::Display for HeapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{row}")?;
        }
        write!(f, ">")
    }
}
