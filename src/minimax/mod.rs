//! Fixed-depth minimax search with memoized critical-situation heuristics

pub mod agent;
pub mod game_tree;
pub mod heuristic;
pub mod search;

// Public re-exports
pub use agent::MinimaxAgent;
pub use game_tree::{GameNode, GameTree, NodeId};
pub use heuristic::HeuristicMemo;
pub use search::{SearchOutcome, minmax, search};
