//! Fixed-depth minimax over the lookahead tree

use rand::{Rng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    minimax::{
        game_tree::{GameTree, NodeId},
        heuristic::{self, HeuristicMemo},
    },
    types::Nimply,
};

/// Value and ply produced by one search invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Minimax value of the root.
    pub value: f64,
    /// Ply leading to the selected child.
    pub ply: Nimply,
}

/// Recursive min/max over a built tree, alternating by ply.
///
/// At depth 0 an emptied board is exact: `+∞` under a maximizing-to-move
/// assignment (the opponent delivered the emptying ply and lost) and `-∞`
/// otherwise; any other leaf defers to the memoized heuristic. Every
/// node's value is cached on the node for the selection pass.
pub fn minmax(
    tree: &mut GameTree,
    node: NodeId,
    depth: usize,
    maximising: bool,
    memo: &mut HeuristicMemo,
) -> f64 {
    if depth == 0 {
        let value = {
            let rows = &tree.node(node).state;
            if rows.iter().sum::<u32>() == 0 {
                if maximising {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                }
            } else {
                heuristic::evaluate(rows, memo)
            }
        };
        tree.node_mut(node).value = value;
        return value;
    }

    let children = tree.node(node).children.clone();
    let mut value = if maximising {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for child in children {
        let child_value = minmax(tree, child, depth - 1, !maximising, memo);
        value = if maximising {
            value.max(child_value)
        } else {
            value.min(child_value)
        };
    }
    tree.node_mut(node).value = value;
    value
}

/// Search `rows` to `2 × look_ahead` plies and select a ply.
///
/// Ties at the root are broken uniformly at random so the agent's play
/// stays unpredictable; the concrete ply is recovered by diffing the
/// chosen child against the root. The tree is dropped on return.
///
/// # Errors
///
/// Returns [`Error::NoMovesAvailable`] when the root has no legal ply,
/// which callers are contracted never to allow.
pub fn search<R: Rng>(
    rows: &[u32],
    look_ahead: usize,
    memo: &mut HeuristicMemo,
    rng: &mut R,
) -> Result<SearchOutcome> {
    // depth of the tree is double the move-pairs looked ahead
    let depth = look_ahead * 2;
    let mut tree = GameTree::build(rows, depth);
    let value = minmax(&mut tree, GameTree::ROOT, depth, true, memo);

    let viable: Vec<NodeId> = tree
        .node(GameTree::ROOT)
        .children
        .iter()
        .copied()
        .filter(|&child| tree.node(child).value == value)
        .collect();
    let chosen = *viable.choose(rng).ok_or(Error::NoMovesAvailable)?;

    // the single heap that shrank identifies the ply
    let root_rows = &tree.node(GameTree::ROOT).state;
    let child_rows = &tree.node(chosen).state;
    let (heap, quantity) = root_rows
        .iter()
        .zip(child_rows)
        .enumerate()
        .map(|(heap, (&before, &after))| (heap, before - after))
        .max_by_key(|&(_, taken)| taken)
        .ok_or(Error::NoMovesAvailable)?;

    Ok(SearchOutcome {
        value,
        ply: Nimply::new(heap, quantity),
    })
}
