//! State-action value and visitation-frequency tables

use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    types::{HeapKey, Nimply},
};

/// Q-values and visit frequencies keyed by heap vector.
///
/// Both tables grow monotonically as new states and actions are
/// discovered; nothing is evicted or reset during a training run. Every
/// lookup requires the state to have passed through
/// [`ensure`](QTable::ensure) first - reads of unseeded entries are
/// caller contract violations and fail fast.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<HeapKey, HashMap<Nimply, f64>>,
    frequencies: HashMap<HeapKey, HashMap<Nimply, u32>>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of discovered states.
    pub fn states(&self) -> usize {
        self.values.len()
    }

    /// Seed entries for every listed action of `state`, leaving existing
    /// entries untouched. Returns `true` when the state itself was new.
    pub fn ensure(&mut self, state: &HeapKey, actions: &[Nimply], initial_value: f64) -> bool {
        let discovered = !self.values.contains_key(state);
        let values = self.values.entry(state.clone()).or_default();
        let frequencies = self.frequencies.entry(state.clone()).or_default();
        for &action in actions {
            values.entry(action).or_insert(initial_value);
            frequencies.entry(action).or_insert(0);
        }
        discovered
    }

    /// Q-value of a seeded state-action pair.
    pub fn value(&self, state: &HeapKey, action: Nimply) -> Result<f64> {
        self.values
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .ok_or_else(|| Error::MissingTableEntry {
                state: state.to_string(),
            })
    }

    /// Overwrite the Q-value of a seeded state-action pair.
    pub fn set_value(&mut self, state: &HeapKey, action: Nimply, value: f64) -> Result<()> {
        let slot = self
            .values
            .get_mut(state)
            .and_then(|actions| actions.get_mut(&action))
            .ok_or_else(|| Error::MissingTableEntry {
                state: state.to_string(),
            })?;
        *slot = value;
        Ok(())
    }

    /// Visit count of a seeded state-action pair.
    pub fn frequency(&self, state: &HeapKey, action: Nimply) -> Result<u32> {
        self.frequencies
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .ok_or_else(|| Error::MissingTableEntry {
                state: state.to_string(),
            })
    }

    /// Increment a visit count, returning the new value.
    pub fn bump_frequency(&mut self, state: &HeapKey, action: Nimply) -> Result<u32> {
        let slot = self
            .frequencies
            .get_mut(state)
            .and_then(|actions| actions.get_mut(&action))
            .ok_or_else(|| Error::MissingTableEntry {
                state: state.to_string(),
            })?;
        *slot += 1;
        Ok(*slot)
    }

    /// Highest stored Q-value over every seeded action of `state`.
    pub fn max_value(&self, state: &HeapKey) -> Result<f64> {
        self.values
            .get(state)
            .filter(|actions| !actions.is_empty())
            .map(|actions| actions.values().copied().fold(f64::NEG_INFINITY, f64::max))
            .ok_or_else(|| Error::MissingTableEntry {
                state: state.to_string(),
            })
    }

    /// Highest-valued action; ties resolve to the first action in
    /// `actions` order, not at random.
    pub fn greedy_action(&self, state: &HeapKey, actions: &[Nimply]) -> Result<Nimply> {
        let mut best: Option<(Nimply, f64)> = None;
        for &action in actions {
            let value = self.value(state, action)?;
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action).ok_or(Error::NoMovesAvailable)
    }

    /// Least-visited action; ties resolve to the first action in
    /// `actions` order.
    pub fn least_tried_action(&self, state: &HeapKey, actions: &[Nimply]) -> Result<Nimply> {
        let mut best: Option<(Nimply, u32)> = None;
        for &action in actions {
            let frequency = self.frequency(state, action)?;
            match best {
                Some((_, best_frequency)) if frequency >= best_frequency => {}
                _ => best = Some((action, frequency)),
            }
        }
        best.map(|(action, _)| action).ok_or(Error::NoMovesAvailable)
    }
}
