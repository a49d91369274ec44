//! Learned move values keyed by position and move.

use breakthrough_engine::{Move, StateFingerprint};
use rustc_hash::FxHashMap;

/// Mapping from `(position, move)` to a learned value.
///
/// Unseen keys read as `0.0`. The table may be given a size limit; once full,
/// values for new keys are dropped while existing keys keep updating.
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    values: FxHashMap<(StateFingerprint, Move), f64>,
    limit: Option<usize>,
}

impl ValueTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            values: FxHashMap::default(),
            limit,
        }
    }

    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.values.len() >= limit)
    }

    #[must_use]
    pub fn get(&self, state: StateFingerprint, mv: Move) -> f64 {
        self.values.get(&(state, mv)).copied().unwrap_or(0.0)
    }

    /// Stores `value`; returns `false` if the key is new and the table is full.
    pub fn set(&mut self, state: StateFingerprint, mv: Move, value: f64) -> bool {
        let key = (state, mv);
        if let Some(slot) = self.values.get_mut(&key) {
            *slot = value;
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.values.insert(key, value);
        true
    }

    /// Largest value among `moves` in `state`, or `0.0` when `moves` is empty.
    #[must_use]
    pub fn max_value(&self, state: StateFingerprint, moves: &[Move]) -> f64 {
        moves
            .iter()
            .map(|&mv| self.get(state, mv))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Move with the largest value in `state`; the first one wins ties.
    #[must_use]
    pub fn best_move(&self, state: StateFingerprint, moves: &[Move]) -> Option<Move> {
        let mut best: Option<(Move, f64)> = None;
        for &mv in moves {
            let value = self.get(state, mv);
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((mv, value));
            }
        }
        best.map(|(mv, _)| mv)
    }

    /// One-step update: `value ← (1-α)·value + α·(reward + γ·next_max)`.
    ///
    /// Returns the updated value (also when the table was full and it was not stored).
    pub fn update(
        &mut self,
        state: StateFingerprint,
        mv: Move,
        reward: f64,
        next_max: f64,
        learning_rate: f64,
        discount: f64,
    ) -> f64 {
        let old = self.get(state, mv);
        let value = (1.0 - learning_rate) * old + learning_rate * (reward + discount * next_max);
        if !self.set(state, mv, value) {
            tracing::trace!(len = self.len(), "value table full, dropping new entry");
        }
        value
    }
}
