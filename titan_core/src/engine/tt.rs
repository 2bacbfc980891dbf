use crate::engine::Score;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TTFlag {
    Exact,
    LowerBound, // Beta cutoff (fail-high)
    UpperBound, // Alpha cutoff (fail-low)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TTEntry {
    pub value: Score,
    pub ply: usize,
    pub flag: TTFlag,
}

/// Memo of minimax values for a single top-level search, keyed by canonical state key.
///
/// Entries only answer probes from the same ply they were computed at, since the
/// game's cutoff is a function of depth and a value searched to a different horizon
/// is a different value.
pub struct TranspositionTable<K> {
    entries: HashMap<K, TTEntry>,
    probes: u64,
    hits: u64,
    stores: u64,
}

impl<K: Eq + Hash> Default for TranspositionTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> TranspositionTable<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            probes: 0,
            hits: 0,
            stores: 0,
        }
    }

    /// Returns a cached value usable inside the `(alpha, beta)` window at `ply`.
    ///
    /// Exact entries always answer. A lower bound answers only when it already fails
    /// high against `beta`, an upper bound only when it already fails low against `alpha`.
    pub fn probe(&mut self, key: &K, alpha: Score, beta: Score, ply: usize) -> Option<Score> {
        self.probes += 1;
        let entry = self.entries.get(key)?;
        if entry.ply != ply {
            return None;
        }
        let usable = match entry.flag {
            TTFlag::Exact => true,
            TTFlag::LowerBound => entry.value >= beta,
            TTFlag::UpperBound => entry.value <= alpha,
        };
        if usable {
            self.hits += 1;
            Some(entry.value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<TTEntry> {
        self.entries.get(key).copied()
    }

    pub fn store(&mut self, key: K, value: Score, ply: usize, flag: TTFlag) {
        self.stores += 1;
        self.entries.insert(key, TTEntry { value, ply, flag });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn probes(&self) -> u64 {
        self.probes
    }

    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub const fn stores(&self) -> u64 {
        self.stores
    }
}
