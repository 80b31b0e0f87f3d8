//! Memo table for solved subproblems.
//!
//! Maps a state's canonical key to the optimal action and value found for
//! it. Entries are only ever added while a solver is alive; nothing is
//! evicted.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// A solved subproblem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoEntry<A> {
    /// Optimal first action, `None` for terminal states.
    pub action: Option<A>,
    /// Optimal (expected) accumulated reward from this state onward.
    pub value: f64,
}

impl<A> MemoEntry<A> {
    /// Entry for a state with no available actions.
    pub fn terminal() -> Self {
        Self {
            action: None,
            value: 0.0,
        }
    }
}

/// Owned memo table: state key -> [`MemoEntry`].
#[derive(Debug, Clone)]
pub struct MemoTable<K, A> {
    entries: FxHashMap<K, MemoEntry<A>>,
}

impl<K: Eq + Hash, A> Default for MemoTable<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, A> MemoTable<K, A> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Create a table with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Look up a solved subproblem.
    pub fn get(&self, key: &K) -> Option<&MemoEntry<A>> {
        self.entries.get(key)
    }

    /// Record a solved subproblem.
    ///
    /// Each key is solved once per table, so an existing entry for `key` is
    /// a contract violation by the game (a cycle or an unstable key).
    pub fn insert(&mut self, key: K, entry: MemoEntry<A>) {
        let previous = self.entries.insert(key, entry);
        debug_assert!(previous.is_none(), "subproblem memoized twice");
    }

    /// Check if a key has been solved.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of solved subproblems.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been solved yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all solved subproblems.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &MemoEntry<A>)> {
        self.entries.iter()
    }

    /// Iterate over non-terminal subproblems and their optimal actions.
    pub fn policy(&self) -> impl Iterator<Item = (&K, &A)> {
        self.entries
            .iter()
            .filter_map(|(key, entry)| entry.action.as_ref().map(|action| (key, action)))
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Eq + Hash + Clone, A: Clone> MemoTable<K, A> {
    /// Export the table to a serializable format.
    pub fn export(&self) -> MemoExport<K, A> {
        MemoExport {
            entries: self
                .entries
                .iter()
                .map(|(key, entry)| MemoRecord {
                    key: key.clone(),
                    action: entry.action.clone(),
                    value: entry.value,
                })
                .collect(),
        }
    }
}

/// One exported memo entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoRecord<K, A> {
    /// Canonical state key.
    pub key: K,
    /// Optimal first action.
    pub action: Option<A>,
    /// Optimal value.
    pub value: f64,
}

/// Serializable export format for a memo table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoExport<K, A> {
    /// All solved subproblems, in table iteration order.
    pub entries: Vec<MemoRecord<K, A>>,
}
