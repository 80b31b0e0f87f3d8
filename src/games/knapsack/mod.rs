//! Bounded knapsack as a deterministic game.
//!
//! Items come in types; each type has a weight, a value, and a number of
//! copies available. At every step one copy of any item that still fits is
//! put into the knapsack, collecting its value. The game ends when nothing
//! else fits.
//!
//! ## Example
//!
//! ```text
//! capacity 10, items (count, weight, value):
//!   0: (2, 5.0, 12.0)
//!   1: (3, 4.0, 11.5)
//!   2: (1, 2.5,  7.0)
//!
//! best: two copies of item 0 -> 24.0
//! ```

use rand::Rng;
use std::fmt;

use crate::dp::game::{DeterministicGame, Game, Transition};
use crate::dp::key::StateKey;

/// Parameters of one knapsack instance.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackParams {
    /// Capacity of the empty knapsack.
    pub capacity: f64,
    /// Copies available per item type.
    pub items: Vec<u32>,
}

impl KnapsackParams {
    /// Create parameters for one instance.
    pub fn new(capacity: f64, items: Vec<u32>) -> Self {
        Self { capacity, items }
    }
}

/// Remaining copies and remaining capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackState {
    /// Copies still available per item type.
    pub items: Vec<u32>,
    /// Capacity left in the knapsack.
    pub capacity: f64,
}

impl fmt::Display for KnapsackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "items:{:?} capacity:{}", self.items, self.capacity)
    }
}

/// Errors from constructing a knapsack game.
#[derive(Debug, Clone, PartialEq)]
pub enum KnapsackError {
    /// Weights and values have different lengths.
    LengthMismatch {
        /// Number of weights given.
        weights: usize,
        /// Number of values given.
        values: usize,
    },
    /// A weight is negative or not finite.
    InvalidWeight(usize, f64),
    /// A value is not finite.
    InvalidValue(usize, f64),
}

impl fmt::Display for KnapsackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnapsackError::LengthMismatch { weights, values } => {
                write!(f, "{} weights but {} values", weights, values)
            }
            KnapsackError::InvalidWeight(item, weight) => {
                write!(f, "item {} has invalid weight {}", item, weight)
            }
            KnapsackError::InvalidValue(item, value) => {
                write!(f, "item {} has invalid value {}", item, value)
            }
        }
    }
}

impl std::error::Error for KnapsackError {}

/// Knapsack game: item weights and values are fixed per game.
#[derive(Debug, Clone)]
pub struct KnapsackGame {
    weights: Vec<f64>,
    values: Vec<f64>,
}

impl KnapsackGame {
    /// Create a game from per-item weights and values.
    pub fn new(weights: Vec<f64>, values: Vec<f64>) -> Result<Self, KnapsackError> {
        if weights.len() != values.len() {
            return Err(KnapsackError::LengthMismatch {
                weights: weights.len(),
                values: values.len(),
            });
        }

        if let Some((i, &w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(KnapsackError::InvalidWeight(i, w));
        }

        if let Some((i, &v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(KnapsackError::InvalidValue(i, v));
        }

        Ok(Self { weights, values })
    }

    /// Random instance with integral weights in `1..=max_weight` and values in `1..=20`.
    pub fn random<R: Rng>(rng: &mut R, num_items: usize, max_weight: u32) -> Self {
        let weights = (0..num_items)
            .map(|_| rng.gen_range(1..=max_weight.max(1)) as f64)
            .collect();
        let values = (0..num_items).map(|_| rng.gen_range(1..=20) as f64).collect();
        Self { weights, values }
    }

    /// Number of item types.
    pub fn num_items(&self) -> usize {
        self.weights.len()
    }

    /// Per-item weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Per-item values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Game for KnapsackGame {
    type State = KnapsackState;
    type Action = usize;
    type Key = StateKey;
    type Params = KnapsackParams;

    /// Counts beyond the number of item types are dropped; missing counts are 0.
    fn reset(&self, params: KnapsackParams) -> KnapsackState {
        let mut items = params.items;
        items.resize(self.num_items(), 0);
        KnapsackState {
            items,
            capacity: params.capacity,
        }
    }

    fn state_key(&self, state: &KnapsackState) -> StateKey {
        let mut key = StateKey::with_capacity(4 * state.items.len() + 8);
        for &count in &state.items {
            key.push_u32(count);
        }
        key.push_f64(state.capacity);
        key
    }

    fn action_domain(&self, state: &KnapsackState) -> Vec<usize> {
        self.weights
            .iter()
            .zip(&state.items)
            .enumerate()
            .filter(|(_, (&weight, &count))| count > 0 && weight <= state.capacity)
            .map(|(item, _)| item)
            .collect()
    }

    fn action_name(&self, action: &usize) -> String {
        format!("item {}", action)
    }

    fn state_description(&self, state: &KnapsackState) -> String {
        format!("{}", state)
    }
}

impl DeterministicGame for KnapsackGame {
    fn step(&self, state: &KnapsackState, action: &usize) -> Transition<KnapsackState> {
        let mut next = state.clone();
        next.items[*action] -= 1;
        next.capacity -= self.weights[*action];
        Transition::new(next, self.values[*action])
    }
}
