//! Game traits for the memoized DP solver.
//!
//! Any problem that can be phrased as a finite, acyclic state graph can be
//! solved by implementing [`Game`] plus one of [`DeterministicGame`] or
//! [`StochasticGame`]. The solver only ever talks to a game through these
//! traits, so games stay free of solver details.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for actions offered at a state.
///
/// Actions are small identifiers that only mean something relative to the
/// state that offered them.
pub trait Action: Clone + Eq + Debug + Send + Sync {
    /// Short label used in reports and memo exports.
    fn label(&self) -> String;
}

/// The base trait shared by deterministic and stochastic games.
///
/// Static problem data (item weights, scoring tables, ...) belongs in the
/// implementing type and is fixed at construction time. Everything that
/// changes while the problem is being solved lives in [`Game::State`].
///
/// # Example
/// ```ignore
/// struct MyGame { weights: Vec<f64> }
///
/// impl Game for MyGame {
///     type State = MyState;
///     type Action = usize;
///     type Key = MyState;
///     type Params = f64;
///
///     // ... implement required methods
/// }
/// ```
pub trait Game {
    /// A snapshot of problem progress. Never mutated by the solver.
    type State: Clone + Debug;

    /// A choice available at a state.
    type Action: Action;

    /// Canonical memo key for a state.
    ///
    /// Two states that describe the same subproblem must produce equal keys,
    /// and distinct subproblems must produce distinct keys.
    type Key: Clone + Eq + Hash + Debug;

    /// Per-instance parameters used to build an initial state.
    type Params;

    /// Build the initial state for one problem instance.
    fn reset(&self, params: Self::Params) -> Self::State;

    /// Derive the canonical key of a state.
    fn state_key(&self, state: &Self::State) -> Self::Key;

    /// Actions available at `state`, in a stable order.
    ///
    /// An empty vector marks `state` as terminal. The order matters: when two
    /// actions tie, the solver keeps the one listed first.
    fn action_domain(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Whether `state` has no available actions.
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.action_domain(state).is_empty()
    }

    /// Human-readable name for an action.
    fn action_name(&self, action: &Self::Action) -> String {
        action.label()
    }

    /// Human-readable description of a state.
    fn state_description(&self, state: &Self::State) -> String {
        format!("{:?}", state)
    }
}

/// Result of applying an action in a deterministic game.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    /// The single successor state.
    pub state: S,
    /// Immediate reward collected on the way.
    pub reward: f64,
}

impl<S> Transition<S> {
    /// Create a transition to `state` paying `reward`.
    pub fn new(state: S, reward: f64) -> Self {
        Self { state, reward }
    }
}

/// A game where every action leads to exactly one successor.
pub trait DeterministicGame: Game {
    /// Apply `action` to `state`.
    fn step(&self, state: &Self::State, action: &Self::Action) -> Transition<Self::State>;
}

/// One branch of a stochastic transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<S> {
    /// Successor state on this branch.
    pub state: S,
    /// Probability of taking this branch.
    pub probability: f64,
    /// Immediate reward on this branch.
    pub reward: f64,
}

/// The ordered distribution over successors produced by one action.
///
/// Probabilities are expected to be non-negative and to sum to 1. This is
/// the game's responsibility; the solver uses them as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcomes<S> {
    outcomes: Vec<Outcome<S>>,
}

impl<S> Default for Outcomes<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Outcomes<S> {
    /// Create an empty distribution.
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Create an empty distribution with room for `capacity` branches.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    /// A single branch taken with probability 1.
    pub fn certain(state: S, reward: f64) -> Self {
        Self {
            outcomes: vec![Outcome {
                state,
                probability: 1.0,
                reward,
            }],
        }
    }

    /// Build from three parallel sequences of equal length.
    pub fn from_parallel(states: Vec<S>, probabilities: Vec<f64>, rewards: Vec<f64>) -> Self {
        debug_assert_eq!(states.len(), probabilities.len(), "one probability per successor");
        debug_assert_eq!(states.len(), rewards.len(), "one reward per successor");

        let outcomes = states
            .into_iter()
            .zip(probabilities)
            .zip(rewards)
            .map(|((state, probability), reward)| Outcome {
                state,
                probability,
                reward,
            })
            .collect();

        Self { outcomes }
    }

    /// Append a branch.
    pub fn push(&mut self, state: S, probability: f64, reward: f64) {
        self.outcomes.push(Outcome {
            state,
            probability,
            reward,
        });
    }

    /// Number of branches.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether there are no branches.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterate over the branches in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Outcome<S>> {
        self.outcomes.iter()
    }

    /// Borrow the branches as a slice.
    pub fn as_slice(&self) -> &[Outcome<S>] {
        &self.outcomes
    }
}

impl<S> IntoIterator for Outcomes<S> {
    type Item = Outcome<S>;
    type IntoIter = std::vec::IntoIter<Outcome<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a Outcomes<S> {
    type Item = &'a Outcome<S>;
    type IntoIter = std::slice::Iter<'a, Outcome<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

/// A game where every action yields a distribution over successors.
pub trait StochasticGame: Game {
    /// Apply `action` to `state`, returning every possible successor.
    fn step(&self, state: &Self::State, action: &Self::Action) -> Outcomes<Self::State>;
}

/// Presents a deterministic game as a stochastic one.
///
/// Every action yields a single branch with probability 1, so the stochastic
/// solver reproduces the deterministic solver's answers on the wrapped game.
#[derive(Debug, Clone, Default)]
pub struct Certain<G>(pub G);

impl<G: Game> Game for Certain<G> {
    type State = G::State;
    type Action = G::Action;
    type Key = G::Key;
    type Params = G::Params;

    fn reset(&self, params: Self::Params) -> Self::State {
        self.0.reset(params)
    }

    fn state_key(&self, state: &Self::State) -> Self::Key {
        self.0.state_key(state)
    }

    fn action_domain(&self, state: &Self::State) -> Vec<Self::Action> {
        self.0.action_domain(state)
    }

    fn action_name(&self, action: &Self::Action) -> String {
        self.0.action_name(action)
    }

    fn state_description(&self, state: &Self::State) -> String {
        self.0.state_description(state)
    }
}

impl<G: DeterministicGame> StochasticGame for Certain<G> {
    fn step(&self, state: &Self::State, action: &Self::Action) -> Outcomes<Self::State> {
        let Transition { state, reward } = self.0.step(state, action);
        Outcomes::certain(state, reward)
    }
}

impl Action for usize {
    fn label(&self) -> String {
        format!("{}", self)
    }
}

/// Macro to simplify implementing the Action trait for simple enums.
#[macro_export]
macro_rules! impl_action {
    ($type:ty) => {
        impl $crate::dp::game::Action for $type {
            fn label(&self) -> String {
                format!("{:?}", self)
            }
        }
    };
}
