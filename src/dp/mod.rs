//! Memoized dynamic programming over acyclic state graphs.
//!
//! This module provides a generic exhaustive solver for sequential decision
//! problems. A problem is a [`Game`]: states, a finite action set per state,
//! a transition function, and rewards. The solver returns the optimal first
//! action and the optimal accumulated reward from any state.
//!
//! # Overview
//!
//! Solving is a depth-first search with a memo table:
//! 1. Look the state's canonical key up in the memo table
//! 2. If the state has no actions, it is terminal and worth 0
//! 3. Otherwise evaluate every action, solving successors first, and keep the
//!    best one (the first enumerated action wins ties)
//!
//! # Flavors
//!
//! - **Deterministic**: each action has one successor;
//!   value = `reward + successor_value`
//! - **Stochastic**: each action has a distribution over successors;
//!   value = `Σ p * (successor_value + reward)`
//!
//! # Example
//!
//! ```
//! use dp_solver::dp::{DeterministicSolver, Game};
//! use dp_solver::games::knapsack::{KnapsackGame, KnapsackParams};
//!
//! let game = KnapsackGame::new(vec![5.0], vec![10.0]).unwrap();
//! let initial = game.reset(KnapsackParams::new(5.0, vec![1]));
//!
//! let mut solver = DeterministicSolver::new(game);
//! let solution = solver.solve(&initial);
//! assert_eq!(solution.action, Some(0));
//! assert_eq!(solution.value, 10.0);
//! ```

pub mod config;
pub mod expectation;
pub mod game;
pub mod key;
pub mod memo;
pub mod solver;
pub mod sweep;

// Re-export main types for convenient access
pub use config::{ConfigError, SolveStats, SolverConfig, Traversal};
pub use game::{Action, Certain, DeterministicGame, Game, Outcome, Outcomes, StochasticGame, Transition};
pub use key::{canonical_f64_bits, StateKey};
pub use memo::{MemoEntry, MemoExport, MemoRecord, MemoTable};
pub use solver::{DeterministicSolver, Solution, Solve, StochasticSolver};
pub use sweep::{par_sweep, sweep, SweepPoint};
