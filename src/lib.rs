//! # DP Solver
//!
//! A generic memoized dynamic programming solver for sequential decision
//! problems over finite acyclic state graphs.
//!
//! ## Features
//!
//! - **Generic engine**: works with any problem implementing the `Game` trait
//! - **Two flavors**: deterministic transitions and stochastic transitions
//!   with expected-value backups
//! - **Exact memoization**: every distinct subproblem is solved once per solver
//! - **No recursion limit**: the default traversal keeps its own frame stack
//! - **Sweeps**: solve a grid of initial states, sequentially or with rayon
//!
//! ## Quick Start
//!
//! ```ignore
//! use dp_solver::dp::{DeterministicSolver, Game};
//!
//! // 1. Implement Game and DeterministicGame for your problem
//! // 2. Build the initial state
//! let state = my_game.reset(params);
//!
//! // 3. Solve
//! let mut solver = DeterministicSolver::new(my_game);
//! let solution = solver.solve(&state);
//!
//! // 4. Inspect the diagnostics
//! println!("{} visits, {} computed", solver.counter(), solver.cached_counter());
//! ```
//!
//! ## Modules
//!
//! - [`dp`]: Core solver engine and game traits
//! - [`games`]: Example problems (knapsack, sequence alignment, blackjack)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       DP Solver (Generic)                       │
//! │  - Memo table             - Depth-first search                  │
//! │  - Max over actions       - Expected-value backups              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements Game trait
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌──────────┐         ┌───────────┐         ┌───────────┐
//!    │ Knapsack │         │ Alignment │         │ Blackjack │
//!    └──────────┘         └───────────┘         └───────────┘
//! ```

#![warn(missing_docs)]

/// Memoized DP solver module.
///
/// This is the core module containing the generic search and the game traits.
pub mod dp;

/// Game implementations module.
///
/// Contains example problems used for validation and benchmarks.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use dp::{
    Action, DeterministicGame, DeterministicSolver, Game, Solution, SolveStats, SolverConfig,
    StochasticGame, StochasticSolver,
};
