//! Game implementations for the DP solvers.
//!
//! These serve as:
//!
//! 1. **Validation**: problems with well-known optimal answers check that the
//!    solvers are correct.
//!
//! 2. **Examples**: they show how to implement the game traits for new
//!    problems.
//!
//! 3. **Benchmarks**: they provide standard workloads for performance testing.
//!
//! ## Available Games
//!
//! - [`knapsack`]: bounded knapsack (deterministic)
//! - [`alignment`]: global pairwise sequence alignment (deterministic)
//! - [`blackjack`]: blackjack against a fixed dealer policy (stochastic)
//!
//! ## Adding New Games
//!
//! 1. Create a new module under `src/games/`
//! 2. Define state, action and parameter types
//! 3. Implement `Game` plus `DeterministicGame` or `StochasticGame`
//! 4. Add tests that check known optimal values

pub mod alignment;
pub mod blackjack;
pub mod knapsack;
