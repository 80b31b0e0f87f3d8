//! Solving many initial states at once.
//!
//! A sweep turns a list of problem parameters into a policy/value table. The
//! sequential sweep reuses one solver, so subproblems shared between initial
//! states are solved once. The parallel sweep gives every rayon job its own
//! solver over a clone of the game; nothing mutable is shared between
//! threads.

use std::time::Instant;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dp::config::SolverConfig;
use crate::dp::game::Game;
use crate::dp::solver::Solve;

/// The solution for one initial state of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint<P, A> {
    /// Parameters the initial state was built from.
    pub params: P,
    /// Optimal first action.
    pub action: Option<A>,
    /// Optimal (expected) value.
    pub value: f64,
}

/// Parameters and action types of the game behind a solver.
type PointOf<S> = SweepPoint<<<S as Solve>::Game as Game>::Params, <<S as Solve>::Game as Game>::Action>;

/// Solve every parameter set with one shared solver, in input order.
pub fn sweep<S, I>(solver: &mut S, params: I) -> Vec<PointOf<S>>
where
    S: Solve,
    <S::Game as Game>::Params: Clone,
    I: IntoIterator<Item = <S::Game as Game>::Params>,
{
    let start_time = Instant::now();

    let points: Vec<PointOf<S>> = params
        .into_iter()
        .map(|params| {
            let solution = solver.solve_params(params.clone());
            SweepPoint {
                params,
                action: solution.action,
                value: solution.value,
            }
        })
        .collect();

    let stats = solver.stats();
    info!(
        "swept {} initial states in {:.2}s ({} visits, {} computed)",
        points.len(),
        start_time.elapsed().as_secs_f64(),
        stats.counter,
        stats.cached_counter
    );

    points
}

/// Solve every parameter set in parallel, results in input order.
///
/// Each rayon job builds its own solver from a clone of `game`, so the game
/// must be read-only once constructed.
pub fn par_sweep<S>(
    game: &S::Game,
    params: &[<S::Game as Game>::Params],
    config: &SolverConfig,
) -> Vec<PointOf<S>>
where
    S: Solve,
    S::Game: Clone + Sync,
    <S::Game as Game>::Params: Clone + Send + Sync,
{
    let start_time = Instant::now();

    let points: Vec<PointOf<S>> = params
        .par_iter()
        .map_init(
            || S::build(game.clone(), config.clone()),
            |solver, params| {
                let solution = solver.solve_params(params.clone());
                SweepPoint {
                    params: params.clone(),
                    action: solution.action,
                    value: solution.value,
                }
            },
        )
        .collect();

    info!(
        "swept {} initial states on {} threads in {:.2}s",
        points.len(),
        rayon::current_num_threads(),
        start_time.elapsed().as_secs_f64()
    );

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dp::game::{Action, DeterministicGame, Transition};
    use crate::dp::solver::DeterministicSolver;

    /// Count down from `n`, choosing to subtract 1 or 2 each step.
    #[derive(Debug, Clone)]
    struct Countdown;

    impl Game for Countdown {
        type State = u32;
        type Action = usize;
        type Key = u32;
        type Params = u32;

        fn reset(&self, params: u32) -> u32 {
            params
        }

        fn state_key(&self, state: &u32) -> u32 {
            *state
        }

        fn action_domain(&self, state: &u32) -> Vec<usize> {
            (1..=2usize).filter(|&d| d as u32 <= *state).collect()
        }
    }

    impl DeterministicGame for Countdown {
        fn step(&self, state: &u32, action: &usize) -> Transition<u32> {
            // A step of 1 pays 1, a step of 2 pays 3.
            let reward = if *action == 1 { 1.0 } else { 3.0 };
            Transition::new(state - *action as u32, reward)
        }
    }

    fn expected(n: u32) -> f64 {
        (n / 2) as f64 * 3.0 + (n % 2) as f64
    }

    #[test]
    fn test_sequential_sweep_reuses_cache() {
        let mut solver = DeterministicSolver::new(Countdown);
        let points = sweep(&mut solver, 0..20);

        assert_eq!(points.len(), 20);
        for (n, point) in points.iter().enumerate() {
            assert_eq!(point.params, n as u32);
            assert_eq!(point.value, expected(n as u32));
        }
        // 0..20 share every subproblem: each is computed exactly once.
        assert_eq!(solver.cached_counter(), 20);

        // Even counts take the double step; odd counts tie and keep the first action.
        assert_eq!(points[4].action.as_ref().map(|a| a.label()), Some("2".to_string()));
        assert_eq!(points[5].action.as_ref().map(|a| a.label()), Some("1".to_string()));
        assert_eq!(points[0].action, None);
    }

    #[test]
    fn test_parallel_sweep_matches_sequential() {
        let params: Vec<u32> = (0..64).rev().collect();
        let config = SolverConfig::default();

        let parallel = par_sweep::<DeterministicSolver<Countdown>>(&Countdown, &params, &config);
        let mut solver = DeterministicSolver::new(Countdown);
        let sequential = sweep(&mut solver, params.iter().copied());

        assert_eq!(parallel, sequential);
        assert_eq!(parallel[0].params, 63);
    }
}
