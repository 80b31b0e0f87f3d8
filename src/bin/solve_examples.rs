//! Example problems binary.
//!
//! Solves one instance of every bundled game and prints the solution with
//! the solver counters.
//!
//! Usage: `solve_examples [config.json]`

use std::time::Instant;

use log::{error, info};

use dp_solver::dp::{DeterministicSolver, Game, SolveStats, SolverConfig, StochasticSolver};
use dp_solver::games::alignment::{render_alignment, AlignmentGame, AlignmentParams};
use dp_solver::games::blackjack::{BlackjackGame, BlackjackParams};
use dp_solver::games::knapsack::{KnapsackGame, KnapsackParams};

fn main() {
    // Initialize env_logger with a default log level of INFO.
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    println!("=== DP Solver Examples ===\n");
    let total_start = Instant::now();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    println!("Traversal: {:?}\n", config.traversal);

    if let Err(e) = solve_knapsack(&config) {
        error!("knapsack: {}", e);
        std::process::exit(1);
    }
    solve_alignment(&config);
    solve_blackjack(&config);

    info!("all examples solved in {:.2}s", total_start.elapsed().as_secs_f64());
}

/// Solver config from the first argument, defaults otherwise.
fn load_config() -> Result<SolverConfig, dp_solver::dp::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("loading solver config from {}", path);
            SolverConfig::from_json_file(path)
        }
        None => Ok(SolverConfig::default()),
    }
}

fn print_stats(stats: &SolveStats) {
    println!(
        "  counter: {} | cached_counter: {} | hit rate: {:.1}% | {:.4}s",
        stats.counter,
        stats.cached_counter,
        stats.hit_rate() * 100.0,
        stats.elapsed_seconds
    );
}

fn solve_knapsack(config: &SolverConfig) -> Result<(), dp_solver::games::knapsack::KnapsackError> {
    println!("--- Knapsack ---");
    let game = KnapsackGame::new(vec![5.0, 4.0, 2.5], vec![12.0, 11.5, 7.0])?;
    let state = game.reset(KnapsackParams::new(10.0, vec![2, 3, 1]));
    println!("  {}", game.state_description(&state));

    let mut solver = DeterministicSolver::with_config(game, config.clone());
    let solution = solver.solve(&state);
    let action = solution
        .action
        .map_or_else(|| "none".to_string(), |a| solver.game().action_name(&a));

    println!("  best first action: {} | value: {}", action, solution.value);
    print_stats(&solver.stats());
    println!();
    Ok(())
}

fn solve_alignment(config: &SolverConfig) {
    println!("--- Sequence alignment ---");
    let game = AlignmentGame::default();
    let state = game.reset(AlignmentParams::new("TTCATA", "TGCTCGTA"));
    println!("  {}", game.state_description(&state));

    let mut solver = DeterministicSolver::with_config(game, config.clone());
    let solution = solver.solve(&state);
    println!("  score: {}", solution.value);
    if let Some((top, bottom)) = render_alignment(&solver, &state) {
        println!("  {}", top);
        println!("  {}", bottom);
    }
    print_stats(&solver.stats());
    println!();
}

fn solve_blackjack(config: &SolverConfig) {
    println!("--- Blackjack ---");
    let game = BlackjackGame::new();
    let state = game.reset(BlackjackParams::new(false, 16, 10));
    println!("  {}", game.state_description(&state));

    let mut solver = StochasticSolver::with_config(game, config.clone());
    let solution = solver.solve(&state);
    let action = solution
        .action
        .map_or_else(|| "none".to_string(), |a| game.action_name(&a));

    println!("  best action: {} | expected value: {:.4}", action, solution.value);
    print_stats(&solver.stats());
    println!();
}
