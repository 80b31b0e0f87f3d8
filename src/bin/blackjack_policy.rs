//! Blackjack policy binary.
//!
//! Solves every player decision against every dealer up card and prints
//! the optimal policy and value grids, with and without a usable ace.
//!
//! Usage: `blackjack_policy [config.json] [output.json]`

use std::time::Instant;

use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use log::{error, info};

use dp_solver::dp::{sweep, SolverConfig, StochasticSolver};
use dp_solver::games::blackjack::report::initial_params;
use dp_solver::games::blackjack::{BlackjackGame, BlackjackReport};

fn main() {
    // Initialize env_logger with a default log level of INFO.
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => match SolverConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => SolverConfig::default(),
    };
    let output_path = args.get(2).map_or("blackjack_policy.json", String::as_str);

    let start = Instant::now();
    let mut params = initial_params(false);
    params.extend(initial_params(true));

    let bar = ProgressBar::new(params.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Solving positions [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    // One solver for the whole sweep: dealer subtrees are shared between rows.
    let mut solver = StochasticSolver::with_config(BlackjackGame::new(), config.clone());
    let points = sweep(&mut solver, params.into_iter().progress_with(bar.clone()));
    bar.finish_and_clear();

    let stats = solver.stats();
    info!(
        "solved {} positions in {:.2}s ({} visits, {} computed)",
        points.len(),
        start.elapsed().as_secs_f64(),
        stats.counter,
        stats.cached_counter
    );

    let report = BlackjackReport::new(config.traversal, &points);
    report.print_summary();

    match report.save_json(output_path) {
        Ok(()) => println!("Saved report to: {}", output_path),
        Err(e) => eprintln!("Failed to save report: {}", e),
    }
}
