//! Policy and value tables for blackjack sweeps.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

use super::{BlackjackAction, BlackjackParams, BLACKJACK};
use crate::dp::config::Traversal;
use crate::dp::sweep::SweepPoint;

/// Dealer up cards in table column order, 1 for an ace.
pub const DEALER_CARDS: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Lowest player total without a usable ace.
pub const MIN_HARD_TOTAL: u8 = 4;

/// Lowest player total with a usable ace.
pub const MIN_SOFT_TOTAL: u8 = 12;

/// One sweep result for a blackjack position.
pub type BlackjackPoint = SweepPoint<BlackjackParams, BlackjackAction>;

/// Every player decision before 21, against every dealer up card.
pub fn initial_params(usable_ace: bool) -> Vec<BlackjackParams> {
    let min_total = if usable_ace { MIN_SOFT_TOTAL } else { MIN_HARD_TOTAL };
    (min_total..BLACKJACK)
        .flat_map(|player_sum| {
            DEALER_CARDS
                .iter()
                .map(move |&dealer_card| BlackjackParams::new(usable_ace, player_sum, dealer_card))
        })
        .collect()
}

fn action_symbol(action: Option<BlackjackAction>) -> char {
    match action {
        Some(BlackjackAction::Hit) => 'H',
        Some(BlackjackAction::Stick) => 'S',
        _ => '-',
    }
}

fn card_label(card: u8) -> String {
    if card == 1 {
        "A".to_string()
    } else {
        card.to_string()
    }
}

/// Optimal action and value per player total and dealer up card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyTable {
    /// Whether the player holds a usable ace.
    pub usable_ace: bool,
    /// Row labels.
    pub player_sums: Vec<u8>,
    /// Column labels.
    pub dealer_cards: Vec<u8>,
    /// `actions[row][col]`, `None` where no point was given.
    pub actions: Vec<Vec<Option<BlackjackAction>>>,
    /// `values[row][col]`, NaN where no point was given.
    pub values: Vec<Vec<f64>>,
}

impl PolicyTable {
    /// Collect the points with a matching `usable_ace` flag into a table.
    pub fn from_points(usable_ace: bool, points: &[BlackjackPoint]) -> Self {
        let cells: FxHashMap<(u8, u8), &BlackjackPoint> = points
            .iter()
            .filter(|p| p.params.usable_ace == usable_ace)
            .map(|p| ((p.params.player_sum, p.params.dealer_card), p))
            .collect();

        let mut player_sums: Vec<u8> = cells.keys().map(|&(sum, _)| sum).collect();
        player_sums.sort_unstable();
        player_sums.dedup();

        let dealer_cards = DEALER_CARDS.to_vec();
        let mut actions = Vec::with_capacity(player_sums.len());
        let mut values = Vec::with_capacity(player_sums.len());

        for &sum in &player_sums {
            let row: Vec<Option<&BlackjackPoint>> =
                dealer_cards.iter().map(|&card| cells.get(&(sum, card)).copied()).collect();
            actions.push(row.iter().map(|p| p.and_then(|p| p.action)).collect());
            values.push(row.iter().map(|p| p.map_or(f64::NAN, |p| p.value)).collect());
        }

        Self {
            usable_ace,
            player_sums,
            dealer_cards,
            actions,
            values,
        }
    }

    /// Policy row for one player total, one `H`/`S` per dealer card.
    pub fn policy_row(&self, player_sum: u8) -> Option<String> {
        let row = self.player_sums.iter().position(|&s| s == player_sum)?;
        Some(self.actions[row].iter().map(|&a| action_symbol(a)).collect())
    }

    /// Value of one cell.
    pub fn value(&self, player_sum: u8, dealer_card: u8) -> Option<f64> {
        let row = self.player_sums.iter().position(|&s| s == player_sum)?;
        let col = self.dealer_cards.iter().position(|&c| c == dealer_card)?;
        Some(self.values[row][col])
    }

    fn title(&self) -> &'static str {
        if self.usable_ace {
            "Usable ace"
        } else {
            "No usable ace"
        }
    }

    fn header(&self, width: usize) -> String {
        let mut line = format!("{:>4} ", "");
        for &card in &self.dealer_cards {
            line.push_str(&format!("{:>width$}", card_label(card), width = width));
        }
        line
    }

    /// Text grid of optimal actions, highest total first.
    pub fn render_policy(&self) -> String {
        let mut out = format!("=== {} : policy ===\n", self.title());
        out.push_str(&self.header(3));
        out.push('\n');
        for (row, sum) in self.player_sums.iter().enumerate().rev() {
            out.push_str(&format!("{:>4} ", sum));
            for &action in &self.actions[row] {
                out.push_str(&format!("{:>3}", action_symbol(action)));
            }
            out.push('\n');
        }
        out
    }

    /// Text grid of optimal expected values, highest total first.
    pub fn render_values(&self) -> String {
        let mut out = format!("=== {} : value ===\n", self.title());
        out.push_str(&self.header(7));
        out.push('\n');
        for (row, sum) in self.player_sums.iter().enumerate().rev() {
            out.push_str(&format!("{:>4} ", sum));
            for value in &self.values[row] {
                out.push_str(&format!("{:>7.3}", value));
            }
            out.push('\n');
        }
        out
    }

    /// Print both grids to stdout.
    pub fn print_grid(&self) {
        println!("{}", self.render_policy());
        println!("{}", self.render_values());
    }
}

/// Run information stored with a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Traversal used by the solver.
    pub traversal: Traversal,
    /// Number of initial positions solved.
    pub positions: usize,
    /// Seconds since the Unix epoch when the report was created.
    pub timestamp: String,
}

/// Policy tables with and without a usable ace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackjackReport {
    /// Run information.
    pub metadata: ReportMetadata,
    /// Positions without a usable ace.
    pub hard: PolicyTable,
    /// Positions with a usable ace.
    pub soft: PolicyTable,
}

impl BlackjackReport {
    /// Build both tables from sweep points.
    pub fn new(traversal: Traversal, points: &[BlackjackPoint]) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        Self {
            metadata: ReportMetadata {
                traversal,
                positions: points.len(),
                timestamp: timestamp.to_string(),
            },
            hard: PolicyTable::from_points(false, points),
            soft: PolicyTable::from_points(true, points),
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Print every grid to stdout.
    pub fn print_summary(&self) {
        println!("\n========================================");
        println!("  Blackjack policy | {} positions", self.metadata.positions);
        println!("========================================\n");

        self.hard.print_grid();
        self.soft.print_grid();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dp::{par_sweep, sweep, SolverConfig, StochasticSolver};
    use crate::games::blackjack::BlackjackGame;

    fn all_points() -> Vec<BlackjackPoint> {
        let mut solver = StochasticSolver::new(BlackjackGame::new());
        let mut params = initial_params(false);
        params.extend(initial_params(true));
        sweep(&mut solver, params)
    }

    #[test]
    fn test_initial_params() {
        let hard = initial_params(false);
        assert_eq!(hard.len(), 17 * 10);
        assert_eq!(hard[0], BlackjackParams::new(false, 4, 1));
        assert_eq!(hard[hard.len() - 1], BlackjackParams::new(false, 20, 10));

        let soft = initial_params(true);
        assert_eq!(soft.len(), 9 * 10);
        assert!(soft.iter().all(|p| p.usable_ace && p.player_sum >= 12));
    }

    #[test]
    fn test_hard_policy() {
        let report = BlackjackReport::new(Traversal::ExplicitStack, &all_points());
        let table = &report.hard;

        assert_eq!(table.player_sums, (4..=20).collect::<Vec<u8>>());
        for sum in 4..=11 {
            assert_eq!(table.policy_row(sum).as_deref(), Some("HHHHHHHHHH"));
        }
        assert_eq!(table.policy_row(12).as_deref(), Some("HHSSSSHHHH"));
        for sum in 13..=15 {
            assert_eq!(table.policy_row(sum).as_deref(), Some("HSSSSSHHHH"));
        }
        assert_eq!(table.policy_row(16).as_deref(), Some("HSSSSSHHHS"));
        for sum in 17..=20 {
            assert_eq!(table.policy_row(sum).as_deref(), Some("SSSSSSSSSS"));
        }
        assert_eq!(table.policy_row(21), None);
    }

    #[test]
    fn test_soft_policy() {
        let report = BlackjackReport::new(Traversal::ExplicitStack, &all_points());
        let table = &report.soft;

        for sum in 12..=17 {
            assert_eq!(table.policy_row(sum).as_deref(), Some("HHHHHHHHHH"));
        }
        assert_eq!(table.policy_row(18).as_deref(), Some("HSSSSSSSHH"));
        assert_eq!(table.policy_row(19).as_deref(), Some("SSSSSSSSSS"));
        assert_eq!(table.policy_row(20).as_deref(), Some("SSSSSSSSSS"));
    }

    #[test]
    fn test_values_in_table() {
        let report = BlackjackReport::new(Traversal::ExplicitStack, &all_points());
        let value = report.hard.value(20, 10).unwrap();
        assert!((value - 0.35173183672364194).abs() < 1e-12);
        let value = report.hard.value(20, 6).unwrap();
        assert!((value - 0.5881813165021916).abs() < 1e-12);
        assert_eq!(report.hard.value(3, 10), None);
    }

    #[test]
    fn test_parallel_sweep_matches() {
        let params = initial_params(true);
        let parallel = par_sweep::<StochasticSolver<BlackjackGame>>(
            &BlackjackGame::new(),
            &params,
            &SolverConfig::default(),
        );

        let mut solver = StochasticSolver::new(BlackjackGame::new());
        let sequential = sweep(&mut solver, params);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_render_policy() {
        let report = BlackjackReport::new(Traversal::ExplicitStack, &all_points());
        let text = report.hard.render_policy();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=== No usable ace : policy ===");
        assert!(lines[1].trim_start().starts_with('A'));
        // Highest total first.
        assert!(lines[2].trim_start().starts_with("20"));
        assert!(lines[lines.len() - 1].trim_start().starts_with('4'));
    }

    #[test]
    fn test_missing_cells() {
        let table = PolicyTable::from_points(false, &[]);
        assert!(table.player_sums.is_empty());
        assert_eq!(table.policy_row(12), None);
    }

    #[test]
    fn test_report_serializes() {
        let report = BlackjackReport::new(Traversal::Recursive, &all_points());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"traversal\":\"recursive\""));
        assert!(json.contains("\"Stick\""));
    }
}
