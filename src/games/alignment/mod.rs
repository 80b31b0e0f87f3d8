//! Global pairwise sequence alignment as a deterministic game.
//!
//! The state is the pair of suffixes still to be aligned. Each step either
//! pairs the two leading characters (scored as a match or a substitution) or
//! consumes the leading character of one sequence against a gap. The game
//! ends when both suffixes are empty, so the optimal value is the
//! Needleman-Wunsch score of the two sequences.
//!
//! ## Scoring
//!
//! | Move          | Default |
//! |---------------|---------|
//! | match         | +5      |
//! | substitution  | -2      |
//! | gap           | -6      |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dp::game::{DeterministicGame, Game, Transition};
use crate::dp::key::StateKey;
use crate::dp::solver::DeterministicSolver;

/// Gap character used when rendering an alignment.
pub const GAP: char = '-';

/// Scores for the three kinds of alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentScores {
    /// Two equal characters.
    pub matched: f64,
    /// Two different characters.
    pub substitution: f64,
    /// A character against a gap.
    pub gap: f64,
}

impl Default for AlignmentScores {
    fn default() -> Self {
        Self {
            matched: 5.0,
            substitution: -2.0,
            gap: -6.0,
        }
    }
}

/// Errors from constructing an alignment game.
#[derive(Debug, Clone, PartialEq)]
pub enum AlignmentError {
    /// A score is NaN or infinite.
    InvalidScore(&'static str, f64),
}

impl fmt::Display for AlignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentError::InvalidScore(name, value) => {
                write!(f, "{} score must be finite, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for AlignmentError {}

/// The two sequences to align.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentParams {
    /// First sequence.
    pub x: String,
    /// Second sequence.
    pub y: String,
}

impl AlignmentParams {
    /// Create parameters from two sequences.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self { x: x.into(), y: y.into() }
    }
}

/// Suffixes of both sequences that are not aligned yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentState {
    /// Remaining suffix of the first sequence.
    pub x: String,
    /// Remaining suffix of the second sequence.
    pub y: String,
}

/// One alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignmentAction {
    /// Pair the leading characters of both sequences.
    Pair,
    /// Leading character of `x` against a gap.
    GapY,
    /// Leading character of `y` against a gap.
    GapX,
}

crate::impl_action!(AlignmentAction);

/// Alignment game with fixed scores.
#[derive(Debug, Clone, Default)]
pub struct AlignmentGame {
    scores: AlignmentScores,
}

impl AlignmentGame {
    /// Create a game with the given scores.
    pub fn new(scores: AlignmentScores) -> Result<Self, AlignmentError> {
        for (name, value) in [
            ("match", scores.matched),
            ("substitution", scores.substitution),
            ("gap", scores.gap),
        ] {
            if !value.is_finite() {
                return Err(AlignmentError::InvalidScore(name, value));
            }
        }
        Ok(Self { scores })
    }

    /// Scores used by this game.
    pub fn scores(&self) -> &AlignmentScores {
        &self.scores
    }
}

/// Split off the first character of `s`.
fn split_first(s: &str) -> Option<(char, &str)> {
    let c = s.chars().next()?;
    Some((c, &s[c.len_utf8()..]))
}

impl Game for AlignmentGame {
    type State = AlignmentState;
    type Action = AlignmentAction;
    type Key = StateKey;
    type Params = AlignmentParams;

    fn reset(&self, params: AlignmentParams) -> AlignmentState {
        AlignmentState {
            x: params.x,
            y: params.y,
        }
    }

    fn state_key(&self, state: &AlignmentState) -> StateKey {
        let mut key = StateKey::with_capacity(state.x.len() + state.y.len() + 16);
        key.push_str(&state.x);
        key.push_str(&state.y);
        key
    }

    fn action_domain(&self, state: &AlignmentState) -> Vec<AlignmentAction> {
        let mut actions = Vec::with_capacity(3);
        if !state.x.is_empty() && !state.y.is_empty() {
            actions.push(AlignmentAction::Pair);
        }
        if !state.x.is_empty() {
            actions.push(AlignmentAction::GapY);
        }
        if !state.y.is_empty() {
            actions.push(AlignmentAction::GapX);
        }
        actions
    }

    fn action_name(&self, action: &AlignmentAction) -> String {
        match action {
            AlignmentAction::Pair => "pair".to_string(),
            AlignmentAction::GapY => "gap in y".to_string(),
            AlignmentAction::GapX => "gap in x".to_string(),
        }
    }

    fn state_description(&self, state: &AlignmentState) -> String {
        format!("x:{:?} y:{:?}", state.x, state.y)
    }
}

impl DeterministicGame for AlignmentGame {
    fn step(&self, state: &AlignmentState, action: &AlignmentAction) -> Transition<AlignmentState> {
        let x = split_first(&state.x);
        let y = split_first(&state.y);

        match (action, x, y) {
            (AlignmentAction::Pair, Some((a, x_rest)), Some((b, y_rest))) => {
                let reward = if a == b {
                    self.scores.matched
                } else {
                    self.scores.substitution
                };
                Transition::new(
                    AlignmentState {
                        x: x_rest.to_string(),
                        y: y_rest.to_string(),
                    },
                    reward,
                )
            }
            (AlignmentAction::GapY, Some((_, x_rest)), _) => Transition::new(
                AlignmentState {
                    x: x_rest.to_string(),
                    y: state.y.clone(),
                },
                self.scores.gap,
            ),
            (AlignmentAction::GapX, _, Some((_, y_rest))) => Transition::new(
                AlignmentState {
                    x: state.x.clone(),
                    y: y_rest.to_string(),
                },
                self.scores.gap,
            ),
            // Only reachable with an action outside the domain.
            _ => Transition::new(state.clone(), 0.0),
        }
    }
}

/// Follow the memoized policy from `state` and render both aligned rows.
///
/// Returns `None` if `state` has not been solved by `solver`.
pub fn render_alignment(
    solver: &DeterministicSolver<AlignmentGame>,
    state: &AlignmentState,
) -> Option<(String, String)> {
    let game = solver.game();
    let mut top = String::with_capacity(state.x.len() + state.y.len());
    let mut bottom = String::with_capacity(state.x.len() + state.y.len());
    let mut current = state.clone();

    while let Some(action) = solver.lookup(&current)?.action {
        let x = current.x.chars().next();
        let y = current.y.chars().next();
        match action {
            AlignmentAction::Pair => {
                top.extend(x);
                bottom.extend(y);
            }
            AlignmentAction::GapY => {
                top.extend(x);
                bottom.push(GAP);
            }
            AlignmentAction::GapX => {
                top.push(GAP);
                bottom.extend(y);
            }
        }
        current = game.step(&current, &action).state;
    }

    Some((top, bottom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dp::{Certain, SolverConfig, StochasticSolver};

    fn solve(x: &str, y: &str) -> (DeterministicSolver<AlignmentGame>, AlignmentState) {
        let game = AlignmentGame::default();
        let state = game.reset(AlignmentParams::new(x, y));
        let mut solver = DeterministicSolver::new(game);
        solver.solve(&state);
        (solver, state)
    }

    #[test]
    fn test_identical_sequences() {
        let (solver, state) = solve("AA", "AA");
        let solution = solver.lookup(&state).unwrap();
        assert_eq!(solution.action, Some(AlignmentAction::Pair));
        assert_eq!(solution.value, 10.0);
    }

    #[test]
    fn test_single_gap() {
        let (solver, state) = solve("AC", "A");
        let solution = solver.lookup(&state).unwrap();
        assert_eq!(solution.value, -1.0);
        assert_eq!(
            render_alignment(&solver, &state),
            Some(("AC".to_string(), "A-".to_string()))
        );
    }

    #[test]
    fn test_empty_sequences_are_terminal() {
        let (solver, state) = solve("", "");
        let solution = solver.lookup(&state).unwrap();
        assert_eq!(solution.action, None);
        assert_eq!(solution.value, 0.0);
        assert_eq!(solver.counter(), 1);
        assert_eq!(solver.cached_counter(), 1);
        assert_eq!(render_alignment(&solver, &state), Some((String::new(), String::new())));
    }

    #[test]
    fn test_one_empty_sequence_is_all_gaps() {
        let (solver, state) = solve("", "ACG");
        assert_eq!(solver.lookup(&state).unwrap().value, -18.0);
        assert_eq!(
            render_alignment(&solver, &state),
            Some(("---".to_string(), "ACG".to_string()))
        );
    }

    #[test]
    fn test_dna_alignment() {
        let (solver, state) = solve("TTCATA", "TGCTCGTA");
        let solution = solver.lookup(&state).unwrap();

        assert_eq!(solution.action, Some(AlignmentAction::Pair));
        assert_eq!(solution.value, 11.0);

        // Every suffix pair is computed once: 7 * 9 of them.
        assert_eq!(solver.cached_counter(), 63);
        // Root, three lookups per state with two non-empty suffixes, one per
        // state with a single non-empty suffix.
        assert_eq!(solver.counter(), 1 + 48 * 3 + 6 + 8);

        assert_eq!(
            render_alignment(&solver, &state),
            Some(("T--TCATA".to_string(), "TGCTCGTA".to_string()))
        );
    }

    #[test]
    fn test_gattaca() {
        let (solver, state) = solve("GATTACA", "GCATGCU");
        assert_eq!(solver.lookup(&state).unwrap().value, 7.0);
    }

    #[test]
    fn test_render_unsolved_state() {
        let solver = DeterministicSolver::new(AlignmentGame::default());
        let state = solver.game().reset(AlignmentParams::new("A", "C"));
        assert_eq!(render_alignment(&solver, &state), None);
    }

    #[test]
    fn test_custom_scores() {
        let scores = AlignmentScores {
            matched: 1.0,
            substitution: -1.0,
            gap: 0.0,
        };
        let game = AlignmentGame::new(scores).unwrap();
        let mut solver = DeterministicSolver::new(game);
        // Free gaps: never take a substitution.
        let solution = solver.solve_params(AlignmentParams::new("AB", "BA"));
        assert_eq!(solution.value, 1.0);
    }

    #[test]
    fn test_invalid_scores() {
        let scores = AlignmentScores {
            gap: f64::INFINITY,
            ..Default::default()
        };
        assert_eq!(
            AlignmentGame::new(scores).unwrap_err(),
            AlignmentError::InvalidScore("gap", f64::INFINITY)
        );
    }

    #[test]
    fn test_stochastic_view_agrees() {
        let params = AlignmentParams::new("GATTACA", "GCATGCU");
        for config in [SolverConfig::default(), SolverConfig::recursive()] {
            let mut det = DeterministicSolver::with_config(AlignmentGame::default(), config.clone());
            let mut sto = StochasticSolver::with_config(Certain(AlignmentGame::default()), config);

            assert_eq!(det.solve_params(params.clone()), sto.solve_params(params.clone()));
            assert_eq!(det.counter(), sto.counter());
            assert_eq!(det.cached_counter(), sto.cached_counter());
        }
    }

    #[test]
    fn test_unicode_characters() {
        let (solver, state) = solve("αβ", "αβ");
        assert_eq!(solver.lookup(&state).unwrap().value, 10.0);
        assert_eq!(
            render_alignment(&solver, &state),
            Some(("αβ".to_string(), "αβ".to_string()))
        );
    }
}
