//! Memoized exhaustive search.
//!
//! Both solvers share one search core. A deterministic game is expanded as a
//! single probability-1 branch per action, so the deterministic total
//! `reward + successor_value` falls out of the expectation unchanged.
//!
//! Per state key the lifecycle is unvisited -> in progress (on the traversal
//! stack) -> solved (memoized). A state reachable from itself is a contract
//! violation; there is no runtime cycle check.

use std::hash::Hash;
use std::time::Instant;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::dp::config::{SolveStats, SolverConfig, Traversal};
use crate::dp::expectation::{expected_value, is_distribution, probability_mass};
use crate::dp::game::{DeterministicGame, Game, Outcomes, StochasticGame, Transition};
use crate::dp::memo::{MemoEntry, MemoTable};

/// Optimal first action and accumulated (expected) reward at a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution<A> {
    /// First action on an optimal path, `None` at terminal states.
    pub action: Option<A>,
    /// Optimal accumulated (expected) reward.
    pub value: f64,
}

impl<A> From<MemoEntry<A>> for Solution<A> {
    fn from(entry: MemoEntry<A>) -> Self {
        Self {
            action: entry.action,
            value: entry.value,
        }
    }
}

/// Solver for games where every action has a single successor.
///
/// # Example
/// ```ignore
/// use dp_solver::dp::DeterministicSolver;
///
/// let game = MyGame::new();
/// let initial = game.reset(params);
/// let mut solver = DeterministicSolver::new(game);
///
/// let solution = solver.solve(&initial);
/// println!("best {:?} worth {}", solution.action, solution.value);
/// ```
pub struct DeterministicSolver<G: DeterministicGame> {
    /// The game being solved.
    game: G,

    /// Configuration for the solver.
    config: SolverConfig,

    /// Memo table and counters.
    search: Search<G::Key, G::Action>,
}

impl<G: DeterministicGame> DeterministicSolver<G> {
    /// Create a solver with the default configuration.
    pub fn new(game: G) -> Self {
        Self::with_config(game, SolverConfig::default())
    }

    /// Create a solver with the given configuration.
    pub fn with_config(game: G, config: SolverConfig) -> Self {
        let search = Search::with_capacity(config.initial_capacity);
        Self {
            game,
            config,
            search,
        }
    }

    /// Solve the subproblem rooted at `state`.
    ///
    /// A state that is already memoized is answered from the table without
    /// touching the counters.
    pub fn solve(&mut self, state: &G::State) -> Solution<G::Action> {
        let game = &self.game;
        let expand = |state: &G::State, action: &G::Action| {
            let Transition { state, reward } = game.step(state, action);
            Outcomes::certain(state, reward)
        };
        self.search.solve(game, state, self.config.traversal, None, &expand)
    }

    /// Build the initial state for `params` and solve it.
    pub fn solve_params(&mut self, params: G::Params) -> Solution<G::Action> {
        let state = self.game.reset(params);
        self.solve(&state)
    }

    /// Memoized solution for `state`, if it has been solved.
    pub fn lookup(&self, state: &G::State) -> Option<Solution<G::Action>> {
        self.search.lookup(&self.game, state)
    }

    /// State visits so far, cache hits included.
    pub fn counter(&self) -> u64 {
        self.search.counter
    }

    /// Distinct subproblems computed so far.
    pub fn cached_counter(&self) -> u64 {
        self.search.cached_counter
    }

    /// Current statistics.
    pub fn stats(&self) -> SolveStats {
        self.search.stats()
    }

    /// Get reference to the memo table.
    pub fn memo(&self) -> &MemoTable<G::Key, G::Action> {
        &self.search.memo
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Forget every solved subproblem and reset the counters.
    pub fn clear(&mut self) {
        self.search.clear();
    }
}

/// Solver for games where every action yields a distribution over successors.
///
/// Picks the action with the highest expected accumulated reward. Every
/// successor is solved, however unlikely; nothing is pruned.
pub struct StochasticSolver<G: StochasticGame> {
    /// The game being solved.
    game: G,

    /// Configuration for the solver.
    config: SolverConfig,

    /// Memo table and counters.
    search: Search<G::Key, G::Action>,
}

impl<G: StochasticGame> StochasticSolver<G> {
    /// Create a solver with the default configuration.
    pub fn new(game: G) -> Self {
        Self::with_config(game, SolverConfig::default())
    }

    /// Create a solver with the given configuration.
    pub fn with_config(game: G, config: SolverConfig) -> Self {
        let search = Search::with_capacity(config.initial_capacity);
        Self {
            game,
            config,
            search,
        }
    }

    /// Solve the subproblem rooted at `state`.
    ///
    /// A state that is already memoized is answered from the table without
    /// touching the counters.
    pub fn solve(&mut self, state: &G::State) -> Solution<G::Action> {
        let game = &self.game;
        let expand = |state: &G::State, action: &G::Action| game.step(state, action);
        self.search.solve(
            game,
            state,
            self.config.traversal,
            self.config.probability_tolerance,
            &expand,
        )
    }

    /// Build the initial state for `params` and solve it.
    pub fn solve_params(&mut self, params: G::Params) -> Solution<G::Action> {
        let state = self.game.reset(params);
        self.solve(&state)
    }

    /// Memoized solution for `state`, if it has been solved.
    pub fn lookup(&self, state: &G::State) -> Option<Solution<G::Action>> {
        self.search.lookup(&self.game, state)
    }

    /// State visits so far, cache hits included.
    pub fn counter(&self) -> u64 {
        self.search.counter
    }

    /// Distinct subproblems computed so far.
    pub fn cached_counter(&self) -> u64 {
        self.search.cached_counter
    }

    /// Current statistics.
    pub fn stats(&self) -> SolveStats {
        self.search.stats()
    }

    /// Get reference to the memo table.
    pub fn memo(&self) -> &MemoTable<G::Key, G::Action> {
        &self.search.memo
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Forget every solved subproblem and reset the counters.
    pub fn clear(&mut self) {
        self.search.clear();
    }
}

/// Common surface of the two solvers, used by parameter sweeps.
pub trait Solve {
    /// The game this solver works on.
    type Game: Game;

    /// Create a solver owning `game`.
    fn build(game: Self::Game, config: SolverConfig) -> Self;

    /// Build the initial state for `params` and solve it.
    fn solve_params(
        &mut self,
        params: <Self::Game as Game>::Params,
    ) -> Solution<<Self::Game as Game>::Action>;

    /// Current statistics.
    fn stats(&self) -> SolveStats;
}

impl<G: DeterministicGame> Solve for DeterministicSolver<G> {
    type Game = G;

    fn build(game: G, config: SolverConfig) -> Self {
        Self::with_config(game, config)
    }

    fn solve_params(&mut self, params: G::Params) -> Solution<G::Action> {
        DeterministicSolver::solve_params(self, params)
    }

    fn stats(&self) -> SolveStats {
        self.search.stats()
    }
}

impl<G: StochasticGame> Solve for StochasticSolver<G> {
    type Game = G;

    fn build(game: G, config: SolverConfig) -> Self {
        Self::with_config(game, config)
    }

    fn solve_params(&mut self, params: G::Params) -> Solution<G::Action> {
        StochasticSolver::solve_params(self, params)
    }

    fn stats(&self) -> SolveStats {
        self.search.stats()
    }
}

/// Memo table, counters and the two traversal strategies.
struct Search<K, A> {
    memo: MemoTable<K, A>,
    counter: u64,
    cached_counter: u64,
    elapsed_seconds: f64,
}

/// An action whose successors are being solved.
struct Pending<S, A> {
    action: A,
    outcomes: Outcomes<S>,
    values: Vec<f64>,
}

/// A state on the explicit traversal stack.
struct Frame<S, K, A> {
    state: S,
    key: K,
    actions: std::vec::IntoIter<A>,
    pending: Option<Pending<S, A>>,
    best: Option<(A, f64)>,
}

impl<S, K, A> Frame<S, K, A> {
    fn new(state: S, key: K, actions: Vec<A>) -> Self {
        Self {
            state,
            key,
            actions: actions.into_iter(),
            pending: None,
            best: None,
        }
    }
}

/// What the top frame needs next.
enum Directive<S, K> {
    /// Solve this uncached successor first.
    Descend(S, K),
    /// Every action has been evaluated.
    Finish,
}

impl<K: Eq + Hash + Clone, A: Clone> Search<K, A> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            memo: MemoTable::with_capacity(capacity),
            counter: 0,
            cached_counter: 0,
            elapsed_seconds: 0.0,
        }
    }

    fn clear(&mut self) {
        self.memo.clear();
        self.counter = 0;
        self.cached_counter = 0;
        self.elapsed_seconds = 0.0;
    }

    fn stats(&self) -> SolveStats {
        SolveStats {
            counter: self.counter,
            cached_counter: self.cached_counter,
            memo_entries: self.memo.len(),
            elapsed_seconds: self.elapsed_seconds,
        }
    }

    fn lookup<G>(&self, game: &G, state: &G::State) -> Option<Solution<A>>
    where
        G: Game<Key = K, Action = A>,
    {
        self.memo
            .get(&game.state_key(state))
            .map(|entry| Solution::from(entry.clone()))
    }

    fn solve<G, F>(
        &mut self,
        game: &G,
        root: &G::State,
        traversal: Traversal,
        tolerance: Option<f64>,
        expand: &F,
    ) -> Solution<A>
    where
        G: Game<Key = K, Action = A>,
        F: Fn(&G::State, &G::Action) -> Outcomes<G::State>,
    {
        let key = game.state_key(root);
        if let Some(entry) = self.memo.get(&key) {
            return Solution::from(entry.clone());
        }

        let start_time = Instant::now();
        let (visits, computed) = (self.counter, self.cached_counter);

        self.counter += 1;
        let entry = match traversal {
            Traversal::Recursive => self.compute_recursive(game, root, key, tolerance, expand),
            Traversal::ExplicitStack => {
                self.compute_iterative(game, root.clone(), key, tolerance, expand)
            }
        };

        self.elapsed_seconds += start_time.elapsed().as_secs_f64();
        debug!(
            "solved {} -> {:?} worth {} ({} visits, {} computed, {} memoized)",
            game.state_description(root),
            entry.action.as_ref().map(|a| game.action_name(a)),
            entry.value,
            self.counter - visits,
            self.cached_counter - computed,
            self.memo.len()
        );

        Solution::from(entry)
    }

    /// Visit a successor: count it, then answer from the memo or recurse.
    fn visit_recursive<G, F>(
        &mut self,
        game: &G,
        state: &G::State,
        tolerance: Option<f64>,
        expand: &F,
    ) -> f64
    where
        G: Game<Key = K, Action = A>,
        F: Fn(&G::State, &G::Action) -> Outcomes<G::State>,
    {
        self.counter += 1;
        let key = game.state_key(state);
        if let Some(entry) = self.memo.get(&key) {
            return entry.value;
        }
        self.compute_recursive(game, state, key, tolerance, expand).value
    }

    fn compute_recursive<G, F>(
        &mut self,
        game: &G,
        state: &G::State,
        key: K,
        tolerance: Option<f64>,
        expand: &F,
    ) -> MemoEntry<A>
    where
        G: Game<Key = K, Action = A>,
        F: Fn(&G::State, &G::Action) -> Outcomes<G::State>,
    {
        self.cached_counter += 1;

        let mut best: Option<(A, f64)> = None;
        for action in game.action_domain(state) {
            let outcomes = expand(state, &action);
            check_mass(game, state, &action, &outcomes, tolerance);

            let values: Vec<f64> = outcomes
                .iter()
                .map(|outcome| self.visit_recursive(game, &outcome.state, tolerance, expand))
                .collect();

            let value = aggregate(&outcomes, &values);
            keep_best(&mut best, action, value);
        }

        let entry = into_entry(best);
        self.memo.insert(key, entry.clone());
        entry
    }

    /// Same visit order as the recursive strategy, on a heap stack.
    fn compute_iterative<G, F>(
        &mut self,
        game: &G,
        root: G::State,
        key: K,
        tolerance: Option<f64>,
        expand: &F,
    ) -> MemoEntry<A>
    where
        G: Game<Key = K, Action = A>,
        F: Fn(&G::State, &G::Action) -> Outcomes<G::State>,
    {
        self.cached_counter += 1;
        let actions = game.action_domain(&root);
        let mut stack = vec![Frame::new(root, key, actions)];

        loop {
            let directive = match stack.last_mut() {
                Some(frame) => self.advance(game, frame, tolerance, expand),
                None => break,
            };

            match directive {
                Directive::Descend(state, key) => {
                    self.cached_counter += 1;
                    let actions = game.action_domain(&state);
                    stack.push(Frame::new(state, key, actions));
                }
                Directive::Finish => {
                    let Some(frame) = stack.pop() else { break };
                    let entry = into_entry(frame.best);

                    match stack.last_mut().and_then(|parent| parent.pending.as_mut()) {
                        Some(pending) => {
                            pending.values.push(entry.value);
                            self.memo.insert(frame.key, entry);
                        }
                        None => {
                            self.memo.insert(frame.key, entry.clone());
                            return entry;
                        }
                    }
                }
            }
        }

        // The root frame always returns through `Finish`.
        MemoEntry::terminal()
    }

    /// Progress the top frame until it needs an uncached successor or is done.
    fn advance<G, F>(
        &mut self,
        game: &G,
        frame: &mut Frame<G::State, K, A>,
        tolerance: Option<f64>,
        expand: &F,
    ) -> Directive<G::State, K>
    where
        G: Game<Key = K, Action = A>,
        F: Fn(&G::State, &G::Action) -> Outcomes<G::State>,
    {
        loop {
            let pending = match frame.pending.as_mut() {
                Some(pending) => pending,
                None => {
                    let Some(action) = frame.actions.next() else {
                        return Directive::Finish;
                    };
                    let outcomes = expand(&frame.state, &action);
                    check_mass(game, &frame.state, &action, &outcomes, tolerance);
                    frame.pending.insert(Pending {
                        action,
                        values: Vec::with_capacity(outcomes.len()),
                        outcomes,
                    })
                }
            };

            let next = pending.values.len();
            if let Some(outcome) = pending.outcomes.as_slice().get(next) {
                self.counter += 1;
                let key = game.state_key(&outcome.state);
                match self.memo.get(&key) {
                    Some(entry) => pending.values.push(entry.value),
                    None => return Directive::Descend(outcome.state.clone(), key),
                }
                continue;
            }

            if let Some(Pending {
                action,
                outcomes,
                values,
            }) = frame.pending.take()
            {
                let value = aggregate(&outcomes, &values);
                keep_best(&mut frame.best, action, value);
            }
        }
    }
}

/// Expected value of one action from its solved successor values.
fn aggregate<S>(outcomes: &Outcomes<S>, values: &[f64]) -> f64 {
    expected_value(
        outcomes
            .iter()
            .zip(values)
            .map(|(outcome, &value)| (outcome.probability, value, outcome.reward)),
    )
}

/// Strict `>`: on ties the action enumerated first is kept.
fn keep_best<A>(best: &mut Option<(A, f64)>, action: A, value: f64) {
    let better = match best {
        Some((_, current)) => value > *current,
        None => true,
    };
    if better {
        *best = Some((action, value));
    }
}

fn into_entry<A>(best: Option<(A, f64)>) -> MemoEntry<A> {
    match best {
        Some((action, value)) => MemoEntry {
            action: Some(action),
            value,
        },
        None => MemoEntry::terminal(),
    }
}

fn check_mass<G: Game>(
    game: &G,
    state: &G::State,
    action: &G::Action,
    outcomes: &Outcomes<G::State>,
    tolerance: Option<f64>,
) {
    if let Some(tolerance) = tolerance {
        if !is_distribution(outcomes, tolerance) {
            warn!(
                "action {} at {} has probability mass {} (expected 1)",
                game.action_name(action),
                game.state_description(state),
                probability_mass(outcomes)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dp::game::Certain;
    use rustc_hash::FxHashMap;

    /// Explicit graph: node -> [(successor, probability, reward)] per action.
    #[derive(Debug, Clone, Default)]
    struct Graph {
        edges: FxHashMap<u32, Vec<Vec<(u32, f64, f64)>>>,
    }

    impl Graph {
        fn with(mut self, node: u32, actions: Vec<Vec<(u32, f64, f64)>>) -> Self {
            self.edges.insert(node, actions);
            self
        }

        /// Deterministic edge helper.
        fn det(mut self, node: u32, actions: Vec<(u32, f64)>) -> Self {
            let actions = actions.into_iter().map(|(s, r)| vec![(s, 1.0, r)]).collect();
            self.edges.insert(node, actions);
            self
        }
    }

    impl Game for Graph {
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
            self.edges.get(state).map_or(Vec::new(), |a| (0..a.len()).collect())
        }
    }

    impl StochasticGame for Graph {
        fn step(&self, state: &u32, action: &usize) -> Outcomes<u32> {
            let mut outcomes = Outcomes::new();
            for &(next, p, r) in &self.edges[state][*action] {
                outcomes.push(next, p, r);
            }
            outcomes
        }
    }

    impl DeterministicGame for Graph {
        fn step(&self, state: &u32, action: &usize) -> Transition<u32> {
            let (next, _, reward) = self.edges[state][*action][0];
            Transition::new(next, reward)
        }
    }

    fn diamond() -> Graph {
        // 0 -> {1, 2} -> 3
        Graph::default()
            .det(0, vec![(1, 1.0), (2, 2.0)])
            .det(1, vec![(3, 5.0)])
            .det(2, vec![(3, 3.0)])
    }

    fn strategies() -> [SolverConfig; 2] {
        [SolverConfig::default(), SolverConfig::recursive()]
    }

    #[test]
    fn test_terminal_only() {
        for config in strategies() {
            let mut solver = DeterministicSolver::with_config(Graph::default(), config);
            let solution = solver.solve(&0);

            assert_eq!(solution, Solution { action: None, value: 0.0 });
            assert_eq!(solver.counter(), 1);
            assert_eq!(solver.cached_counter(), 1);
            assert_eq!(solver.memo().len(), 1);
        }
    }

    #[test]
    fn test_diamond_counts_revisit() {
        for config in strategies() {
            let mut solver = DeterministicSolver::with_config(diamond(), config);
            let solution = solver.solve(&0);

            // 1 + 5 beats 2 + 3
            assert_eq!(solution, Solution { action: Some(0), value: 6.0 });
            assert_eq!(solver.counter(), 5, "node 3 is visited twice");
            assert_eq!(solver.cached_counter(), 4);
            assert!(solver.cached_counter() <= solver.counter());
        }
    }

    #[test]
    fn test_second_solve_is_full_cache_hit() {
        for config in strategies() {
            let mut solver = DeterministicSolver::with_config(diamond(), config);
            let first = solver.solve(&0);
            let stats = solver.stats();

            let second = solver.solve(&0);
            assert_eq!(first, second);
            assert_eq!(solver.stats().counter, stats.counter);
            assert_eq!(solver.stats().cached_counter, stats.cached_counter);
        }
    }

    #[test]
    fn test_subproblem_already_solved() {
        let mut solver = DeterministicSolver::new(diamond());
        solver.solve(&0);

        assert_eq!(solver.lookup(&1), Some(Solution { action: Some(0), value: 5.0 }));
        assert_eq!(solver.lookup(&3), Some(Solution { action: None, value: 0.0 }));

        let counter = solver.counter();
        assert_eq!(solver.solve(&2).value, 3.0);
        assert_eq!(solver.counter(), counter);
    }

    #[test]
    fn test_tie_break_prefers_first_action() {
        for config in strategies() {
            let game = Graph::default().det(0, vec![(1, 2.0), (2, 2.0), (3, 1.0)]);
            let mut solver = DeterministicSolver::with_config(game, config.clone());
            assert_eq!(solver.solve(&0).action, Some(0));

            let game = Graph::default().det(0, vec![(3, 1.0), (1, 2.0), (2, 2.0)]);
            let mut solver = DeterministicSolver::with_config(game, config);
            assert_eq!(solver.solve(&0).action, Some(1));
        }
    }

    #[test]
    fn test_all_negative_rewards_still_pick_an_action() {
        let game = Graph::default().det(0, vec![(1, -1e9), (2, -5e8)]);
        let mut solver = DeterministicSolver::new(game);
        assert_eq!(solver.solve(&0), Solution { action: Some(1), value: -5e8 });
    }

    #[test]
    fn test_expected_value_of_fair_branch() {
        // Action 0 at node 0: 50/50 into nodes worth 4 and 6.
        let game = Graph::default()
            .with(0, vec![vec![(1, 0.5, 0.0), (2, 0.5, 0.0)]])
            .det(1, vec![(3, 4.0)])
            .det(2, vec![(3, 6.0)]);

        for config in strategies() {
            let mut solver = StochasticSolver::with_config(game.clone(), config);
            assert_eq!(solver.solve(&0), Solution { action: Some(0), value: 5.0 });
        }
    }

    #[test]
    fn test_repeated_successor_within_one_action() {
        // Both branches of action 0 land on node 1, which is worth 4.
        let game = Graph::default()
            .with(0, vec![vec![(1, 0.5, 0.0), (1, 0.5, 2.0)]])
            .det(1, vec![(2, 4.0)]);

        for config in strategies() {
            let mut solver = StochasticSolver::with_config(game.clone(), config);
            let solution = solver.solve(&0);

            assert_eq!(solution, Solution { action: Some(0), value: 5.0 });
            assert_eq!(solver.counter(), 4, "node 1 is visited once per branch");
            assert_eq!(solver.cached_counter(), 3);
            assert!(solver.cached_counter() <= solver.counter());

            assert_eq!(solver.solve(&0), solution);
            assert_eq!(solver.counter(), 4);
            assert_eq!(solver.cached_counter(), 3);
        }
    }

    #[test]
    fn test_stochastic_prefers_higher_expectation() {
        // Safe 3.0 versus a gamble worth 0.9 * 0 + 0.1 * 40 = 4.0.
        let game = Graph::default().with(
            0,
            vec![vec![(1, 1.0, 3.0)], vec![(1, 0.9, 0.0), (2, 0.1, 40.0)]],
        );
        let mut solver = StochasticSolver::new(game);
        let solution = solver.solve(&0);

        assert_eq!(solution.action, Some(1));
        assert!((solution.value - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_mass_is_not_renormalized() {
        let game = Graph::default().with(0, vec![vec![(1, 0.5, 10.0)]]);
        let mut solver = StochasticSolver::with_config(game, SolverConfig::checked());
        assert_eq!(solver.solve(&0).value, 5.0);
    }

    #[test]
    fn test_certain_matches_deterministic() {
        for config in strategies() {
            let mut det = DeterministicSolver::with_config(diamond(), config.clone());
            let mut sto = StochasticSolver::with_config(Certain(diamond()), config);

            assert_eq!(det.solve(&0), sto.solve(&0));
            assert_eq!(det.counter(), sto.counter());
            assert_eq!(det.cached_counter(), sto.cached_counter());
        }
    }

    #[test]
    fn test_strategies_agree_on_layered_graph() {
        // Layered stochastic DAG with heavy sharing between layers.
        let mut game = Graph::default();
        for layer in 0..6u32 {
            for i in 0..4u32 {
                let node = layer * 4 + i;
                let next = (layer + 1) * 4;
                let actions = (0..3u32)
                    .map(|a| {
                        vec![
                            (next + (i + a) % 4, 0.25, (a + i) as f64),
                            (next + (i + a + 1) % 4, 0.75, layer as f64 - a as f64),
                        ]
                    })
                    .collect();
                game = game.with(node, actions);
            }
        }

        let mut iterative = StochasticSolver::new(game.clone());
        let mut recursive = StochasticSolver::with_config(game, SolverConfig::recursive());

        for root in 0..4 {
            assert_eq!(iterative.solve(&root), recursive.solve(&root));
        }
        assert_eq!(iterative.counter(), recursive.counter());
        assert_eq!(iterative.cached_counter(), recursive.cached_counter());
        assert_eq!(iterative.memo().len(), recursive.memo().len());
        for (key, entry) in iterative.memo().iter() {
            assert_eq!(recursive.memo().get(key), Some(entry));
        }
    }

    #[test]
    fn test_explicit_stack_handles_deep_chains() {
        let depth = 200_000u32;
        let mut game = Graph::default();
        for node in 0..depth {
            game = game.det(node, vec![(node + 1, 1.0)]);
        }

        let mut solver = DeterministicSolver::new(game);
        let solution = solver.solve(&0);

        assert_eq!(solution.value, depth as f64);
        assert_eq!(solver.counter(), depth as u64 + 1);
        assert_eq!(solver.cached_counter(), depth as u64 + 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut solver = DeterministicSolver::new(diamond());
        solver.solve(&0);
        solver.clear();

        assert_eq!(solver.stats(), SolveStats::default());
        assert!(solver.lookup(&0).is_none());
    }

    #[test]
    fn test_solve_params_resets_first() {
        let mut solver = DeterministicSolver::new(diamond());
        assert_eq!(solver.solve_params(2).value, 3.0);
    }
}
