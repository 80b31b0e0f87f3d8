//! Configuration options for the DP solvers.
//!
//! This module provides the solver configuration, its validation errors, and
//! the statistics reported after a solve.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the solver walks the state graph.
///
/// Both strategies visit states in the same depth-first order and produce
/// identical solutions, memo tables and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    /// Heap-allocated frame stack. Depth is limited only by memory.
    #[default]
    ExplicitStack,
    /// Native recursion.
    ///
    /// Every level of the state graph costs one call frame, so very deep
    /// graphs can overflow the thread stack and abort the process. Spawned
    /// threads default to a 2 MiB stack, the main thread usually to 8 MiB.
    Recursive,
}

/// Configuration for the DP solvers.
///
/// # Example
/// ```
/// use dp_solver::dp::{SolverConfig, Traversal};
///
/// let config = SolverConfig::default();
/// assert_eq!(config.traversal, Traversal::ExplicitStack);
/// assert!(config.probability_tolerance.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Traversal strategy.
    pub traversal: Traversal,

    /// Number of memo entries to pre-allocate.
    pub initial_capacity: usize,

    /// Tolerance for the probability-mass diagnostic (stochastic solver).
    ///
    /// When set, any action whose outcome probabilities do not sum to 1
    /// within this tolerance is logged as a warning. The expected value is
    /// still computed from the probabilities as given. `None` disables the
    /// check.
    pub probability_tolerance: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            traversal: Traversal::ExplicitStack,
            initial_capacity: 0,
            probability_tolerance: None,
        }
    }
}

impl SolverConfig {
    /// Create a new SolverConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Native recursion, for shallow graphs.
    pub fn recursive() -> Self {
        Self {
            traversal: Traversal::Recursive,
            ..Default::default()
        }
    }

    /// Default traversal with the probability-mass diagnostic enabled.
    pub fn checked() -> Self {
        Self {
            probability_tolerance: Some(1e-9),
            ..Default::default()
        }
    }

    /// Builder method: set the traversal strategy.
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Builder method: set the memo pre-allocation.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Builder method: enable the probability-mass diagnostic.
    pub fn with_probability_tolerance(mut self, tolerance: f64) -> Self {
        self.probability_tolerance = Some(tolerance);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tolerance) = self.probability_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::InvalidTolerance(tolerance));
            }
        }

        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors that can occur when loading or validating solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Probability tolerance is negative or not finite.
    InvalidTolerance(f64),
    /// The configuration file could not be read.
    IoError(String),
    /// The configuration could not be parsed.
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidTolerance(val) => {
                write!(f, "Probability tolerance {} must be finite and non-negative", val)
            }
            ConfigError::IoError(msg) => write!(f, "Failed to read config: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Statistics tracked by a solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    /// State visits, cache hits included.
    pub counter: u64,

    /// Distinct subproblems actually computed.
    pub cached_counter: u64,

    /// Entries currently in the memo table.
    pub memo_entries: usize,

    /// Total time spent inside `solve` (in seconds).
    pub elapsed_seconds: f64,
}

impl SolveStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of visits answered from the memo table.
    pub fn hit_rate(&self) -> f64 {
        if self.counter == 0 {
            0.0
        } else {
            1.0 - self.cached_counter as f64 / self.counter as f64
        }
    }
}
