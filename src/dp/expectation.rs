//! Expected-value aggregation over stochastic outcomes.

use crate::dp::game::Outcomes;

/// Expected total of one action.
///
/// Each item is `(probability, successor_value, reward)`; the result is
/// `Σ probability * (successor_value + reward)` summed left to right from
/// `0.0`. No renormalization is applied.
pub fn expected_value<I>(branches: I) -> f64
where
    I: IntoIterator<Item = (f64, f64, f64)>,
{
    branches
        .into_iter()
        .fold(0.0, |acc, (probability, value, reward)| {
            acc + probability * (value + reward)
        })
}

/// Total probability carried by a distribution.
pub fn probability_mass<S>(outcomes: &Outcomes<S>) -> f64 {
    outcomes.iter().map(|o| o.probability).sum()
}

/// Whether a distribution is non-negative and sums to 1 within `tolerance`.
pub fn is_distribution<S>(outcomes: &Outcomes<S>, tolerance: f64) -> bool {
    outcomes.iter().all(|o| o.probability >= 0.0)
        && (probability_mass(outcomes) - 1.0).abs() <= tolerance
}
