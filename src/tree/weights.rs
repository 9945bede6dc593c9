//! Weight validation and padding up to a complete tree

use crate::model::{Entry, Weight, WEIGHT_UNITS};
use crate::{Error, Result};

/// Check that the weights sum to at most 1 and that every entry carries a
/// canonical dyadic weight
///
/// The sum is checked first, over every finite non-negative weight, so an
/// oversized input reports `WeightOverflow` even when some of its weights
/// are not dyadic. Returns the parsed weights in input order.
pub fn validate_weights(entries: &[Entry]) -> Result<Vec<Weight>> {
    let total: f64 = entries
        .iter()
        .map(|e| e.weight())
        .filter(|w| w.is_finite() && *w >= 0.0)
        .sum();
    if total > 1.0 {
        let total_units = (total * WEIGHT_UNITS as f64).ceil() as u64;
        return Err(Error::WeightOverflow { total_units });
    }

    entries
        .iter()
        .map(|entry| {
            Weight::from_probability(entry.weight()).ok_or(Error::InvalidWeight(entry.weight()))
        })
        .collect()
}

/// Weights of the placeholder entries needed to bring `total_units` up to 1
///
/// Greedy largest-fit; each returned weight is distinct and the list is in
/// descending order.
pub fn padding_weights(total_units: u64) -> Vec<Weight> {
    let mut deficit = WEIGHT_UNITS.saturating_sub(total_units);
    let mut padding = Vec::new();

    while let Some(weight) = Weight::largest_fitting(deficit) {
        deficit -= weight.units();
        padding.push(weight);
    }
    padding
}
