//! Entry type - a value together with the probability it is picked

use super::Weight;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A data entry referenced by the tree
///
/// The weight is kept as the caller supplied it; it is only accepted when
/// building a tree if it equals one of the canonical dyadic constants.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    value: Vec<u8>,
    weight: f64,
}

impl Entry {
    /// Create an entry with the given value and probability
    pub fn new(value: impl Into<Vec<u8>>, weight: f64) -> Self {
        Entry {
            value: value.into(),
            weight,
        }
    }

    /// Create an entry from an already validated weight
    pub fn with_weight(value: impl Into<Vec<u8>>, weight: Weight) -> Self {
        Entry::new(value, weight.as_f64())
    }

    /// Create an empty-valued entry used to pad a tree up to total weight 1
    pub fn placeholder(weight: Weight) -> Self {
        Entry::with_weight(Vec::new(), weight)
    }

    /// The referenced value
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The probability as supplied by the caller
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry({}:{})", hex::encode(&self.value), self.weight)
    }
}
