//! Dyadic weights - the only probabilities a tree accepts

use crate::Error;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Deepest level a leaf can sit at; the smallest weight is 2^-MAX_DEPTH
pub const MAX_DEPTH: u32 = 10;

/// Number of smallest-weight units that make up the whole interval [0,1)
pub const WEIGHT_UNITS: u64 = 1 << MAX_DEPTH;

/// The canonical weights, largest first
pub const VALID_WEIGHTS: [f64; MAX_DEPTH as usize + 1] = [
    1.0,
    0.5,
    0.25,
    0.125,
    0.0625,
    0.03125,
    0.015625,
    0.0078125,
    0.00390625,
    0.001953125,
    0.0009765625,
];

/// A weight of the form 2^-depth, identified by the leaf depth it implies
///
/// Serialized as the bare depth; deserialization rejects depths past
/// `MAX_DEPTH`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Weight {
    depth: u32,
}

impl Weight {
    /// The whole interval
    pub const ONE: Weight = Weight { depth: 0 };

    /// The smallest supported weight, 1/1024
    pub const MIN: Weight = Weight { depth: MAX_DEPTH };

    /// Create the weight 2^-depth
    pub fn from_depth(depth: u32) -> Option<Self> {
        (depth <= MAX_DEPTH).then_some(Weight { depth })
    }

    /// Match a probability exactly against the canonical constants
    pub fn from_probability(p: f64) -> Option<Self> {
        VALID_WEIGHTS
            .iter()
            .position(|w| *w == p)
            .map(|depth| Weight {
                depth: depth as u32,
            })
    }

    /// Largest weight that fits in `units` (measured in 1/1024ths)
    pub fn largest_fitting(units: u64) -> Option<Self> {
        (0..=MAX_DEPTH)
            .map(|depth| Weight { depth })
            .find(|w| w.units() <= units)
    }

    /// Depth a leaf of this weight occupies in a complete tree
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Weight measured in 1/1024ths
    pub fn units(&self) -> u64 {
        WEIGHT_UNITS >> self.depth
    }

    /// Weight as a probability
    pub fn as_f64(&self) -> f64 {
        VALID_WEIGHTS[self.depth as usize]
    }

    /// The weight of a parent whose two children both weigh `self`
    pub fn doubled(&self) -> Option<Self> {
        self.depth.checked_sub(1).map(|depth| Weight { depth })
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        other.depth.cmp(&self.depth)
    }
}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.depth == 0 {
            write!(f, "1")
        } else {
            write!(f, "1/{}", 1u64 << self.depth)
        }
    }
}

impl fmt::Debug for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weight({})", self)
    }
}

impl TryFrom<u32> for Weight {
    type Error = Error;

    fn try_from(depth: u32) -> Result<Self, Error> {
        Weight::from_depth(depth).ok_or(Error::InvalidDepth(depth))
    }
}

impl From<Weight> for u32 {
    fn from(w: Weight) -> u32 {
        w.depth
    }
}

impl From<Weight> for f64 {
    fn from(w: Weight) -> f64 {
        w.as_f64()
    }
}
