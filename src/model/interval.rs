//! Position intervals decoded from verified proofs

use super::{Weight, MAX_DEPTH};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The half-open interval `[position / 2^depth, (position + 1) / 2^depth)`
///
/// Both bounds are exact dyadic rationals; floating point is only used by
/// the convenience accessors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct Interval {
    position: u64,
    depth: u32,
}

impl Interval {
    /// The whole interval [0,1)
    pub const FULL: Interval = Interval {
        position: 0,
        depth: 0,
    };

    /// Create the `position`-th interval of width 2^-depth
    ///
    /// Returns None if the depth is unsupported or the position lies outside [0,1).
    pub fn new(position: u64, depth: u32) -> Option<Self> {
        if depth > MAX_DEPTH || position >= 1u64 << depth {
            return None;
        }
        Some(Interval { position, depth })
    }

    /// Create an interval whose bounds the caller has already checked
    pub(crate) fn from_parts(position: u64, depth: u32) -> Self {
        debug_assert!(depth <= MAX_DEPTH && position < 1u64 << depth);
        Interval { position, depth }
    }

    /// Index of this interval among the 2^depth intervals of equal width
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Depth of the leaf the interval belongs to
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Denominator shared by both bounds
    pub fn denominator(&self) -> u64 {
        1u64 << self.depth
    }

    /// Numerator of the inclusive lower bound
    pub fn start_numerator(&self) -> u64 {
        self.position
    }

    /// Numerator of the exclusive upper bound
    pub fn end_numerator(&self) -> u64 {
        self.position + 1
    }

    /// Lower bound measured in 1/1024ths
    pub fn start_units(&self) -> u64 {
        self.position << (MAX_DEPTH - self.depth)
    }

    /// Upper bound measured in 1/1024ths
    pub fn end_units(&self) -> u64 {
        (self.position + 1) << (MAX_DEPTH - self.depth)
    }

    /// Width of the interval, equal to the weight of the proven entry
    pub fn width(&self) -> Weight {
        // depth <= MAX_DEPTH is upheld by the constructor
        Weight::from_depth(self.depth).unwrap_or(Weight::MIN)
    }

    /// Lower bound as a probability
    pub fn start(&self) -> f64 {
        self.position as f64 / self.denominator() as f64
    }

    /// Upper bound as a probability
    pub fn end(&self) -> f64 {
        (self.position + 1) as f64 / self.denominator() as f64
    }

    /// Check whether a point of [0,1) falls inside this interval
    pub fn contains(&self, point: f64) -> bool {
        self.start() <= point && point < self.end()
    }
}

/// Wire form of an interval, checked before it becomes an `Interval`
#[derive(Serialize, Deserialize)]
struct RawInterval {
    position: u64,
    depth: u32,
}

impl TryFrom<RawInterval> for Interval {
    type Error = Error;

    fn try_from(raw: RawInterval) -> Result<Self, Error> {
        Interval::new(raw.position, raw.depth).ok_or(Error::InvalidInterval {
            position: raw.position,
            depth: raw.depth,
        })
    }
}

impl From<Interval> for RawInterval {
    fn from(i: Interval) -> Self {
        RawInterval {
            position: i.position,
            depth: i.depth,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.denominator();
        write!(f, "[{}/{}, {}/{})", self.position, d, self.position + 1, d)
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interval{}", self)
    }
}
