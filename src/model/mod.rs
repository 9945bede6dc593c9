//! Core data model types for weighted_merkle

mod entry;
mod interval;
mod weight;

pub use entry::Entry;
pub use interval::Interval;
pub use weight::{Weight, MAX_DEPTH, VALID_WEIGHTS, WEIGHT_UNITS};
