//! Construction of the weighted merkle tree
//!
//! - `weights` validates caller weights and computes placeholder padding
//! - `builder` arranges the padded entries into a complete binary tree
//! - `merkle` owns the finished tree and generates proofs

mod builder;
mod merkle;
mod node;
mod weights;

pub use merkle::MerkleTree;
pub use weights::{padding_weights, validate_weights};
