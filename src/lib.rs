//! # weighted_merkle
//!
//! A merkle tree over weighted entries where every entry owns a slice of the
//! unit interval [0,1) as wide as its weight.
//!
//! Weights are restricted to the dyadic fractions 1, 1/2, ..., 1/1024, so
//! every entry sits at depth `-log2(weight)` of a complete binary tree.
//! Sibling digests are always hashed smaller-first, which lets a proof
//! both attest membership under the root and reveal the entry's interval
//! without any direction bits.
//!
//! ## Core Concepts
//!
//! - **Entries**: a value plus a dyadic weight
//! - **Padding**: empty placeholder entries fill the tree up to weight 1
//! - **Proofs**: the leaf digest followed by one sibling digest per level
//! - **Intervals**: decoded from a proof by the verifier alone
//!
//! ## Example
//!
//! ```
//! use weighted_merkle::{verify_proof, Entry, Keccak256Hasher, MerkleTree};
//!
//! let tree = MerkleTree::build(vec![
//!     Entry::new(b"v1".to_vec(), 0.5),
//!     Entry::new(b"v2".to_vec(), 0.25),
//!     Entry::new(b"v3".to_vec(), 0.125),
//! ])?;
//!
//! let proof = tree.prove(&Entry::new(b"v1".to_vec(), 0.5))?;
//! let interval = verify_proof(&Keccak256Hasher, &tree.root_hash(), proof.digests())?;
//! assert_eq!(interval.width().as_f64(), 0.5);
//! # Ok::<(), weighted_merkle::Error>(())
//! ```

pub mod config;
pub mod hash;
pub mod model;
pub mod proof;
pub mod tree;

mod error;

pub use config::{HashAlgorithm, ManifestEntry, TreeManifest};
pub use error::{Error, Result};
pub use hash::{Blake3Hasher, Hash, Hasher, Keccak256Hasher, DIGEST_LEN};
pub use model::{Entry, Interval, Weight, MAX_DEPTH, VALID_WEIGHTS, WEIGHT_UNITS};
pub use proof::{verify_proof, Proof, MAX_PROOF_LEN};
pub use tree::{padding_weights, validate_weights, MerkleTree};
