//! Digests and the pluggable hash function behind every tree node

mod digest;
mod hasher;

pub use digest::{Hash, DIGEST_LEN};
pub use hasher::{Blake3Hasher, Hasher, Keccak256Hasher};
