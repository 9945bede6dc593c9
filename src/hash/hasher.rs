//! Hash function trait and the canonical sibling combination rule

use super::{Hash, DIGEST_LEN};
use sha3::{Digest, Keccak256};

/// Trait for the 256-bit hash function a tree is built with
///
/// Builder and verifier must agree on the implementation. Two are shipped:
/// - [`Keccak256Hasher`], the default
/// - [`Blake3Hasher`]
pub trait Hasher: Send + Sync {
    /// Hash arbitrary data
    fn digest(&self, data: &[u8]) -> Hash;

    /// Get the hash function name
    fn name(&self) -> &str;

    /// Hash the concatenation `first || second`
    /// Default implementation copies both into one buffer and calls digest()
    fn digest_concat(&self, first: &Hash, second: &Hash) -> Hash {
        let mut buf = [0u8; DIGEST_LEN * 2];
        buf[..DIGEST_LEN].copy_from_slice(first.as_bytes());
        buf[DIGEST_LEN..].copy_from_slice(second.as_bytes());
        self.digest(&buf)
    }

    /// Combine two sibling digests into their parent's digest
    ///
    /// The lexicographically smaller digest is always hashed first, so the
    /// result does not depend on which child is structurally left.
    fn combine(&self, a: &Hash, b: &Hash) -> Hash {
        if a < b {
            self.digest_concat(a, b)
        } else {
            self.digest_concat(b, a)
        }
    }
}

/// Keccak-256, as used by Ethereum
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keccak256Hasher;

impl Hasher for Keccak256Hasher {
    fn digest(&self, data: &[u8]) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&hasher.finalize());
        Hash::from_bytes(out)
    }

    fn digest_concat(&self, first: &Hash, second: &Hash) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(first.as_bytes());
        hasher.update(second.as_bytes());
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&hasher.finalize());
        Hash::from_bytes(out)
    }

    fn name(&self) -> &str {
        "keccak256"
    }
}

/// BLAKE3 with a 32-byte output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blake3Hasher;

impl Hasher for Blake3Hasher {
    fn digest(&self, data: &[u8]) -> Hash {
        Hash::from_bytes(*blake3::hash(data).as_bytes())
    }

    fn digest_concat(&self, first: &Hash, second: &Hash) -> Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(first.as_bytes());
        hasher.update(second.as_bytes());
        Hash::from_bytes(*hasher.finalize().as_bytes())
    }

    fn name(&self) -> &str {
        "blake3"
    }
}

impl<H: Hasher + ?Sized> Hasher for &H {
    fn digest(&self, data: &[u8]) -> Hash {
        (**self).digest(data)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn digest_concat(&self, first: &Hash, second: &Hash) -> Hash {
        (**self).digest_concat(first, second)
    }
}

impl<H: Hasher + ?Sized> Hasher for Box<H> {
    fn digest(&self, data: &[u8]) -> Hash {
        (**self).digest(data)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn digest_concat(&self, first: &Hash, second: &Hash) -> Hash {
        (**self).digest_concat(first, second)
    }
}
