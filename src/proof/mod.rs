//! Merkle proofs and their verification

mod verify;

pub use verify::{verify_proof, MAX_PROOF_LEN};

use crate::hash::{Hash, Hasher};
use crate::model::Interval;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of digests from a leaf up to (but excluding) the root
///
/// The first digest is the leaf's own; each following digest is the sibling
/// at the next level up. No direction bits are needed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    digests: Vec<Hash>,
}

impl Proof {
    /// Create a proof from raw digests
    pub fn new(digests: Vec<Hash>) -> Self {
        Proof { digests }
    }

    pub fn digests(&self) -> &[Hash] {
        &self.digests
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// The proven leaf's digest
    pub fn leaf(&self) -> Option<&Hash> {
        self.digests.first()
    }

    /// Depth of the proven leaf
    pub fn depth(&self) -> usize {
        self.digests.len().saturating_sub(1)
    }

    /// Verify against a root and decode the proven entry's interval
    pub fn verify<H: Hasher + ?Sized>(&self, hasher: &H, root: &Hash) -> Result<Interval> {
        verify_proof(hasher, root, &self.digests)
    }

    pub fn into_digests(self) -> Vec<Hash> {
        self.digests
    }

    /// Encode as a length-prefixed array of digests
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from the form produced by to_bytes()
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Render every digest as hex
    pub fn to_hex(&self) -> Vec<String> {
        self.digests.iter().map(Hash::to_hex).collect()
    }

    /// Parse a proof from hex digests
    pub fn from_hex<S: AsRef<str>>(digests: &[S]) -> Result<Self> {
        digests
            .iter()
            .map(|s| {
                Hash::from_hex(s.as_ref())
                    .map_err(|e| Error::InvalidHash(format!("{}: {}", s.as_ref(), e)))
            })
            .collect::<Result<Vec<_>>>()
            .map(Proof::new)
    }
}

impl From<Vec<Hash>> for Proof {
    fn from(digests: Vec<Hash>) -> Self {
        Proof::new(digests)
    }
}

impl AsRef<[Hash]> for Proof {
    fn as_ref(&self) -> &[Hash] {
        &self.digests
    }
}

impl fmt::Debug for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.digests.iter()).finish()
    }
}
