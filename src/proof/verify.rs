//! Proof verification
//!
//! Replays the canonical combination rule over a proof. Whenever the running
//! digest is not the smaller of the pair, it must have been the upper half at
//! that level, which sets the corresponding bit of the leaf's position.

use crate::hash::{Hash, Hasher};
use crate::model::{Interval, MAX_DEPTH};
use crate::{Error, Result};
use tracing::debug;

/// Longest proof a valid tree can produce: the leaf plus one sibling per level
pub const MAX_PROOF_LEN: usize = MAX_DEPTH as usize + 1;

/// Verify a merkle proof against a root hash
///
/// On success returns the interval of [0,1) the proven entry occupies; its
/// width is the entry's weight.
pub fn verify_proof<H: Hasher + ?Sized>(hasher: &H, root: &Hash, proof: &[Hash]) -> Result<Interval> {
    match proof.len() {
        0 => return Err(Error::InvalidProof("empty proof".into())),
        1 if proof[0] == *root => return Ok(Interval::FULL),
        1 => return Err(Error::InvalidProof("leaf does not match root".into())),
        n if n > MAX_PROOF_LEN => {
            return Err(Error::InvalidProof(format!(
                "{} digests exceed the maximum of {}",
                n, MAX_PROOF_LEN
            )))
        }
        _ => {}
    }

    let mut current = proof[0];
    let mut position = 0u64;
    for (i, sibling) in proof.iter().enumerate().skip(1) {
        if current < *sibling {
            current = hasher.digest_concat(&current, sibling);
        } else {
            current = hasher.digest_concat(sibling, &current);
            position += 1 << (i - 1);
        }
    }

    if current != *root {
        debug!(
            expected = %root.short(),
            computed = %current.short(),
            "proof does not reproduce root"
        );
        return Err(Error::InvalidProof("computed root does not match".into()));
    }
    Ok(Interval::from_parts(position, (proof.len() - 1) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Blake3Hasher, Keccak256Hasher};

    #[test]
    fn test_empty_proof() {
        let root = Keccak256Hasher.digest(b"root");
        assert!(matches!(
            verify_proof(&Keccak256Hasher, &root, &[]),
            Err(Error::InvalidProof(_))
        ));
    }

    #[test]
    fn test_single_digest_proof() {
        let root = Keccak256Hasher.digest(b"root");
        assert_eq!(
            verify_proof(&Keccak256Hasher, &root, &[root]).unwrap(),
            Interval::FULL
        );
        let other = Keccak256Hasher.digest(b"other");
        assert!(matches!(
            verify_proof(&Keccak256Hasher, &root, &[other]),
            Err(Error::InvalidProof(_))
        ));
    }

    #[test]
    fn test_two_leaf_positions() {
        let a = Blake3Hasher.digest(b"a");
        let b = Blake3Hasher.digest(b"b");
        let root = Blake3Hasher.combine(&a, &b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };

        let lower = verify_proof(&Blake3Hasher, &root, &[lo, hi]).unwrap();
        let upper = verify_proof(&Blake3Hasher, &root, &[hi, lo]).unwrap();
        assert_eq!(lower, Interval::new(0, 1).unwrap());
        assert_eq!(upper, Interval::new(1, 1).unwrap());
    }

    #[test]
    fn test_wrong_hasher_fails() {
        let a = Blake3Hasher.digest(b"a");
        let b = Blake3Hasher.digest(b"b");
        let root = Blake3Hasher.combine(&a, &b);
        assert!(verify_proof(&Keccak256Hasher, &root, &[a, b]).is_err());
    }

    #[test]
    fn test_overlong_proof() {
        let digest = Keccak256Hasher.digest(b"x");
        let proof = vec![digest; MAX_PROOF_LEN + 1];
        assert!(matches!(
            verify_proof(&Keccak256Hasher, &digest, &proof),
            Err(Error::InvalidProof(_))
        ));
    }
}
