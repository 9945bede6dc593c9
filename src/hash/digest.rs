//! Fixed-width 256-bit digest type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width in bytes of every digest in a tree or proof
pub const DIGEST_LEN: usize = 32;

/// A 32-byte digest of a leaf value or of two combined children
///
/// Ordering is lexicographic over the raw bytes, which is exactly the
/// comparison used to pick the concatenation order of two siblings.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hash([u8; DIGEST_LEN]);

impl Hash {
    /// The zero hash
    pub const ZERO: Hash = Hash([0u8; DIGEST_LEN]);

    /// Create a hash from raw bytes
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Hash(bytes)
    }

    /// Create a hash from a slice, which must be exactly 32 bytes long
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; DIGEST_LEN] = bytes.try_into().ok()?;
        Some(Hash(arr))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string, with or without a `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Hash::from_slice(&bytes).ok_or(hex::FromHexError::InvalidStringLength)
    }

    /// Get a short prefix for display (first 8 hex chars)
    pub fn short(&self) -> String {
        self.to_hex()[..8].to_string()
    }

    /// Check if this is the zero hash
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; DIGEST_LEN]
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.short())
    }
}

impl Default for Hash {
    fn default() -> Self {
        Hash::ZERO
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for Hash {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Hash(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_hex_roundtrip() {
        let h1 = Hash::from_bytes([0xab; DIGEST_LEN]);
        let h2 = Hash::from_hex(&h1.to_hex()).unwrap();
        assert_eq!(h1, h2);

        let prefixed = format!("0x{}", h1.to_hex());
        assert_eq!(Hash::from_hex(&prefixed).unwrap(), h1);
    }

    #[test]
    fn test_hash_from_hex_wrong_length() {
        assert!(Hash::from_hex("abcd").is_err());
        assert!(Hash::from_slice(&[0u8; 31]).is_none());
    }

    #[test]
    fn test_hash_ordering_is_lexicographic() {
        let mut low = [0u8; DIGEST_LEN];
        let mut high = [0u8; DIGEST_LEN];
        low[0] = 0x01;
        low[31] = 0xff;
        high[0] = 0x02;
        assert!(Hash::from_bytes(low) < Hash::from_bytes(high));
        assert!(Hash::ZERO < Hash::from_bytes(low));
    }

    #[test]
    fn test_hash_short() {
        let h = Hash::from_bytes([0x11; DIGEST_LEN]);
        assert_eq!(h.short(), "11111111");
    }
}
