//! Configuration: hash selection and tree manifests
//!
//! A manifest is a JSON document describing the entries of one tree:
//!
//! ```json
//! {
//!   "hash": "keccak256",
//!   "entries": [
//!     { "value": "0102", "weight": 0.5 },
//!     { "value": "0304", "weight": 0.25 }
//!   ]
//! }
//! ```

use crate::hash::{Blake3Hasher, Hasher, Keccak256Hasher};
use crate::model::Entry;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Hash function a tree is built and verified with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Keccak256,
    Blake3,
}

impl HashAlgorithm {
    /// Instantiate the hash function
    pub fn hasher(&self) -> Box<dyn Hasher> {
        match self {
            HashAlgorithm::Keccak256 => Box::new(Keccak256Hasher),
            HashAlgorithm::Blake3 => Box::new(Blake3Hasher),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Keccak256 => "keccak256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "keccak256" | "keccak" => Ok(HashAlgorithm::Keccak256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(Error::Config(format!("Unknown hash algorithm: {}", other))),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a manifest; the value is hex encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub value: String,
    pub weight: f64,
}

impl ManifestEntry {
    /// Decode into a tree entry
    pub fn to_entry(&self) -> Result<Entry> {
        let value = self.value.strip_prefix("0x").unwrap_or(&self.value);
        let bytes = hex::decode(value)
            .map_err(|e| Error::Config(format!("Invalid entry value {:?}: {}", self.value, e)))?;
        Ok(Entry::new(bytes, self.weight))
    }
}

impl From<&Entry> for ManifestEntry {
    fn from(entry: &Entry) -> Self {
        ManifestEntry {
            value: hex::encode(entry.value()),
            weight: entry.weight(),
        }
    }
}

/// The entries of one tree and the hash function to build it with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeManifest {
    #[serde(default)]
    pub hash: HashAlgorithm,
    pub entries: Vec<ManifestEntry>,
}

impl TreeManifest {
    /// Load a manifest from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read manifest {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse a manifest from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Write the manifest as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Decode all entries
    pub fn to_entries(&self) -> Result<Vec<Entry>> {
        self.entries.iter().map(ManifestEntry::to_entry).collect()
    }
}
