//! The weighted merkle tree and proof generation

use super::builder::{sorted_slots, Leaf, TreeBuilder};
use super::node::{Node, NodeId, NodeKind};
use super::weights::{padding_weights, validate_weights};
use crate::hash::{Hash, Hasher, Keccak256Hasher};
use crate::model::{Entry, Interval};
use crate::proof::Proof;
use crate::{Error, Result};
use std::fmt;
use tracing::debug;

/// A merkle tree whose leaves partition [0,1) by weight
///
/// Every leaf sits at depth `-log2(weight)`. Branch digests hash the smaller
/// child digest first, so a proof needs no direction bits: the verifier
/// recovers both the root and the leaf's interval from the digests alone.
///
/// The tree is immutable once built and can be shared between threads.
pub struct MerkleTree<H: Hasher = Keccak256Hasher> {
    hasher: H,
    /// Caller entries followed by placeholder entries
    entries: Vec<Entry>,
    padding_start: usize,
    nodes: Vec<Node>,
    /// Leaves in the order they were merged
    leaves: Vec<Leaf>,
    root: NodeId,
}

impl MerkleTree {
    /// Build a tree over the given entries using Keccak-256
    pub fn build(entries: Vec<Entry>) -> Result<Self> {
        MerkleTree::build_with(Keccak256Hasher, entries)
    }
}

impl<H: Hasher> MerkleTree<H> {
    /// Build a tree over the given entries using the given hash function
    ///
    /// Weights must be canonical dyadic fractions summing to at most 1; any
    /// remainder is filled with empty-valued placeholder entries.
    pub fn build_with(hasher: H, mut entries: Vec<Entry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyEntryList);
        }

        let mut weights = validate_weights(&entries)?;
        let total_units: u64 = weights.iter().map(|w| w.units()).sum();
        let padding = padding_weights(total_units);

        let padding_start = entries.len();
        entries.extend(padding.iter().map(|w| Entry::placeholder(*w)));
        weights.extend(padding);

        let slots = sorted_slots(&weights);
        let built = TreeBuilder::new(&hasher, &entries).build(&slots)?;

        debug!(
            hash = hasher.name(),
            entries = padding_start,
            padding = entries.len() - padding_start,
            nodes = built.nodes.len(),
            root = %built.nodes[built.root.0].digest.short(),
            "built weighted merkle tree"
        );

        Ok(MerkleTree {
            hasher,
            entries,
            padding_start,
            nodes: built.nodes,
            leaves: built.leaves,
            root: built.root,
        })
    }

    /// Get the root hash
    pub fn root_hash(&self) -> Hash {
        self.node(self.root).digest
    }

    /// The hash function the tree was built with
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Entries supplied by the caller, in input order
    pub fn entries(&self) -> &[Entry] {
        &self.entries[..self.padding_start]
    }

    /// Placeholder entries added to complete the tree, largest first
    pub fn padding(&self) -> &[Entry] {
        &self.entries[self.padding_start..]
    }

    /// All leaf entries, placeholders included, in merge order
    pub fn leaves(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.leaves.iter().map(move |leaf| &self.entries[leaf.entry])
    }

    /// Number of leaves, placeholders included
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Depth of the leaf holding `entry`, if the entry is in the tree
    pub fn depth_of(&self, entry: &Entry) -> Option<u32> {
        self.find_leaf(entry)
            .map(|leaf| self.node(leaf.node).weight.depth())
    }

    /// Construct a merkle proof for the specified entry
    ///
    /// The first digest is the leaf's own, followed by the sibling digest at
    /// every level up to the root.
    pub fn prove(&self, entry: &Entry) -> Result<Proof> {
        let leaf = self.find_leaf(entry).ok_or(Error::UnknownEntry)?.node;

        let mut digests = vec![self.node(leaf).digest];
        let mut current = leaf;
        while let Some(parent) = self.node(current).parent {
            let sibling = self.node(parent).sibling_of(current).ok_or_else(|| {
                Error::InternalInvariantViolation(format!(
                    "node {} is not a child of its parent",
                    current.0
                ))
            })?;
            digests.push(self.node(sibling).digest);
            current = parent;
        }
        Ok(Proof::new(digests))
    }

    /// Verify a proof against this tree's root using this tree's hash function
    pub fn verify(&self, proof: &Proof) -> Result<Interval> {
        proof.verify(&self.hasher, &self.root_hash())
    }

    /// Every leaf with the interval its proof decodes to, sorted by start
    ///
    /// Intervals follow digest order. Two sibling leaves with equal digests,
    /// such as duplicate entries or an empty-valued entry paired with a
    /// placeholder of the same weight, both decode to the upper half of
    /// their parent, so the layout then overlaps and leaves a gap.
    pub fn layout(&self) -> Vec<(&Entry, Interval)> {
        let mut layout: Vec<_> = self
            .leaves
            .iter()
            .map(|leaf| (&self.entries[leaf.entry], self.interval_of(leaf.node)))
            .collect();
        layout.sort_by_key(|(_, interval)| interval.start_units());
        layout
    }

    /// The entry whose interval contains `point`, for a point in [0,1)
    ///
    /// Returns None for points outside [0,1), and for points in a gap left
    /// by sibling leaves with equal digests (see [`MerkleTree::layout`]).
    pub fn select(&self, point: f64) -> Option<&Entry> {
        if !(0.0..1.0).contains(&point) {
            return None;
        }
        self.leaves
            .iter()
            .find(|leaf| self.interval_of(leaf.node).contains(point))
            .map(|leaf| &self.entries[leaf.entry])
    }

    // === Internal helpers ===

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn find_leaf(&self, entry: &Entry) -> Option<Leaf> {
        self.leaves
            .iter()
            .copied()
            .find(|leaf| self.entries[leaf.entry] == *entry)
    }

    /// Decode a leaf's interval the way the verifier does, from digest
    /// comparisons along the path, without rehashing
    fn interval_of(&self, leaf: NodeId) -> Interval {
        let mut position = 0u64;
        let mut level = 0u32;
        let mut current = leaf;
        while let Some(parent) = self.node(current).parent {
            if let Some(sibling) = self.node(parent).sibling_of(current) {
                if self.node(current).digest >= self.node(sibling).digest {
                    position += 1 << level;
                }
            }
            level += 1;
            current = parent;
        }
        Interval::from_parts(position, level)
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let node = self.node(id);
        match node.kind {
            NodeKind::Leaf { entry } => write!(
                f,
                "E({}:{})",
                hex::encode(self.entries[entry].value()),
                node.weight.depth()
            ),
            NodeKind::Branch { left, right } => {
                write!(f, "N({}) => L.(", node.digest.short())?;
                self.fmt_node(f, left)?;
                write!(f, ") R.(")?;
                self.fmt_node(f, right)?;
                write!(f, ")")
            }
        }
    }
}

impl<H: Hasher> fmt::Display for MerkleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root)
    }
}

impl<H: Hasher> fmt::Debug for MerkleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleTree")
            .field("hasher", &self.hasher.name())
            .field("root", &self.root_hash())
            .field("leaves", &self.leaves.len())
            .finish()
    }
}
