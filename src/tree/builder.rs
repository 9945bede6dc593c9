//! Construction of a complete binary tree from dyadic weights
//!
//! Entries are sorted by ascending weight. The two lightest entries are
//! always equal and become siblings; from there every following entry
//! either matches the weight of the tree built so far and joins it directly,
//! or starts a sibling subtree that absorbs just enough of the following
//! entries to match. The result places every entry at depth `-log2(weight)`.

use super::node::{Node, NodeId};
use crate::hash::Hasher;
use crate::model::{Entry, Weight};
use crate::{Error, Result};
use std::cmp::Ordering;
use tracing::trace;

/// An entry awaiting placement: its index in the entry table and its weight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Slot {
    pub entry: usize,
    pub weight: Weight,
}

/// Pair every weight with its entry index and sort lightest first
///
/// The sort is stable, so equal weights keep their input order.
pub(crate) fn sorted_slots(weights: &[Weight]) -> Vec<Slot> {
    let mut slots: Vec<Slot> = weights
        .iter()
        .enumerate()
        .map(|(entry, &weight)| Slot { entry, weight })
        .collect();
    slots.sort_by_key(|slot| slot.weight);
    slots
}

/// A leaf node and the index of the entry it holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Leaf {
    pub node: NodeId,
    pub entry: usize,
}

/// Output of a successful build
pub(crate) struct BuiltTree {
    pub nodes: Vec<Node>,
    pub leaves: Vec<Leaf>,
    pub root: NodeId,
}

/// Builds the node arena, hashing every node as it is created
pub(crate) struct TreeBuilder<'a, H: Hasher> {
    hasher: &'a H,
    entries: &'a [Entry],
    nodes: Vec<Node>,
    leaves: Vec<Leaf>,
}

impl<'a, H: Hasher> TreeBuilder<'a, H> {
    pub fn new(hasher: &'a H, entries: &'a [Entry]) -> Self {
        TreeBuilder {
            hasher,
            entries,
            nodes: Vec::with_capacity(entries.len() * 2),
            leaves: Vec::with_capacity(entries.len()),
        }
    }

    /// Build the tree over slots sorted by ascending weight summing to exactly 1
    pub fn build(mut self, slots: &[Slot]) -> Result<BuiltTree> {
        if slots.is_empty() {
            return Err(Error::EmptyEntryList);
        }

        let root = self.build_range(slots)?;
        let root_weight = self.nodes[root.0].weight;
        if root_weight != Weight::ONE {
            return Err(invariant(format!(
                "root weighs {} instead of 1",
                root_weight
            )));
        }

        Ok(BuiltTree {
            nodes: self.nodes,
            leaves: self.leaves,
            root,
        })
    }

    fn build_range(&mut self, slots: &[Slot]) -> Result<NodeId> {
        let (first, second, rest) = match slots {
            [only] => return Ok(self.push_leaf(*only)),
            [first, second, rest @ ..] => (*first, *second, rest),
            [] => return Err(invariant("empty run of entries".to_string())),
        };

        // Lightest two entries are siblings
        if first.weight != second.weight {
            return Err(invariant(format!(
                "lightest entries weigh {} and {}",
                first.weight, second.weight
            )));
        }
        let left = self.push_leaf(first);
        let right = self.push_leaf(second);
        let mut current = self.push_branch(left, right)?;

        let mut i = 0;
        while i < rest.len() {
            let next = rest[i];
            let current_weight = self.nodes[current.0].weight;

            match current_weight.cmp(&next.weight) {
                Ordering::Equal => {
                    let leaf = self.push_leaf(next);
                    current = self.push_branch(current, leaf)?;
                    i += 1;
                }
                Ordering::Less => {
                    return Err(invariant(format!(
                        "subtree of weight {} is lighter than the next entry ({})",
                        current_weight, next.weight
                    )));
                }
                Ordering::Greater => {
                    let len = run_len(&rest[i..], current_weight)?;
                    trace!(
                        run = len,
                        weight = %current_weight,
                        "building sibling subtree"
                    );
                    let sibling = self.build_range(&rest[i..i + len])?;
                    current = self.push_branch(current, sibling)?;
                    i += len;
                }
            }
        }

        Ok(current)
    }

    fn push_leaf(&mut self, slot: Slot) -> NodeId {
        let digest = self.hasher.digest(self.entries[slot.entry].value());
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::leaf(slot.entry, slot.weight, digest));
        self.leaves.push(Leaf {
            node: id,
            entry: slot.entry,
        });
        id
    }

    fn push_branch(&mut self, left: NodeId, right: NodeId) -> Result<NodeId> {
        let (l, r) = (&self.nodes[left.0], &self.nodes[right.0]);
        if l.weight != r.weight {
            return Err(invariant(format!(
                "siblings weigh {} and {}",
                l.weight, r.weight
            )));
        }
        let weight = l
            .weight
            .doubled()
            .ok_or_else(|| invariant("cannot merge two nodes of weight 1".to_string()))?;
        let digest = self.hasher.combine(&l.digest, &r.digest);

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::branch(left, right, weight, digest));
        self.nodes[left.0].parent = Some(id);
        self.nodes[right.0].parent = Some(id);
        trace!(weight = %weight, digest = %digest.short(), "merged siblings");
        Ok(id)
    }
}

/// Length of the shortest prefix of `slots` whose weights sum to `target`
fn run_len(slots: &[Slot], target: Weight) -> Result<usize> {
    let mut units = 0u64;
    for (i, slot) in slots.iter().enumerate() {
        units += slot.weight.units();
        match units.cmp(&target.units()) {
            Ordering::Equal => return Ok(i + 1),
            Ordering::Greater => break,
            Ordering::Less => {}
        }
    }
    Err(invariant(format!(
        "no run of entries sums to {}",
        target
    )))
}

fn invariant(message: String) -> Error {
    tracing::error!(%message, "tree construction invariant violated");
    Error::InternalInvariantViolation(message)
}
