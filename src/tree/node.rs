//! Arena-allocated tree nodes

use crate::hash::Hash;
use crate::model::Weight;

/// Index of a node in the tree's arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub usize);

/// What a node holds
#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    /// A leaf referencing an entry by its index in the tree's entry table
    Leaf { entry: usize },
    /// A branch with exactly two children of equal weight
    Branch { left: NodeId, right: NodeId },
}

/// A node in the tree
///
/// Digests are computed once, bottom-up, when the node is created.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub weight: Weight,
    pub digest: Hash,
}

impl Node {
    /// Create a leaf node
    pub fn leaf(entry: usize, weight: Weight, digest: Hash) -> Self {
        Node {
            kind: NodeKind::Leaf { entry },
            parent: None,
            weight,
            digest,
        }
    }

    /// Create a branch node
    pub fn branch(left: NodeId, right: NodeId, weight: Weight, digest: Hash) -> Self {
        Node {
            kind: NodeKind::Branch { left, right },
            parent: None,
            weight,
            digest,
        }
    }

    /// The sibling of `child`, if `child` is one of this node's children
    pub fn sibling_of(&self, child: NodeId) -> Option<NodeId> {
        match self.kind {
            NodeKind::Branch { left, right } if left == child => Some(right),
            NodeKind::Branch { left, right } if right == child => Some(left),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_of() {
        let w = Weight::ONE;
        let branch = Node::branch(NodeId(0), NodeId(1), w, Hash::ZERO);
        assert_eq!(branch.sibling_of(NodeId(0)), Some(NodeId(1)));
        assert_eq!(branch.sibling_of(NodeId(1)), Some(NodeId(0)));
        assert_eq!(branch.sibling_of(NodeId(2)), None);

        let leaf = Node::leaf(0, w, Hash::ZERO);
        assert_eq!(leaf.sibling_of(NodeId(0)), None);
    }
}
