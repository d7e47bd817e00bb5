//! Arena-based move tree.
//!
//! Nodes are stored in a flat `Vec` and referenced by `NodeId` indices.
//! This keeps parent back-links cycle-free and the whole tree
//! serializable.

use serde::{Deserialize, Serialize};

use crate::core::Color;

use super::node::{Marker, Move, MoveNode, NodeId};

/// Arena-based annotated move tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveTree {
    /// All nodes in the tree.
    nodes: Vec<MoveNode>,

    /// The root node ID (always 0 after initialization).
    root: NodeId,
}

impl MoveTree {
    /// Create a new tree whose root position has `to_move` to play.
    pub fn new(to_move: Color) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(64),
            root: NodeId::new(0),
        };
        tree.nodes.push(MoveNode::root(to_move));
        tree
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MoveNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MoveNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a child of `parent` produced by `mv`.
    ///
    /// The child's side to move is the flip of the parent's, and the
    /// child is appended to the parent's ordered child list.
    pub fn add_child(&mut self, parent: NodeId, mv: Move) -> NodeId {
        let to_move = self.get(parent).to_move.flip();
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(MoveNode::new(parent, mv, to_move));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The move sequence from the root to `node`, in play order.
    ///
    /// Used by the presentation seam to show a position.
    #[must_use]
    pub fn path(&self, node: NodeId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = node;
        while !current.is_none() {
            let n = self.get(current);
            if let Some(mv) = &n.mv {
                moves.push(mv.clone());
            }
            current = n.parent;
        }
        moves.reverse();
        moves
    }

    /// Iterate over all node IDs in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId::new)
    }
}

/// Programmatic tree construction.
///
/// Used by tests and in-memory stores; a textual tree format decodes
/// through the same calls.
///
/// ```
/// use drillbook::core::Color;
/// use drillbook::tree::TreeBuilder;
///
/// let mut b = TreeBuilder::new(Color::White);
/// let e4 = b.child(b.root(), "e4");
/// let e5 = b.child(e4, "e5");
/// let _f5 = b.blunder(e4, "f5");
/// let tree = b.finish();
///
/// assert_eq!(tree.path(e5).len(), 2);
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    tree: MoveTree,
}

impl TreeBuilder {
    /// Start a tree whose root position has `to_move` to play.
    pub fn new(to_move: Color) -> Self {
        Self {
            tree: MoveTree::new(to_move),
        }
    }

    /// The root node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Add an unmarked child move.
    pub fn child(&mut self, parent: NodeId, san: &str) -> NodeId {
        self.tree.add_child(parent, Move::new(san))
    }

    /// Add a child move carrying the blunder marker.
    pub fn blunder(&mut self, parent: NodeId, san: &str) -> NodeId {
        let id = self.tree.add_child(parent, Move::new(san));
        self.tree.get_mut(id).markers.push(Marker::Blunder);
        id
    }

    /// Add a child move carrying the alternative marker.
    pub fn alternative(&mut self, parent: NodeId, san: &str) -> NodeId {
        let id = self.tree.add_child(parent, Move::new(san));
        self.tree.get_mut(id).markers.push(Marker::Alternative);
        id
    }

    /// Attach note text to a node.
    pub fn note(&mut self, node: NodeId, text: impl Into<String>) {
        self.tree.get_mut(node).note = Some(text.into());
    }

    /// Finish building.
    #[must_use]
    pub fn finish(self) -> MoveTree {
        self.tree
    }
}
