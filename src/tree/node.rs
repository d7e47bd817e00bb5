//! Move tree nodes and annotations.
//!
//! Nodes live in an arena (`MoveTree`) and reference each other by
//! `NodeId` index. The parent link is a plain index, so the tree is owned
//! strictly top-down with no reference-counted cycles.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Color;

/// Index into the `MoveTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "Node(NONE)")
        } else {
            write!(f, "Node({})", self.0)
        }
    }
}

/// A move in standard algebraic notation.
///
/// The engine never validates chess legality; moves are compared as
/// normalized SAN text when a trainee answer is checked against the
/// expected solution.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// SAN text, e.g. `"Nf3"` or `"exd5"`.
    pub san: String,
}

impl Move {
    /// Create a move from SAN text.
    pub fn new(san: impl Into<String>) -> Self {
        Self { san: san.into() }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.san)
    }
}

/// Annotation marker on a trainee move.
///
/// At most one marker is meaningful per node; a node carrying both is
/// rejected by the resolver as a structural error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// A deliberate, modeled mistake. Traversal past it continues under
    /// the flipped perspective.
    Blunder,
    /// A second valid try, explored as an independent solution/line.
    Alternative,
}

/// A position reached by zero or more moves from the starting position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveNode {
    /// Parent node (NONE for the root).
    pub parent: NodeId,

    /// The move that produced this position. `None` only at the root.
    pub mv: Option<Move>,

    /// Side to move at this position.
    pub to_move: Color,

    /// Child nodes in declaration order. Order is significant: the
    /// resolver traverses left to right.
    pub children: SmallVec<[NodeId; 4]>,

    /// Annotation markers carried by the producing move.
    pub markers: SmallVec<[Marker; 1]>,

    /// Free-text note; persists an encoded training or root record.
    pub note: Option<String>,
}

impl MoveNode {
    /// Create a non-root node.
    pub fn new(parent: NodeId, mv: Move, to_move: Color) -> Self {
        Self {
            parent,
            mv: Some(mv),
            to_move,
            children: SmallVec::new(),
            markers: SmallVec::new(),
            note: None,
        }
    }

    /// Create a root node.
    pub fn root(to_move: Color) -> Self {
        Self {
            parent: NodeId::NONE,
            mv: None,
            to_move,
            children: SmallVec::new(),
            markers: SmallVec::new(),
            note: None,
        }
    }

    /// True for the single node with no producing move.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.mv.is_none()
    }

    /// Check whether a specific marker is present.
    #[must_use]
    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }
}
