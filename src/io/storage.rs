//! Tree storage seam.
//!
//! The textual tree format lives outside this crate. The only format
//! contract the core depends on is that note-field text round-trips
//! structurally equal records.

use crate::error::StoreError;
use crate::tree::MoveTree;

/// Identifier of a stored tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TreeId(pub String);

impl TreeId {
    /// Create a new tree identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backing store for annotated move trees.
pub trait TreeStore {
    /// Load a tree by identifier.
    fn load(&mut self, id: &TreeId) -> Result<MoveTree, StoreError>;

    /// Persist a tree. A failure here is fatal and reported to the
    /// caller; there is no partial or incremental persistence.
    fn save(&mut self, id: &TreeId, tree: &MoveTree) -> Result<(), StoreError>;
}
