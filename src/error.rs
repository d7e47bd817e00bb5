//! Error taxonomy for the training engine.
//!
//! Fatal errors abort the current session before any persistence write,
//! so the backing store is never left with a partial state.

use thiserror::Error;

use crate::tree::NodeId;

/// Convenience alias used throughout the crate.
pub type DrillResult<T> = Result<T, DrillError>;

/// Structural problems in an annotated move tree.
///
/// These are fatal for the affected subtree: guessing a resolution would
/// corrupt training data, so they always propagate to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A problem node has more than one child that is neither a blunder
    /// nor an alternative, so the trainee move is ambiguous.
    #[error("ambiguous solution: node {node} has {count} unmarked children")]
    AmbiguousSolution { node: NodeId, count: usize },

    /// A node carries both the blunder and the alternative marker.
    #[error("conflicting markers on node {node}: blunder and alternative")]
    ConflictingMarkers { node: NodeId },
}

/// Note-field record decode failures.
///
/// A node with no note at all gets a default record; a note that is
/// present but malformed is fatal and is never silently defaulted.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The note text exists but does not decode to the expected record.
    #[error("malformed {context} record: {source}")]
    Malformed {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Scheduler invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// `learned()` was invoked with no learning capacity left. Queue
    /// population gates new units on the daily quota, so this indicates
    /// a population bug rather than a user-reachable state.
    #[error("learning quota exhausted: cannot record a first-time learn")]
    LearningQuotaExhausted,
}

/// Tree storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("tree not found: {0}")]
    NotFound(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Umbrella error for session-level operations.
#[derive(Debug, Error)]
pub enum DrillError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
