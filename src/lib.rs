//! # drillbook
//!
//! A spaced-repetition training engine for chess study material stored
//! as annotated move trees.
//!
//! ## Design Principles
//!
//! 1. **Resolver-first**: an annotated tree plus a trainee perspective
//!    deterministically decomposes into trainable units (positions and
//!    lines). Annotation markers steer the decomposition: a blunder edge
//!    flips the drilled perspective, an alternative starts an
//!    independent line.
//!
//! 2. **Deterministic under test**: the only impure inputs are the
//!    clock (a trait) and the RNG (seeded); fix both and whole sessions
//!    replay identically.
//!
//! 3. **Thin seams**: board rendering, the textual tree format, and
//!    collection discovery live behind traits. The core only compares
//!    moves, schedules records, and drains a queue.
//!
//! ## Architecture
//!
//! - **Records in note fields**: per-solution training state and the
//!   per-tree root record persist as structured text in node notes; the
//!   codec contract is structural round-tripping, not a byte format.
//!
//! - **Arena trees**: nodes live in a flat vector with index-based
//!   parent/child links, so back-references never form ownership cycles.
//!
//! - **Single write**: a session persists once, after the queue drains
//!   or the user quits; fatal errors propagate before the write.
//!
//! ## Modules
//!
//! - `core`: sides and deterministic RNG
//! - `tree`: arena move tree, annotations, training-content resolver
//! - `record`: training and root records with their note-field codec
//! - `schedule`: clock, due-date projection, learning-stage machine
//! - `session`: queue, playable units, population policy, session driver
//! - `io`: presenter/store/catalog seams and in-memory implementations

pub mod core;
pub mod error;
pub mod io;
pub mod record;
pub mod schedule;
pub mod session;
pub mod tree;

// Re-export commonly used types
pub use crate::core::{Color, TrainRng};

pub use crate::error::{DrillError, DrillResult, RecordError, ScheduleError, StoreError, TreeError};

pub use crate::tree::{
    candidate_solution, is_problem, is_solution, resolve, Line, Marker, Move, MoveNode, MoveTree,
    NodeId, Resolution, TreeBuilder,
};

pub use crate::record::{RootRecord, Status, TrainingRecord};

pub use crate::schedule::{
    project_due_date, Clock, Directive, FixedClock, Outcome, Scheduler, SystemClock,
};

pub use crate::session::{
    line_units, position_units, LineDrill, PlayContext, PositionDrill, QueueStats, QueueUnit,
    Session, SessionConfig, SessionQueue, SessionSummary, TrainingMode,
};

pub use crate::io::{
    Catalog, GroupStats, MemoryStore, Presenter, ScriptedPresenter, TreeId, TreeStore, UserInput,
};
