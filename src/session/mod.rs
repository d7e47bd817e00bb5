//! One training sitting, end to end.
//!
//! A `Session` opens a tree, resolves its trainable content, fills the
//! queue under the population policy, drains it, and persists the
//! mutated records in a single write. Fatal errors propagate before the
//! write, leaving the backing store untouched.

pub mod populate;
pub mod queue;
pub mod unit;

pub use populate::{line_units, position_units};
pub use queue::{QueueStats, SessionQueue};
pub use unit::{LineDrill, PlayContext, PositionDrill, QueueUnit};

use rustc_hash::FxHashMap;

use crate::core::{Color, TrainRng};
use crate::error::DrillResult;
use crate::io::{Presenter, TreeId, TreeStore};
use crate::record::{RootRecord, TrainingRecord};
use crate::schedule::Scheduler;
use crate::tree::{resolve, NodeId};

/// What kind of units fill the queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrainingMode {
    /// Single positions; how new material is learned.
    #[default]
    Positions,
    /// Whole lines; how learned material is reviewed in context.
    Lines,
}

/// Session configuration.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Unit kind for this sitting.
    pub mode: TrainingMode,

    /// Seed for every random stream in the session.
    pub seed: u64,

    /// Shuffle the populated units before queueing.
    pub shuffle: bool,

    /// Queue reinsertion target index.
    pub insertion_index: usize,

    /// Queue reinsertion jitter, in positions.
    pub insertion_radius: i64,

    /// Trainee side for trees that have never been trained. `None`
    /// falls back to the side to move at the tree root.
    pub perspective: Option<Color>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: TrainingMode::Positions,
            seed: 42,
            shuffle: false,
            insertion_index: 0,
            insertion_radius: 0,
            perspective: None,
        }
    }
}

impl SessionConfig {
    /// Set the training mode.
    #[must_use]
    pub fn with_mode(mut self, mode: TrainingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the session seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Shuffle populated units before queueing.
    #[must_use]
    pub fn with_shuffle(mut self) -> Self {
        self.shuffle = true;
        self
    }

    /// Set reinsertion index and jitter.
    #[must_use]
    pub fn with_insertion(mut self, index: usize, radius: i64) -> Self {
        self.insertion_index = index;
        self.insertion_radius = radius;
        self
    }

    /// Set the trainee side for never-trained trees.
    #[must_use]
    pub fn with_perspective(mut self, side: Color) -> Self {
        self.perspective = Some(side);
        self
    }
}

/// Counters from one sitting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Solutions resolved in the tree.
    pub solutions: usize,

    /// Units admitted by the population policy.
    pub queued: usize,

    /// `play` invocations across the drain.
    pub plays: usize,

    /// Reinsertions across the drain.
    pub reinserts: usize,

    /// Units finished for the session.
    pub discards: usize,

    /// True when the user quit mid-session.
    pub aborted: bool,
}

/// Drives one sitting against a store and a presenter.
pub struct Session<'a> {
    store: &'a mut dyn TreeStore,
    presenter: &'a mut dyn Presenter,
    scheduler: Scheduler,
    config: SessionConfig,
}

impl<'a> Session<'a> {
    /// Create a session over external collaborators.
    pub fn new(
        store: &'a mut dyn TreeStore,
        presenter: &'a mut dyn Presenter,
        scheduler: Scheduler,
        config: SessionConfig,
    ) -> Self {
        Self {
            store,
            presenter,
            scheduler,
            config,
        }
    }

    /// Train one tree.
    ///
    /// Persistence happens exactly once, after the queue drains or
    /// aborts; record mutations from completed plays survive an abort.
    pub fn run(&mut self, id: &TreeId) -> DrillResult<SessionSummary> {
        let mut tree = self.store.load(id)?;
        let today = self.scheduler.today();

        let mut root_record = match &tree.get(tree.root()).note {
            Some(text) => RootRecord::decode(text)?,
            None => {
                let side = self
                    .config
                    .perspective
                    .unwrap_or_else(|| tree.get(tree.root()).to_move);
                RootRecord::new(side, today)
            }
        };
        root_record.refresh(today);

        self.presenter.set_perspective(root_record.perspective);
        let resolution = resolve(&tree, root_record.perspective)?;

        let mut records: FxHashMap<NodeId, TrainingRecord> = FxHashMap::default();
        for &solution in &resolution.solutions {
            let record = TrainingRecord::decode(tree.get(solution).note.as_deref())?;
            records.insert(solution, record);
        }

        let rng = TrainRng::new(self.config.seed);
        let mut units = match self.config.mode {
            TrainingMode::Positions => {
                position_units(&resolution, &records, &root_record, today)
            }
            TrainingMode::Lines => line_units(&resolution, &records, today),
        };
        if self.config.shuffle {
            rng.for_context("populate").shuffle(&mut units);
        }

        let queued = units.len();
        let mut queue = SessionQueue::new(
            self.config.insertion_index,
            self.config.insertion_radius,
            rng.for_context("queue"),
        );
        for unit in units {
            queue.append(unit);
        }

        tracing::info!(tree = %id, queued, mode = ?self.config.mode, "session started");

        let stats = {
            let mut ctx = PlayContext {
                tree: &tree,
                records: &mut records,
                root: &mut root_record,
                scheduler: &mut self.scheduler,
                presenter: &mut *self.presenter,
            };
            queue.run(&mut ctx)?
        };

        for (&node, record) in &records {
            tree.get_mut(node).note = Some(record.encode());
        }
        let root_id = tree.root();
        tree.get_mut(root_id).note = Some(root_record.encode());
        self.store.save(id, &tree)?;

        tracing::info!(
            tree = %id,
            plays = stats.plays,
            aborted = stats.aborted,
            "session persisted"
        );

        Ok(SessionSummary {
            solutions: resolution.solutions.len(),
            queued,
            plays: stats.plays,
            reinserts: stats.reinserts,
            discards: stats.discards,
            aborted: stats.aborted,
        })
    }
}
