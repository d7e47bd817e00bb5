//! Session queue.
//!
//! Holds playable units and drains them front to back. A played unit's
//! directive decides whether it is dropped, reinserted at a jittered
//! index, or whether the whole drain stops (cooperative abort). Items
//! still queued at abort are simply never played; record mutations from
//! earlier plays stand.

use std::collections::VecDeque;

use crate::core::TrainRng;
use crate::error::DrillResult;
use crate::schedule::Directive;

use super::unit::{PlayContext, QueueUnit};

/// Counters from one queue drain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// `play` invocations.
    pub plays: usize,

    /// Units put back for another pass.
    pub reinserts: usize,

    /// Units finished for the session.
    pub discards: usize,

    /// True when the drain stopped on a quit.
    pub aborted: bool,
}

/// FIFO of playable units with randomized reinsertion.
pub struct SessionQueue {
    items: VecDeque<QueueUnit>,

    /// Target index for reinsertion.
    insertion_index: usize,

    /// Randomization spread around the insertion index, in positions.
    insertion_radius: i64,

    rng: TrainRng,
}

impl SessionQueue {
    /// Create an empty queue.
    ///
    /// `insertion_index` 0 reinserts at the front; `insertion_radius` 0
    /// disables jitter.
    pub fn new(insertion_index: usize, insertion_radius: i64, rng: TrainRng) -> Self {
        Self {
            items: VecDeque::new(),
            insertion_index,
            insertion_radius,
            rng,
        }
    }

    /// Number of queued units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Unconditional tail insert; initial population preserves order.
    pub fn append(&mut self, item: QueueUnit) {
        self.items.push_back(item);
    }

    /// Insert at a jittered position.
    ///
    /// The effective index and radius come from the per-call overrides
    /// or the queue defaults. The position is clamped at zero and an
    /// out-of-range position appends; insertion never fails.
    pub fn insert(&mut self, item: QueueUnit, index: Option<usize>, radius: Option<i64>) {
        let index = index.unwrap_or(self.insertion_index);
        let radius = radius.unwrap_or(self.insertion_radius);
        let position = (index as i64 + self.rng.offset(radius)).max(0) as usize;

        if position >= self.items.len() {
            self.items.push_back(item);
        } else {
            self.items.insert(position, item);
        }
    }

    /// Drain the queue, playing each unit and applying its directive.
    ///
    /// Reinsertion uses the queue defaults. Abort stops immediately and
    /// leaves undrained items unplayed.
    pub fn run(&mut self, ctx: &mut PlayContext<'_>) -> DrillResult<QueueStats> {
        let mut stats = QueueStats::default();

        while let Some(unit) = self.items.pop_front() {
            stats.plays += 1;
            match unit.play(ctx)? {
                Directive::Discard => stats.discards += 1,
                Directive::Reinsert => {
                    stats.reinserts += 1;
                    self.insert(unit, None, None);
                }
                Directive::Abort => {
                    stats.aborted = true;
                    break;
                }
            }
        }

        tracing::debug!(
            plays = stats.plays,
            reinserts = stats.reinserts,
            discards = stats.discards,
            aborted = stats.aborted,
            "queue drained"
        );
        Ok(stats)
    }
}
