//! Learning-stage state machine.
//!
//! Each play outcome advances a `TrainingRecord` through the stage
//! machine and yields the queue directive for the unit that produced it.
//! Side effects (`learned`, `remembered`, `recalled`, `forgotten`) are
//! selected by the pre-transition status.
//!
//! The table is total: every (status, outcome) pair maps to exactly one
//! (next status, directive) pair. The first presentation of a `New` unit
//! teaches the answer, so its failure arm behaves like success.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::core::TrainRng;
use crate::error::ScheduleError;
use crate::record::{RootRecord, Status, TrainingRecord};

use super::clock::Clock;
use super::dates::project_due_date;

/// Result of one attempt at a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
}

/// What the queue does with a unit after it was played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// Drop the unit; it is done for this session.
    Discard,
    /// Put the unit back for another pass later in the session.
    Reinsert,
    /// Cooperative abort: stop the whole session immediately.
    Abort,
}

/// Advances training records on play outcomes.
pub struct Scheduler {
    clock: Box<dyn Clock>,
    rng: TrainRng,
}

impl Scheduler {
    /// Create a scheduler over a time source and RNG stream.
    pub fn new(clock: Box<dyn Clock>, rng: TrainRng) -> Self {
        Self { clock, rng }
    }

    /// The current date, as seen by this scheduler's clock.
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    /// Apply one outcome to a record, returning the queue directive.
    pub fn apply(
        &mut self,
        record: &mut TrainingRecord,
        root: &mut RootRecord,
        outcome: Outcome,
    ) -> Result<Directive, ScheduleError> {
        use Outcome::{Failure, Success};
        use Status::{Learning1, Learning2, New, Remembering1, Remembering2, Review};

        let directive = match (record.status, outcome) {
            (New, _) => {
                record.status = Learning1;
                Directive::Reinsert
            }
            (Learning1, Success) => {
                record.status = Learning2;
                Directive::Reinsert
            }
            (Learning1, Failure) => Directive::Reinsert,
            (Learning2, Success) => {
                self.learned(record, root)?;
                Directive::Discard
            }
            (Learning2, Failure) => {
                record.status = Learning1;
                Directive::Reinsert
            }
            (Remembering1, Success) => {
                record.status = Remembering2;
                Directive::Reinsert
            }
            (Remembering1, Failure) => Directive::Reinsert,
            (Remembering2, Success) => {
                self.remembered(record);
                Directive::Discard
            }
            (Remembering2, Failure) => {
                record.status = Remembering1;
                Directive::Reinsert
            }
            (Review, Success) => {
                self.recalled(record, root);
                Directive::Discard
            }
            (Review, Failure) => {
                self.forgotten(record);
                Directive::Reinsert
            }
        };

        tracing::trace!(?outcome, status = ?record.status, ?directive, "applied outcome");
        Ok(directive)
    }

    /// Second learning confirmation succeeded: the unit is mastered for
    /// the first time, which consumes one unit of daily capacity.
    fn learned(
        &mut self,
        record: &mut TrainingRecord,
        root: &mut RootRecord,
    ) -> Result<(), ScheduleError> {
        root.consume_learning()?;
        let today = self.clock.today();
        record.status = Status::Review;
        record.last_study = Some(today);
        record.due = Some(today + Duration::days(1));
        record.successes += 1;
        Ok(())
    }

    /// Second remembering confirmation succeeded after a forgotten
    /// review; the due date is left as-is.
    fn remembered(&mut self, record: &mut TrainingRecord) {
        record.status = Status::Review;
        record.last_study = Some(self.clock.today());
        record.successes += 1;
    }

    /// A due review succeeded: project the next due date.
    fn recalled(&mut self, record: &mut TrainingRecord, root: &RootRecord) {
        let today = self.clock.today();
        // A review record missing its dates degrades to a zero gap,
        // which the projection clamps to a one-day interval.
        let last_study = record.last_study.unwrap_or(today);
        let current_due = record.due.unwrap_or(today);
        record.due = Some(project_due_date(
            today,
            last_study,
            current_due,
            root.recall_factor,
            root.recall_radius,
            root.recall_max,
            &mut self.rng,
        ));
        record.last_study = Some(today);
        record.successes += 1;
    }

    /// A due review failed: back to the remembering stages.
    fn forgotten(&mut self, record: &mut TrainingRecord) {
        record.failures += 1;
        record.status = Status::Remembering1;
    }
}
