//! Per-tree training state.
//!
//! The `RootRecord` lives in the root node's note field. It is read once
//! when a tree is opened, mutated in memory during the session, and
//! written back before the tree is persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{RecordError, ScheduleError};

/// Trainee perspective, daily learning capacity, and scheduler tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootRecord {
    /// Which side the trainee plays in this tree.
    pub perspective: Color,

    /// Date the tree was last opened.
    pub last_access: NaiveDate,

    /// Today's remaining quota of first-time learns.
    pub learning_remaining: u32,

    /// Daily quota of first-time learns.
    pub learning_limit: u32,

    /// Multiplier applied to the previous gap when a review succeeds.
    pub recall_factor: f64,

    /// Spread (in days) of the randomized due-date offset.
    pub recall_radius: i64,

    /// Upper bound (in days) on any projected interval.
    pub recall_max: i64,
}

impl RootRecord {
    /// Create a record with default tuning for a freshly imported tree.
    pub fn new(perspective: Color, today: NaiveDate) -> Self {
        Self {
            perspective,
            last_access: today,
            learning_remaining: 10,
            learning_limit: 10,
            recall_factor: 2.0,
            recall_radius: 3,
            recall_max: 365,
        }
    }

    /// Reset the daily learning quota when a new day has started.
    ///
    /// `learning_remaining` is restored to `learning_limit` whenever
    /// `last_access` predates today.
    pub fn refresh(&mut self, today: NaiveDate) {
        if self.last_access < today {
            self.learning_remaining = self.learning_limit;
            self.last_access = today;
        }
    }

    /// Consume one unit of learning capacity.
    ///
    /// Queue population gates new units on this quota, so exhaustion
    /// here indicates a population bug and is fatal.
    pub fn consume_learning(&mut self) -> Result<(), ScheduleError> {
        if self.learning_remaining == 0 {
            return Err(ScheduleError::LearningQuotaExhausted);
        }
        self.learning_remaining -= 1;
        Ok(())
    }

    /// Encode to note-field text.
    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("record serialization cannot fail")
    }

    /// Decode from the root note field.
    ///
    /// Malformed present text is fatal; an absent note means the tree
    /// has never been trained, and the caller supplies a fresh record.
    pub fn decode(text: &str) -> Result<Self, RecordError> {
        serde_json::from_str(text).map_err(|source| RecordError::Malformed {
            context: "root",
            source,
        })
    }
}
