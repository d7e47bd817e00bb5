//! Per-solution training state.
//!
//! A `TrainingRecord` is persisted as structured text in the note field
//! of its solution node. The codec contract is structural: whatever the
//! textual layout, encode→decode must yield a field-for-field equal
//! record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Learning-stage status of a solution.
///
/// `Review` is the only steady state; the learning and remembering
/// stages are transient scaffolding within a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Never seen before.
    #[default]
    New,
    /// First learning pass, first confirmation pending.
    Learning1,
    /// First learning pass, second confirmation pending.
    Learning2,
    /// Relearning after a failed review.
    Remembering1,
    /// Relearning, second confirmation pending.
    Remembering2,
    /// Mastered; scheduled by due date.
    Review,
}

/// Persistent per-solution state: status, recency dates, counters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Current learning stage.
    pub status: Status,

    /// Date of the last study event, if any.
    pub last_study: Option<NaiveDate>,

    /// Date at which a `Review` item becomes eligible again.
    pub due: Option<NaiveDate>,

    /// Number of successful recalls.
    pub successes: u32,

    /// Number of failed recalls.
    pub failures: u32,
}

impl TrainingRecord {
    /// Encode to note-field text.
    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("record serialization cannot fail")
    }

    /// Decode from an optional note field.
    ///
    /// An absent note yields the default record (first encounter); a
    /// present-but-malformed note is a fatal decode error, never
    /// silently defaulted.
    pub fn decode(note: Option<&str>) -> Result<Self, RecordError> {
        match note {
            None => Ok(Self::default()),
            Some(text) => serde_json::from_str(text).map_err(|source| RecordError::Malformed {
                context: "training",
                source,
            }),
        }
    }
}
