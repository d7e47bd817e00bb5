//! Queue population policy.
//!
//! Selection is a population-time concern, not a queue responsibility:
//! the queue drains whatever it is given. New material is admitted
//! against a local copy of the daily learning quota, decremented per
//! enqueued unit (the root record's own counter is only consumed when a
//! unit actually completes its learning ladder).

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::record::{RootRecord, Status, TrainingRecord};
use crate::tree::{NodeId, Resolution};

use super::unit::{LineDrill, PositionDrill, QueueUnit};

fn record_of(records: &FxHashMap<NodeId, TrainingRecord>, id: NodeId) -> TrainingRecord {
    records.get(&id).cloned().unwrap_or_default()
}

/// True when the status consumes learning capacity on completion.
///
/// Learning stages persist only when a session aborted mid-ladder; such
/// carry-overs still count against the quota, keeping the capacity
/// invariant unreachable.
fn is_unlearned(status: Status) -> bool {
    matches!(status, Status::New | Status::Learning1 | Status::Learning2)
}

/// Select position units for one sitting.
///
/// Unlearned positions enter while the quota budget lasts; reviews enter
/// when due; relearning carry-overs always enter.
#[must_use]
pub fn position_units(
    resolution: &Resolution,
    records: &FxHashMap<NodeId, TrainingRecord>,
    root: &RootRecord,
    today: NaiveDate,
) -> Vec<QueueUnit> {
    let mut budget = root.learning_remaining;
    let mut units = Vec::new();

    for &solution in &resolution.solutions {
        let record = record_of(records, solution);
        let include = if is_unlearned(record.status) {
            if budget > 0 {
                budget -= 1;
                true
            } else {
                false
            }
        } else if matches!(record.status, Status::Remembering1 | Status::Remembering2) {
            true
        } else {
            record.due.map_or(true, |d| d <= today)
        };
        if include {
            units.push(QueueUnit::Position(PositionDrill { solution }));
        }
    }

    tracing::debug!(
        selected = units.len(),
        of = resolution.solutions.len(),
        "selected position units"
    );
    units
}

/// Select line units for one sitting.
///
/// A line enters only when none of its members is still unlearned (new
/// material is learned position by position first) and at least one
/// member needs work today (due review or relearning carry-over).
#[must_use]
pub fn line_units(
    resolution: &Resolution,
    records: &FxHashMap<NodeId, TrainingRecord>,
    today: NaiveDate,
) -> Vec<QueueUnit> {
    let mut units = Vec::new();

    for line in &resolution.lines {
        let members: Vec<TrainingRecord> = line
            .pairs()
            .map(|(_, solution)| record_of(records, solution))
            .collect();

        let all_learned = !members.iter().any(|r| is_unlearned(r.status));
        let any_needs_work = members.iter().any(|r| match r.status {
            Status::Remembering1 | Status::Remembering2 => true,
            Status::Review => r.due.map_or(true, |d| d <= today),
            _ => false,
        });

        if all_learned && any_needs_work {
            units.push(QueueUnit::Line(LineDrill { line: line.clone() }));
        }
    }

    tracing::debug!(
        selected = units.len(),
        of = resolution.lines.len(),
        "selected line units"
    );
    units
}
