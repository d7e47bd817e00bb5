//! Playable queue units.
//!
//! A unit is either a single position or a whole line. Playing a unit
//! obtains user input through the presenter, grades it against the
//! expected solution moves, advances the affected training records, and
//! yields the queue directive.

use rustc_hash::FxHashMap;

use crate::error::DrillResult;
use crate::io::presentation::{Presenter, UserInput};
use crate::record::{RootRecord, TrainingRecord};
use crate::schedule::{Directive, Outcome, Scheduler};
use crate::tree::{Line, Move, MoveTree, NodeId};

/// Everything a unit needs to be played.
pub struct PlayContext<'a> {
    pub tree: &'a MoveTree,
    pub records: &'a mut FxHashMap<NodeId, TrainingRecord>,
    pub root: &'a mut RootRecord,
    pub scheduler: &'a mut Scheduler,
    pub presenter: &'a mut dyn Presenter,
}

impl PlayContext<'_> {
    /// The move the trainee must find at `solution`.
    fn expected_move(&self, solution: NodeId) -> &Move {
        self.tree
            .get(solution)
            .mv
            .as_ref()
            .expect("solution node has a producing move")
    }

    /// Show the problem position leading to `solution`.
    fn present_problem(&mut self, solution: NodeId) {
        let problem = self.tree.get(solution).parent;
        self.presenter.show_position(&self.tree.path(problem));
    }

    /// Advance the record of `solution` by one outcome.
    fn grade(&mut self, solution: NodeId, outcome: Outcome) -> DrillResult<Directive> {
        let record = self.records.entry(solution).or_default();
        Ok(self.scheduler.apply(record, self.root, outcome)?)
    }
}

/// A single drillable position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionDrill {
    /// The solution node; its parent is the presented problem.
    pub solution: NodeId,
}

impl PositionDrill {
    fn play(&self, ctx: &mut PlayContext<'_>) -> DrillResult<Directive> {
        ctx.present_problem(self.solution);

        let outcome = match ctx.presenter.read_input() {
            UserInput::Quit => return Ok(Directive::Abort),
            UserInput::Move(mv) => {
                if mv == *ctx.expected_move(self.solution) {
                    Outcome::Success
                } else {
                    Outcome::Failure
                }
            }
        };

        ctx.grade(self.solution, outcome)
    }
}

/// A whole line drilled in one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDrill {
    pub line: Line,
}

impl LineDrill {
    /// Play every position of the line in order.
    ///
    /// A wrong move marks the line failed and loops on the same position
    /// until the correct move arrives; the remaining positions are still
    /// visited. Quit aborts at any point. Each position's first-try
    /// outcome advances its own record; the line-level directive is
    /// derived from the aggregate, so reinsertion granularity is the
    /// whole line.
    fn play(&self, ctx: &mut PlayContext<'_>) -> DrillResult<Directive> {
        let mut any_failure = false;

        for (_, solution) in self.line.pairs() {
            let mut first_try = true;

            loop {
                ctx.present_problem(solution);
                match ctx.presenter.read_input() {
                    UserInput::Quit => return Ok(Directive::Abort),
                    UserInput::Move(mv) if mv == *ctx.expected_move(solution) => break,
                    UserInput::Move(_) => {
                        first_try = false;
                        any_failure = true;
                    }
                }
            }

            let outcome = if first_try {
                Outcome::Success
            } else {
                Outcome::Failure
            };
            ctx.grade(solution, outcome)?;
        }

        Ok(if any_failure {
            Directive::Reinsert
        } else {
            Directive::Discard
        })
    }
}

/// Polymorphic queue unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueUnit {
    Position(PositionDrill),
    Line(LineDrill),
}

impl QueueUnit {
    /// Play the unit once, producing its queue directive.
    pub fn play(&self, ctx: &mut PlayContext<'_>) -> DrillResult<Directive> {
        match self {
            QueueUnit::Position(drill) => drill.play(ctx),
            QueueUnit::Line(drill) => drill.play(ctx),
        }
    }
}
