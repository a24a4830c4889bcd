//! An append-only record of planner steps, used for post-mortem explanation
//! of a search. The planner writes it; nothing in the search consumes it.

use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;

use log::trace;

use crate::basic_types::PlanStepRejected;

/// Which search produced a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMethod {
    SolveForward,
    SolveBackward,
}

impl Display for SearchMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMethod::SolveForward => write!(f, "solve_forward"),
            SearchMethod::SolveBackward => write!(f, "solve_backward"),
        }
    }
}

/// The outcome of one planner step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The candidate action was added to the fragment and the search
    /// descended into the child.
    Extended,
    /// The candidate action failed the applicability test and was never
    /// attempted.
    Inapplicable,
    /// The fragment mutation was refused.
    Rejected(PlanStepRejected),
    /// The child's world was already covered by a state on the current path.
    Pruned,
    /// The node satisfies the goal; the fragment is the plan.
    GoalReached,
    /// The node had no depth budget left and was abandoned.
    DepthLimited,
    /// The termination condition stopped the search at this node.
    Cancelled,
}

impl Display for StepOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StepOutcome::Extended => write!(f, "extended"),
            StepOutcome::Inapplicable => write!(f, "inapplicable"),
            StepOutcome::Rejected(PlanStepRejected::Conflict) => write!(f, "rejected(conflict)"),
            StepOutcome::Rejected(PlanStepRejected::UncoveredPrerequisites) => {
                write!(f, "rejected(uncovered-prerequisites)")
            }
            StepOutcome::Rejected(PlanStepRejected::UnsatisfiedPrerequisites) => {
                write!(f, "rejected(unsatisfied-prerequisites)")
            }
            StepOutcome::Pruned => write!(f, "pruned"),
            StepOutcome::GoalReached => write!(f, "goal-reached"),
            StepOutcome::DepthLimited => write!(f, "depth-limited"),
            StepOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One step of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Logical timestamp: the position of the record in the trace.
    pub time: u64,
    pub method: SearchMethod,
    /// Distance of the node from the search root.
    pub depth: u32,
    /// The action under consideration, if the step concerned one.
    pub action: Option<String>,
    /// A rendering of the fragment after the step, when snapshots are
    /// enabled in the planner options.
    pub fragment: Option<String>,
    pub outcome: StepOutcome,
}

impl Display for TraceRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "t={} {} depth={}", self.time, self.method, self.depth)?;

        if let Some(action) = &self.action {
            write!(f, " action={action}")?;
        }

        write!(f, " outcome={}", self.outcome)?;

        if let Some(fragment) = &self.fragment {
            write!(f, " fragment=[{fragment}]")?;
        }

        Ok(())
    }
}

/// The monotonically growing sequence of [`TraceRecord`]s of a planner.
///
/// Records are emitted in program order of the planner operations.
#[derive(Debug, Default)]
pub struct SearchTrace {
    records: Vec<TraceRecord>,
}

impl SearchTrace {
    pub(crate) fn push(
        &mut self,
        method: SearchMethod,
        depth: u32,
        action: Option<&str>,
        fragment: Option<String>,
        outcome: StepOutcome,
    ) {
        let record = TraceRecord {
            time: self.records.len() as u64,
            method,
            depth,
            action: action.map(str::to_owned),
            fragment,
            outcome,
        };

        trace!("{record}");
        self.records.push(record);
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the trace as one record per line.
    pub fn write_to(&self, sink: &mut impl Write) -> std::io::Result<()> {
        for record in &self.records {
            writeln!(sink, "{record}")?;
        }

        Ok(())
    }
}
