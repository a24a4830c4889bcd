//! The outcomes of a solve call.

use crate::model::Action;
use crate::world::WorldStatement;

/// A sequence of actions achieving a goal, together with the world statement
/// the sequence demands of the world it starts in and the one it guarantees
/// on exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    actions: Vec<Action>,
    prerequisites: WorldStatement,
    consequences: WorldStatement,
}

impl Plan {
    pub(crate) fn new(
        actions: Vec<Action>,
        prerequisites: WorldStatement,
        consequences: WorldStatement,
    ) -> Plan {
        Plan {
            actions,
            prerequisites,
            consequences,
        }
    }

    /// The actions of the plan, in execution order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// An empty plan means the goal already held.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// What the plan demands of the world it fires in.
    pub fn prerequisites(&self) -> &WorldStatement {
        &self.prerequisites
    }

    /// What the plan guarantees after the last action.
    pub fn consequences(&self) -> &WorldStatement {
        &self.consequences
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}

/// The outcome of [`solve_forward`](crate::engine::GoalPlanner::solve_forward)
/// or [`solve_backward`](crate::engine::GoalPlanner::solve_backward).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanningResult {
    /// A plan achieving the goal was found.
    Planned(Plan),

    /// The search space was exhausted without reaching the goal. Depth
    /// exhaustion is reported here, never as an error.
    NoPlan {
        /// True when at least one branch was abandoned because of the depth
        /// limit; a deeper search might still succeed.
        depth_limited: bool,
    },

    /// The termination condition stopped the search before it could
    /// conclude either way.
    Unknown,
}

impl PlanningResult {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            PlanningResult::Planned(plan) => Some(plan),
            PlanningResult::NoPlan { .. } | PlanningResult::Unknown => None,
        }
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, PlanningResult::Planned(_))
    }
}
