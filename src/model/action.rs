use crate::basic_types::Clause;
use crate::basic_types::EntityId;
use crate::basic_types::InconsistentClauseError;
use crate::basic_types::MergeConflictError;
use crate::basic_types::PlanStepRejected;
use crate::basic_types::UsageMismatchError;
use crate::basic_types::Winner;
use crate::world::WorldStatement;
use crate::world::WorldStatementError;

/// The direction a search explores the action space in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// From the initial world towards the goal, extending plans at the back.
    Forward,
    /// From the goal towards the initial world, extending plans at the front.
    Backward,
}

/// How [`Action::apply_backward`] treats demanded conditions the action's
/// consequences do not supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NewPrerequisitePolicy {
    /// Keep the unsatisfied demand and regress it past the action.
    Absorb,
    /// Fail unless the action's consequences cover the whole demand.
    RequireCovered,
}

/// A named state transition: what the action demands of the world and what
/// it guarantees afterwards, both as [`WorldStatement`]s scoped over the
/// action's source and target entities.
///
/// Construction normalizes the consequences so that every prerequisite the
/// action does not itself flip is carried through: `con :=
/// pre.force_merge(con, Winner::Right)`. Actions therefore never tacitly
/// assume their prerequisites persist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    name: String,
    source: EntityId,
    target: Option<EntityId>,
    prerequisites: WorldStatement,
    consequences: WorldStatement,
}

/// Constructing an action failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The prerequisite or consequence clauses bind a predicate both ways.
    #[error(transparent)]
    Conflict(#[from] MergeConflictError),

    /// A clause in the input was itself inconsistent.
    #[error(transparent)]
    Inconsistent(#[from] InconsistentClauseError),

    /// A Target- or Both-scoped literal was given, but the action has no
    /// target entity.
    #[error(transparent)]
    UsageMismatch(#[from] UsageMismatchError),
}

impl From<WorldStatementError> for ActionError {
    fn from(error: WorldStatementError) -> ActionError {
        match error {
            WorldStatementError::UsageMismatch(mismatch) => ActionError::UsageMismatch(mismatch),
            WorldStatementError::Inconsistent(inconsistent) => {
                ActionError::Inconsistent(inconsistent)
            }
        }
    }
}

impl Action {
    /// Create an action from prerequisite and consequence clauses.
    ///
    /// The clauses on each side are conjoined (a conflict across them is an
    /// error), the consequences are normalized against the prerequisites,
    /// and both sides are partitioned over the entity pair by the usage of
    /// each literal's predicate.
    pub fn new(
        name: impl Into<String>,
        source: EntityId,
        target: Option<EntityId>,
        prerequisites: impl IntoIterator<Item = Clause>,
        consequences: impl IntoIterator<Item = Clause>,
    ) -> Result<Action, ActionError> {
        let prerequisites = conjoin(prerequisites)?;
        let consequences = conjoin(consequences)?;

        // A prerequisite persists through the action unless the consequences
        // flip it.
        let consequences = prerequisites.force_merge(&consequences, Winner::Right);

        let prerequisites =
            WorldStatement::from_parts([(prerequisites, Some(source), target)])?;
        let consequences = WorldStatement::from_parts([(consequences, Some(source), target)])?;

        Ok(Action {
            name: name.into(),
            source,
            target,
            prerequisites,
            consequences,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> EntityId {
        self.source
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn prerequisites(&self) -> &WorldStatement {
        &self.prerequisites
    }

    pub fn consequences(&self) -> &WorldStatement {
        &self.consequences
    }

    /// Whether the action can take part in a search from the given world.
    ///
    /// Forward, the world must not falsify the action's prerequisites;
    /// backward, the action's consequences must not falsify the world the
    /// search still demands.
    pub fn allowed_in(&self, world: &WorldStatement, direction: Direction) -> bool {
        match direction {
            Direction::Forward => !world.falsifies(&self.prerequisites),
            Direction::Backward => !self.consequences.falsifies(world),
        }
    }

    /// The world after the action fires: later consequences win.
    pub fn apply_forward(&self, world: &WorldStatement) -> WorldStatement {
        world.force_merge(&self.consequences, Winner::Right)
    }

    /// Regress a demanded world past the action: what must hold *before* the
    /// action so that `world` holds after it.
    pub fn apply_backward(
        &self,
        world: &WorldStatement,
        policy: NewPrerequisitePolicy,
    ) -> Result<WorldStatement, PlanStepRejected> {
        if self.consequences.falsifies(world) {
            return Err(PlanStepRejected::Conflict);
        }

        let unmet = world.remove_intersection(&self.consequences);
        if !unmet.is_empty() && matches!(policy, NewPrerequisitePolicy::RequireCovered) {
            return Err(PlanStepRejected::UnsatisfiedPrerequisites);
        }

        // Normalization guarantees the residue cannot conflict with the
        // prerequisites: a binding the action flips is either removed from
        // the residue or caught by the falsification check.
        let regressed = unmet
            .merge(&self.prerequisites)
            .expect("the unmet residue never conflicts with the prerequisites");

        Ok(regressed)
    }
}

/// Conjoin a list of clauses into one; conflicts across clauses are errors.
fn conjoin(clauses: impl IntoIterator<Item = Clause>) -> Result<Clause, MergeConflictError> {
    let mut combined = Clause::empty();

    for clause in clauses {
        combined = combined.merge(&clause)?;
    }

    Ok(combined)
}
