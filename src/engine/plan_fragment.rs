use crate::basic_types::PlanStepRejected;
use crate::basic_types::Winner;
use crate::model::Action;
use crate::world::WorldStatement;

/// An ordered sequence of actions together with the two world statements the
/// sequence maintains:
///
/// - `global_prerequisites`: what the sequence demands of the world it starts
///   in, i.e. the accumulated prerequisites that no earlier action supplies;
/// - `global_consequences`: what the sequence guarantees on exit, i.e. the
///   consequences of all actions folded left to right with later
///   consequences winning.
///
/// Both mutators are all-or-nothing: a rejected [`PlanFragment::append`] or
/// [`PlanFragment::prepend`] leaves every field unchanged. Fragments are the
/// workspace objects of the search; each DFS frame owns a clone and discards
/// it on backtrack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanFragment {
    actions: Vec<Action>,
    global_prerequisites: WorldStatement,
    global_consequences: WorldStatement,
}

impl PlanFragment {
    /// The empty fragment: both global statements are trivially true.
    pub fn empty() -> PlanFragment {
        PlanFragment::default()
    }

    /// A fragment seeded with a known world: the initial world for a forward
    /// search, or the desired goal for a backward search. Both global
    /// statements start out as the seed.
    pub fn seeded(seed: WorldStatement) -> PlanFragment {
        PlanFragment {
            actions: Vec::new(),
            global_prerequisites: seed.clone(),
            global_consequences: seed,
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn global_prerequisites(&self) -> &WorldStatement {
        &self.global_prerequisites
    }

    pub fn global_consequences(&self) -> &WorldStatement {
        &self.global_consequences
    }

    pub(crate) fn into_parts(self) -> (Vec<Action>, WorldStatement, WorldStatement) {
        (
            self.actions,
            self.global_prerequisites,
            self.global_consequences,
        )
    }

    /// Append `action` to the back of the sequence.
    ///
    /// Rejected with [`PlanStepRejected::Conflict`] when the accumulated
    /// consequences falsify the action's prerequisites. Prerequisites the
    /// accumulated consequences do not cover are merged into the global
    /// prerequisites when `allow_extra_prerequisites` holds, and are a
    /// [`PlanStepRejected::UncoveredPrerequisites`] rejection otherwise.
    pub fn append(
        &mut self,
        action: &Action,
        allow_extra_prerequisites: bool,
    ) -> Result<(), PlanStepRejected> {
        if self.global_consequences.falsifies(action.prerequisites()) {
            return Err(PlanStepRejected::Conflict);
        }

        let unmet = action
            .prerequisites()
            .remove_intersection(&self.global_consequences);

        if !unmet.is_empty() && !allow_extra_prerequisites {
            return Err(PlanStepRejected::UncoveredPrerequisites);
        }

        // Action normalization keeps every prerequisite alive in the
        // consequences, so a residue that conflicts with the accumulated
        // prerequisites is caught by the falsification check above.
        let global_prerequisites = self
            .global_prerequisites
            .merge(&unmet)
            .expect("the unmet residue never conflicts with the global prerequisites");
        let global_consequences = self
            .global_consequences
            .force_merge(action.consequences(), Winner::Right);

        self.global_prerequisites = global_prerequisites;
        self.global_consequences = global_consequences;
        self.actions.push(action.clone());

        Ok(())
    }

    /// Insert `action` at the front of the sequence.
    ///
    /// The action must land in the *frontier*: the global prerequisites when
    /// the sequence is non-empty, the seeded consequences otherwise.
    /// Rejected with [`PlanStepRejected::Conflict`] when the action's
    /// consequences falsify the frontier. Frontier conditions the action does
    /// not supply are regressed into the new global prerequisites, unless
    /// `must_satisfy_prerequisites` demands full coverage, in which case they
    /// are a [`PlanStepRejected::UnsatisfiedPrerequisites`] rejection.
    ///
    /// In backward construction earlier events do not overwrite later ones:
    /// the global consequences absorb the action's consequences with the
    /// existing side winning conflicts.
    pub fn prepend(
        &mut self,
        action: &Action,
        must_satisfy_prerequisites: bool,
    ) -> Result<(), PlanStepRejected> {
        let frontier = if self.actions.is_empty() {
            &self.global_consequences
        } else {
            &self.global_prerequisites
        };

        if action.consequences().falsifies(frontier) {
            return Err(PlanStepRejected::Conflict);
        }

        let unmet = frontier.remove_intersection(action.consequences());

        if !unmet.is_empty() && must_satisfy_prerequisites {
            return Err(PlanStepRejected::UnsatisfiedPrerequisites);
        }

        let global_prerequisites = unmet
            .merge(action.prerequisites())
            .expect("the unmet residue never conflicts with the action's prerequisites");
        let global_consequences = self
            .global_consequences
            .force_merge(action.consequences(), Winner::Left);

        self.global_prerequisites = global_prerequisites;
        self.global_consequences = global_consequences;
        self.actions.insert(0, action.clone());

        Ok(())
    }
}
