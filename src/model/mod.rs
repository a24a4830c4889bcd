//! Builds up the model, from which a planner can be constructed.

mod action;

pub use action::*;

use crate::basic_types::Clause;
use crate::basic_types::EntityId;
use crate::engine::GoalPlanner;
use crate::options::PlannerOptions;
use crate::predicates::DuplicatePredicateError;
use crate::predicates::Predicate;
use crate::predicates::PredicateDefinition;
use crate::predicates::Schema;
use crate::predicates::Usage;

/// The declarative description of a planning domain: a [`Schema`] of
/// predicates and entities, and the pool of actions available to the search.
///
/// It is important to only use predicate and entity ids created on the same
/// instance of [`Model`].
#[derive(Debug, Default)]
pub struct Model {
    schema: Schema,
    actions: Vec<Action>,
}

impl Model {
    pub fn new() -> Model {
        Model::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }

    /// Intern an entity name.
    pub fn new_entity(&mut self, name: impl Into<String>) -> EntityId {
        self.schema.new_entity(name)
    }

    /// Register a predicate.
    pub fn add_predicate(
        &mut self,
        definition: PredicateDefinition,
    ) -> Result<Predicate, DuplicatePredicateError> {
        self.schema.add_predicate(definition)
    }

    /// Register a bare named predicate without an evaluator.
    pub fn new_symbol(
        &mut self,
        base_name: impl Into<String>,
        usage: Usage,
    ) -> Result<Predicate, DuplicatePredicateError> {
        self.schema.new_symbol(base_name, usage)
    }

    /// Construct an action and add it to the pool.
    pub fn new_action(
        &mut self,
        name: impl Into<String>,
        source: EntityId,
        target: Option<EntityId>,
        prerequisites: impl IntoIterator<Item = Clause>,
        consequences: impl IntoIterator<Item = Clause>,
    ) -> Result<(), ActionError> {
        let action = Action::new(name, source, target, prerequisites, consequences)?;
        self.actions.push(action);
        Ok(())
    }

    /// Add an already constructed action to the pool.
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// The action pool, in insertion order. The searches consider candidates
    /// in this order, which is what makes two runs over the same model
    /// produce the same plan.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Create a planner from this model.
    pub fn into_planner(self, options: PlannerOptions) -> GoalPlanner {
        GoalPlanner::new(self.schema, self.actions, options)
    }
}
