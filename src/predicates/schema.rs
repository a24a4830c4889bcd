use std::fmt::Debug;
use std::fmt::Formatter;

use fnv::FnvHashMap;

use super::Evaluator;
use super::Predicate;
use super::Usage;
use crate::basic_types::Clause;
use crate::basic_types::Entity;
use crate::basic_types::EntityId;
use crate::basic_types::Literal;
use crate::basic_types::StatementKey;
use crate::world::WorldStatement;
use crate::world::WorldStatementError;

/// The scoped registry of predicates and entities a model is built over.
///
/// Uniqueness of the `(base_name, usage)` pair is enforced at registration
/// time. A schema owns the names and evaluators; everything that circulates
/// through the algebra is a small copyable id, so independent planners over
/// independent schemas never interfere.
#[derive(Default)]
pub struct Schema {
    predicates: Vec<PredicateData>,
    predicates_by_name: FnvHashMap<String, Predicate>,
    entities: Vec<String>,
    entities_by_name: FnvHashMap<String, EntityId>,
}

struct PredicateData {
    base_name: String,
    usage: Usage,
    description: String,
    evaluator: Option<Evaluator>,
    source_required: Vec<String>,
    target_required: Vec<String>,
}

/// Everything that can be said about a predicate at registration time.
///
/// Most predicates used purely as action vocabulary are registered through
/// [`PredicateDefinition::symbol`] and never carry an evaluator; the search
/// works entirely over literals and never needs one.
pub struct PredicateDefinition {
    pub base_name: String,
    pub usage: Usage,
    pub description: String,
    pub evaluator: Option<Evaluator>,
    /// Attributes the source entity must carry for evaluation.
    pub source_required: Vec<String>,
    /// Attributes the target entity must carry for evaluation.
    pub target_required: Vec<String>,
}

impl PredicateDefinition {
    /// A bare named predicate without an evaluator.
    pub fn symbol(base_name: impl Into<String>, usage: Usage) -> PredicateDefinition {
        PredicateDefinition {
            base_name: base_name.into(),
            usage,
            description: String::new(),
            evaluator: None,
            source_required: Vec::new(),
            target_required: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> PredicateDefinition {
        self.description = description.into();
        self
    }

    pub fn with_evaluator(mut self, evaluator: Evaluator) -> PredicateDefinition {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn requiring_source_attributes(
        mut self,
        attributes: impl IntoIterator<Item = impl Into<String>>,
    ) -> PredicateDefinition {
        self.source_required = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn requiring_target_attributes(
        mut self,
        attributes: impl IntoIterator<Item = impl Into<String>>,
    ) -> PredicateDefinition {
        self.target_required = attributes.into_iter().map(Into::into).collect();
        self
    }
}

impl Debug for PredicateDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateDefinition")
            .field("base_name", &self.base_name)
            .field("usage", &self.usage)
            .field("has_evaluator", &self.evaluator.is_some())
            .finish()
    }
}

/// A predicate with the same `(base_name, usage)` pair is already registered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("a predicate named `{full_name}` is already registered")]
pub struct DuplicatePredicateError {
    pub full_name: String,
}

/// Evaluating a predicate against concrete entities failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// A required attribute is absent from the entity filling the given
    /// role. This is the only failure a well-formed evaluation can produce;
    /// a predicate that merely does not hold evaluates to `false`.
    #[error("predicate {predicate} requires attribute `{attribute}` on the {role} entity `{entity}`")]
    MissingAttribute {
        predicate: String,
        role: &'static str,
        entity: String,
        attribute: String,
    },

    /// The predicate reads the target role, but no target entity was given.
    #[error("predicate {predicate} reads the target role, but no target entity was supplied")]
    MissingTarget { predicate: String },

    /// The predicate was registered as a bare symbol.
    #[error("predicate {predicate} has no evaluator")]
    NoEvaluator { predicate: String },
}

/// Building a world statement from observed truth values failed.
#[derive(Debug, thiserror::Error)]
pub enum ObservationError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    World(#[from] WorldStatementError),
}

impl Schema {
    pub fn new() -> Schema {
        Schema::default()
    }

    /// Register a predicate. The canonical full name is
    /// `<base_name>_<usage>`, and two predicates with the same full name
    /// cannot coexist in a schema.
    pub fn add_predicate(
        &mut self,
        definition: PredicateDefinition,
    ) -> Result<Predicate, DuplicatePredicateError> {
        let full_name = format!("{}_{}", definition.base_name, definition.usage);

        if self.predicates_by_name.contains_key(&full_name) {
            return Err(DuplicatePredicateError { full_name });
        }

        let predicate = Predicate::new(self.predicates.len() as u32, definition.usage);
        self.predicates.push(PredicateData {
            base_name: definition.base_name,
            usage: definition.usage,
            description: definition.description,
            evaluator: definition.evaluator,
            source_required: definition.source_required,
            target_required: definition.target_required,
        });
        let _ = self.predicates_by_name.insert(full_name, predicate);

        Ok(predicate)
    }

    /// Register a bare named predicate without an evaluator.
    pub fn new_symbol(
        &mut self,
        base_name: impl Into<String>,
        usage: Usage,
    ) -> Result<Predicate, DuplicatePredicateError> {
        self.add_predicate(PredicateDefinition::symbol(base_name, usage))
    }

    /// Intern an entity name. Interning the same name twice yields the same
    /// id.
    pub fn new_entity(&mut self, name: impl Into<String>) -> EntityId {
        let name = name.into();

        if let Some(id) = self.entities_by_name.get(&name) {
            return *id;
        }

        let id = EntityId::new(self.entities.len() as u32);
        self.entities.push(name.clone());
        let _ = self.entities_by_name.insert(name, id);

        id
    }

    /// Look up a predicate by its full name.
    pub fn predicate(&self, full_name: &str) -> Option<Predicate> {
        self.predicates_by_name.get(full_name).copied()
    }

    /// Look up an entity by name.
    pub fn entity(&self, name: &str) -> Option<EntityId> {
        self.entities_by_name.get(name).copied()
    }

    pub fn entity_name(&self, entity: EntityId) -> &str {
        &self.entities[entity.index()]
    }

    pub fn base_name(&self, predicate: Predicate) -> &str {
        &self.predicates[predicate.index()].base_name
    }

    pub fn description(&self, predicate: Predicate) -> &str {
        &self.predicates[predicate.index()].description
    }

    /// The canonical `<base_name>_<usage>` name of the predicate.
    pub fn full_name(&self, predicate: Predicate) -> String {
        let data = &self.predicates[predicate.index()];
        format!("{}_{}", data.base_name, data.usage)
    }

    pub fn num_predicates(&self) -> usize {
        self.predicates.len()
    }

    pub fn num_entities(&self) -> usize {
        self.entities.len()
    }

    /// Evaluate the predicate against concrete entities.
    ///
    /// A `false` outcome is an ordinary result; errors are reserved for
    /// missing required attributes, a missing target, and evaluator-less
    /// symbols.
    pub fn evaluate(
        &self,
        predicate: Predicate,
        source: &dyn Entity,
        target: Option<&dyn Entity>,
    ) -> Result<bool, EvaluationError> {
        let data = &self.predicates[predicate.index()];

        for attribute in &data.source_required {
            if !source.has_attribute(attribute) {
                return Err(EvaluationError::MissingAttribute {
                    predicate: self.full_name(predicate),
                    role: "source",
                    entity: source.identifier().to_owned(),
                    attribute: attribute.clone(),
                });
            }
        }

        let needs_target = !matches!(data.usage, Usage::Source) || !data.target_required.is_empty();
        if needs_target && target.is_none() {
            return Err(EvaluationError::MissingTarget {
                predicate: self.full_name(predicate),
            });
        }

        if let Some(target) = target {
            for attribute in &data.target_required {
                if !target.has_attribute(attribute) {
                    return Err(EvaluationError::MissingAttribute {
                        predicate: self.full_name(predicate),
                        role: "target",
                        entity: target.identifier().to_owned(),
                        attribute: attribute.clone(),
                    });
                }
            }
        }

        let evaluator =
            data.evaluator
                .as_ref()
                .ok_or_else(|| EvaluationError::NoEvaluator {
                    predicate: self.full_name(predicate),
                })?;

        match data.usage {
            Usage::Source => Ok(evaluator(source, None)),
            Usage::Target => {
                let target = target.expect("checked above");
                Ok(evaluator(target, None))
            }
            Usage::Both => {
                let subject = target.expect("checked above");
                Ok(evaluator(source, Some(subject)))
            }
        }
    }

    /// Ground the given predicates against live entities: evaluate each one
    /// and assemble the observed truth values into a world statement scoped
    /// over the entity pair.
    pub fn observe(
        &self,
        predicates: &[Predicate],
        source: (EntityId, &dyn Entity),
        target: Option<(EntityId, &dyn Entity)>,
    ) -> Result<WorldStatement, ObservationError> {
        let mut literals = Vec::with_capacity(predicates.len());

        for &predicate in predicates {
            let value = self.evaluate(predicate, source.1, target.map(|(_, entity)| entity))?;
            literals.push(Literal::new(predicate, value));
        }

        let clause = Clause::new(literals).expect("each predicate is evaluated exactly once");
        let world =
            WorldStatement::from_parts([(clause, Some(source.0), target.map(|(id, _)| id))])?;

        Ok(world)
    }

    /// Renders a literal with its registered name, e.g. `IsOpen_target=false`.
    pub fn render_literal(&self, literal: Literal) -> String {
        format!(
            "{}={}",
            self.full_name(literal.predicate()),
            literal.polarity()
        )
    }

    pub fn render_clause(&self, clause: &Clause) -> String {
        if clause.is_empty() {
            return "true".to_owned();
        }

        clause
            .iter()
            .map(|literal| self.render_literal(literal))
            .collect::<Vec<_>>()
            .join(" & ")
    }

    pub fn render_key(&self, key: StatementKey) -> String {
        let name = |entity: Option<EntityId>| match entity {
            Some(entity) => self.entity_name(entity).to_owned(),
            None => "-".to_owned(),
        };

        format!("({}, {})", name(key.source()), name(key.target()))
    }

    pub fn render_world(&self, world: &WorldStatement) -> String {
        if world.is_empty() {
            return "true".to_owned();
        }

        world
            .partitions()
            .map(|(key, clause)| format!("{}: {}", self.render_key(*key), self.render_clause(clause)))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Debug for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("num_predicates", &self.predicates.len())
            .field("num_entities", &self.entities.len())
            .finish()
    }
}
