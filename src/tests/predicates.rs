#![cfg(test)]

use std::collections::HashSet;

use crate::basic_types::Entity;
use crate::basic_types::StatementKey;
use crate::predicates::EvaluationError;
use crate::predicates::PredicateDefinition;
use crate::predicates::Schema;
use crate::predicates::Usage;

/// A minimal attribute-bag entity for evaluation tests: an attribute that is
/// present counts as true.
struct Block {
    name: &'static str,
    attributes: HashSet<&'static str>,
}

impl Block {
    fn new(name: &'static str, attributes: &[&'static str]) -> Block {
        Block {
            name,
            attributes: attributes.iter().copied().collect(),
        }
    }
}

impl Entity for Block {
    fn identifier(&self) -> &str {
        self.name
    }

    fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }
}

#[test]
fn registering_the_same_name_and_usage_twice_fails() {
    let mut schema = Schema::new();

    let _ = schema.new_symbol("IsOpen", Usage::Target).unwrap();
    let error = schema.new_symbol("IsOpen", Usage::Target).unwrap_err();

    assert_eq!(error.full_name, "IsOpen_target");
}

#[test]
fn the_same_base_name_with_a_different_usage_is_a_different_predicate() {
    let mut schema = Schema::new();

    let target = schema.new_symbol("IsOpen", Usage::Target).unwrap();
    let source = schema.new_symbol("IsOpen", Usage::Source).unwrap();

    assert_ne!(target, source);
    assert_eq!(schema.full_name(target), "IsOpen_target");
    assert_eq!(schema.full_name(source), "IsOpen_source");
    assert_eq!(schema.predicate("IsOpen_target"), Some(target));
}

#[test]
fn interning_an_entity_name_twice_yields_the_same_id() {
    let mut schema = Schema::new();

    let first = schema.new_entity("door");
    let second = schema.new_entity("door");

    assert_eq!(first, second);
    assert_eq!(schema.entity_name(first), "door");
}

#[test]
fn evaluation_reads_the_entity_of_the_predicates_role() {
    let mut schema = Schema::new();

    let is_open = schema
        .add_predicate(
            PredicateDefinition::symbol("IsOpen", Usage::Target)
                .with_description("the door is open")
                .with_evaluator(Box::new(|subject, _| subject.has_attribute("open"))),
        )
        .unwrap();

    let character = Block::new("character", &[]);
    let open_door = Block::new("door", &["open"]);
    let closed_door = Block::new("door", &[]);

    assert!(schema
        .evaluate(is_open, &character, Some(&open_door))
        .unwrap());
    assert!(!schema
        .evaluate(is_open, &character, Some(&closed_door))
        .unwrap());
}

#[test]
fn a_missing_required_attribute_is_an_error_not_a_false() {
    let mut schema = Schema::new();

    let has_space = schema
        .add_predicate(
            PredicateDefinition::symbol("HasInventorySpace", Usage::Source)
                .with_evaluator(Box::new(|subject, _| subject.has_attribute("space")))
                .requiring_source_attributes(["inventory"]),
        )
        .unwrap();

    let with_inventory = Block::new("character", &["inventory", "space"]);
    let without_inventory = Block::new("statue", &[]);

    assert!(schema
        .evaluate(has_space, &with_inventory, None)
        .unwrap());

    let error = schema
        .evaluate(has_space, &without_inventory, None)
        .unwrap_err();
    assert_eq!(
        error,
        EvaluationError::MissingAttribute {
            predicate: "HasInventorySpace_source".to_owned(),
            role: "source",
            entity: "statue".to_owned(),
            attribute: "inventory".to_owned(),
        }
    );
}

#[test]
fn a_target_predicate_without_a_target_is_an_error() {
    let mut schema = Schema::new();

    let is_open = schema
        .add_predicate(
            PredicateDefinition::symbol("IsOpen", Usage::Target)
                .with_evaluator(Box::new(|subject, _| subject.has_attribute("open"))),
        )
        .unwrap();

    let character = Block::new("character", &[]);

    let error = schema.evaluate(is_open, &character, None).unwrap_err();
    assert!(matches!(error, EvaluationError::MissingTarget { .. }));
}

#[test]
fn a_bare_symbol_cannot_be_evaluated() {
    let mut schema = Schema::new();

    let synthetic = schema.new_symbol("Synthetic", Usage::Source).unwrap();
    let character = Block::new("character", &[]);

    let error = schema.evaluate(synthetic, &character, None).unwrap_err();
    assert!(matches!(error, EvaluationError::NoEvaluator { .. }));
}

#[test]
fn observing_entities_grounds_a_world_statement() {
    let mut schema = Schema::new();

    let is_open = schema
        .add_predicate(
            PredicateDefinition::symbol("IsOpen", Usage::Target)
                .with_evaluator(Box::new(|subject, _| subject.has_attribute("open"))),
        )
        .unwrap();
    let is_locked = schema
        .add_predicate(
            PredicateDefinition::symbol("IsLocked", Usage::Target)
                .with_evaluator(Box::new(|subject, _| subject.has_attribute("locked"))),
        )
        .unwrap();
    let has_key = schema
        .add_predicate(
            PredicateDefinition::symbol("HasKey", Usage::Source)
                .with_evaluator(Box::new(|subject, _| subject.has_attribute("key"))),
        )
        .unwrap();

    let character_id = schema.new_entity("character");
    let door_id = schema.new_entity("door");

    let character = Block::new("character", &[]);
    let door = Block::new("door", &["locked"]);

    let world = schema
        .observe(
            &[is_open, is_locked, has_key],
            (character_id, &character),
            Some((door_id, &door)),
        )
        .unwrap();

    let door_clause = world.clause(StatementKey::Target(door_id)).unwrap();
    assert_eq!(door_clause.binding(is_open), Some(false));
    assert_eq!(door_clause.binding(is_locked), Some(true));

    let character_clause = world.clause(StatementKey::Source(character_id)).unwrap();
    assert_eq!(character_clause.binding(has_key), Some(false));
}

#[test]
fn observation_surfaces_evaluation_errors() {
    let mut schema = Schema::new();

    let fragile = schema
        .add_predicate(
            PredicateDefinition::symbol("Fragile", Usage::Source)
                .with_evaluator(Box::new(|subject, _| subject.has_attribute("fragile")))
                .requiring_source_attributes(["material"]),
        )
        .unwrap();

    let entity_id = schema.new_entity("statue");
    let statue = Block::new("statue", &[]);

    let error = schema
        .observe(&[fragile], (entity_id, &statue), None)
        .unwrap_err();

    assert!(matches!(
        error,
        crate::predicates::ObservationError::Evaluation(_)
    ));
}
