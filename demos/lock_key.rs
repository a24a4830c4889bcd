//! The lock-and-key scenario: a character must pick up a key, unlock a door,
//! and open it. The starting world is grounded from live entities through
//! the predicate evaluators; planning itself is purely symbolic.
//!
//! Run with `cargo run --example lock-key`.

use std::collections::HashSet;

use goblin::clause;
use goblin::termination::Indefinite;
use goblin::Entity;
use goblin::Model;
use goblin::PlannerOptions;
use goblin::PlanningResult;
use goblin::PredicateDefinition;
use goblin::Usage;
use goblin::WorldStatement;

/// An attribute-bag entity: an attribute that is present counts as true.
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

fn attribute_evaluator(attribute: &'static str) -> goblin::Evaluator {
    Box::new(move |subject: &dyn Entity, _| subject.has_attribute(attribute))
}

fn main() {
    env_logger::init();

    let mut model = Model::default();

    let character_id = model.new_entity("character");
    let door_id = model.new_entity("door");
    let key_id = model.new_entity("key");

    let is_open = model
        .add_predicate(
            PredicateDefinition::symbol("IsOpen", Usage::Target)
                .with_description("is open")
                .with_evaluator(attribute_evaluator("open")),
        )
        .unwrap();
    let is_locked = model
        .add_predicate(
            PredicateDefinition::symbol("IsLocked", Usage::Target)
                .with_description("is locked")
                .with_evaluator(attribute_evaluator("locked")),
        )
        .unwrap();
    let is_pickable = model
        .add_predicate(
            PredicateDefinition::symbol("IsPickable", Usage::Target)
                .with_description("can be picked up")
                .with_evaluator(attribute_evaluator("movable")),
        )
        .unwrap();
    let has_key = model
        .add_predicate(
            PredicateDefinition::symbol("HasKey", Usage::Source)
                .with_description("holds the key")
                .with_evaluator(attribute_evaluator("key"))
                .requiring_source_attributes(["inventory"]),
        )
        .unwrap();
    let has_space = model
        .add_predicate(
            PredicateDefinition::symbol("HasInventorySpace", Usage::Source)
                .with_description("has room in the inventory")
                .with_evaluator(attribute_evaluator("inventory"))
                .requiring_source_attributes(["inventory"]),
        )
        .unwrap();

    model
        .new_action(
            "pick_key",
            character_id,
            Some(key_id),
            [clause![
                has_key.denied(),
                is_pickable.affirmed(),
                has_space.affirmed(),
            ]],
            [clause![has_key.affirmed(), is_pickable.denied()]],
        )
        .unwrap();
    model
        .new_action(
            "unlock_door",
            character_id,
            Some(door_id),
            [clause![has_key.affirmed(), is_locked.affirmed()]],
            [clause![is_locked.denied()]],
        )
        .unwrap();
    model
        .new_action(
            "open_door",
            character_id,
            Some(door_id),
            [clause![is_locked.denied(), is_open.denied()]],
            [clause![is_open.affirmed()]],
        )
        .unwrap();
    model
        .new_action(
            "close_door",
            character_id,
            Some(door_id),
            [clause![is_open.affirmed(), is_locked.denied()]],
            [clause![is_open.denied()]],
        )
        .unwrap();

    // The concrete world: a closed, locked door, a movable key, a character
    // with an inventory and no key in it.
    let character = Block::new("character", &["inventory"]);
    let door = Block::new("door", &["locked"]);
    let key = Block::new("key", &["movable"]);

    // Ground the starting world from the live entities.
    let door_side = model
        .schema()
        .observe(
            &[is_open, is_locked, has_key, has_space],
            (character_id, &character),
            Some((door_id, &door)),
        )
        .unwrap();
    let key_side = model
        .schema()
        .observe(&[is_pickable], (character_id, &character), Some((key_id, &key)))
        .unwrap();
    let start = door_side.merge(&key_side).unwrap();

    let goal =
        WorldStatement::from_parts([(clause![is_open.affirmed()], None, Some(door_id))]).unwrap();

    println!("start: {}", model.schema().render_world(&start));
    println!("goal:  {}", model.schema().render_world(&goal));

    let mut planner = model.into_planner(PlannerOptions::default());

    match planner.solve_forward(&start, &goal, 10, &mut Indefinite) {
        PlanningResult::Planned(plan) => {
            println!("forward plan:");
            for (position, action) in plan.actions().iter().enumerate() {
                println!("  {}. {}", position + 1, action.name());
            }
        }
        PlanningResult::NoPlan { .. } => println!("forward: no plan"),
        PlanningResult::Unknown => println!("forward: unknown"),
    }

    match planner.solve_backward(&start, &goal, 10, &mut Indefinite) {
        PlanningResult::Planned(plan) => {
            println!("backward plan:");
            for (position, action) in plan.actions().iter().enumerate() {
                println!("  {}. {}", position + 1, action.name());
            }
        }
        PlanningResult::NoPlan { .. } => println!("backward: no plan"),
        PlanningResult::Unknown => println!("backward: unknown"),
    }

    planner.log_statistics();
}
