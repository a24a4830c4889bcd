#![cfg(test)]

//! The lock-and-key fixture shared by the tests: a character, a locked door,
//! and a key that must be picked up before the door can be unlocked and
//! opened.

use crate::basic_types::EntityId;
use crate::clause;
use crate::model::Model;
use crate::predicates::Predicate;
use crate::predicates::Usage;
use crate::world::WorldStatement;

pub(crate) struct LockKey {
    pub(crate) model: Model,
    pub(crate) character: EntityId,
    pub(crate) door: EntityId,
    pub(crate) key: EntityId,
    pub(crate) is_open: Predicate,
    pub(crate) is_locked: Predicate,
    pub(crate) has_key: Predicate,
    pub(crate) is_pickable: Predicate,
    pub(crate) has_space: Predicate,
}

impl LockKey {
    pub(crate) fn new() -> LockKey {
        let mut model = Model::default();

        let character = model.new_entity("character");
        let door = model.new_entity("door");
        let key = model.new_entity("key");

        let is_open = model.new_symbol("IsOpen", Usage::Target).unwrap();
        let is_locked = model.new_symbol("IsLocked", Usage::Target).unwrap();
        let has_key = model.new_symbol("HasKey", Usage::Source).unwrap();
        let is_pickable = model.new_symbol("IsPickable", Usage::Target).unwrap();
        let has_space = model.new_symbol("HasInventorySpace", Usage::Source).unwrap();

        LockKey {
            model,
            character,
            door,
            key,
            is_open,
            is_locked,
            has_key,
            is_pickable,
            has_space,
        }
    }

    /// The three actions of the basic scenario: pick up the key, unlock the
    /// door, open the door.
    pub(crate) fn with_core_actions() -> LockKey {
        let mut fixture = LockKey::new();
        fixture.add_pick_key();
        fixture.add_unlock();
        fixture.add_open();
        fixture
    }

    pub(crate) fn add_pick_key(&mut self) {
        self.model
            .new_action(
                "pick_key",
                self.character,
                Some(self.key),
                [clause![
                    self.has_key.denied(),
                    self.is_pickable.affirmed(),
                    self.has_space.affirmed(),
                ]],
                [clause![self.has_key.affirmed(), self.is_pickable.denied()]],
            )
            .unwrap();
    }

    pub(crate) fn add_unlock(&mut self) {
        self.model
            .new_action(
                "unlock_door",
                self.character,
                Some(self.door),
                [clause![self.has_key.affirmed(), self.is_locked.affirmed()]],
                [clause![self.is_locked.denied()]],
            )
            .unwrap();
    }

    pub(crate) fn add_open(&mut self) {
        self.model
            .new_action(
                "open_door",
                self.character,
                Some(self.door),
                [clause![self.is_locked.denied(), self.is_open.denied()]],
                [clause![self.is_open.affirmed()]],
            )
            .unwrap();
    }

    pub(crate) fn add_lock(&mut self) {
        self.model
            .new_action(
                "lock_door",
                self.character,
                Some(self.door),
                [clause![self.is_locked.denied(), self.has_key.affirmed()]],
                [clause![self.is_locked.affirmed()]],
            )
            .unwrap();
    }

    pub(crate) fn add_close(&mut self) {
        self.model
            .new_action(
                "close_door",
                self.character,
                Some(self.door),
                [clause![self.is_open.affirmed(), self.is_locked.denied()]],
                [clause![self.is_open.denied()]],
            )
            .unwrap();
    }

    /// The canonical starting world: door closed and locked, key pickable,
    /// inventory space available, no key held.
    pub(crate) fn start(&self) -> WorldStatement {
        WorldStatement::from_parts([
            (
                clause![self.is_open.denied(), self.is_locked.affirmed()],
                None,
                Some(self.door),
            ),
            (clause![self.is_pickable.affirmed()], None, Some(self.key)),
            (
                clause![self.has_space.affirmed(), self.has_key.denied()],
                Some(self.character),
                None,
            ),
        ])
        .unwrap()
    }

    /// The goal: the door is open.
    pub(crate) fn goal(&self) -> WorldStatement {
        WorldStatement::from_parts([(
            clause![self.is_open.affirmed()],
            None,
            Some(self.door),
        )])
        .unwrap()
    }
}

/// The names of a plan's actions, for compact assertions.
pub(crate) fn action_names(actions: &[crate::model::Action]) -> Vec<&str> {
    actions.iter().map(|action| action.name()).collect()
}
