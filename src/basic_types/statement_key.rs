use std::fmt::Display;
use std::fmt::Formatter;

use super::EntityId;
use crate::predicates::Predicate;
use crate::predicates::Usage;

/// The entity pair a partition of a world statement is scoped over.
///
/// The key a literal lives under follows directly from the [`Usage`] of its
/// predicate: `Source` literals key on the source entity alone, `Target`
/// literals on the target alone, and `Both` literals on the ordered pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatementKey {
    Source(EntityId),
    Target(EntityId),
    Pair(EntityId, EntityId),
}

/// A literal could not be assigned to an entity pair, because the role its
/// predicate reads was not supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("predicate {predicate} reads the {} role, but no such entity was supplied", .predicate.usage())]
pub struct UsageMismatchError {
    /// The predicate whose role could not be resolved.
    pub predicate: Predicate,
}

impl StatementKey {
    /// Derive the key for a literal of `predicate` scoped over the given
    /// entity pair.
    pub fn for_predicate(
        predicate: Predicate,
        source: Option<EntityId>,
        target: Option<EntityId>,
    ) -> Result<StatementKey, UsageMismatchError> {
        let mismatch = UsageMismatchError { predicate };

        match predicate.usage() {
            Usage::Source => source.map(StatementKey::Source).ok_or(mismatch),
            Usage::Target => target.map(StatementKey::Target).ok_or(mismatch),
            Usage::Both => match (source, target) {
                (Some(source), Some(target)) => Ok(StatementKey::Pair(source, target)),
                _ => Err(mismatch),
            },
        }
    }

    pub fn source(&self) -> Option<EntityId> {
        match self {
            StatementKey::Source(source) => Some(*source),
            StatementKey::Target(_) => None,
            StatementKey::Pair(source, _) => Some(*source),
        }
    }

    pub fn target(&self) -> Option<EntityId> {
        match self {
            StatementKey::Source(_) => None,
            StatementKey::Target(target) => Some(*target),
            StatementKey::Pair(_, target) => Some(*target),
        }
    }
}

impl Display for StatementKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementKey::Source(source) => write!(f, "({source}, -)"),
            StatementKey::Target(target) => write!(f, "(-, {target})"),
            StatementKey::Pair(source, target) => write!(f, "({source}, {target})"),
        }
    }
}
