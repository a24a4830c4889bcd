use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::basic_types::Clause;
use crate::basic_types::EntityId;
use crate::basic_types::InconsistentClauseError;
use crate::basic_types::Literal;
use crate::basic_types::MergeConflictError;
use crate::basic_types::StatementKey;
use crate::basic_types::UsageMismatchError;
use crate::basic_types::Winner;
use crate::predicates::Predicate;

/// A symbolic description of (part of) the world: one [`Clause`] per
/// [`StatementKey`], i.e. per entity pair.
///
/// Every clause operation lifts to the world statement pointwise, keyed by
/// the entity pair. Empty partitions are never stored, so the trivially-true
/// world statement is the one with no partitions at all.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldStatement {
    partitions: BTreeMap<StatementKey, Clause>,
}

/// Building a world statement from raw parts failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldStatementError {
    /// A literal's predicate reads a role the part did not supply.
    #[error(transparent)]
    UsageMismatch(#[from] UsageMismatchError),

    /// The literals assigned to one entity pair bind a predicate both ways.
    #[error(transparent)]
    Inconsistent(#[from] InconsistentClauseError),
}

impl WorldStatement {
    /// The trivially-true world statement.
    pub fn empty() -> WorldStatement {
        WorldStatement::default()
    }

    /// Build a world statement from `(clause, source, target)` parts.
    ///
    /// Each literal is assigned to the key derived from its predicate's usage
    /// and the part's entity pair; literals from different parts that land on
    /// the same key are conjoined.
    pub fn from_parts(
        parts: impl IntoIterator<Item = (Clause, Option<EntityId>, Option<EntityId>)>,
    ) -> Result<WorldStatement, WorldStatementError> {
        let mut grouped: BTreeMap<StatementKey, Vec<Literal>> = BTreeMap::new();

        for (clause, source, target) in parts {
            for literal in clause.iter() {
                let key = StatementKey::for_predicate(literal.predicate(), source, target)?;
                grouped.entry(key).or_default().push(literal);
            }
        }

        let mut partitions = BTreeMap::new();
        for (key, literals) in grouped {
            let clause = Clause::new(literals)?;
            if !clause.is_empty() {
                let _ = partitions.insert(key, clause);
            }
        }

        Ok(WorldStatement { partitions })
    }

    fn from_partitions(partitions: BTreeMap<StatementKey, Clause>) -> WorldStatement {
        WorldStatement { partitions }
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// The number of entity pairs with a non-trivial clause.
    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    pub fn literal_count(&self) -> usize {
        self.partitions.values().map(Clause::len).sum()
    }

    pub fn partitions(&self) -> impl Iterator<Item = (&StatementKey, &Clause)> {
        self.partitions.iter()
    }

    /// The clause scoped over the given entity pair, if any.
    pub fn clause(&self, key: StatementKey) -> Option<&Clause> {
        self.partitions.get(&key)
    }

    /// For every key present in `other`, the clause in `self` validates the
    /// clause in `other`. Keys only present in `self` are ignored.
    pub fn validates(&self, other: &WorldStatement) -> bool {
        other.partitions.iter().all(|(key, clause)| {
            self.partitions
                .get(key)
                .map_or(false, |own| own.validates(clause))
        })
    }

    pub fn is_validated_by(&self, other: &WorldStatement) -> bool {
        other.validates(self)
    }

    /// There is a key at which the two clauses contradict each other.
    pub fn falsifies(&self, other: &WorldStatement) -> bool {
        self.partitions.iter().any(|(key, clause)| {
            other
                .partitions
                .get(key)
                .map_or(false, |theirs| clause.falsifies(theirs))
        })
    }

    pub fn is_falsified_by(&self, other: &WorldStatement) -> bool {
        other.falsifies(self)
    }

    /// Every `(key, predicate)` bound one way in `self` and the other way in
    /// `other`.
    pub fn conflicting_predicates(
        &self,
        other: &WorldStatement,
    ) -> Vec<(StatementKey, Predicate)> {
        let mut conflicts = Vec::new();

        for (key, clause) in &self.partitions {
            if let Some(theirs) = other.partitions.get(key) {
                conflicts.extend(
                    clause
                        .conflicting_predicates(theirs)
                        .into_iter()
                        .map(|predicate| (*key, predicate)),
                );
            }
        }

        conflicts
    }

    /// The union of both statements; per key the clauses are merged safely.
    /// Keys present on only one side are taken unchanged.
    pub fn merge(&self, other: &WorldStatement) -> Result<WorldStatement, MergeConflictError> {
        let mut partitions = self.partitions.clone();

        for (key, clause) in &other.partitions {
            match partitions.entry(*key) {
                Entry::Occupied(mut entry) => {
                    let merged = entry.get().merge(clause)?;
                    let _ = entry.insert(merged);
                }
                Entry::Vacant(entry) => {
                    let _ = entry.insert(clause.clone());
                }
            }
        }

        Ok(WorldStatement::from_partitions(partitions))
    }

    /// The union of both statements with per-key conflicts resolved in favour
    /// of the `winner` side.
    pub fn force_merge(&self, other: &WorldStatement, winner: Winner) -> WorldStatement {
        let mut partitions = self.partitions.clone();

        for (key, clause) in &other.partitions {
            match partitions.entry(*key) {
                Entry::Occupied(mut entry) => {
                    let merged = entry.get().force_merge(clause, winner);
                    let _ = entry.insert(merged);
                }
                Entry::Vacant(entry) => {
                    let _ = entry.insert(clause.clone());
                }
            }
        }

        WorldStatement::from_partitions(partitions)
    }

    /// Per key, remove the literals also present in `other`. Partitions that
    /// become empty are dropped.
    pub fn remove_intersection(&self, other: &WorldStatement) -> WorldStatement {
        let mut partitions = BTreeMap::new();

        for (key, clause) in &self.partitions {
            let residue = match other.partitions.get(key) {
                Some(theirs) => clause.remove_intersection(theirs),
                None => clause.clone(),
            };

            if !residue.is_empty() {
                let _ = partitions.insert(*key, residue);
            }
        }

        WorldStatement::from_partitions(partitions)
    }
}
