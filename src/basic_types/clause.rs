use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use super::Literal;
use crate::goblin_assert_moderate;
use crate::predicates::Predicate;

/// A conjunction of [`Literal`]s.
///
/// The clause is self-consistent by construction: no predicate is bound to
/// both `true` and `false`. The empty clause is trivially true and acts as
/// the identity of [`Clause::merge`] and [`Clause::force_merge`].
///
/// Literals are kept sorted by predicate, which makes equality set equality,
/// gives every clause a deterministic rendering, and lets the binary
/// operations run as linear merges.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Vec<Literal>,
}

/// Construction would bind a predicate to both `true` and `false`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("clause binds {} both true and false", DisplayPredicates(.predicates))]
pub struct InconsistentClauseError {
    /// The predicates that were bound both ways.
    pub predicates: Vec<Predicate>,
}

/// A safe merge was requested across clauses with conflicting bindings.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot merge clauses: {} bound both ways", DisplayPredicates(.predicates))]
pub struct MergeConflictError {
    /// The predicates bound `true` on one side and `false` on the other.
    pub predicates: Vec<Predicate>,
}

/// The side whose literal survives when [`Clause::force_merge`] encounters a
/// conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Left,
    Right,
}

impl Clause {
    /// Create a clause from the given literals.
    ///
    /// Duplicate literals are collapsed. If some predicate is bound to both
    /// truth values, construction fails and reports every such predicate.
    pub fn new(
        literals: impl IntoIterator<Item = Literal>,
    ) -> Result<Clause, InconsistentClauseError> {
        let mut literals: Vec<Literal> = literals.into_iter().collect();
        literals.sort_unstable();
        literals.dedup();

        let conflicting: Vec<Predicate> = literals
            .windows(2)
            .filter(|window| window[0].predicate() == window[1].predicate())
            .map(|window| window[0].predicate())
            .collect();

        if !conflicting.is_empty() {
            return Err(InconsistentClauseError {
                predicates: conflicting,
            });
        }

        Ok(Clause { literals })
    }

    /// The trivially-true clause.
    pub fn empty() -> Clause {
        Clause::default()
    }

    /// Wraps literals that are already sorted by predicate and free of
    /// duplicates, as produced by the merge operations below.
    fn from_sorted(literals: Vec<Literal>) -> Clause {
        let clause = Clause { literals };
        goblin_assert_moderate!(clause.is_consistent());
        clause
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }

    /// Checks the clause invariant: literals sorted by predicate, every
    /// predicate bound exactly once. Runs in time linear in the clause size.
    pub fn is_consistent(&self) -> bool {
        self.literals
            .windows(2)
            .all(|window| window[0].predicate() < window[1].predicate())
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.binary_search(&literal).is_ok()
    }

    /// The truth value this clause binds `predicate` to, if any.
    pub fn binding(&self, predicate: Predicate) -> Option<bool> {
        self.literals
            .binary_search_by(|literal| literal.predicate().cmp(&predicate))
            .ok()
            .map(|index| self.literals[index].polarity())
    }

    /// Every predicate bound to `true` in one clause and `false` in the
    /// other.
    pub fn conflicting_predicates(&self, other: &Clause) -> Vec<Predicate> {
        let mut conflicts = Vec::new();

        self.zip_walk(other, |own, theirs| match (own, theirs) {
            (Some(lhs), Some(rhs)) if lhs.polarity() != rhs.polarity() => {
                conflicts.push(lhs.predicate());
            }
            _ => {}
        });

        conflicts
    }

    pub fn conflicts_with(&self, other: &Clause) -> bool {
        !self.conflicting_predicates(other).is_empty()
    }

    /// There is a literal `(P, v)` in `self` and `(P, !v)` in `other`.
    /// Contradiction is symmetric: `a.falsifies(b) == b.falsifies(a)`.
    pub fn falsifies(&self, other: &Clause) -> bool {
        self.conflicts_with(other)
    }

    pub fn is_falsified_by(&self, other: &Clause) -> bool {
        other.falsifies(self)
    }

    /// Every literal of `other` also appears in `self`; `self` is at least as
    /// strong as `other` on `other`'s vocabulary. Reflexive, and every clause
    /// validates the trivially-true clause.
    pub fn validates(&self, other: &Clause) -> bool {
        other.literals.iter().all(|literal| self.contains(*literal))
    }

    pub fn is_validated_by(&self, other: &Clause) -> bool {
        other.validates(self)
    }

    /// The literals present in both clauses.
    pub fn intersection(&self, other: &Clause) -> Clause {
        let literals = self
            .literals
            .iter()
            .copied()
            .filter(|literal| other.contains(*literal))
            .collect();

        Clause::from_sorted(literals)
    }

    /// The literals of `self` that do not appear in `other`.
    ///
    /// A literal is only removed on an exact match; a conflicting binding of
    /// the same predicate is kept.
    pub fn remove_intersection(&self, other: &Clause) -> Clause {
        let literals = self
            .literals
            .iter()
            .copied()
            .filter(|literal| !other.contains(*literal))
            .collect();

        Clause::from_sorted(literals)
    }

    /// The union of both clauses. Fails if any predicate is bound both ways
    /// across the two sides.
    pub fn merge(&self, other: &Clause) -> Result<Clause, MergeConflictError> {
        let conflicts = self.conflicting_predicates(other);
        if !conflicts.is_empty() {
            return Err(MergeConflictError {
                predicates: conflicts,
            });
        }

        let mut literals = Vec::with_capacity(self.len() + other.len());
        self.zip_walk(other, |own, theirs| match (own, theirs) {
            (Some(literal), _) => literals.push(literal),
            (None, Some(literal)) => literals.push(literal),
            (None, None) => unreachable!(),
        });

        Ok(Clause::from_sorted(literals))
    }

    /// The union of both clauses, with conflicting predicates resolved in
    /// favour of the `winner` side. Not commutative.
    pub fn force_merge(&self, other: &Clause, winner: Winner) -> Clause {
        let mut literals = Vec::with_capacity(self.len() + other.len());

        self.zip_walk(other, |own, theirs| match (own, theirs) {
            (Some(lhs), Some(rhs)) => literals.push(match winner {
                Winner::Left => lhs,
                Winner::Right => rhs,
            }),
            (Some(literal), None) => literals.push(literal),
            (None, Some(literal)) => literals.push(literal),
            (None, None) => unreachable!(),
        });

        Clause::from_sorted(literals)
    }

    /// Walks both sorted literal lists in lockstep, calling `visit` with
    /// `(Some, Some)` when both clauses bind the predicate, and with a single
    /// `Some` when only one side does.
    fn zip_walk(&self, other: &Clause, mut visit: impl FnMut(Option<Literal>, Option<Literal>)) {
        let mut own = self.literals.iter().copied().peekable();
        let mut theirs = other.literals.iter().copied().peekable();

        loop {
            match (own.peek().copied(), theirs.peek().copied()) {
                (Some(lhs), Some(rhs)) => match lhs.predicate().cmp(&rhs.predicate()) {
                    Ordering::Less => {
                        visit(Some(lhs), None);
                        let _ = own.next();
                    }
                    Ordering::Greater => {
                        visit(None, Some(rhs));
                        let _ = theirs.next();
                    }
                    Ordering::Equal => {
                        visit(Some(lhs), Some(rhs));
                        let _ = own.next();
                        let _ = theirs.next();
                    }
                },
                (Some(lhs), None) => {
                    visit(Some(lhs), None);
                    let _ = own.next();
                }
                (None, Some(rhs)) => {
                    visit(None, Some(rhs));
                    let _ = theirs.next();
                }
                (None, None) => break,
            }
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "true");
        }

        for (index, literal) in self.literals.iter().enumerate() {
            if index > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{literal}")?;
        }

        Ok(())
    }
}

struct DisplayPredicates<'a>(&'a [Predicate]);

impl Display for DisplayPredicates<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, predicate) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{predicate}")?;
        }

        Ok(())
    }
}

/// Creates a [`Clause`] from the given literals.
///
/// # Panics
/// Panics if the literals bind a predicate to both truth values; use
/// [`Clause::new`] when the input is not known to be consistent.
#[macro_export]
macro_rules! clause {
    () => {
        $crate::basic_types::Clause::empty()
    };
    ($($literal:expr),+ $(,)?) => {
        $crate::basic_types::Clause::new([$($literal),+])
            .expect("the literals of a clause! invocation must be consistent")
    };
}
