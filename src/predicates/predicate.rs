use std::fmt::Display;
use std::fmt::Formatter;

use crate::basic_types::Entity;
use crate::basic_types::Literal;

/// The positional role a predicate reads: the source entity of an action,
/// its target, or the ordered pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Usage {
    Source,
    Target,
    Both,
}

impl Display for Usage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Usage::Source => write!(f, "source"),
            Usage::Target => write!(f, "target"),
            Usage::Both => write!(f, "both"),
        }
    }
}

/// A handle to a predicate registered in a [`Schema`](crate::predicates::Schema).
///
/// The handle is cheap to copy and carries the usage tag so that literals can
/// be partitioned by entity pair without consulting the schema. Identity is
/// the registered `(base_name, usage)` pair, which the schema guarantees to
/// be one-to-one with ids. It is important to only combine handles created on
/// the same schema instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Predicate {
    id: u32,
    usage: Usage,
}

impl Predicate {
    pub(crate) fn new(id: u32, usage: Usage) -> Predicate {
        Predicate { id, usage }
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub(crate) fn index(self) -> usize {
        self.id as usize
    }

    /// The literal expecting this predicate to hold.
    pub fn affirmed(self) -> Literal {
        Literal::new(self, true)
    }

    /// The literal expecting this predicate not to hold.
    pub fn denied(self) -> Literal {
        Literal::new(self, false)
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.id)
    }
}

/// The opaque callable backing a predicate.
///
/// The first argument is the entity the predicate's usage scopes over (the
/// source for `Usage::Source`, the target for `Usage::Target`); for
/// `Usage::Both` the evaluator receives the source and the target in order.
pub type Evaluator = Box<dyn Fn(&dyn Entity, Option<&dyn Entity>) -> bool>;
