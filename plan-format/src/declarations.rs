use std::fmt::Display;
use std::fmt::Formatter;

/// The positional role a predicate reads, as written in a scenario file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsageTag {
    Source,
    Target,
    Both,
}

impl Display for UsageTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageTag::Source => write!(f, "source"),
            UsageTag::Target => write!(f, "target"),
            UsageTag::Both => write!(f, "both"),
        }
    }
}

/// A `predicate <name> : <usage>;` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredicateDeclaration {
    pub name: String,
    pub usage: UsageTag,
}

/// A single `<predicate> = <bool>` element of a literal list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralSpec {
    pub predicate: String,
    pub value: bool,
}

/// An `action <name> (<source>, <target>?) { pre: ...; con: ...; }` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionDeclaration {
    pub name: String,
    pub source: String,
    pub target: Option<String>,
    pub prerequisites: Vec<LiteralSpec>,
    pub consequences: Vec<LiteralSpec>,
}

/// The contents of an action library file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionLibrary {
    pub predicates: Vec<PredicateDeclaration>,
    pub actions: Vec<ActionDeclaration>,
}

/// One `(<source>?, <target>?): <literals>;` line of a world statement file.
///
/// A `-` in either position of the entity pair parses to `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldPart {
    pub source: Option<String>,
    pub target: Option<String>,
    pub literals: Vec<LiteralSpec>,
}

/// The contents of a world statement file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldDeclaration {
    pub parts: Vec<WorldPart>,
}
