//! Predicates are the named boolean tests the symbolic algebra is built
//! over. The search never invokes a predicate's evaluator; evaluation only
//! happens when grounding a world statement against live entities.

mod predicate;
mod schema;

pub use predicate::*;
pub use schema::*;
