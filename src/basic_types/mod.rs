//! The building blocks of the symbolic algebra: entities, literals, clauses,
//! and the entity-pair keys world statements are partitioned by.

mod clause;
mod entity;
mod literal;
mod plan_step;
mod statement_key;

pub use clause::*;
pub use entity::*;
pub use literal::*;
pub use plan_step::*;
pub use statement_key::*;
