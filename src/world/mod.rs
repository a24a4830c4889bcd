//! World statements: clauses partitioned by the entity pair they scope over.

mod world_statement;

pub use world_statement::*;
