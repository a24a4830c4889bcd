//! This crate contains the textual scenario format consumed by the goblin
//! planner's command line runner. A scenario is split over two kinds of file:
//!
//! - an *action library* file declaring predicates (with their usage tag) and
//!   actions (with prerequisite and consequence literals), parsed with
//!   [`parse_action_library`];
//! - a *world statement* file binding literals to entity pairs, used for both
//!   the initial world and the goal, parsed with [`parse_world_statement`].
//!
//! The parsed values are plain string-keyed declarations; resolving them
//! against a planner schema is the caller's concern.
//!
//! ```text
//! % action library
//! predicate IsOpen : target;
//! predicate HasKey : source;
//!
//! action open_door (char, door) {
//!     pre: IsOpen = false & IsLocked = false;
//!     con: IsOpen = true;
//! }
//! ```
//!
//! ```text
//! % world statement
//! (-, door): IsOpen = false & IsLocked = true;
//! (char, -): HasKey = false;
//! ```
//!
//! Lines starting with `%` are comments, as in the DZN data files the planner
//! ecosystem commonly uses.

mod declarations;
mod parser;

pub use declarations::*;
pub use parser::parse_action_library;
pub use parser::parse_world_statement;
pub use parser::ParseError;
