mod helpers;
mod planner;
mod predicates;
