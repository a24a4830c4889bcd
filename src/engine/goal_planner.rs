//! Houses the planner, which answers whether a finite sequence of actions
//! leads from a current symbolic world to a target one, by depth-first
//! search over [`PlanFragment`]s.

use std::cmp::max;

use log::debug;
use rand::seq::SliceRandom;

use super::debug_helper::DebugHelper;
use super::plan_fragment::PlanFragment;
use super::termination::TerminationCondition;
use super::trace::SearchMethod;
use super::trace::SearchTrace;
use super::trace::StepOutcome;
use crate::goblin_assert_extreme;
use crate::model::Action;
use crate::model::Direction;
use crate::options::PlannerOptions;
use crate::predicates::Schema;
use crate::results::Plan;
use crate::results::PlanningResult;
use crate::statistics::log_statistic;
use crate::world::WorldStatement;

/// A planner over a fixed pool of actions.
///
/// Two searches are available. [`GoalPlanner::solve_forward`] starts from the
/// initial world and extends fragments at the back until the accumulated
/// consequences validate the goal. [`GoalPlanner::solve_backward`] starts
/// from the goal and extends fragments at the front until the initial world
/// validates the accumulated demand. Both are depth-bounded, prune worlds
/// already covered on the current path, and return the first plan found.
///
/// Candidates are visited in action pool order (or in a seeded-random order
/// when shuffling is enabled in the [`PlannerOptions`]), so a solve call is
/// deterministic for a fixed model and options.
#[derive(Debug)]
pub struct GoalPlanner {
    schema: Schema,
    actions: Vec<Action>,
    options: PlannerOptions,
    trace: SearchTrace,
    counters: Counters,
}

/// A set of counters updated during the search.
#[derive(Clone, Copy, Debug, Default)]
struct Counters {
    num_nodes_expanded: u64,
    num_fragments_extended: u64,
    num_candidates_rejected: u64,
    num_states_pruned: u64,
    deepest_depth: u32,
}

/// The result of exploring one subtree.
enum SearchStatus {
    Found(PlanFragment),
    Exhausted { depth_limited: bool },
    Cancelled,
}

impl GoalPlanner {
    pub fn new(schema: Schema, actions: Vec<Action>, options: PlannerOptions) -> GoalPlanner {
        GoalPlanner {
            schema,
            actions,
            options,
            trace: SearchTrace::default(),
            counters: Counters::default(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The trace accumulated over all solve calls on this planner.
    pub fn trace(&self) -> &SearchTrace {
        &self.trace
    }

    /// Search for a plan that, fired from `initial`, reaches a world
    /// validating `goal`. `depth_limit` bounds the plan length.
    pub fn solve_forward(
        &mut self,
        initial: &WorldStatement,
        goal: &WorldStatement,
        depth_limit: u32,
        termination: &mut impl TerminationCondition,
    ) -> PlanningResult {
        let root = PlanFragment::seeded(initial.clone());
        let mut visited = vec![initial.clone()];

        let GoalPlanner {
            schema,
            actions,
            options,
            trace,
            counters,
        } = self;

        let mut context = SearchContext {
            method: SearchMethod::SolveForward,
            actions,
            schema,
            options,
            trace,
            counters,
            termination,
        };

        let status = forward_search(&mut context, &root, goal, depth_limit, 0, &mut visited);
        self.conclude(status)
    }

    /// Search for a plan by regressing `goal` towards `start`: prepend
    /// actions until the start world validates the accumulated demand.
    pub fn solve_backward(
        &mut self,
        start: &WorldStatement,
        goal: &WorldStatement,
        depth_limit: u32,
        termination: &mut impl TerminationCondition,
    ) -> PlanningResult {
        // A goal the start world already validates needs no actions; the
        // in-search success test only accepts non-empty sequences.
        if start.validates(goal) {
            self.trace.push(
                SearchMethod::SolveBackward,
                0,
                None,
                None,
                StepOutcome::GoalReached,
            );
            return self.conclude(SearchStatus::Found(PlanFragment::seeded(goal.clone())));
        }

        let root = PlanFragment::seeded(goal.clone());
        let mut visited = vec![goal.clone()];

        let GoalPlanner {
            schema,
            actions,
            options,
            trace,
            counters,
        } = self;

        let mut context = SearchContext {
            method: SearchMethod::SolveBackward,
            actions,
            schema,
            options,
            trace,
            counters,
            termination,
        };

        let status = backward_search(&mut context, &root, start, depth_limit, 0, &mut visited);
        self.conclude(status)
    }

    fn conclude(&mut self, status: SearchStatus) -> PlanningResult {
        match status {
            SearchStatus::Found(fragment) => {
                debug!("found a plan of length {}", fragment.len());
                let (actions, prerequisites, consequences) = fragment.into_parts();
                PlanningResult::Planned(Plan::new(actions, prerequisites, consequences))
            }
            SearchStatus::Exhausted { depth_limited } => {
                debug!("search exhausted, depth_limited={depth_limited}");
                PlanningResult::NoPlan { depth_limited }
            }
            SearchStatus::Cancelled => {
                debug!("search cancelled by the termination condition");
                PlanningResult::Unknown
            }
        }
    }

    /// Log the planner counters through the statistic logger.
    pub fn log_statistics(&self) {
        log_statistic("nodesExpanded", self.counters.num_nodes_expanded);
        log_statistic("fragmentsExtended", self.counters.num_fragments_extended);
        log_statistic("candidatesRejected", self.counters.num_candidates_rejected);
        log_statistic("statesPruned", self.counters.num_states_pruned);
        log_statistic("deepestDepth", self.counters.deepest_depth);
        log_statistic("traceRecords", self.trace.len());
    }
}

/// The per-solve state threaded through the recursive searches.
struct SearchContext<'a> {
    method: SearchMethod,
    actions: &'a [Action],
    schema: &'a Schema,
    options: &'a mut PlannerOptions,
    trace: &'a mut SearchTrace,
    counters: &'a mut Counters,
    termination: &'a mut dyn TerminationCondition,
}

impl SearchContext<'_> {
    fn record(
        &mut self,
        depth: u32,
        action: Option<&str>,
        fragment: Option<String>,
        outcome: StepOutcome,
    ) {
        self.trace.push(self.method, depth, action, fragment, outcome);
    }

    /// The order in which candidate actions are visited at one node.
    fn candidate_order(&mut self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.actions.len()).collect();

        if self.options.shuffle_candidates {
            order.shuffle(&mut self.options.random_generator);
        }

        order
    }

    fn snapshot(&self, fragment: &PlanFragment) -> Option<String> {
        self.options.record_fragments.then(|| {
            format!(
                "pre={}; con={}",
                self.schema.render_world(fragment.global_prerequisites()),
                self.schema.render_world(fragment.global_consequences())
            )
        })
    }
}

fn forward_search(
    context: &mut SearchContext<'_>,
    node: &PlanFragment,
    goal: &WorldStatement,
    depth_remaining: u32,
    depth: u32,
    visited: &mut Vec<WorldStatement>,
) -> SearchStatus {
    if context.termination.should_stop() {
        context.record(depth, None, None, StepOutcome::Cancelled);
        return SearchStatus::Cancelled;
    }

    context.counters.num_nodes_expanded += 1;
    context.counters.deepest_depth = max(context.counters.deepest_depth, depth);

    if goal.is_validated_by(node.global_consequences()) {
        let snapshot = context.snapshot(node);
        context.record(depth, None, snapshot, StepOutcome::GoalReached);
        return SearchStatus::Found(node.clone());
    }

    if depth_remaining == 0 {
        context.record(depth, None, None, StepOutcome::DepthLimited);
        return SearchStatus::Exhausted {
            depth_limited: true,
        };
    }

    let actions = context.actions;
    let mut depth_limited = false;

    for index in context.candidate_order() {
        let action = &actions[index];

        if !action.allowed_in(node.global_consequences(), Direction::Forward) {
            context.record(depth, Some(action.name()), None, StepOutcome::Inapplicable);
            continue;
        }

        let mut child = node.clone();
        if let Err(reason) = child.append(action, true) {
            context.counters.num_candidates_rejected += 1;
            context.record(
                depth,
                Some(action.name()),
                None,
                StepOutcome::Rejected(reason),
            );
            continue;
        }

        goblin_assert_extreme!(DebugHelper::fragment_is_coherent(&child));

        if visited
            .iter()
            .any(|state| state.validates(child.global_consequences()))
        {
            context.counters.num_states_pruned += 1;
            context.record(depth, Some(action.name()), None, StepOutcome::Pruned);
            continue;
        }

        let snapshot = context.snapshot(&child);
        context.record(depth, Some(action.name()), snapshot, StepOutcome::Extended);
        context.counters.num_fragments_extended += 1;

        visited.push(child.global_consequences().clone());
        let status = forward_search(context, &child, goal, depth_remaining - 1, depth + 1, visited);
        let _ = visited.pop();

        match status {
            SearchStatus::Found(fragment) => return SearchStatus::Found(fragment),
            SearchStatus::Cancelled => return SearchStatus::Cancelled,
            SearchStatus::Exhausted {
                depth_limited: limited,
            } => depth_limited |= limited,
        }
    }

    SearchStatus::Exhausted { depth_limited }
}

fn backward_search(
    context: &mut SearchContext<'_>,
    node: &PlanFragment,
    start: &WorldStatement,
    depth_remaining: u32,
    depth: u32,
    visited: &mut Vec<WorldStatement>,
) -> SearchStatus {
    if context.termination.should_stop() {
        context.record(depth, None, None, StepOutcome::Cancelled);
        return SearchStatus::Cancelled;
    }

    context.counters.num_nodes_expanded += 1;
    context.counters.deepest_depth = max(context.counters.deepest_depth, depth);

    if !node.is_empty() && start.validates(node.global_prerequisites()) {
        let snapshot = context.snapshot(node);
        context.record(depth, None, snapshot, StepOutcome::GoalReached);
        return SearchStatus::Found(node.clone());
    }

    if depth_remaining == 0 {
        context.record(depth, None, None, StepOutcome::DepthLimited);
        return SearchStatus::Exhausted {
            depth_limited: true,
        };
    }

    let actions = context.actions;
    let mut depth_limited = false;

    for index in context.candidate_order() {
        let action = &actions[index];

        if !action.allowed_in(node.global_prerequisites(), Direction::Backward) {
            context.record(depth, Some(action.name()), None, StepOutcome::Inapplicable);
            continue;
        }

        let mut child = node.clone();
        if let Err(reason) = child.prepend(action, false) {
            context.counters.num_candidates_rejected += 1;
            context.record(
                depth,
                Some(action.name()),
                None,
                StepOutcome::Rejected(reason),
            );
            continue;
        }

        goblin_assert_extreme!(DebugHelper::fragment_is_coherent(&child));

        if visited
            .iter()
            .any(|state| state.validates(child.global_prerequisites()))
        {
            context.counters.num_states_pruned += 1;
            context.record(depth, Some(action.name()), None, StepOutcome::Pruned);
            continue;
        }

        let snapshot = context.snapshot(&child);
        context.record(depth, Some(action.name()), snapshot, StepOutcome::Extended);
        context.counters.num_fragments_extended += 1;

        visited.push(child.global_prerequisites().clone());
        let status = backward_search(context, &child, start, depth_remaining - 1, depth + 1, visited);
        let _ = visited.pop();

        match status {
            SearchStatus::Found(fragment) => return SearchStatus::Found(fragment),
            SearchStatus::Cancelled => return SearchStatus::Cancelled,
            SearchStatus::Exhausted {
                depth_limited: limited,
            } => depth_limited |= limited,
        }
    }

    SearchStatus::Exhausted { depth_limited }
}
