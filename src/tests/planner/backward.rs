#![cfg(test)]

use crate::clause;
use crate::engine::termination::Indefinite;
use crate::engine::trace::StepOutcome;
use crate::options::PlannerOptions;
use crate::results::PlanningResult;
use crate::tests::helpers::action_names;
use crate::tests::helpers::LockKey;
use crate::world::WorldStatement;

#[test]
fn regresses_the_goal_to_the_lock_key_plan() {
    let fixture = LockKey::with_core_actions();
    let (start, goal) = (fixture.start(), fixture.goal());
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let result = planner.solve_backward(&start, &goal, 10, &mut Indefinite);

    let plan = result.plan().expect("the scenario is solvable backwards");
    assert_eq!(
        action_names(plan.actions()),
        vec!["pick_key", "unlock_door", "open_door"]
    );

    // Soundness: the plan found by regression also works forward.
    let reached = plan
        .actions()
        .iter()
        .fold(start.clone(), |world, action| action.apply_forward(&world));
    assert!(goal.is_validated_by(&reached));

    assert!(start.validates(plan.prerequisites()));
}

#[test]
fn an_already_satisfied_goal_yields_the_empty_plan() {
    let fixture = LockKey::with_core_actions();
    let start = fixture.start();
    let satisfied_goal = WorldStatement::from_parts([(
        clause![fixture.is_locked.affirmed()],
        None,
        Some(fixture.door),
    )])
    .unwrap();
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let result = planner.solve_backward(&start, &satisfied_goal, 10, &mut Indefinite);

    let plan = result.plan().expect("the goal already holds");
    assert!(plan.is_empty());
}

#[test]
fn an_unreachable_goal_is_no_plan() {
    let mut fixture = LockKey::new();
    fixture.add_unlock();
    fixture.add_open();

    let (start, goal) = (fixture.start(), fixture.goal());
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let result = planner.solve_backward(&start, &goal, 10, &mut Indefinite);

    assert!(!result.is_planned());
    assert!(matches!(result, PlanningResult::NoPlan { .. }));
}

#[test]
fn candidates_whose_consequences_contradict_the_demand_are_filtered() {
    // close_door comes first in the pool so that the search reports it
    // before succeeding with open_door.
    let mut fixture = LockKey::new();
    fixture.add_close();
    fixture.add_open();

    let start = WorldStatement::from_parts([(
        clause![fixture.is_open.denied(), fixture.is_locked.denied()],
        None,
        Some(fixture.door),
    )])
    .unwrap();
    let goal = fixture.goal();
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let result = planner.solve_backward(&start, &goal, 10, &mut Indefinite);

    let plan = result.plan().expect("opening the door suffices");
    assert_eq!(action_names(plan.actions()), vec!["open_door"]);

    // close_door makes IsOpen false, contradicting the demanded goal; it
    // must have been dismissed at the root without being attempted.
    assert!(planner.trace().records().iter().any(|record| {
        record.action.as_deref() == Some("close_door")
            && record.outcome == StepOutcome::Inapplicable
    }));
}

#[test]
fn visited_state_pruning_keeps_regression_finite() {
    let mut fixture = LockKey::new();
    fixture.add_open();
    fixture.add_close();

    // The demanded world can never be justified from the start world, and
    // open/close can regress into each other forever.
    let start = WorldStatement::from_parts([(
        clause![fixture.is_open.denied(), fixture.is_locked.affirmed()],
        None,
        Some(fixture.door),
    )])
    .unwrap();
    let goal = fixture.goal();
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let result = planner.solve_backward(&start, &goal, 50, &mut Indefinite);

    assert_eq!(
        result,
        PlanningResult::NoPlan {
            depth_limited: false
        }
    );
    assert!(planner
        .trace()
        .records()
        .iter()
        .any(|record| record.outcome == StepOutcome::Pruned));
}

#[test]
fn forward_and_backward_agree_on_the_lock_key_scenario() {
    let build = || {
        let fixture = LockKey::with_core_actions();
        let start = fixture.start();
        let goal = fixture.goal();
        (fixture.model.into_planner(PlannerOptions::default()), start, goal)
    };

    let (mut forward, start, goal) = build();
    let (mut backward, _, _) = build();

    let forward_plan = forward
        .solve_forward(&start, &goal, 10, &mut Indefinite)
        .plan()
        .cloned()
        .unwrap();
    let backward_plan = backward
        .solve_backward(&start, &goal, 10, &mut Indefinite)
        .plan()
        .cloned()
        .unwrap();

    assert_eq!(
        action_names(forward_plan.actions()),
        action_names(backward_plan.actions())
    );
}
