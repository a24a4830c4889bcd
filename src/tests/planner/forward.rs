#![cfg(test)]

use crate::engine::termination::Indefinite;
use crate::engine::termination::TerminationCondition;
use crate::engine::trace::StepOutcome;
use crate::options::PlannerOptions;
use crate::results::PlanningResult;
use crate::tests::helpers::action_names;
use crate::tests::helpers::LockKey;
use crate::world::WorldStatement;

#[test]
fn finds_the_lock_key_plan() {
    let fixture = LockKey::with_core_actions();
    let (start, goal) = (fixture.start(), fixture.goal());
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let result = planner.solve_forward(&start, &goal, 10, &mut Indefinite);

    let plan = result.plan().expect("the scenario is solvable");
    assert_eq!(
        action_names(plan.actions()),
        vec!["pick_key", "unlock_door", "open_door"]
    );

    // Soundness: folding the consequences from the start world reaches a
    // world that validates the goal.
    let reached = plan
        .actions()
        .iter()
        .fold(start.clone(), |world, action| action.apply_forward(&world));
    assert!(goal.is_validated_by(&reached));

    assert!(start.validates(plan.prerequisites()));
    assert!(goal.is_validated_by(plan.consequences()));
}

#[test]
fn an_already_satisfied_goal_yields_the_empty_plan() {
    let fixture = LockKey::with_core_actions();
    let start = fixture.start();
    let satisfied_goal = WorldStatement::from_parts([(
        crate::clause![fixture.is_locked.affirmed()],
        None,
        Some(fixture.door),
    )])
    .unwrap();
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let result = planner.solve_forward(&start, &satisfied_goal, 10, &mut Indefinite);

    let plan = result.plan().expect("the goal already holds");
    assert!(plan.is_empty());
}

#[test]
fn an_unreachable_goal_is_no_plan() {
    // Without pick_key the key can never be obtained, so the door can never
    // be unlocked.
    let mut fixture = LockKey::new();
    fixture.add_unlock();
    fixture.add_open();

    let (start, goal) = (fixture.start(), fixture.goal());
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let result = planner.solve_forward(&start, &goal, 10, &mut Indefinite);

    assert_eq!(
        result,
        PlanningResult::NoPlan {
            depth_limited: false
        }
    );

    // The trace shows that unlocking was considered and dismissed because
    // the world contradicts its HasKey prerequisite.
    assert!(planner.trace().records().iter().any(|record| {
        record.action.as_deref() == Some("unlock_door")
            && record.outcome == StepOutcome::Inapplicable
    }));
}

#[test]
fn a_too_small_depth_limit_is_reported() {
    let fixture = LockKey::with_core_actions();
    let (start, goal) = (fixture.start(), fixture.goal());
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let result = planner.solve_forward(&start, &goal, 2, &mut Indefinite);

    assert_eq!(result, PlanningResult::NoPlan { depth_limited: true });
}

#[test]
fn visited_state_pruning_terminates_cyclic_action_spaces() {
    // Opening and closing the door forever must not exhaust the depth
    // budget: the revisited worlds are pruned and the search concludes.
    let mut fixture = LockKey::new();
    fixture.add_open();
    fixture.add_close();

    let start = WorldStatement::from_parts([(
        crate::clause![fixture.is_open.denied(), fixture.is_locked.denied()],
        None,
        Some(fixture.door),
    )])
    .unwrap();
    // IsPickable on the key is untouched by either action.
    let goal = WorldStatement::from_parts([(
        crate::clause![fixture.is_pickable.affirmed()],
        None,
        Some(fixture.key),
    )])
    .unwrap();

    let mut planner = fixture.model.into_planner(PlannerOptions::default());
    let result = planner.solve_forward(&start, &goal, 50, &mut Indefinite);

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
fn a_stopped_search_is_unknown() {
    struct StopImmediately;

    impl TerminationCondition for StopImmediately {
        fn should_stop(&mut self) -> bool {
            true
        }
    }

    let fixture = LockKey::with_core_actions();
    let (start, goal) = (fixture.start(), fixture.goal());
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let result = planner.solve_forward(&start, &goal, 10, &mut StopImmediately);

    assert_eq!(result, PlanningResult::Unknown);
}

#[test]
fn two_runs_over_the_same_model_produce_the_same_plan() {
    let build = || {
        let fixture = LockKey::with_core_actions();
        let start = fixture.start();
        let goal = fixture.goal();
        (fixture.model.into_planner(PlannerOptions::default()), start, goal)
    };

    let (mut first, start, goal) = build();
    let (mut second, _, _) = build();

    let first_result = first.solve_forward(&start, &goal, 10, &mut Indefinite);
    let second_result = second.solve_forward(&start, &goal, 10, &mut Indefinite);

    assert_eq!(first_result, second_result);
}

#[test]
fn shuffled_candidates_stay_deterministic_for_a_fixed_seed() {
    let solve = || {
        let fixture = LockKey::with_core_actions();
        let start = fixture.start();
        let goal = fixture.goal();
        let options = PlannerOptions {
            shuffle_candidates: true,
            ..Default::default()
        };
        let mut planner = fixture.model.into_planner(options);
        planner.solve_forward(&start, &goal, 10, &mut Indefinite)
    };

    assert_eq!(solve(), solve());
}

#[test]
fn the_trace_ends_with_the_goal_for_a_successful_search() {
    let fixture = LockKey::with_core_actions();
    let (start, goal) = (fixture.start(), fixture.goal());
    let mut planner = fixture.model.into_planner(PlannerOptions::default());

    let _ = planner.solve_forward(&start, &goal, 10, &mut Indefinite);

    let last = planner.trace().records().last().unwrap();
    assert_eq!(last.outcome, StepOutcome::GoalReached);
}

#[test]
fn fragment_snapshots_are_recorded_when_enabled() {
    let fixture = LockKey::with_core_actions();
    let (start, goal) = (fixture.start(), fixture.goal());
    let options = PlannerOptions {
        record_fragments: true,
        ..Default::default()
    };
    let mut planner = fixture.model.into_planner(options);

    let _ = planner.solve_forward(&start, &goal, 10, &mut Indefinite);

    let snapshot = planner
        .trace()
        .records()
        .iter()
        .find_map(|record| record.fragment.as_deref())
        .expect("extended records carry snapshots");
    assert!(snapshot.contains("IsOpen_target"));
}
