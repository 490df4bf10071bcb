//! End-to-end kick scenarios.
//!
//! Runs the four standard scenarios from the hanging rest state and checks
//! the physical outcome at ground contact.

use approx::assert_relative_eq;
use kick_model::{
    DEFAULT_HORIZON, IntegratorConfig, ParameterSet, Scenario, ScenarioBatch, ScenarioRun,
    Termination, run_scenario,
};
use std::f64::consts::{FRAC_PI_2, PI};

fn run(scenario: &Scenario) -> ScenarioRun {
    run_scenario(
        &ParameterSet::default(),
        scenario,
        &IntegratorConfig::default(),
        DEFAULT_HORIZON,
    )
    .unwrap()
}

/// Test: Every standard scenario ends on ground contact, not the horizon.
#[test]
fn test_standard_scenarios_reach_contact() {
    for result in ScenarioBatch::default().run_all() {
        let run = result.unwrap();
        assert!(
            matches!(run.solution.termination(), Termination::Event { index: 0, .. }),
            "{} stopped at the horizon",
            run.scenario.name
        );
        let t = run.contact_time().unwrap();
        assert!(t > 0.0 && t < DEFAULT_HORIZON);
        assert_eq!(run.solution.times().last().copied(), Some(t));
    }
}

/// Test: The 1x slack run is event-terminated with the knee still extending.
#[test]
fn test_unit_slack_kick() {
    let run = run(&Scenario::compliant(1.0));

    assert!(run.reached_contact());
    let angle = *run.solution.angles().last().unwrap();
    assert_relative_eq!(angle, PI, epsilon = 1e-6);
    assert!(run.final_angular_velocity() > 0.0);
}

/// Test: Trajectories start at rest and stay in the physical range.
#[test]
fn test_trajectory_starts_at_rest() {
    for scenario in Scenario::standard_set() {
        let run = run(&scenario);
        let angles = run.solution.angles();
        let velocities = run.solution.angular_velocities();

        assert_eq!(run.solution.times()[0], 0.0);
        assert_eq!(angles[0], FRAC_PI_2);
        assert_eq!(velocities[0], 0.0);
        assert_eq!(run.solution.activations()[0], 0.0);

        // The knee only extends: the muscle wins against gravity from the start.
        for a in &angles {
            assert!(*a >= FRAC_PI_2 - 1e-9 && *a <= PI + 1e-9);
        }
        assert!(run.solution.times().windows(2).all(|w| w[0] < w[1]));
    }
}

/// Test: Longer tendons store more energy and deliver a faster kick.
#[test]
fn test_longest_tendon_kicks_fastest() {
    let runs: Vec<ScenarioRun> = ScenarioBatch::default()
        .run_all()
        .into_iter()
        .map(Result::unwrap)
        .collect();

    let velocity = |name: &str| {
        runs.iter()
            .find(|r| r.scenario.name == name)
            .unwrap()
            .final_angular_velocity()
    };

    let rigid = velocity("no tendon");
    let one = velocity("tendon 1x l_opt");
    let three = velocity("tendon 3x l_opt");
    let ten = velocity("tendon 10x l_opt");

    assert!(ten > three, "10x {ten} vs 3x {three}");
    assert!(three > one, "3x {three} vs 1x {one}");
    assert!(ten > rigid, "10x {ten} vs rigid {rigid}");
}

/// Test: Longer tendons also take longer to reach contact.
#[test]
fn test_longer_tendon_delays_contact() {
    let one = run(&Scenario::compliant(1.0)).contact_time().unwrap();
    let ten = run(&Scenario::compliant(10.0)).contact_time().unwrap();
    assert!(ten > one);
}

/// Test: Rigid-model activation rises monotonically toward one.
#[test]
fn test_rigid_activation_rises_to_one() {
    let run = run(&Scenario::rigid());
    let activation = run.solution.activations();

    // Monotone up to the integration tolerance.
    for w in activation.windows(2) {
        assert!(w[1] >= w[0] - 1e-6, "activation dropped: {} -> {}", w[0], w[1]);
    }
    let last = *activation.last().unwrap();
    assert_relative_eq!(last, 1.0, epsilon = 1e-4);
}

/// Test: Compliant-model activation follows the same first-order rise.
#[test]
fn test_compliant_activation_matches_rigid() {
    let rigid = run(&Scenario::rigid());
    let compliant = run(&Scenario::compliant(3.0));

    // Both end long after the activation time constant has elapsed.
    let a_rigid = *rigid.solution.activations().last().unwrap();
    let a_compliant = *compliant.solution.activations().last().unwrap();
    assert_relative_eq!(a_rigid, a_compliant, epsilon = 1e-4);
}

/// Test: Without ground contact within the horizon, the run is flagged as
/// horizon-terminated and still returns its trajectory.
#[test]
fn test_horizon_termination_is_distinct() {
    let run = run_scenario(
        &ParameterSet::default(),
        &Scenario::rigid(),
        &IntegratorConfig::default(),
        0.1,
    )
    .unwrap();

    assert_eq!(run.solution.termination(), Termination::Horizon);
    assert!(!run.reached_contact());
    assert_eq!(run.solution.times().last().copied(), Some(0.1));
    assert!(*run.solution.angles().last().unwrap() < PI);
}

/// Test: A heavier shank kicks more slowly.
#[test]
fn test_heavier_limb_is_slower() {
    let base = ParameterSet::default();
    let mut heavy = base;
    heavy.limb.inertia *= 2.0;
    heavy.limb.mass *= 2.0;

    let config = IntegratorConfig::default();
    let scenario = Scenario::compliant(3.0);
    let light = run_scenario(&base, &scenario, &config, DEFAULT_HORIZON).unwrap();
    let heavy = run_scenario(&heavy, &scenario, &config, DEFAULT_HORIZON).unwrap();

    assert!(heavy.final_angular_velocity() < light.final_angular_velocity());
}

/// Test: Tight tolerances agree with the defaults on the contact velocity.
#[test]
fn test_tolerance_convergence() {
    for scenario in Scenario::standard_set() {
        let coarse = run(&scenario);
        let fine = run_scenario(
            &ParameterSet::default(),
            &scenario,
            &IntegratorConfig::high_accuracy(),
            DEFAULT_HORIZON,
        )
        .unwrap();

        assert_relative_eq!(
            coarse.final_angular_velocity(),
            fine.final_angular_velocity(),
            max_relative = 1e-3
        );
        assert_relative_eq!(
            coarse.contact_time().unwrap(),
            fine.contact_time().unwrap(),
            max_relative = 1e-3
        );
        assert!(fine.solution.stats().accepted > coarse.solution.stats().accepted);
    }
}
