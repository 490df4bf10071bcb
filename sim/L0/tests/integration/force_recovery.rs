//! Force recovery from finished runs.
//!
//! The recovered tendon force must be computed with the slack length of the
//! run that produced the trajectory. Using any other slack length gives a
//! visibly different force history.

use approx::assert_relative_eq;
use kick_model::{
    CompliantTendonModel, CompliantTendonState, DEFAULT_HORIZON, ForceSeries, IntegratorConfig,
    ParameterSet, RunSolution, Scenario, ScenarioBatch, run_scenario,
};
use kick_muscle::TendonStressStrain;

/// Test: Recovered series align with the run's samples for every scenario.
#[test]
fn test_series_aligned_with_runs() {
    for result in ScenarioBatch::default().run_all() {
        let run = result.unwrap();
        let forces = ForceSeries::recover(&run).unwrap();

        assert_eq!(forces.times, run.solution.times());
        assert_eq!(forces.muscle_force.len(), forces.len());
        assert_eq!(forces.isometric_force.len(), forces.len());
        assert!(forces.muscle_force.iter().all(|f| f.is_finite()));
        assert!(forces.peak_force() > 0.0, "{}", run.scenario.name);
    }
}

/// Test: Tendon forces at the sampled states match the model that ran.
#[test]
fn test_recovered_force_uses_run_snapshot() {
    for multiple in [1.0, 3.0, 10.0] {
        let run = run_scenario(
            &ParameterSet::default(),
            &Scenario::compliant(multiple),
            &IntegratorConfig::default(),
            DEFAULT_HORIZON,
        )
        .unwrap();
        let model = CompliantTendonModel::new(run.params).unwrap();
        let forces = ForceSeries::recover(&run).unwrap();

        for (state, force) in run
            .solution
            .compliant_states()
            .unwrap()
            .iter()
            .zip(&forces.muscle_force)
        {
            assert_relative_eq!(*force, model.tendon_force(state), max_relative = 1e-12);
        }
    }
}

/// Test: Normalizing by the wrong slack length changes the recovered force.
#[test]
fn test_wrong_slack_length_would_differ() {
    let run = run_scenario(
        &ParameterSet::default(),
        &Scenario::compliant(10.0),
        &IntegratorConfig::default(),
        DEFAULT_HORIZON,
    )
    .unwrap();
    let forces = ForceSeries::recover(&run).unwrap();

    let RunSolution::Compliant(solution) = &run.solution else {
        panic!("expected a compliant run");
    };
    let (_, last) = solution.final_state().unwrap();
    let state = CompliantTendonState::from_vector(last);
    let model = CompliantTendonModel::new(run.params).unwrap();
    let tendon = TendonStressStrain::from_params(&run.params.tendon);

    // Same elongation, divided by the optimal fiber length instead.
    let lopt = run.params.muscle.optimal_fiber_length;
    let elongation = model.tendon_elongation(&state);
    let wrong = tendon.stress(elongation / lopt) * run.params.tendon.cross_section_area;

    let recovered = *forces.muscle_force.last().unwrap();
    assert!(recovered > 0.0);
    assert!((wrong - recovered).abs() > 0.1 * recovered);
}

/// Test: The fiber shortens over the kick and its isometric force stays
/// within the maximum.
#[test]
fn test_fiber_shortens_during_kick() {
    let run = run_scenario(
        &ParameterSet::default(),
        &Scenario::compliant(3.0),
        &IntegratorConfig::default(),
        DEFAULT_HORIZON,
    )
    .unwrap();
    let fibers = run.solution.fiber_lengths().unwrap();
    let lopt = run.params.muscle.optimal_fiber_length;

    assert_eq!(fibers[0], lopt);
    assert!(*fibers.last().unwrap() < lopt);

    let forces = ForceSeries::recover(&run).unwrap();
    let capacity = run.params.muscle.max_isometric_force;
    assert!(forces.isometric_force.iter().all(|&f| f <= capacity + 1e-9));
}
