//! Determinism tests.
//!
//! Runs share no state, so repeating a run, running scenarios in a different
//! order, or running them as a batch must reproduce every sample bit for bit.

use kick_model::{
    DEFAULT_HORIZON, IntegratorConfig, ParameterSet, Scenario, ScenarioBatch, run_scenario,
};

/// Test: Repeating a run reproduces it exactly.
#[test]
fn test_repeat_run_is_bit_identical() {
    let params = ParameterSet::default();
    let config = IntegratorConfig::default();

    for scenario in Scenario::standard_set() {
        let first = run_scenario(&params, &scenario, &config, DEFAULT_HORIZON).unwrap();
        let second = run_scenario(&params, &scenario, &config, DEFAULT_HORIZON).unwrap();

        assert_eq!(first, second, "{} is not reproducible", scenario.name);
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(
            bits(first.solution.times()),
            bits(second.solution.times())
        );
    }
}

/// Test: Batch results equal individual runs, whatever the batch order.
#[test]
fn test_batch_matches_individual_runs() {
    let params = ParameterSet::default();
    let config = IntegratorConfig::default();

    let mut reversed = Scenario::standard_set();
    reversed.reverse();
    let batch = ScenarioBatch::new(params).with_scenarios(reversed.clone());

    for (result, scenario) in batch.run_all().into_iter().zip(&reversed) {
        let batched = result.unwrap();
        let single = run_scenario(&params, scenario, &config, DEFAULT_HORIZON).unwrap();
        assert_eq!(batched, single);
    }
}

/// Test: One run does not leak its slack length into the next.
#[test]
fn test_runs_do_not_share_slack_length() {
    let params = ParameterSet::default();
    let config = IntegratorConfig::default();

    let before = run_scenario(&params, &Scenario::compliant(1.0), &config, DEFAULT_HORIZON)
        .unwrap();
    let _long = run_scenario(&params, &Scenario::compliant(10.0), &config, DEFAULT_HORIZON)
        .unwrap();
    let after = run_scenario(&params, &Scenario::compliant(1.0), &config, DEFAULT_HORIZON)
        .unwrap();

    assert_eq!(before, after);
    assert_eq!(before.params.tendon.slack_length, after.params.tendon.slack_length);
}
