//! Property-based tests over tendon slack length.
//!
//! Run with: cargo test -p kick-tests -- proptest

use kick_model::{
    DEFAULT_HORIZON, ForceSeries, IntegratorConfig, ParameterSet, Scenario, run_scenario,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn proptest_any_slack_reaches_contact(multiple in 1.0..10.0f64) {
        let run = run_scenario(
            &ParameterSet::default(),
            &Scenario::compliant(multiple),
            &IntegratorConfig::default(),
            DEFAULT_HORIZON,
        );
        prop_assert!(run.is_ok());
        let run = run.unwrap();

        prop_assert!(run.reached_contact());
        prop_assert!(run.final_angular_velocity() > 0.0);
        prop_assert!(
            (run.params.tendon.slack_length
                - multiple * run.params.muscle.optimal_fiber_length)
                .abs()
                < 1e-12
        );

        let forces = ForceSeries::recover(&run);
        prop_assert!(forces.is_ok());
        let forces = forces.unwrap();
        prop_assert!(forces.muscle_force.iter().all(|f| f.is_finite()));
        prop_assert!(run.solution.fiber_lengths().unwrap_or_default().iter().all(|&lm| lm > 0.0));
    }
}
