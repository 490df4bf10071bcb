//! Integrator accuracy on the model's own sub-dynamics.
//!
//! - Activation against its closed-form step response
//! - Energy conservation of the passive shank swinging under gravity
//! - Event localization on the passive swing

use approx::assert_relative_eq;
use kick_integrate::{EventSpec, IntegratorConfig, Termination, integrate};
use kick_model::limb::{activation_rate, gravitational_moment};
use kick_muscle::{ActivationDynamics, MAX_EXCITATION};
use kick_types::LimbParams;
use nalgebra::{Vector1, Vector2};
use std::f64::consts::FRAC_PI_2;

fn swing(limb: LimbParams) -> impl Fn(f64, &Vector2<f64>) -> Vector2<f64> {
    move |_t: f64, y: &Vector2<f64>| {
        Vector2::new(y[1], gravitational_moment(&limb, y[0]) / limb.inertia)
    }
}

fn energy(limb: &LimbParams, y: &Vector2<f64>) -> f64 {
    0.5 * limb.inertia * y[1] * y[1]
        - limb.mass * limb.gravity * limb.com_distance * (y[0] - FRAC_PI_2).cos()
}

/// Test: Integrated activation matches the closed-form response.
#[test]
fn test_activation_matches_closed_form() {
    let dynamics = ActivationDynamics::default();
    let rhs = |_t: f64, y: &Vector1<f64>| Vector1::new(activation_rate(&dynamics, y[0]));

    let config = IntegratorConfig::with_tolerances(1e-10, 1e-12);
    let solution = integrate(&rhs, Vector1::new(0.0), (0.0, 0.1), &[], &config).unwrap();

    for (t, y) in solution.trajectory.iter() {
        let exact = dynamics.step_response(MAX_EXCITATION, 0.0, t);
        assert_relative_eq!(y[0], exact, epsilon = 1e-8);
    }
}

/// Test: The passive shank conserves mechanical energy.
#[test]
fn test_passive_swing_conserves_energy() {
    let limb = LimbParams::default();
    let y0 = Vector2::new(2.5, 0.0);
    let config = IntegratorConfig::with_tolerances(1e-10, 1e-12);

    let solution = integrate(&swing(limb), y0, (0.0, 3.0), &[], &config).unwrap();

    let e0 = energy(&limb, &y0);
    for (_, y) in solution.trajectory.iter() {
        assert_relative_eq!(energy(&limb, y), e0, max_relative = 1e-7);
    }
}

/// Test: A released shank passes the vertical, located by the event, with
/// the speed energy conservation predicts.
#[test]
fn test_passive_swing_event() {
    let limb = LimbParams::default();
    let y0 = Vector2::new(2.5, 0.0);
    let vertical = EventSpec::terminal("vertical", |y: &Vector2<f64>| y[0] - FRAC_PI_2);
    let config = IntegratorConfig::with_tolerances(1e-10, 1e-12);

    let solution = integrate(&swing(limb), y0, (0.0, 3.0), &[vertical], &config).unwrap();

    assert!(matches!(solution.termination, Termination::Event { .. }));
    let (_, y) = solution.final_state().unwrap();
    assert_relative_eq!(y[0], FRAC_PI_2, epsilon = 1e-9);

    let drop = limb.mass * limb.gravity * limb.com_distance * (1.0 - (2.5 - FRAC_PI_2).cos());
    let speed = (2.0 * drop / limb.inertia).sqrt();
    assert_relative_eq!(y[1], -speed, max_relative = 1e-7);
}
