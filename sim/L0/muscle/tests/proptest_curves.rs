//! Property-based tests for the constitutive curves.
//!
//! Run with: cargo test -p kick-muscle -- proptest

use kick_muscle::{
    ActiveForceLengthCurve, Curve, ForceVelocityCurve, TendonStressStrain, active_force_length,
    force_velocity, inverse_force_velocity,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn proptest_active_fl_non_negative_and_bounded(l in -5.0..5.0f64) {
        let f = active_force_length(l);
        prop_assert!(f >= 0.0);
        prop_assert!(f <= 1.0);
    }

    #[test]
    fn proptest_fv_non_negative_when_shortening(v in 0.0..10.0f64) {
        prop_assert!(force_velocity(v) >= 0.0);
        prop_assert!(force_velocity(v) <= 1.0);
    }

    #[test]
    fn proptest_inverse_fv_bounded(f in -10.0..10.0f64) {
        let v = inverse_force_velocity(f);
        prop_assert!(v.is_finite());
        prop_assert!((-0.2..=1.0).contains(&v));
    }

    #[test]
    fn proptest_tendon_toe_roundtrip(strain in 1e-6..0.0299f64) {
        let curve = TendonStressStrain::default();
        let back = curve.strain(curve.stress(strain));
        prop_assert!((back - strain).abs() < 1e-10);
    }

    #[test]
    fn proptest_tendon_linear_roundtrip(strain in 0.0301..0.5f64) {
        let curve = TendonStressStrain::default();
        let back = curve.strain(curve.stress(strain));
        prop_assert!((back - strain).abs() < 1e-10);
    }

    #[test]
    fn proptest_tendon_monotonic(a in -0.05..0.3f64, b in -0.05..0.3f64) {
        let curve = TendonStressStrain::default();
        if a < b {
            prop_assert!(curve.stress(a) <= curve.stress(b));
        }
    }

    #[test]
    fn proptest_evaluate_many_elementwise(xs in prop::collection::vec(0.0..2.0f64, 0..64)) {
        let fl = ActiveForceLengthCurve::default();
        let fv = ForceVelocityCurve::default();
        let out_fl = fl.evaluate_many(&xs);
        let out_fv = fv.evaluate_many(&xs);
        prop_assert_eq!(out_fl.len(), xs.len());
        prop_assert_eq!(out_fv.len(), xs.len());
        for (i, x) in xs.iter().enumerate() {
            prop_assert_eq!(out_fl[i], fl.evaluate(*x));
            prop_assert_eq!(out_fv[i], fv.evaluate(*x));
        }
    }
}
