//! Integration tests for the kick-* crates.
//!
//! These tests verify end-to-end behavior across crate boundaries:
//! - Scenario runs from rest to ground contact
//! - Integrator accuracy on the model's own sub-dynamics
//! - Force recovery from finished runs
//! - Determinism and parallel/sequential agreement
//! - Randomized slack lengths

pub mod determinism;
pub mod force_recovery;
pub mod integrator_accuracy;
pub mod kick_scenarios;
pub mod proptest_slack;
