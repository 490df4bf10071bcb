//! Ground-contact event.

use kick_integrate::{EventDirection, EventSpec};
use std::f64::consts::PI;

/// Knee angle (rad) at which the foot strikes the ball: full extension.
pub const CONTACT_ANGLE: f64 = PI;

/// Terminal event firing when the knee angle crosses [`CONTACT_ANGLE`] in
/// either direction. The angle is the first component of both state layouts.
#[must_use]
pub fn ground_contact_event<const N: usize>() -> EventSpec<N> {
    EventSpec::terminal("ground contact", |y| y[0] - CONTACT_ANGLE)
        .direction(EventDirection::Either)
}
