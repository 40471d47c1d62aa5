//! Clamped joint operations shared by manual and automated control.
//!
//! Both control paths mutate joints through these helpers, so range
//! enforcement lives at the point of mutation: out-of-range requests saturate
//! silently, and a clamp at a bound is a fixed point.

use bevy::prelude::*;

use crate::rig::JointLimits;

/// Rotate the boom group about the vertical axis. Unbounded; full
/// revolutions are allowed.
pub fn rotate_boom(boom: &mut Transform, delta: f32) {
    boom.rotate_y(delta);
}

/// Current boom yaw in `[-PI, PI]`.
pub fn boom_yaw(boom: &Transform) -> f32 {
    boom.rotation.to_euler(EulerRot::YXZ).0
}

/// Translate the trolley car along the boom, saturating at the travel
/// bounds. Returns the delta actually applied.
pub fn move_trolley(car: &mut Transform, delta: f32, limits: &JointLimits) -> f32 {
    let target = (car.translation.x + delta).clamp(limits.car_min_x, limits.car_max_x);
    let applied = target - car.translation.x;
    car.translation.x = target;
    applied
}

/// Raise (positive delta) or lower the claw base, saturating at the cable
/// travel bounds, then recompute the cable so it spans exactly from the car
/// to the claw base: length `|y|`, midpoint `y / 2`. The cable is always
/// rewritten from the claw height, never incremented, so repeated moves
/// cannot drift. Returns the delta actually applied.
pub fn move_claw_vertical(
    claw: &mut Transform,
    cable: &mut Transform,
    delta: f32,
    limits: &JointLimits,
) -> f32 {
    let target = (claw.translation.y + delta).clamp(limits.claw_min_y, limits.claw_max_y);
    let applied = target - claw.translation.y;
    claw.translation.y = target;
    cable.scale.y = target.abs();
    cable.translation.y = target / 2.0;
    applied
}

/// Step a finger hinge angle toward closed (positive delta) or open
/// (negative delta), saturating at the asymmetric bounds.
pub fn step_finger(angle: f32, delta: f32, limits: &JointLimits) -> f32 {
    (angle + delta).clamp(limits.finger_open, limits.finger_closed)
}

/// Wrap an angle difference into `[-PI, PI]`.
pub fn wrap_angle(a: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (a + PI).rem_euclid(TAU) - PI
}
