//! Crane geometry and derived motion constants.
//!
//! Every joint bound and sub-goal tolerance is computed from the scene
//! dimensions below, so resizing a part keeps the whole rig consistent.

use bevy::math::Vec3;

// ---------------------------------------------------------------------------
// Static structure
// ---------------------------------------------------------------------------

pub const BASE_SIZE: f32 = 10.0;
pub const BASE_HEIGHT: f32 = 2.0;
pub const TOWER_RADIUS: f32 = 1.0;
pub const TOWER_HEIGHT: f32 = 20.0;

/// Height of the boom group's yaw pivot: the boom centerline at the tower top.
pub const BOOM_PIVOT_Y: f32 = BASE_HEIGHT + TOWER_HEIGHT - BOOM_HEIGHT;
pub const BOOM_LENGTH: f32 = 20.0;
pub const BOOM_HEIGHT: f32 = 2.0;
pub const BOOM_DEPTH: f32 = 2.0;
pub const COUNTERWEIGHT_LENGTH: f32 = 6.0;
pub const COUNTERWEIGHT_OFFSET_X: f32 = -8.0;

// ---------------------------------------------------------------------------
// Jointed parts
// ---------------------------------------------------------------------------

pub const CAR_LENGTH: f32 = 2.0;
pub const CAR_HEIGHT: f32 = 1.0;
pub const CAR_DEPTH: f32 = 2.0;
/// The trolley car hangs flush under the boom.
pub const CAR_LOCAL_Y: f32 = -(BOOM_HEIGHT + CAR_HEIGHT) / 2.0;
pub const CAR_START_X: f32 = 10.0;

pub const CABLE_RADIUS: f32 = 0.25;

pub const CLAW_BASE_SIZE: f32 = 1.5;
pub const CLAW_BASE_HEIGHT: f32 = 0.5;
pub const FINGER_LENGTH: f32 = 2.0;
pub const FINGER_RADIUS: f32 = 0.5;
/// Radial offset of each finger hinge from the claw-base center.
pub const FINGER_OFFSET: f32 = 0.75;

// ---------------------------------------------------------------------------
// Joint travel
// ---------------------------------------------------------------------------

/// Trolley travel along the boom: clear of the tower on the inner side,
/// stopping half a car short of the boom tip on the outer side.
pub const CAR_MIN_X: f32 = TOWER_RADIUS + CAR_LENGTH / 2.0 + 0.5;
pub const CAR_MAX_X: f32 = BOOM_LENGTH - CAR_LENGTH / 2.0;

/// Lowest world height the claw base may reach, just above the ground plane.
pub const CLAW_FLOOR_Y: f32 = 2.0;
/// Claw-base height relative to the trolley car. Negative is downward; the
/// cable length is the magnitude of this value.
pub const CLAW_MAX_Y: f32 = -2.0;
pub const CLAW_MIN_Y: f32 = CLAW_FLOOR_Y - (BOOM_PIVOT_Y + CAR_LOCAL_Y);
pub const CLAW_START_Y: f32 = -6.0;

/// Finger hinge bounds. Open splays the tips outward past vertical, closed
/// folds them toward the claw center; the travel is asymmetric on purpose.
pub const FINGER_OPEN_ANGLE: f32 = -0.6;
pub const FINGER_CLOSED_ANGLE: f32 = 0.35;

// ---------------------------------------------------------------------------
// Per-tick joint steps and sub-goal tolerances
// ---------------------------------------------------------------------------

pub const BOOM_STEP: f32 = 0.02;
pub const CAR_STEP: f32 = 0.05;
pub const CABLE_STEP: f32 = 0.05;
pub const FINGER_STEP: f32 = 0.02;

/// Half a joint step, so a transport stage can never oscillate across its
/// sub-goal.
pub const BOOM_TOLERANCE: f32 = BOOM_STEP / 2.0;
pub const CAR_TOLERANCE: f32 = CAR_STEP / 2.0;
pub const CABLE_TOLERANCE: f32 = CABLE_STEP / 2.0;

// ---------------------------------------------------------------------------
// Collision and transport
// ---------------------------------------------------------------------------

/// Bounding-sphere radius of the claw assembly.
pub const CLAW_SPHERE_RADIUS: f32 = 2.5;
/// World height at which a transported load is released over the drop point.
pub const RELEASE_HEIGHT: f32 = 1.5;
/// Default drop point (the container), within trolley reach of the tower.
pub const CONTAINER_POS: Vec3 = Vec3::new(14.0, 0.0, -12.0);

/// Loads scattered around the crane at assembly.
pub const LOAD_COUNT: usize = 4;
pub const LOAD_MIN_SIZE: f32 = 1.6;
pub const LOAD_MAX_SIZE: f32 = 2.4;
/// Keep-out radius around the container when scattering loads.
pub const CONTAINER_CLEARANCE: f32 = 4.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_bounds_are_ordered() {
        assert!(CAR_MIN_X < CAR_MAX_X);
        assert!(CLAW_MIN_Y < CLAW_MAX_Y);
        assert!(FINGER_OPEN_ANGLE < FINGER_CLOSED_ANGLE);
    }

    #[test]
    fn claw_floor_derivation() {
        // Claw base at its lowest must sit exactly at the configured floor.
        let car_world_y = BOOM_PIVOT_Y + CAR_LOCAL_Y;
        assert!((car_world_y + CLAW_MIN_Y - CLAW_FLOOR_Y).abs() < f32::EPSILON);
    }

    #[test]
    fn container_is_within_trolley_reach() {
        let radius = (CONTAINER_POS.x * CONTAINER_POS.x + CONTAINER_POS.z * CONTAINER_POS.z).sqrt();
        assert!(radius <= CAR_MAX_X);
        assert!(radius >= CAR_MIN_X);
    }

    #[test]
    fn steps_and_tolerances_are_positive() {
        assert!(BOOM_STEP > 0.0 && CAR_STEP > 0.0 && CABLE_STEP > 0.0 && FINGER_STEP > 0.0);
        assert!(BOOM_TOLERANCE > 0.0 && CAR_TOLERANCE > 0.0 && CABLE_TOLERANCE > 0.0);
    }
}
