//! Crane assembly: the jointed entity hierarchy and the initial loads.
//!
//! Only transforms are spawned here; the rendering crate attaches meshes to
//! the same entities afterwards. The hierarchy is
//! `boom group (yaw) → trolley car (x) → { cable, claw base (y) → fingers }`,
//! with the base and tower as static root entities.

use bevy::prelude::*;
use rand::Rng;

use crate::collision::CollisionSphere;
use crate::config;

// ---------------------------------------------------------------------------
// Components & resources
// ---------------------------------------------------------------------------

/// Rotates about the vertical axis at the tower top.
#[derive(Component)]
pub struct BoomGroup;

/// Translates along the boom's long axis.
#[derive(Component)]
pub struct TrolleyCar;

/// Translates vertically under the car; the cable is recomputed from its
/// height so the two always meet with no gap.
#[derive(Component)]
pub struct ClawBase;

/// Unit-height cylinder scaled each tick to span car → claw base.
#[derive(Component)]
pub struct Cable;

/// One of the four claw fingers. `hinge` is the local rotation axis, chosen
/// so a positive `angle` folds the tip toward the claw center. The fingers
/// form two opposing axis pairs, so all four tips converge when closing.
#[derive(Component)]
pub struct ClawFinger {
    pub hinge: Vec3,
    pub angle: f32,
}

/// A transportable load; its bounding-sphere radius lives in the
/// `CollisionSphere` component alongside.
#[derive(Component)]
pub struct Load;

/// Edge length of a load's cube, kept for the rendering crate.
#[derive(Component)]
pub struct LoadSize(pub f32);

/// Joint and structure entity ids, filled in by `assemble_crane`.
#[derive(Resource, Clone, Copy)]
pub struct CraneRig {
    pub base: Entity,
    pub tower: Entity,
    pub boom_group: Entity,
    pub boom_arm: Entity,
    pub counterweight: Entity,
    pub car: Entity,
    pub cable: Entity,
    pub claw_base: Entity,
    pub fingers: [Entity; 4],
}

/// Per-axis motion bounds, derived once from the crane geometry at assembly.
#[derive(Resource, Debug, Clone, Copy)]
pub struct JointLimits {
    pub car_min_x: f32,
    pub car_max_x: f32,
    pub claw_min_y: f32,
    pub claw_max_y: f32,
    pub finger_open: f32,
    pub finger_closed: f32,
}

impl Default for JointLimits {
    fn default() -> Self {
        Self {
            car_min_x: config::CAR_MIN_X,
            car_max_x: config::CAR_MAX_X,
            claw_min_y: config::CLAW_MIN_Y,
            claw_max_y: config::CLAW_MAX_Y,
            finger_open: config::FINGER_OPEN_ANGLE,
            finger_closed: config::FINGER_CLOSED_ANGLE,
        }
    }
}

/// Marker resource that, when present, causes `assemble_crane` to skip the
/// random load scatter. Used by the test harness to place loads explicitly.
#[derive(Resource)]
pub struct SkipLoadScatter;

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

pub fn assemble_crane(mut commands: Commands, skip: Option<Res<SkipLoadScatter>>) {
    let base = commands
        .spawn((
            Transform::from_xyz(0.0, config::BASE_HEIGHT / 2.0, 0.0),
            Visibility::default(),
        ))
        .id();

    let tower = commands
        .spawn((
            Transform::from_xyz(0.0, config::BASE_HEIGHT + config::TOWER_HEIGHT / 2.0, 0.0),
            Visibility::default(),
        ))
        .id();

    let boom_group = commands
        .spawn((
            Transform::from_xyz(0.0, config::BOOM_PIVOT_Y, 0.0),
            Visibility::default(),
            BoomGroup,
        ))
        .id();

    let boom_arm = commands
        .spawn((
            Transform::from_xyz(config::BOOM_LENGTH / 2.0, 0.0, 0.0),
            Visibility::default(),
        ))
        .id();
    commands.entity(boom_arm).set_parent(boom_group);

    let counterweight = commands
        .spawn((
            Transform::from_xyz(config::COUNTERWEIGHT_OFFSET_X, 0.0, 0.0),
            Visibility::default(),
        ))
        .id();
    commands.entity(counterweight).set_parent(boom_group);

    let car = commands
        .spawn((
            Transform::from_xyz(config::CAR_START_X, config::CAR_LOCAL_Y, 0.0),
            Visibility::default(),
            TrolleyCar,
        ))
        .id();
    commands.entity(car).set_parent(boom_group);

    // Cable scale/midpoint start consistent with the claw height; the same
    // relation is maintained every tick by `kinematics::move_claw_vertical`.
    let cable = commands
        .spawn((
            Transform::from_xyz(0.0, config::CLAW_START_Y / 2.0, 0.0)
                .with_scale(Vec3::new(1.0, config::CLAW_START_Y.abs(), 1.0)),
            Visibility::default(),
            Cable,
        ))
        .id();
    commands.entity(cable).set_parent(car);

    let claw_base = commands
        .spawn((
            Transform::from_xyz(0.0, config::CLAW_START_Y, 0.0),
            Visibility::default(),
            ClawBase,
            CollisionSphere {
                radius: config::CLAW_SPHERE_RADIUS,
            },
        ))
        .id();
    commands.entity(claw_base).set_parent(car);

    // Two opposing hinge pairs: the ±X fingers swing about ∓Z, the ±Z
    // fingers about ±X.
    let finger_slots = [
        (Vec3::new(config::FINGER_OFFSET, 0.0, 0.0), Vec3::NEG_Z),
        (Vec3::new(-config::FINGER_OFFSET, 0.0, 0.0), Vec3::Z),
        (Vec3::new(0.0, 0.0, config::FINGER_OFFSET), Vec3::X),
        (Vec3::new(0.0, 0.0, -config::FINGER_OFFSET), Vec3::NEG_X),
    ];
    let fingers = finger_slots.map(|(offset, hinge)| {
        let finger = commands
            .spawn((
                Transform::from_translation(offset).with_rotation(finger_pose(hinge, 0.0)),
                Visibility::default(),
                ClawFinger { hinge, angle: 0.0 },
            ))
            .id();
        commands.entity(finger).set_parent(claw_base);
        finger
    });

    commands.insert_resource(CraneRig {
        base,
        tower,
        boom_group,
        boom_arm,
        counterweight,
        car,
        cable,
        claw_base,
        fingers,
    });

    if skip.is_none() {
        scatter_loads(&mut commands);
    }
}

/// Scatter loads on the reachable ring around the tower, clear of the
/// container.
fn scatter_loads(commands: &mut Commands) {
    let mut rng = rand::thread_rng();
    let mut placed = 0;
    while placed < config::LOAD_COUNT {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let radius = rng.gen_range(config::CAR_MIN_X + 1.0..config::CAR_MAX_X - 1.0);
        let pos = Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin());
        if pos.distance(config::CONTAINER_POS) < config::CONTAINER_CLEARANCE {
            continue;
        }
        let size = rng.gen_range(config::LOAD_MIN_SIZE..config::LOAD_MAX_SIZE);
        commands.spawn(load_bundle(Vec3::new(pos.x, size / 2.0, pos.z), size));
        placed += 1;
    }
    info!("scattered {} loads around the crane", placed);
}

/// Components of a cube load resting at `pos`; the bounding-sphere radius is
/// derived from the cube's half-extents.
pub fn load_bundle(pos: Vec3, size: f32) -> impl Bundle {
    let radius = Vec3::splat(size / 2.0).length();
    (
        Transform::from_translation(pos),
        Visibility::default(),
        Load,
        LoadSize(size),
        CollisionSphere { radius },
    )
}

// ---------------------------------------------------------------------------
// Joint helpers
// ---------------------------------------------------------------------------

/// Finger orientation for a hinge angle: rest pose points the cone tip down,
/// then the hinge rotation folds it toward (positive) or away from (negative)
/// the claw center.
pub fn finger_pose(hinge: Vec3, angle: f32) -> Quat {
    Quat::from_axis_angle(hinge, angle) * Quat::from_rotation_x(std::f32::consts::PI)
}

/// Write each finger's hinge angle into its transform. Runs after both
/// control passes so the visual pose matches this tick's angles.
pub fn sync_finger_transforms(mut fingers: Query<(&ClawFinger, &mut Transform)>) {
    for (finger, mut tf) in &mut fingers {
        tf.rotation = finger_pose(finger.hinge, finger.angle);
    }
}

/// World transform of the claw base, composed from the current joint
/// transforms. Used instead of `GlobalTransform` so collision and transport
/// observe joint positions written earlier in the same tick, not the previous
/// frame's propagation.
pub fn claw_world(boom: &Transform, car: &Transform, claw: &Transform) -> Transform {
    boom.mul_transform(*car).mul_transform(*claw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_pose_rest_points_down() {
        let tip = finger_pose(Vec3::NEG_Z, 0.0) * Vec3::Y;
        assert!(tip.y < -0.99);
    }

    #[test]
    fn positive_angle_folds_tips_inward() {
        // Finger mounted at +X, hinge -Z: closing must move the tip toward -X.
        let tip = finger_pose(Vec3::NEG_Z, 0.3) * Vec3::Y;
        assert!(tip.x < -0.01);

        // Finger mounted at +Z, hinge +X: closing must move the tip toward -Z.
        let tip = finger_pose(Vec3::X, 0.3) * Vec3::Y;
        assert!(tip.z < -0.01);
    }

    #[test]
    fn opposing_fingers_mirror_each_other() {
        let a = finger_pose(Vec3::NEG_Z, 0.3) * Vec3::Y;
        let b = finger_pose(Vec3::Z, 0.3) * Vec3::Y;
        assert!((a.x + b.x).abs() < 1e-6);
        assert!((a.y - b.y).abs() < 1e-6);
    }

    #[test]
    fn claw_world_composes_the_joint_chain() {
        let boom = Transform::from_xyz(0.0, config::BOOM_PIVOT_Y, 0.0);
        let car = Transform::from_xyz(10.0, config::CAR_LOCAL_Y, 0.0);
        let claw = Transform::from_xyz(0.0, -6.0, 0.0);
        let world = claw_world(&boom, &car, &claw).translation;
        assert_eq!(world.x, 10.0);
        assert_eq!(world.y, config::BOOM_PIVOT_Y + config::CAR_LOCAL_Y - 6.0);
        assert_eq!(world.z, 0.0);
    }

    #[test]
    fn claw_world_follows_boom_yaw() {
        let mut boom = Transform::from_xyz(0.0, config::BOOM_PIVOT_Y, 0.0);
        boom.rotate_y(std::f32::consts::FRAC_PI_2);
        let car = Transform::from_xyz(10.0, config::CAR_LOCAL_Y, 0.0);
        let claw = Transform::from_xyz(0.0, -6.0, 0.0);
        let world = claw_world(&boom, &car, &claw).translation;
        // A quarter turn carries the +X arm onto -Z.
        assert!(world.x.abs() < 1e-5);
        assert!((world.z + 10.0).abs() < 1e-5);
    }

    #[test]
    fn load_radius_is_half_diagonal() {
        let size = 2.0_f32;
        let radius = Vec3::splat(size / 2.0).length();
        assert!((radius - 3.0_f32.sqrt()).abs() < 1e-6);
    }
}
