//! Collision-triggered pick-and-place sequence.
//!
//! Once the claw sphere overlaps a load, this state machine takes over joint
//! control, carries the load to the drop point through the same clamped
//! kinematics operations manual mode uses, releases it, and hands control
//! back. Stages always advance in order; there is no cancellation path and
//! no queue for further overlaps.

use bevy::prelude::*;

use crate::config;
use crate::kinematics;
use crate::rig::{claw_world, ClawFinger, CraneRig, JointLimits};

/// Transport stage. `Idle` is manual mode; the sequence runs
/// Grasp → Hoist → Swing → Traverse → Lower → Release → Recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Close the fingers onto the load, then bind it to the claw.
    Grasp,
    /// Raise the claw to its height limit.
    Hoist,
    /// Rotate the boom onto the drop point's bearing.
    Swing,
    /// Move the trolley onto the drop point's radius.
    Traverse,
    /// Lower until the load reaches the release height.
    Lower,
    /// Unbind the load and open the fingers.
    Release,
    /// Raise the claw back up, then return to manual mode.
    Recover,
}

/// State of the single active transport.
///
/// `delivered` keeps the last dropped load suppressed from collision checks
/// until the claw has separated from it (see `collision::detect_pickup`).
#[derive(Resource)]
pub struct Transport {
    pub phase: Phase,
    pub load: Option<Entity>,
    pub target: Vec3,
    pub delivered: Option<Entity>,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            load: None,
            target: config::CONTAINER_POS,
            delivered: None,
        }
    }
}

/// Drive the active transport stage one joint increment.
///
/// Runs every tick after the manual pass; a no-op while `Idle`. The grasped
/// load is bound to the claw by reparenting its entity under the claw base
/// (world pose preserved), so it follows every later joint move without any
/// per-tick position copying; release detaches it back to world space.
pub fn run_transport(
    mut commands: Commands,
    rig: Res<CraneRig>,
    limits: Res<JointLimits>,
    mut transport: ResMut<Transport>,
    mut transforms: Query<&mut Transform>,
    mut fingers: Query<&mut ClawFinger>,
) {
    match transport.phase {
        Phase::Idle => {}

        Phase::Grasp => {
            let closed = drive_fingers(
                &mut fingers,
                &rig.fingers,
                config::FINGER_STEP,
                limits.finger_closed,
                &limits,
            );
            if closed {
                if let Some(load) = transport.load {
                    attach_load(&mut commands, &rig, &mut transforms, load);
                }
                transport.phase = Phase::Hoist;
                info!("transport: load grasped, hoisting");
            }
        }

        Phase::Hoist => {
            let Ok([mut claw, mut cable]) = transforms.get_many_mut([rig.claw_base, rig.cable])
            else {
                return;
            };
            kinematics::move_claw_vertical(&mut claw, &mut cable, config::CABLE_STEP, &limits);
            if claw.translation.y >= limits.claw_max_y - config::CABLE_TOLERANCE {
                transport.phase = Phase::Swing;
            }
        }

        Phase::Swing => {
            let Ok(mut boom) = transforms.get_mut(rig.boom_group) else {
                return;
            };
            let target_yaw = (-transport.target.z).atan2(transport.target.x);
            let diff = kinematics::wrap_angle(target_yaw - kinematics::boom_yaw(&boom));
            if diff.abs() <= config::BOOM_TOLERANCE {
                transport.phase = Phase::Traverse;
            } else {
                kinematics::rotate_boom(
                    &mut boom,
                    diff.clamp(-config::BOOM_STEP, config::BOOM_STEP),
                );
            }
        }

        Phase::Traverse => {
            let Ok(mut car) = transforms.get_mut(rig.car) else {
                return;
            };
            // Aim for the drop point's radius, saturated into the trolley's
            // own travel in case the target sits past the boom tip.
            let radius = Vec2::new(transport.target.x, transport.target.z)
                .length()
                .clamp(limits.car_min_x, limits.car_max_x);
            let diff = radius - car.translation.x;
            if diff.abs() <= config::CAR_TOLERANCE {
                transport.phase = Phase::Lower;
            } else {
                kinematics::move_trolley(
                    &mut car,
                    diff.clamp(-config::CAR_STEP, config::CAR_STEP),
                    &limits,
                );
            }
        }

        Phase::Lower => {
            let load_y = grasped_load_world_y(&rig, &transforms, transport.load);
            if load_y.is_some_and(|y| y <= config::RELEASE_HEIGHT + config::CABLE_TOLERANCE) {
                transport.phase = Phase::Release;
                return;
            }
            let Ok([mut claw, mut cable]) = transforms.get_many_mut([rig.claw_base, rig.cable])
            else {
                return;
            };
            let applied =
                kinematics::move_claw_vertical(&mut claw, &mut cable, -config::CABLE_STEP, &limits);
            if applied == 0.0 {
                // Cable bottomed out before the load reached the release
                // height; release where we are rather than stall.
                transport.phase = Phase::Release;
            }
        }

        Phase::Release => {
            if let Some(load) = transport.load.take() {
                detach_load(&mut commands, &rig, &mut transforms, load);
                transport.delivered = Some(load);
                info!("transport: load released at drop point");
            }
            let open = drive_fingers(
                &mut fingers,
                &rig.fingers,
                -config::FINGER_STEP,
                limits.finger_open,
                &limits,
            );
            if open {
                transport.phase = Phase::Recover;
            }
        }

        Phase::Recover => {
            let Ok([mut claw, mut cable]) = transforms.get_many_mut([rig.claw_base, rig.cable])
            else {
                return;
            };
            kinematics::move_claw_vertical(&mut claw, &mut cable, config::CABLE_STEP, &limits);
            if claw.translation.y >= limits.claw_max_y - config::CABLE_TOLERANCE {
                transport.phase = Phase::Idle;
                info!("transport: complete, manual control restored");
            }
        }
    }
}

/// Step all four fingers by `delta` and report whether every hinge has
/// reached `bound`.
fn drive_fingers(
    fingers: &mut Query<&mut ClawFinger>,
    ids: &[Entity; 4],
    delta: f32,
    bound: f32,
    limits: &JointLimits,
) -> bool {
    let mut done = true;
    for id in ids {
        if let Ok(mut finger) = fingers.get_mut(*id) {
            finger.angle = kinematics::step_finger(finger.angle, delta, limits);
            if (finger.angle - bound).abs() > f32::EPSILON {
                done = false;
            }
        }
    }
    done
}

/// Bind the load to the claw: rewrite its transform into claw-base space and
/// reparent it, preserving the world pose.
fn attach_load(
    commands: &mut Commands,
    rig: &CraneRig,
    transforms: &mut Query<&mut Transform>,
    load: Entity,
) {
    let claw_tf = {
        let Ok([boom, car, claw]) = transforms.get_many([rig.boom_group, rig.car, rig.claw_base])
        else {
            return;
        };
        claw_world(boom, car, claw)
    };
    let Ok(mut load_tf) = transforms.get_mut(load) else {
        return;
    };
    let inverse = claw_tf.compute_affine().inverse();
    load_tf.translation = inverse.transform_point3(load_tf.translation);
    load_tf.rotation = claw_tf.rotation.inverse() * load_tf.rotation;
    commands.entity(load).set_parent(rig.claw_base);
}

/// Unbind the load: restore its independent world pose and detach it from
/// the claw.
fn detach_load(
    commands: &mut Commands,
    rig: &CraneRig,
    transforms: &mut Query<&mut Transform>,
    load: Entity,
) {
    let claw_tf = {
        let Ok([boom, car, claw]) = transforms.get_many([rig.boom_group, rig.car, rig.claw_base])
        else {
            return;
        };
        claw_world(boom, car, claw)
    };
    let Ok(mut load_tf) = transforms.get_mut(load) else {
        return;
    };
    *load_tf = claw_tf.mul_transform(*load_tf);
    commands.entity(load).remove_parent();
}

/// World height of the grasped load while it hangs from the claw.
fn grasped_load_world_y(
    rig: &CraneRig,
    transforms: &Query<&mut Transform>,
    load: Option<Entity>,
) -> Option<f32> {
    let load_tf = *transforms.get(load?).ok()?;
    let Ok([boom, car, claw]) = transforms.get_many([rig.boom_group, rig.car, rig.claw_base])
    else {
        return None;
    };
    Some(claw_world(boom, car, claw).mul_transform(load_tf).translation.y)
}
