//! Bounding-sphere collision: one sphere per load plus one for the claw.
//!
//! Overlap tests are discrete, once per tick, against positions already
//! updated by this tick's control pass. There is no contact resolution; an
//! overlap's only effect is to start a transport.

use bevy::prelude::*;

use crate::rig::{self, CraneRig, Load};
use crate::transport::{Phase, Transport};

/// Radius-only collision proxy centered on the owning entity's world
/// position.
#[derive(Component, Debug, Clone, Copy)]
pub struct CollisionSphere {
    pub radius: f32,
}

/// Overlap iff the center distance is strictly less than the radius sum.
/// Symmetric in its arguments.
pub fn spheres_overlap(a: Vec3, ra: f32, b: Vec3, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Per-tick overlap test between the claw sphere and every registered load.
///
/// Only runs while no transport is active; the first overlapping load wins
/// and later overlaps in the same tick are ignored (one transport at a time,
/// no queue). The just-delivered load stays suppressed until the claw sphere
/// has separated from it, so the claw can retract without re-triggering.
pub fn detect_pickup(
    rig: Res<CraneRig>,
    mut transport: ResMut<Transport>,
    spheres: Query<&CollisionSphere>,
    transforms: Query<&Transform>,
    loads: Query<(Entity, &Transform, &CollisionSphere), With<Load>>,
) {
    if transport.phase != Phase::Idle {
        return;
    }
    let (Ok(boom), Ok(car), Ok(claw)) = (
        transforms.get(rig.boom_group),
        transforms.get(rig.car),
        transforms.get(rig.claw_base),
    ) else {
        return;
    };
    let Ok(claw_sphere) = spheres.get(rig.claw_base) else {
        return;
    };
    let claw_pos = rig::claw_world(boom, car, claw).translation;

    for (entity, tf, sphere) in &loads {
        let overlapping =
            spheres_overlap(claw_pos, claw_sphere.radius, tf.translation, sphere.radius);

        if transport.delivered == Some(entity) {
            if !overlapping {
                // Clear of the drop point; the load is grabbable again.
                transport.delivered = None;
            }
            continue;
        }

        if overlapping {
            transport.phase = Phase::Grasp;
            transport.load = Some(entity);
            info!("claw over load {entity}, starting transport");
            return;
        }
    }
}
