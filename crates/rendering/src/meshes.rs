//! Attach meshes and materials to the crane entities assembled by the
//! simulation crate, plus the ground plane the loads rest on.

use bevy::prelude::*;

use simulation::config;
use simulation::rig::{CraneRig, Load, LoadSize};

const GROUND_SIZE: f32 = 120.0;

pub fn attach_scene_meshes(
    mut commands: Commands,
    rig: Res<CraneRig>,
    loads: Query<(Entity, &LoadSize), With<Load>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let steel = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.65, 0.1),
        perceptual_roughness: 0.6,
        ..default()
    });
    let dark_steel = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.35, 0.4),
        perceptual_roughness: 0.8,
        ..default()
    });
    let cable_gray = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.2, 0.2),
        ..default()
    });

    commands.entity(rig.base).insert((
        Mesh3d(meshes.add(Cuboid::new(
            config::BASE_SIZE,
            config::BASE_HEIGHT,
            config::BASE_SIZE,
        ))),
        MeshMaterial3d(dark_steel.clone()),
    ));
    commands.entity(rig.tower).insert((
        Mesh3d(meshes.add(Cylinder::new(config::TOWER_RADIUS, config::TOWER_HEIGHT))),
        MeshMaterial3d(steel.clone()),
    ));
    commands.entity(rig.boom_arm).insert((
        Mesh3d(meshes.add(Cuboid::new(
            config::BOOM_LENGTH,
            config::BOOM_HEIGHT,
            config::BOOM_DEPTH,
        ))),
        MeshMaterial3d(steel.clone()),
    ));
    commands.entity(rig.counterweight).insert((
        Mesh3d(meshes.add(Cuboid::new(
            config::COUNTERWEIGHT_LENGTH,
            config::BOOM_HEIGHT,
            config::BOOM_DEPTH,
        ))),
        MeshMaterial3d(dark_steel.clone()),
    ));
    commands.entity(rig.car).insert((
        Mesh3d(meshes.add(Cuboid::new(
            config::CAR_LENGTH,
            config::CAR_HEIGHT,
            config::CAR_DEPTH,
        ))),
        MeshMaterial3d(dark_steel.clone()),
    ));

    // Unit-height cylinder: the simulation stretches it to the cable length
    // through the transform's vertical scale.
    commands.entity(rig.cable).insert((
        Mesh3d(meshes.add(Cylinder::new(config::CABLE_RADIUS, 1.0))),
        MeshMaterial3d(cable_gray),
    ));

    commands.entity(rig.claw_base).insert((
        Mesh3d(meshes.add(Cuboid::new(
            config::CLAW_BASE_SIZE,
            config::CLAW_BASE_HEIGHT,
            config::CLAW_BASE_SIZE,
        ))),
        MeshMaterial3d(steel.clone()),
    ));

    let finger_mesh = meshes.add(Cone {
        radius: config::FINGER_RADIUS,
        height: config::FINGER_LENGTH,
    });
    for finger in rig.fingers {
        commands.entity(finger).insert((
            Mesh3d(finger_mesh.clone()),
            MeshMaterial3d(steel.clone()),
        ));
    }

    // Loads: one cube mesh per size.
    for (entity, size) in &loads {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(size.0, size.0, size.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.7, 0.2, 0.15),
                perceptual_roughness: 0.9,
                ..default()
            })),
        ));
    }

    // Ground plane and the container marking the drop point.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.45, 0.55, 0.35),
            perceptual_roughness: 1.0,
            ..default()
        })),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(5.0, 0.4, 5.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.3, 0.6),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_translation(config::CONTAINER_POS + Vec3::new(0.0, 0.2, 0.0)),
    ));
}
