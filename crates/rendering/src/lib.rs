use bevy::pbr::wireframe::WireframePlugin;
use bevy::prelude::*;

pub mod camera;
pub mod meshes;
pub mod wireframe;

use camera::ActiveCamera;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(WireframePlugin)
            .init_resource::<ActiveCamera>()
            .add_systems(
                Startup,
                (meshes::attach_scene_meshes, camera::setup_cameras, setup_lighting)
                    .chain()
                    .after(simulation::rig::assemble_crane),
            )
            .add_systems(
                Update,
                (
                    camera::switch_camera,
                    camera::apply_active_camera,
                    wireframe::toggle_wireframe,
                ),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}
