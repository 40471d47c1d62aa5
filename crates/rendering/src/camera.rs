use bevy::prelude::*;

use simulation::rig::CraneRig;

const CAMERA_COUNT: usize = 5;
/// World units per pixel in the orthographic views; sized so the whole crane
/// fits a typical window with room around it.
const ORTHO_SCALE: f32 = 0.05;

/// Digit2..Digit6 select cameras 0..4.
const CAMERA_BINDINGS: [(KeyCode, usize); CAMERA_COUNT] = [
    (KeyCode::Digit2, 0),
    (KeyCode::Digit3, 1),
    (KeyCode::Digit4, 2),
    (KeyCode::Digit5, 3),
    (KeyCode::Digit6, 4),
];

/// Index of the camera currently rendering (0..CAMERA_COUNT). Digit2..Digit6
/// select; starts on the free perspective view.
#[derive(Resource)]
pub struct ActiveCamera(pub usize);

impl Default for ActiveCamera {
    fn default() -> Self {
        Self(3)
    }
}

/// Marks a switchable viewpoint with its selection index.
#[derive(Component)]
pub struct ViewCamera(pub usize);

fn ortho_projection() -> Projection {
    Projection::Orthographic(OrthographicProjection {
        scale: ORTHO_SCALE,
        ..OrthographicProjection::default_3d()
    })
}

/// Five fixed viewpoints: three axis-aligned orthographic views, a free
/// perspective view, and a camera riding the claw base looking down.
pub fn setup_cameras(mut commands: Commands, rig: Res<CraneRig>) {
    let focus = Vec3::new(0.0, 12.0, 0.0);

    // 0: front elevation
    commands.spawn((
        Camera3d::default(),
        Camera {
            is_active: false,
            ..default()
        },
        ortho_projection(),
        Transform::from_xyz(0.0, 20.0, 100.0).looking_at(focus, Vec3::Y),
        ViewCamera(0),
    ));

    // 1: side elevation
    commands.spawn((
        Camera3d::default(),
        Camera {
            is_active: false,
            ..default()
        },
        ortho_projection(),
        Transform::from_xyz(100.0, 20.0, 0.0).looking_at(focus, Vec3::Y),
        ViewCamera(1),
    ));

    // 2: plan view, straight down
    commands.spawn((
        Camera3d::default(),
        Camera {
            is_active: false,
            ..default()
        },
        ortho_projection(),
        Transform::from_xyz(0.0, 100.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
        ViewCamera(2),
    ));

    // 3: free perspective (the startup view)
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(50.0, 50.0, 50.0).looking_at(focus, Vec3::Y),
        ViewCamera(3),
    ));

    // 4: rides the claw base, looking straight down at whatever the claw is
    // over. Parented into the joint chain so it follows every axis.
    let claw_cam = commands
        .spawn((
            Camera3d::default(),
            Camera {
                is_active: false,
                ..default()
            },
            Transform::from_xyz(0.0, -1.0, 0.0).looking_to(Vec3::NEG_Y, Vec3::X),
            ViewCamera(4),
        ))
        .id();
    commands.entity(claw_cam).set_parent(rig.claw_base);
}

pub fn switch_camera(keys: Res<ButtonInput<KeyCode>>, mut active: ResMut<ActiveCamera>) {
    for (key, index) in CAMERA_BINDINGS {
        if keys.just_pressed(key) {
            active.0 = index;
        }
    }
}

/// Keep exactly the selected camera rendering.
pub fn apply_active_camera(
    active: Res<ActiveCamera>,
    mut cameras: Query<(&ViewCamera, &mut Camera)>,
) {
    if !active.is_changed() {
        return;
    }
    for (view, mut camera) in &mut cameras {
        camera.is_active = view.0 == active.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_is_perspective() {
        assert_eq!(ActiveCamera::default().0, 3);
    }

    #[test]
    fn bindings_cover_every_camera_once() {
        let mut seen = [false; CAMERA_COUNT];
        for (_, index) in CAMERA_BINDINGS {
            assert!(!seen[index]);
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
