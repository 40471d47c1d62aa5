use bevy::pbr::wireframe::WireframeConfig;
use bevy::prelude::*;

/// Digit1 toggles global wireframe rendering.
pub fn toggle_wireframe(keys: Res<ButtonInput<KeyCode>>, mut config: ResMut<WireframeConfig>) {
    if keys.just_pressed(KeyCode::Digit1) {
        config.global = !config.global;
        info!(
            "wireframe {}",
            if config.global { "on" } else { "off" }
        );
    }
}
