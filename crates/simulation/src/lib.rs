use bevy::prelude::*;

pub mod collision;
pub mod config;
pub mod controls;
pub mod kinematics;
pub mod rig;
pub mod transport;

#[cfg(test)]
pub mod test_harness;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<rig::JointLimits>()
            .init_resource::<controls::ControlState>()
            .init_resource::<transport::Transport>()
            .add_systems(Startup, rig::assemble_crane)
            .add_systems(
                Update,
                (
                    controls::manual_control,
                    transport::run_transport,
                    bevy::ecs::schedule::apply_deferred,
                    rig::sync_finger_transforms,
                    collision::detect_pickup,
                )
                    .chain(),
            );
    }
}
