//! Manual mode: per-tick keyboard control of the crane joints.
//!
//! The held-key map is sampled once per tick into `ControlState`, which the
//! HUD also reads. Joint mutation goes through the same clamped kinematics
//! helpers the transport sequence uses, so both control paths share one code
//! path and one set of bounds.

use bevy::prelude::*;

use crate::config;
use crate::kinematics;
use crate::rig::{ClawFinger, CraneRig, JointLimits};
use crate::transport::{Phase, Transport};

/// Snapshot of the held control keys, refreshed every tick.
///
/// While a transport is active the whole snapshot reads false — cleared, not
/// merely ignored — so no stale held key leaks into manual mode when control
/// is handed back.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    /// Q — boom counter-clockwise.
    pub rotate_left: bool,
    /// A — boom clockwise.
    pub rotate_right: bool,
    /// W — trolley toward the boom tip.
    pub trolley_out: bool,
    /// S — trolley toward the tower.
    pub trolley_in: bool,
    /// E — raise the claw.
    pub claw_up: bool,
    /// D — lower the claw.
    pub claw_down: bool,
    /// R — open the fingers.
    pub claw_open: bool,
    /// F — close the fingers.
    pub claw_close: bool,
}

impl ControlState {
    /// True if any control key is held.
    pub fn any(&self) -> bool {
        self.rotate_left
            || self.rotate_right
            || self.trolley_out
            || self.trolley_in
            || self.claw_up
            || self.claw_down
            || self.claw_open
            || self.claw_close
    }
}

/// Read the held-key map and apply one clamped joint step per held control.
/// Opposed keys held together cancel out.
pub fn manual_control(
    keys: Res<ButtonInput<KeyCode>>,
    rig: Res<CraneRig>,
    limits: Res<JointLimits>,
    transport: Res<Transport>,
    mut control: ResMut<ControlState>,
    mut transforms: Query<&mut Transform>,
    mut fingers: Query<&mut ClawFinger>,
) {
    if transport.phase != Phase::Idle {
        *control = ControlState::default();
        return;
    }

    *control = ControlState {
        rotate_left: keys.pressed(KeyCode::KeyQ),
        rotate_right: keys.pressed(KeyCode::KeyA),
        trolley_out: keys.pressed(KeyCode::KeyW),
        trolley_in: keys.pressed(KeyCode::KeyS),
        claw_up: keys.pressed(KeyCode::KeyE),
        claw_down: keys.pressed(KeyCode::KeyD),
        claw_open: keys.pressed(KeyCode::KeyR),
        claw_close: keys.pressed(KeyCode::KeyF),
    };

    if control.rotate_left != control.rotate_right {
        let Ok(mut boom) = transforms.get_mut(rig.boom_group) else {
            return;
        };
        let dir = if control.rotate_left { 1.0 } else { -1.0 };
        kinematics::rotate_boom(&mut boom, dir * config::BOOM_STEP);
    }

    if control.trolley_out != control.trolley_in {
        let Ok(mut car) = transforms.get_mut(rig.car) else {
            return;
        };
        let dir = if control.trolley_out { 1.0 } else { -1.0 };
        kinematics::move_trolley(&mut car, dir * config::CAR_STEP, &limits);
    }

    if control.claw_up != control.claw_down {
        let Ok([mut claw, mut cable]) = transforms.get_many_mut([rig.claw_base, rig.cable]) else {
            return;
        };
        let dir = if control.claw_up { 1.0 } else { -1.0 };
        kinematics::move_claw_vertical(&mut claw, &mut cable, dir * config::CABLE_STEP, &limits);
    }

    if control.claw_open != control.claw_close {
        let delta = if control.claw_open {
            -config::FINGER_STEP
        } else {
            config::FINGER_STEP
        };
        for id in rig.fingers {
            if let Ok(mut finger) = fingers.get_mut(id) {
                finger.angle = kinematics::step_finger(finger.angle, delta, &limits);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_all_false() {
        let control = ControlState::default();
        assert!(!control.any());
    }

    #[test]
    fn any_reflects_each_flag() {
        for i in 0..8 {
            let mut control = ControlState::default();
            match i {
                0 => control.rotate_left = true,
                1 => control.rotate_right = true,
                2 => control.trolley_out = true,
                3 => control.trolley_in = true,
                4 => control.claw_up = true,
                5 => control.claw_down = true,
                6 => control.claw_open = true,
                _ => control.claw_close = true,
            }
            assert!(control.any());
        }
    }
}
