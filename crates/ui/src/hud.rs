//! Status HUD: held controls, transport stage, camera and wireframe state.

use bevy::pbr::wireframe::WireframeConfig;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::camera::ActiveCamera;
use simulation::controls::ControlState;
use simulation::transport::{Phase, Transport};

const CAMERA_NAMES: [&str; 5] = ["Front", "Side", "Top", "Perspective", "Claw"];

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Idle (manual control)",
        Phase::Grasp => "Grasping",
        Phase::Hoist => "Hoisting",
        Phase::Swing => "Swinging",
        Phase::Traverse => "Traversing",
        Phase::Lower => "Lowering",
        Phase::Release => "Releasing",
        Phase::Recover => "Recovering",
    }
}

pub fn hud_ui(
    mut contexts: EguiContexts,
    control: Res<ControlState>,
    transport: Res<Transport>,
    active: Res<ActiveCamera>,
    wireframe: Res<WireframeConfig>,
) {
    egui::Window::new("Crane")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .default_width(220.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.spacing_mut().item_spacing.y = 4.0;

            let automated = transport.phase != Phase::Idle;
            let phase_color = if automated {
                egui::Color32::from_rgb(255, 180, 50)
            } else {
                egui::Color32::from_rgb(120, 220, 120)
            };
            ui.colored_label(phase_color, phase_label(transport.phase));
            ui.separator();

            ui.heading("Controls");
            let keys = [
                ("Q / A", "rotate boom", control.rotate_left, control.rotate_right),
                ("W / S", "move trolley", control.trolley_out, control.trolley_in),
                ("E / D", "raise / lower claw", control.claw_up, control.claw_down),
                ("R / F", "open / close claw", control.claw_open, control.claw_close),
            ];
            for (key, action, first, second) in keys {
                ui.horizontal(|ui| {
                    let held = first || second;
                    let color = if held {
                        egui::Color32::from_rgb(120, 220, 120)
                    } else {
                        egui::Color32::GRAY
                    };
                    ui.colored_label(color, key);
                    ui.label(action);
                });
            }
            if automated {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 180, 50),
                    "Controls suspended during transport",
                );
            }
            ui.separator();

            ui.heading("View");
            ui.label(format!(
                "Camera (2-6): {}",
                CAMERA_NAMES[active.0.min(CAMERA_NAMES.len() - 1)]
            ));
            ui.label(format!(
                "Wireframe (1): {}",
                if wireframe.global { "on" } else { "off" }
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_phase_has_a_label() {
        let phases = [
            Phase::Idle,
            Phase::Grasp,
            Phase::Hoist,
            Phase::Swing,
            Phase::Traverse,
            Phase::Lower,
            Phase::Release,
            Phase::Recover,
        ];
        for phase in phases {
            assert!(!phase_label(phase).is_empty());
        }
    }
}
