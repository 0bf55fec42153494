/*
 * UI Module
 *
 * This module builds the egui control panel with nannou_egui. Sliders edit
 * the live SimulationParams; change detection is handled by the params
 * themselves.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{Preset, SimulationParams, TrailStyle};

// Update the UI and return whether particles should be reset, whether the
// population parameters changed, and whether anything changed at all.
// `panel_rect` receives the window's on-screen rectangle for this frame.
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    panel_rect: &mut Option<egui::Rect>,
) -> (bool, bool, bool) {
    let mut should_reset = false;
    let mut preset = None;

    params.take_snapshot();

    let ctx = egui.begin_frame();

    let response = egui::Window::new("Gravity Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.num_orbiters, SimulationParams::get_num_orbiters_range())
                        .text("Orbiters"),
                );
                ui.add(
                    egui::Slider::new(&mut params.pointer_mass, SimulationParams::get_pointer_mass_range())
                        .text("Pointer Mass"),
                );
                ui.horizontal(|ui| {
                    if ui.button("Reset").clicked() {
                        should_reset = true;
                    }
                    if ui.button("Default").clicked() {
                        preset = Some(Preset::Default);
                    }
                    if ui.button("Classic").clicked() {
                        preset = Some(Preset::Classic);
                    }
                });
            });

            ui.collapsing("Forces", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.gravity, SimulationParams::get_gravity_range())
                        .text("Gravity"),
                );
                ui.add(
                    egui::Slider::new(&mut params.distance_floor, SimulationParams::get_distance_floor_range())
                        .text("Distance Floor"),
                );
                ui.add(
                    egui::Slider::new(&mut params.damping, SimulationParams::get_damping_range())
                        .text("Damping"),
                );
                ui.add(
                    egui::Slider::new(&mut params.drag_factor, SimulationParams::get_drag_factor_range())
                        .text("Wrap Drag"),
                );
                ui.checkbox(&mut params.wrap_boundaries, "Wrap Boundaries");
            });

            ui.collapsing("Rendering", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.fade_alpha, SimulationParams::get_fade_alpha_range())
                        .text("Fade Alpha"),
                );
                ui.horizontal(|ui| {
                    ui.radio_value(&mut params.trail_style, TrailStyle::Motion, "Motion");
                    ui.radio_value(&mut params.trail_style, TrailStyle::Velocity, "Velocity");
                });
                ui.checkbox(&mut params.show_force_field, "Show Force Field");
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Frame: {}", debug_info.frame_number));
            ui.label(format!("Particles: {}", debug_info.particle_count));
            if debug_info.non_finite_particles > 0 {
                ui.label(format!("Non-finite: {}", debug_info.non_finite_particles));
            }

            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
            ui.label("Space: pause  R: reset  F: field  H: hide panel");
        });
    *panel_rect = response.map(|inner| inner.response.rect);

    let (population_changed, mut ui_changed) = params.detect_changes();

    // A preset replaces every parameter, so the population is re-seeded
    if let Some(preset) = preset {
        log::info!("Switching to {:?} preset", preset);
        let pause = params.pause_simulation;
        *params = SimulationParams::preset(preset);
        params.pause_simulation = pause;
        should_reset = true;
        ui_changed = true;
    }

    (should_reset, population_changed, ui_changed)
}

// The window is never cleared, so the panel leaves old pixels behind
// whenever it moves, resizes or a section collapses
pub fn panel_layout_changed(previous: Option<egui::Rect>, current: Option<egui::Rect>) -> bool {
    previous != current
}
