/*
 * Application Module
 *
 * This module defines the main application model and the nannou update
 * loop for the gravity demo. nannou plays the role of the animation-frame
 * scheduler: every update advances the simulation by exactly one frame and
 * records its draw commands, which the view then replays onto the window.
 */

use log::{debug, info};
use nannou::prelude::*;
use nannou_egui::Egui;

use crate::debug::DebugInfo;
use crate::input::{key_pressed, mouse_moved, raw_window_event};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::Simulation;
use crate::surface::RecordingSurface;
use crate::ui;

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub frame_commands: RecordingSurface,
    pub show_controls: bool,
    // Set by input handlers; turned into `clear_frame` on the next update
    pub clear_requested: bool,
    pub clear_frame: bool,
    // Control panel rectangle from the previous update
    pub panel_rect: Option<nannou_egui::egui::Rect>,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Size the window to 80% of the primary monitor when one is reported
    let (window_width, window_height) = match app.primary_monitor() {
        Some(monitor) => {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        }
        None => (1280.0, 720.0),
    };

    let window_id = app
        .new_window()
        .title("Gravity")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .mouse_moved(mouse_moved)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to create window");

    let window = app.window(window_id).expect("Window closed during start-up");
    let egui = Egui::from_window(&window);

    let rect = app.window_rect();
    let mut simulation = Simulation::new(SimulationParams::default(), rect.w(), rect.h());
    simulation.initialize(rect.w(), rect.h());

    Model {
        simulation,
        egui,
        debug_info: DebugInfo::default(),
        frame_commands: RecordingSurface::new(rect.w(), rect.h()),
        show_controls: true,
        clear_requested: true,
        clear_frame: false,
        panel_rect: None,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);
    model
        .debug_info
        .refresh(app.fps(), update.since_last, &model.simulation);

    let previous_panel = model.panel_rect;
    let (should_reset, population_changed, ui_changed) = ui::update_ui(
        &mut model.egui,
        model.simulation.params_mut(),
        &model.debug_info,
        &mut model.panel_rect,
    );
    if model.show_controls && ui::panel_layout_changed(previous_panel, model.panel_rect) {
        model.clear_requested = true;
    }

    let rect = app.window_rect();
    if should_reset || population_changed {
        info!("Re-seeding particles");
        model.simulation.initialize(rect.w(), rect.h());
        model.clear_requested = true;
    } else if ui_changed {
        debug!("Parameters changed");
        model.simulation.apply_live_masses();
    }

    model.clear_frame = std::mem::take(&mut model.clear_requested);

    // Last frame's commands have already been drawn
    model.frame_commands.clear();
    model.frame_commands.resize(rect.w(), rect.h());

    if !model.simulation.params().pause_simulation {
        model.simulation.render_frame(&mut model.frame_commands);
    }
}
