/*
 * Input Module
 *
 * This module handles user input events for the gravity simulation.
 * Pointer movement drives the pointer particle; a few keys control the
 * simulation. nannou reports positions relative to the window centre with
 * y pointing up, so they are translated into surface-local coordinates
 * (origin top-left, y down) before reaching the simulation.
 */

use log::{debug, info};
use nannou::prelude::*;

use crate::app::Model;
use crate::vector::Vector;

// Translate a window position (centred, y up) into surface coordinates
pub fn window_to_surface(pos: Point2, window_rect: Rect) -> Vector {
    Vector::new(pos.x - window_rect.left(), window_rect.top() - pos.y)
}

// Translate client coordinates by subtracting the surface's top-left corner
pub fn client_to_surface(client: Vector, surface_origin: Vector) -> Vector {
    client - surface_origin
}

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let local = window_to_surface(pos, app.window_rect());
    model.simulation.set_pointer(local);
}

// Keyboard shortcuts
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => {
            let params = model.simulation.params_mut();
            params.pause_simulation = !params.pause_simulation;
            debug!("Paused: {}", params.pause_simulation);
        }
        Key::R => {
            let rect = app.window_rect();
            info!("Resetting particles");
            model.simulation.initialize(rect.w(), rect.h());
            model.clear_requested = true;
        }
        Key::F => {
            let params = model.simulation.params_mut();
            params.show_force_field = !params.show_force_field;
        }
        Key::H => {
            model.show_controls = !model.show_controls;
            model.clear_requested = true;
        }
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
