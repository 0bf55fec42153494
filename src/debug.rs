/*
 * Debug Information Module
 *
 * Per-frame metrics shown in the control panel: frame rate, frame time,
 * population size and how many particles have degenerated into
 * non-finite state.
 */

use std::time::Duration;

use crate::simulation::Simulation;

#[derive(Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub frame_number: u64,
    pub particle_count: usize,
    pub non_finite_particles: usize,
}

impl DebugInfo {
    pub fn refresh(&mut self, fps: f32, frame_time: Duration, simulation: &Simulation) {
        self.fps = fps;
        self.frame_time = frame_time;
        self.frame_number = simulation.frame();
        self.particle_count = simulation.particles().len();
        self.non_finite_particles = simulation.non_finite_count();
    }
}
