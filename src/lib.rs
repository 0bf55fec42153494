/*
 * Gravity Particle Demo - Module Definitions
 *
 * This file defines the module structure for the gravity demo. The
 * simulation core (vector, particle, params, physics, simulation, surface)
 * has no windowing concerns; the remaining modules host it in a nannou
 * window with an egui control panel.
 */

// Re-export key components for easier access
pub use app::Model;
pub use colour::{Colour, ColourError};
pub use debug::DebugInfo;
pub use params::{Preset, SimulationParams, TrailStyle};
pub use particle::{Particle, ParticleId, ParticleRole};
pub use simulation::Simulation;
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use vector::Vector;

// Define modules
pub mod app;
pub mod colour;
pub mod debug;
pub mod input;
pub mod params;
pub mod particle;
pub mod physics;
pub mod renderer;
pub mod simulation;
pub mod surface;
pub mod ui;
pub mod vector;
