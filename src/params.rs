/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds every tunable
 * constant of the gravity simulation. The two historic variants of the demo
 * are expressed as presets of the same struct rather than separate code
 * paths. Parameters can be edited live through the UI, and change detection
 * tells the app when the particle population has to be re-seeded.
 */

use std::ops::{Range, RangeInclusive};

// How an orbiter's trail segment is drawn each frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrailStyle {
    // From the position at the start of the step to the current position
    Motion,
    // From the current position along the velocity vector
    Velocity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    Default,
    Classic,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    // Force law
    pub gravity: f32,
    pub distance_floor: f32,
    pub force_step: f32,

    // Integration
    pub orbiter_step: f32,
    pub anchor_step: f32,
    pub damping: f32,

    // Boundaries
    pub wrap_boundaries: bool,
    pub boundary_margin: f32, // Fraction of the surface dimension
    pub drag_factor: f32,

    // Population
    pub num_orbiters: usize,
    pub orbiter_mass: Range<f32>,
    pub initial_speed: f32, // Each velocity component is drawn from [-speed, speed)
    pub random_colours: bool,
    pub black_hole_mass: Option<f32>,
    pub pointer_mass: f32,

    // Rendering
    pub trail_style: TrailStyle,
    pub fade_alpha: f32,
    pub fade_skip_period: u64, // Zero disables fading entirely
    pub anchor_radius: f32,
    pub show_force_field: bool,
    pub field_scale: f32,

    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<Box<SimulationParams>>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            gravity: 10_000.0,
            distance_floor: 10.0,
            force_step: 0.1,
            orbiter_step: 0.1,
            anchor_step: 0.005,
            damping: 0.000_001,
            wrap_boundaries: true,
            boundary_margin: 0.05,
            drag_factor: 0.5,
            num_orbiters: 50,
            orbiter_mass: 0.0..0.0,
            initial_speed: 5.0,
            random_colours: true,
            black_hole_mass: Some(1.0),
            pointer_mass: -0.5,
            trail_style: TrailStyle::Motion,
            fade_alpha: 0.05,
            fade_skip_period: 60,
            anchor_radius: 5.0,
            show_force_field: false,
            field_scale: 0.1,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    // The earlier variant: weak gravity, massive orbiters, no boundaries,
    // white velocity trails and no fading
    pub fn classic() -> Self {
        Self {
            gravity: 100.0,
            distance_floor: 10.0,
            damping: 0.0,
            wrap_boundaries: false,
            num_orbiters: 100,
            orbiter_mass: 0.0..10.0,
            initial_speed: 0.5,
            random_colours: false,
            black_hole_mass: None,
            pointer_mass: 0.0,
            trail_style: TrailStyle::Velocity,
            fade_skip_period: 0,
            field_scale: 10.0,
            ..Self::default()
        }
    }

    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Default => Self::default(),
            Preset::Classic => Self::classic(),
        }
    }

    // Builder-style setters for callers outside the crate, which cannot use
    // struct-update syntax because of the snapshot field
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_wrap_boundaries(mut self, wrap_boundaries: bool) -> Self {
        self.wrap_boundaries = wrap_boundaries;
        self
    }

    pub fn with_num_orbiters(mut self, num_orbiters: usize) -> Self {
        self.num_orbiters = num_orbiters;
        self
    }

    pub fn with_pointer_mass(mut self, pointer_mass: f32) -> Self {
        self.pointer_mass = pointer_mass;
        self
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        let mut snapshot = self.clone();
        snapshot.previous_values = None;
        self.previous_values = Some(Box::new(snapshot));
    }

    // Check if any parameters have changed since the last snapshot
    // Returns a tuple of (population_changed, any_changed). Masses of the
    // pointer and black hole are applied to the live particles instead.
    pub fn detect_changes(&self) -> (bool, bool) {
        let Some(prev) = &self.previous_values else {
            return (false, false);
        };

        let population_changed = self.num_orbiters != prev.num_orbiters
            || self.orbiter_mass != prev.orbiter_mass
            || self.initial_speed != prev.initial_speed
            || self.random_colours != prev.random_colours;

        let mut current = self.clone();
        current.previous_values = None;
        let any_changed = population_changed || current != **prev;

        (population_changed, any_changed)
    }

    // Whether the fade rectangle is drawn on the given frame
    pub fn fades_on(&self, frame: u64) -> bool {
        self.fade_skip_period != 0 && frame % self.fade_skip_period != 0
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_orbiters_range() -> RangeInclusive<usize> {
        0..=1000
    }

    pub fn get_gravity_range() -> RangeInclusive<f32> {
        0.0..=50_000.0
    }

    pub fn get_distance_floor_range() -> RangeInclusive<f32> {
        1.0..=200.0
    }

    pub fn get_damping_range() -> RangeInclusive<f32> {
        0.0..=0.000_02
    }

    pub fn get_drag_factor_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_pointer_mass_range() -> RangeInclusive<f32> {
        -5.0..=5.0
    }

    pub fn get_fade_alpha_range() -> RangeInclusive<f32> {
        0.0..=0.5
    }
}
