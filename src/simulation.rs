/*
 * Simulation Module
 *
 * This module defines the Simulation struct, which owns the particle
 * population and advances it one frame at a time. It is independent of any
 * windowing library: the host calls `render_frame` once per display refresh
 * with whatever Surface it draws on, or `step` when only the physics is
 * needed (tests, benchmarks, headless runs).
 *
 * Particles are updated in collection order, so later particles already see
 * the new positions of earlier ones within the same frame.
 */

use std::f32::consts::TAU;

use log::{debug, info, warn};
use nannou::color::rgba;
use rand::Rng;

use crate::colour::Colour;
use crate::params::{SimulationParams, TrailStyle};
use crate::particle::{Particle, ParticleId, ParticleRole};
use crate::physics;
use crate::surface::Surface;
use crate::vector::Vector;

// Grid resolution of the force field overlay along each axis
const FIELD_SAMPLES: usize = 10;

pub struct Simulation {
    particles: Vec<Particle>,
    params: SimulationParams,
    width: f32,
    height: f32,
    frame: u64,
    pointer: Option<ParticleId>,
    reported_non_finite: bool,
}

impl Simulation {
    // An empty simulation; use `initialize` or `spawn` to add particles
    pub fn new(params: SimulationParams, width: f32, height: f32) -> Self {
        Self {
            particles: Vec::new(),
            params,
            width,
            height,
            frame: 0,
            pointer: None,
            reported_non_finite: false,
        }
    }

    pub fn initialize(&mut self, width: f32, height: f32) {
        let mut rng = rand::thread_rng();
        self.initialize_with_rng(width, height, &mut rng);
    }

    /// Seed the fixed population for a surface of the given size.
    ///
    /// Any existing particles are discarded. The population is the
    /// configured number of orbiters, the optional black hole anchor, and
    /// exactly one pointer particle starting in the bottom-right corner.
    pub fn initialize_with_rng<R: Rng + ?Sized>(&mut self, width: f32, height: f32, rng: &mut R) {
        self.width = width;
        self.height = height;
        self.frame = 0;
        self.pointer = None;
        self.reported_non_finite = false;
        self.particles.clear();

        let speed = self.params.initial_speed;
        for _ in 0..self.params.num_orbiters {
            let mass = sample(rng, self.params.orbiter_mass.start, self.params.orbiter_mass.end);
            let position = Vector::new(sample(rng, 0.0, width), sample(rng, 0.0, height));
            let velocity = Vector::new(sample(rng, -speed, speed), sample(rng, -speed, speed));
            let colour = if self.params.random_colours {
                Colour::random_light(rng)
            } else {
                Colour::white()
            };
            self.spawn(Particle::orbiter(mass, position, velocity, colour));
        }

        if let Some(mass) = self.params.black_hole_mass {
            let position = black_hole_position(width, height);
            self.spawn(Particle::anchor(mass, position, Colour::white()));
        }

        let pointer = self.spawn(Particle::pointer(
            self.params.pointer_mass,
            Vector::new(width, height),
        ));
        self.pointer = Some(pointer);

        info!(
            "Initialized {} particles ({} orbiters) on a {:.0}x{:.0} surface",
            self.particles.len(),
            self.params.num_orbiters,
            width,
            height
        );
    }

    // Append a particle; returns its stable id. Only one pointer particle is
    // tracked, so a second one is kept as an ordinary orbiter.
    pub fn spawn(&mut self, mut particle: Particle) -> ParticleId {
        let id = ParticleId(self.particles.len());
        if particle.role == ParticleRole::Pointer {
            match self.pointer {
                None => self.pointer = Some(id),
                Some(existing) => {
                    warn!(
                        "Pointer particle already exists at index {}; spawning index {} as an orbiter",
                        existing.index(),
                        id.index()
                    );
                    particle.role = ParticleRole::Orbiter;
                }
            }
        }
        self.particles.push(particle);
        id
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.0)
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id.0)
    }

    pub fn pointer_id(&self) -> Option<ParticleId> {
        self.pointer
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SimulationParams {
        &mut self.params
    }

    pub fn set_params(&mut self, params: SimulationParams) {
        self.params = params;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if (width, height) != (self.width, self.height) {
            info!("Surface resized to {:.0}x{:.0}", width, height);
            self.width = width;
            self.height = height;
        }
    }

    // Place the pointer particle at surface-local coordinates. The position
    // is authoritative: physics never moves the pointer particle.
    pub fn set_pointer(&mut self, position: Vector) {
        let Some(id) = self.pointer else {
            return;
        };
        if let Some(particle) = self.particles.get_mut(id.0) {
            debug!("Pointer moved to ({:.1}, {:.1})", position.x, position.y);
            particle.teleport(position);
        }
    }

    // Push the pointer and black hole masses from the params onto the live
    // particles, so editing them does not re-seed the population
    pub fn apply_live_masses(&mut self) {
        let pointer_mass = self.params.pointer_mass;
        let black_hole_mass = self.params.black_hole_mass;
        for particle in &mut self.particles {
            match particle.role {
                ParticleRole::Pointer => particle.mass = pointer_mass,
                ParticleRole::Anchor => {
                    if let Some(mass) = black_hole_mass {
                        particle.mass = mass;
                    }
                }
                ParticleRole::Orbiter => {}
            }
        }
    }

    pub fn non_finite_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_finite()).count()
    }

    /// Advance every particle by one frame without drawing anything.
    pub fn step(&mut self) {
        for i in 0..self.particles.len() {
            self.advance(i);
        }
        self.check_finite();
    }

    /// Fade the previous frame, advance the physics, draw every particle.
    ///
    /// The surface's current dimensions are adopted before stepping, so the
    /// boundaries always follow the surface.
    pub fn render_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.resize(surface.width(), surface.height());

        if self.params.fades_on(self.frame) {
            surface.set_fill_colour(rgba(0.0, 0.0, 0.0, self.params.fade_alpha));
            surface.fill_rect(0.0, 0.0, self.width, self.height);
        }
        self.frame += 1;

        for i in 0..self.particles.len() {
            if self.advance(i) {
                self.draw_particle(i, surface);
            }
        }
        self.check_finite();

        if self.params.show_force_field {
            self.draw_force_field(surface);
        }
    }

    // Advance a single particle. Returns false for particles that are not
    // simulated (and therefore not drawn).
    fn advance(&mut self, i: usize) -> bool {
        let params = &self.params;
        if self.particles[i].is_mouse_controlled() {
            return false;
        }

        if self.particles[i].is_anchor() {
            let anchor = &mut self.particles[i];
            anchor.velocity = Vector::ZERO;
            anchor.last_position = anchor.position;
        } else {
            let position = self.particles[i].position;
            let acceleration = physics::net_acceleration(position, &self.particles, Some(i), params);
            let particle = &mut self.particles[i];
            particle.last_position = position;
            particle.velocity = particle.velocity + acceleration.scale(params.force_step);
        }

        let particle = &mut self.particles[i];
        physics::integrate(particle, params);
        if params.wrap_boundaries {
            physics::wrap_boundaries(particle, self.width, self.height, params);
        }
        particle.velocity = physics::apply_damping(particle.velocity, params.damping);

        true
    }

    fn draw_particle<S: Surface + ?Sized>(&self, i: usize, surface: &mut S) {
        let particle = &self.particles[i];

        surface.begin_path();
        if particle.is_anchor() {
            surface.set_fill_colour(particle.colour.to_rgba(1.0));
            surface.arc(particle.last_position, self.params.anchor_radius, 0.0, TAU);
            surface.fill();
            return;
        }

        let (from, to) = match self.params.trail_style {
            TrailStyle::Motion => (particle.last_position, particle.position),
            TrailStyle::Velocity => (particle.position, particle.position + particle.velocity),
        };
        surface.set_stroke_colour(particle.colour.to_rgba(1.0));
        surface.move_to(from);
        surface.line_to(to);
        surface.stroke();
    }

    /// Draw the acceleration field sampled on a coarse grid.
    ///
    /// Each sample is a short segment from the grid point along the net
    /// acceleration all particles impart there, scaled by `field_scale`.
    pub fn draw_force_field<S: Surface + ?Sized>(&self, surface: &mut S) {
        let step_x = self.width / FIELD_SAMPLES as f32;
        let step_y = self.height / FIELD_SAMPLES as f32;

        surface.set_stroke_colour(rgba(0.2, 0.0, 0.0, 1.0));
        for ix in 0..FIELD_SAMPLES {
            for iy in 0..FIELD_SAMPLES {
                let point = Vector::new(ix as f32 * step_x, iy as f32 * step_y);
                let acceleration = physics::net_acceleration(point, &self.particles, None, &self.params);

                surface.begin_path();
                surface.move_to(point);
                surface.line_to(point + acceleration.scale(self.params.field_scale));
                surface.stroke();
            }
        }
    }

    fn check_finite(&mut self) {
        if self.reported_non_finite {
            return;
        }
        let count = self.non_finite_count();
        if count > 0 {
            warn!("{} particle(s) have non-finite position or velocity", count);
            self.reported_non_finite = true;
        }
    }
}

// Uniform sample from [low, high); degenerate ranges yield `low`
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

// Where the black hole sits: left of the right edge and above centre, pulled
// inwards on small surfaces so it always stays visible
pub fn black_hole_position(width: f32, height: f32) -> Vector {
    Vector::new(
        (width - 512.0).max(width * 0.5),
        (height / 2.0 - 128.0).max(height * 0.25),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(params: SimulationParams) -> Simulation {
        let mut sim = Simulation::new(params, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(42);
        sim.initialize_with_rng(1280.0, 720.0, &mut rng);
        sim
    }

    #[test]
    fn default_population_layout() {
        let sim = seeded(SimulationParams::default());
        let particles = sim.particles();

        assert_eq!(particles.len(), 52);
        assert_eq!(particles.iter().filter(|p| p.is_anchor()).count(), 1);
        assert_eq!(particles.iter().filter(|p| p.is_mouse_controlled()).count(), 1);

        let pointer = sim.particle(sim.pointer_id().unwrap()).unwrap();
        assert_eq!(pointer.position, Vector::new(1280.0, 720.0));
        assert_eq!(pointer.mass, -0.5);

        for p in particles.iter().filter(|p| p.role == ParticleRole::Orbiter) {
            assert_eq!(p.mass, 0.0);
            assert!(p.position.x >= 0.0 && p.position.x < 1280.0);
            assert!(p.position.y >= 0.0 && p.position.y < 720.0);
            assert!(p.velocity.x.abs() <= 5.0 && p.velocity.y.abs() <= 5.0);
        }
    }

    #[test]
    fn reinitialize_replaces_population() {
        let mut sim = seeded(SimulationParams::default());
        sim.params_mut().num_orbiters = 3;
        sim.initialize_with_rng(100.0, 100.0, &mut StdRng::seed_from_u64(1));
        assert_eq!(sim.particles().len(), 5);
        assert_eq!(sim.frame(), 0);
    }

    #[test]
    fn anchor_velocity_is_pinned() {
        let mut sim = Simulation::new(SimulationParams::default(), 800.0, 600.0);
        let anchor = sim.spawn(Particle::anchor(1.0, Vector::new(400.0, 300.0), Colour::white()));
        sim.spawn(Particle::orbiter(50.0, Vector::new(410.0, 300.0), Vector::ZERO, Colour::white()));

        sim.particle_mut(anchor).unwrap().velocity = Vector::new(30.0, -12.0);
        for _ in 0..5 {
            sim.step();
            let a = sim.particle(anchor).unwrap();
            assert_eq!(a.velocity, Vector::ZERO);
            assert_eq!(a.position, Vector::new(400.0, 300.0));
        }
    }

    #[test]
    fn pointer_is_not_integrated() {
        let mut sim = Simulation::new(SimulationParams::default(), 800.0, 600.0);
        let pointer = sim.spawn(Particle::pointer(-0.5, Vector::ZERO));
        sim.spawn(Particle::anchor(100.0, Vector::new(60.0, 60.0), Colour::white()));
        assert_eq!(sim.pointer_id(), Some(pointer));

        sim.particle_mut(pointer).unwrap().velocity = Vector::new(10.0, 10.0);
        sim.set_pointer(Vector::new(50.0, 60.0));
        sim.step();
        assert_eq!(sim.particle(pointer).unwrap().position, Vector::new(50.0, 60.0));
    }

    #[test]
    fn first_frame_is_not_faded() {
        let mut sim = seeded(SimulationParams::default());
        let mut surface = RecordingSurface::new(1280.0, 720.0);

        sim.render_frame(&mut surface);
        assert_eq!(surface.fill_rect_count(), 0);

        surface.clear();
        sim.render_frame(&mut surface);
        assert_eq!(surface.fill_rect_count(), 1);
        assert!(surface.commands().contains(&DrawCommand::FillRect {
            x: 0.0,
            y: 0.0,
            width: 1280.0,
            height: 720.0,
        }));
    }

    #[test]
    fn draws_trails_and_anchor_discs() {
        let mut sim = seeded(SimulationParams::default());
        let mut surface = RecordingSurface::new(1280.0, 720.0);
        sim.render_frame(&mut surface);

        // 50 orbiter trails, one anchor disc, nothing for the pointer
        assert_eq!(surface.stroke_count(), 50);
        assert_eq!(surface.fill_count(), 1);

        let anchor = sim.particles().iter().find(|p| p.is_anchor()).unwrap();
        assert_eq!(anchor.last_position, black_hole_position(1280.0, 720.0));
        let discs: Vec<&DrawCommand> = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arc { .. }))
            .collect();
        assert_eq!(
            discs,
            vec![&DrawCommand::Arc {
                centre: anchor.last_position,
                radius: sim.params().anchor_radius,
                start_angle: 0.0,
                end_angle: TAU,
            }]
        );
    }

    #[test]
    fn force_field_draws_a_grid() {
        let mut params = SimulationParams::default();
        params.show_force_field = true;
        let mut sim = seeded(params);
        let mut surface = RecordingSurface::new(1280.0, 720.0);
        sim.render_frame(&mut surface);
        assert_eq!(surface.stroke_count(), 50 + FIELD_SAMPLES * FIELD_SAMPLES);

        // Each sample runs from its grid point along the scaled acceleration
        let commands = surface.commands();
        let start = commands
            .iter()
            .rposition(|c| *c == DrawCommand::StrokeColour(rgba(0.2, 0.0, 0.0, 1.0)))
            .expect("field colour");
        let scale = sim.params().field_scale;
        for (sample, point) in [(0, Vector::ZERO), (FIELD_SAMPLES, Vector::new(128.0, 0.0))] {
            let acceleration = physics::net_acceleration(point, sim.particles(), None, sim.params());
            assert!(acceleration.magnitude() > 0.0);
            let at = start + 1 + sample * 4;
            assert_eq!(commands[at], DrawCommand::BeginPath);
            assert_eq!(commands[at + 1], DrawCommand::MoveTo(point));
            assert_eq!(commands[at + 2], DrawCommand::LineTo(point + acceleration.scale(scale)));
            assert_eq!(commands[at + 3], DrawCommand::Stroke);
        }
    }

    #[test]
    fn anchor_stays_put_when_the_surface_shrinks() {
        let mut sim = Simulation::new(SimulationParams::default(), 1920.0, 1080.0);
        let anchor = sim.spawn(Particle::anchor(
            1.0,
            black_hole_position(1920.0, 1080.0),
            Colour::white(),
        ));

        let mut surface = RecordingSurface::new(1300.0, 800.0);
        sim.render_frame(&mut surface);
        assert_eq!(sim.particle(anchor).unwrap().position, Vector::new(1408.0, 412.0));
    }

    #[test]
    fn live_mass_edits_keep_the_population() {
        let mut sim = seeded(SimulationParams::default());
        let pointer = sim.pointer_id().unwrap();
        sim.set_pointer(Vector::new(300.0, 200.0));
        let before: Vec<Vector> = sim.particles().iter().map(|p| p.position).collect();

        sim.params_mut().pointer_mass = -1.5;
        sim.params_mut().black_hole_mass = Some(4.0);
        sim.apply_live_masses();

        let p = sim.particle(pointer).unwrap();
        assert_eq!(p.mass, -1.5);
        assert_eq!(p.position, Vector::new(300.0, 200.0));
        assert!(sim.particles().iter().filter(|p| p.is_anchor()).all(|p| p.mass == 4.0));
        assert!(sim
            .particles()
            .iter()
            .filter(|p| p.role == ParticleRole::Orbiter)
            .all(|p| p.mass == 0.0));
        let after: Vec<Vector> = sim.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn second_pointer_is_spawned_as_orbiter() {
        let mut sim = Simulation::new(SimulationParams::default(), 800.0, 600.0);
        let first = sim.spawn(Particle::pointer(-0.5, Vector::ZERO));
        let second = sim.spawn(Particle::pointer(-0.5, Vector::new(10.0, 10.0)));

        assert_eq!(sim.pointer_id(), Some(first));
        assert_eq!(sim.particle(second).unwrap().role, ParticleRole::Orbiter);
        assert_eq!(sim.particles().iter().filter(|p| p.is_mouse_controlled()).count(), 1);
    }

    #[test]
    fn render_adopts_surface_size() {
        let mut sim = seeded(SimulationParams::default());
        let mut surface = RecordingSurface::new(640.0, 480.0);
        sim.render_frame(&mut surface);
        assert_eq!(sim.size(), (640.0, 480.0));
    }

    #[test]
    fn black_hole_stays_on_small_surfaces() {
        let p = black_hole_position(300.0, 200.0);
        assert!(p.x > 0.0 && p.x < 300.0);
        assert!(p.y > 0.0 && p.y < 200.0);
        assert_eq!(black_hole_position(1920.0, 1080.0), Vector::new(1408.0, 412.0));
    }
}
