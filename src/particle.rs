/*
 * Particle Module
 *
 * This module defines the Particle struct and the role it plays in the
 * simulation. There are three kinds of particle:
 * 1. Orbiters: free bodies pulled around by gravity and drawn as trails
 * 2. Anchors: heavy fixed bodies (the "black hole"), velocity pinned to zero
 * 3. The pointer particle: moved by the mouse, never integrated
 */

use crate::colour::Colour;
use crate::vector::Vector;

// Stable handle to a particle. Particles are never removed, so the index
// into the simulation's collection stays valid for the program's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleId(pub(crate) usize);

impl ParticleId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleRole {
    Orbiter,
    Anchor,
    Pointer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub mass: f32,
    pub position: Vector,
    pub velocity: Vector,
    pub colour: Colour,
    pub role: ParticleRole,
    pub last_position: Vector,
}

impl Particle {
    pub fn new(
        mass: f32,
        position: Vector,
        velocity: Vector,
        colour: Colour,
        role: ParticleRole,
    ) -> Self {
        Self {
            mass,
            position,
            velocity,
            colour,
            role,
            last_position: position,
        }
    }

    pub fn orbiter(mass: f32, position: Vector, velocity: Vector, colour: Colour) -> Self {
        Self::new(mass, position, velocity, colour, ParticleRole::Orbiter)
    }

    pub fn anchor(mass: f32, position: Vector, colour: Colour) -> Self {
        Self::new(mass, position, Vector::ZERO, colour, ParticleRole::Anchor)
    }

    pub fn pointer(mass: f32, position: Vector) -> Self {
        Self::new(mass, position, Vector::ZERO, Colour::white(), ParticleRole::Pointer)
    }

    pub fn is_anchor(&self) -> bool {
        self.role == ParticleRole::Anchor
    }

    pub fn is_mouse_controlled(&self) -> bool {
        self.role == ParticleRole::Pointer
    }

    // Place the particle directly, leaving no trail behind
    pub fn teleport(&mut self, position: Vector) {
        self.position = position;
        self.last_position = position;
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}
