/*
 * Physics Module
 *
 * Free functions implementing one integration step of the gravity demo:
 * - Pairwise acceleration with a floored inverse-square law
 * - Position integration with separate rates for orbiters and anchors
 * - Boundary wraparound with drag on re-entry
 * - Quadratic velocity damping that keeps fast particles bounded
 *
 * The force law is not meant to be physically accurate; it is tuned to look
 * good. Surface coordinates are used throughout (y grows downwards).
 */

use std::f32::consts::FRAC_PI_2;

use crate::params::SimulationParams;
use crate::particle::Particle;
use crate::vector::Vector;

// Acceleration felt at `position` due to a body of `source_mass` at
// `source_position`. Positive mass attracts, negative mass repels.
//
// Coincident points have no defined direction; they contribute nothing
// rather than poisoning the velocity with NaN.
pub fn pairwise_acceleration(
    position: Vector,
    source_position: Vector,
    source_mass: f32,
    params: &SimulationParams,
) -> Vector {
    let between = position - source_position;
    let distance = between.magnitude();
    if distance == 0.0 {
        return Vector::ZERO;
    }

    let distance_sq = distance * distance;
    between
        .unit()
        .scale(-params.gravity * source_mass / distance_sq.max(params.distance_floor))
}

// Sum of the accelerations every particle except `skip` imparts at `position`
pub fn net_acceleration(
    position: Vector,
    particles: &[Particle],
    skip: Option<usize>,
    params: &SimulationParams,
) -> Vector {
    particles
        .iter()
        .enumerate()
        .filter(|(j, _)| Some(*j) != skip)
        .fold(Vector::ZERO, |acc, (_, other)| {
            acc + pairwise_acceleration(position, other.position, other.mass, params)
        })
}

pub fn integrate(particle: &mut Particle, params: &SimulationParams) {
    let rate = if particle.is_anchor() {
        params.anchor_step
    } else {
        params.orbiter_step
    };
    particle.position = particle.position + particle.velocity.scale(rate);
}

// Move a particle that has left the surface to the opposite edge.
//
// Each axis is checked independently, and only when the particle is heading
// further out (judged from the velocity's angle). An axis the velocity has
// no component along never wraps, so a resting particle stays put even
// when the surface shrinks past it. The trail start follows
// the wrapped axis so no streak is drawn across the surface. Returns the
// number of axes that wrapped.
pub fn wrap_boundaries(
    particle: &mut Particle,
    width: f32,
    height: f32,
    params: &SimulationParams,
) -> u32 {
    let angle = particle.velocity.gradient();
    let margin_x = width * params.boundary_margin;
    let margin_y = height * params.boundary_margin;
    let mut wrapped = 0;

    // Vertical
    let (vx, vy) = (particle.velocity.x, particle.velocity.y);
    let new_y = if particle.position.y > height + margin_y && vy > 0.0 && angle > 0.0 {
        Some(0.0)
    } else if particle.position.y < -margin_y && vy < 0.0 && angle < 0.0 {
        Some(height)
    } else {
        None
    };
    if let Some(y) = new_y {
        particle.position.y = y;
        particle.last_position.y = y;
        particle.velocity = apply_drag(particle.velocity, params.drag_factor);
        wrapped += 1;
    }

    // Horizontal
    let new_x = if particle.position.x > width + margin_x && vx > 0.0 && angle.abs() < FRAC_PI_2 {
        Some(0.0)
    } else if particle.position.x < -margin_x && vx < 0.0 && angle.abs() > FRAC_PI_2 {
        Some(width)
    } else {
        None
    };
    if let Some(x) = new_x {
        particle.position.x = x;
        particle.last_position.x = x;
        particle.velocity = apply_drag(particle.velocity, params.drag_factor);
        wrapped += 1;
    }

    wrapped
}

pub fn apply_drag(velocity: Vector, drag_factor: f32) -> Vector {
    velocity.scale(drag_factor)
}

// v += v * (-k * |v|^2)
pub fn apply_damping(velocity: Vector, coefficient: f32) -> Vector {
    let speed_sq = velocity.magnitude().powi(2);
    velocity + velocity.scale(-coefficient * speed_sq)
}
