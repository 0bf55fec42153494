/*
 * Vector Module
 *
 * A small immutable 2D vector used by the simulation. Every operation
 * returns a new value; nothing is mutated in place. Positions are in
 * surface coordinates (origin top-left, y grows downwards).
 */

use std::ops::{Add, Mul, Neg, Sub};

use nannou::prelude::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, k: f32) -> Vector {
        Vector::new(self.x * k, self.y * k)
    }

    // Componentwise square
    pub fn square(self) -> Vector {
        Vector::new(self.x * self.x, self.y * self.y)
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Vector of length one pointing the same way.
    ///
    /// A zero vector has no direction: the result carries NaN components,
    /// so callers must guard against zero magnitude themselves.
    pub fn unit(self) -> Vector {
        self.scale(1.0 / self.magnitude())
    }

    pub fn dot(self, other: Vector) -> f32 {
        self.x * other.x + self.y * other.y
    }

    // Direction angle in radians, in (-PI, PI]
    pub fn gradient(self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        // Resolves to the inherent method, not this trait method
        Vector::add(self, rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.subtract(rhs)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        self.scale(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Vector::new(v.x, v.y)
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        Vec2::new(v.x, v.y)
    }
}
