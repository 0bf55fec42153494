/*
 * Colour Module
 *
 * Particle colours are stored as six lowercase hex digits without the
 * leading '#', e.g. "ff9a7c". This module parses them, converts them to
 * nannou colours for drawing, and generates the random light tints the
 * orbiting particles are given at start-up.
 */

use std::fmt;
use std::str::FromStr;

use nannou::color::{rgba, Rgba};
use rand::Rng;
use thiserror::Error;

// Digits used for the non-saturated channels; keeps every tint light
const LIGHT_DIGITS: [char; 10] = ['6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColourError {
    #[error("expected 6 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("'{0}' is not a hex digit")]
    InvalidDigit(char),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Colour(String);

impl Colour {
    pub fn parse(text: &str) -> Result<Self, ColourError> {
        let count = text.chars().count();
        if count != 6 {
            return Err(ColourError::InvalidLength(count));
        }
        if let Some(bad) = text.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColourError::InvalidDigit(bad));
        }
        Ok(Self(text.to_ascii_lowercase()))
    }

    pub fn white() -> Self {
        Self("ffffff".to_owned())
    }

    /// A random light tint: exactly one channel is saturated to `ff`, the
    /// other digits are drawn from the upper half of the hex range.
    pub fn random_light<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut text = String::with_capacity(6);
        let mut saturated = false;

        for channel in 0..3 {
            // Each channel gets a one-in-four chance; the last one is forced
            if !saturated && (rng.gen_range(0..4) == 1 || channel == 2) {
                text.push_str("ff");
                saturated = true;
                continue;
            }
            for _ in 0..2 {
                text.push(LIGHT_DIGITS[rng.gen_range(0..LIGHT_DIGITS.len())]);
            }
        }

        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn components(&self) -> [u8; 3] {
        let mut out = [0u8; 3];
        for (i, byte) in out.iter_mut().enumerate() {
            // Validated on construction, so the fallback is unreachable
            *byte = u8::from_str_radix(&self.0[i * 2..i * 2 + 2], 16).unwrap_or(0);
        }
        out
    }

    pub fn to_rgba(&self, alpha: f32) -> Rgba {
        let [r, g, b] = self.components();
        rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            alpha,
        )
    }
}

impl FromStr for Colour {
    type Err = ColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::parse(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
