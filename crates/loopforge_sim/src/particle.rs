// SPDX-License-Identifier: MIT OR Apache-2.0
//! Particle state.

use loopforge_graph::math::{Rgba, Vec2};
use serde::{Deserialize, Serialize};

/// One live particle.
///
/// Created by an emitter, mutated every tick, removed from the pool the
/// tick its remaining life reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// World position
    pub position: Vec2,
    /// Velocity in units per second
    pub velocity: Vec2,
    /// Acceleration in units per second squared
    pub acceleration: Vec2,
    /// Uniform scale
    pub scale: f32,
    /// Rotation in degrees
    pub rotation: f32,
    /// Rotation speed in degrees per second
    pub rotation_speed: f32,
    /// Color with components in `[0, 1]`
    pub color: Rgba,
    /// Opacity
    pub alpha: f32,
    /// Remaining life in seconds
    pub life: f32,
    /// Seconds since spawn
    pub age: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            velocity: Vec2::zero(),
            acceleration: Vec2::zero(),
            scale: 1.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            color: Rgba::WHITE,
            alpha: 1.0,
            life: 1.0,
            age: 0.0,
        }
    }
}

impl Particle {
    /// Fraction of the configured lifetime already lived, as the behavior
    /// phase sees it: age over *remaining* life. Grows past 1 as a particle
    /// nears death.
    pub fn lifetime_fraction(&self) -> f32 {
        self.age / self.life
    }
}
