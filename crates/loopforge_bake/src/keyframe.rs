// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions for the baked track.

use loopforge_graph::math::{Rgba, Vec2};
use serde::{Deserialize, Serialize};

/// A sampled instant of the aggregate animation.
///
/// The track is ordered by non-decreasing time. After the full bake
/// pipeline the first and last keyframes agree in every field except
/// `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyFrame {
    /// Seconds from the start of the loop
    pub time: f32,
    /// Aggregate position
    pub position: Vec2,
    /// Aggregate scale; the sampler broadcasts the scalar particle scale
    /// to both axes
    pub scale: Vec2,
    /// Aggregate rotation in degrees
    pub rotation: f32,
    /// Aggregate color
    pub color: Rgba,
    /// Aggregate alpha
    pub alpha: f32,
}

impl Default for KeyFrame {
    /// The documented stand-in for a sampling instant with zero particles:
    /// identity position, unit scale, no rotation, opaque white.
    fn default() -> Self {
        Self {
            time: 0.0,
            position: Vec2::zero(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            color: Rgba::WHITE,
            alpha: 1.0,
        }
    }
}

impl KeyFrame {
    /// Compare every field except `time`
    pub fn same_values(&self, other: &KeyFrame) -> bool {
        self.position == other.position
            && self.scale == other.scale
            && self.rotation == other.rotation
            && self.color == other.color
            && self.alpha == other.alpha
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Component-wise linear interpolation between two vectors
    pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
        Vec2::new(Self::lerp(a.x, b.x, t), Self::lerp(a.y, b.y, t))
    }

    /// Channel-wise linear interpolation between two colors
    pub fn lerp_rgba(a: Rgba, b: Rgba, t: f32) -> Rgba {
        Rgba::new(
            Self::lerp(a.r, b.r, t),
            Self::lerp(a.g, b.g, t),
            Self::lerp(a.b, b.b, t),
            Self::lerp(a.a, b.a, t),
        )
    }
}
