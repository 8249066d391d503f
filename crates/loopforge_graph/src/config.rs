// SPDX-License-Identifier: MIT OR Apache-2.0
//! Type-specific node configuration payloads.

use crate::math::{Rgba, Vec2};
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range a spawn property is drawn from.
///
/// Degenerate ranges (`min == max`) yield the shared value; inverted ranges
/// are tolerated and sample toward `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
}

impl Range {
    /// Create a range
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A range that always yields `value`
    pub fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFinite(field));
        }
        Ok(())
    }
}

/// Spawn region for an emitter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum EmitterShape {
    /// All particles start at the emitter position
    #[default]
    Point,
    /// Uniform angle and radius inside a disk. The radial draw is linear,
    /// which biases density toward the center; existing effects depend on
    /// that distribution, so it must not be replaced with an area-uniform
    /// draw.
    Circle {
        /// Disk radius
        radius: f32,
    },
    /// Uniform point in a centered box
    Rectangle {
        /// Box width
        width: f32,
        /// Box height
        height: f32,
    },
    /// Uniform point along a segment starting at the emitter position
    Line {
        /// Segment length
        length: f32,
        /// Segment angle in degrees
        angle_deg: f32,
    },
}

/// Per-particle properties drawn at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialProperties {
    /// Lifetime in seconds
    pub life: Range,
    /// Initial speed
    pub speed: Range,
    /// Launch direction in degrees
    pub direction_deg: Range,
    /// Initial scale
    pub size: Range,
    /// Initial rotation
    pub rotation: Range,
    /// Rotation speed in degrees per second
    pub spin: Range,
    /// Initial color, copied verbatim
    pub color: Rgba,
    /// Initial alpha, copied verbatim
    pub alpha: f32,
}

impl Default for InitialProperties {
    fn default() -> Self {
        Self {
            life: Range::new(1.0, 2.0),
            speed: Range::new(1.0, 2.0),
            direction_deg: Range::new(0.0, 360.0),
            size: Range::fixed(1.0),
            rotation: Range::fixed(0.0),
            spin: Range::fixed(0.0),
            color: Rgba::WHITE,
            alpha: 1.0,
        }
    }
}

/// Emitter node configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Emitter position
    pub position: Vec2,
    /// Particles per second in continuous mode
    pub spawn_rate: f32,
    /// Emit in fixed-size bursts instead of continuously
    pub burst_mode: bool,
    /// Particles per burst
    pub burst_count: u32,
    /// Seconds between bursts
    pub burst_interval: f32,
    /// Spawn region
    pub shape: EmitterShape,
    /// Spawn-time property ranges
    pub initial: InitialProperties,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            spawn_rate: 10.0,
            burst_mode: false,
            burst_count: 10,
            burst_interval: 1.0,
            shape: EmitterShape::Point,
            initial: InitialProperties::default(),
        }
    }
}

impl EmitterConfig {
    /// Check the config for values the engine cannot sample from.
    ///
    /// Used by the preview data flow before an edited config is accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.position.is_finite() {
            return Err(ConfigError::NonFinite("position"));
        }
        if !self.spawn_rate.is_finite() {
            return Err(ConfigError::NonFinite("spawn_rate"));
        }
        if self.spawn_rate < 0.0 {
            return Err(ConfigError::Negative("spawn_rate"));
        }
        self.initial.life.check("life")?;
        if self.initial.life.min <= 0.0 {
            return Err(ConfigError::NotPositive("life.min"));
        }
        self.initial.speed.check("speed")?;
        self.initial.direction_deg.check("direction_deg")?;
        self.initial.size.check("size")?;
        self.initial.rotation.check("rotation")?;
        self.initial.spin.check("spin")?;
        Ok(())
    }
}

/// Distance falloff applied to a force field's strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Falloff {
    /// Full strength everywhere
    #[default]
    None,
    /// `1 - dist / radius`; negative beyond the radius, where the impulse
    /// is skipped
    Linear,
    /// `1 - (dist / radius)^2`, same skip rule
    Quadratic,
}

/// Direction the force impulse is applied in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum FieldDirection {
    /// Toward the field position
    #[default]
    Inward,
    /// Away from the field position
    Outward,
    /// Perpendicular, orbiting clockwise
    Clockwise,
    /// Perpendicular, orbiting counterclockwise
    Counterclockwise,
    /// A fixed world-space angle, ignoring the particle's offset
    Custom {
        /// Impulse angle in degrees
        angle_deg: f32,
    },
}

/// Force field node configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceFieldConfig {
    /// Field position
    pub position: Vec2,
    /// Impulse magnitude before falloff
    pub strength: f32,
    /// Distance falloff
    pub falloff: Falloff,
    /// Falloff radius; zero falls back to 1
    pub radius: f32,
    /// Impulse direction
    pub direction: FieldDirection,
}

impl Default for ForceFieldConfig {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            strength: 1.0,
            falloff: Falloff::None,
            radius: 1.0,
            direction: FieldDirection::Inward,
        }
    }
}

/// One discrete per-lifetime value track.
///
/// A track of length `n` divides a particle's lifetime fraction into `n`
/// equal buckets and assigns the bucket value directly; there is no
/// interpolation between entries. Rotation and velocity tracks are accepted
/// as data but have no tick effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BehaviorTrack {
    /// Overwrites particle color
    Color(Vec<Rgba>),
    /// Overwrites particle scale
    Scale(Vec<f32>),
    /// Overwrites particle alpha
    Alpha(Vec<f32>),
    /// Declared but inert
    Rotation(Vec<f32>),
    /// Declared but inert
    Velocity(Vec<f32>),
}

/// Behavior node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BehaviorConfig {
    /// Tracks applied to every particle each tick
    pub tracks: Vec<BehaviorTrack>,
}

/// Blend mode hint for the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BlendMode {
    /// Standard alpha blending
    #[default]
    Normal,
    /// Additive blending
    Additive,
    /// Multiply blending
    Multiply,
    /// Screen blending
    Screen,
}

/// Draw-order hint for the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortMode {
    /// Pool order
    #[default]
    None,
    /// Sorted by distance to the camera
    ByDistance,
    /// Sorted by particle age
    ByAge,
}

/// How particles are projected by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderMode {
    /// Flat 2D quads
    #[default]
    Flat,
    /// Camera-facing quads
    Billboard,
    /// Quads stretched along velocity
    Stretched,
}

/// Particle material for the rendering backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Material {
    /// One textured quad per particle
    #[default]
    Sprite,
    /// Trail geometry following the particle
    Trail {
        /// Trail length in seconds
        length: f32,
        /// Trail segment count
        segments: u32,
        /// Fade the trail tail out
        fade_out: bool,
        /// Portion of the trail the fade covers
        fade_out_length: f32,
    },
    /// Connected ribbon across the pool
    Ribbon,
}

/// Renderer node configuration.
///
/// Pure draw data: the engine stores and hands it to the rendering backend
/// untouched, it never affects the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RendererConfig {
    /// Blend mode
    pub blend_mode: BlendMode,
    /// Texture reference, backend-resolved
    pub texture: Option<String>,
    /// Particle material
    pub material: Material,
    /// Draw order
    pub sort_mode: SortMode,
    /// Projection mode
    pub render_mode: RenderMode,
}

/// Transform node configuration for preview data flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Translation added to upstream position
    pub translate: Vec2,
    /// Scale multiplied onto upstream scale
    pub scale: Vec2,
    /// Rotation in degrees added to upstream rotation
    pub rotate: f32,
    /// Skew added to upstream skew
    pub skew: Vec2,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            translate: Vec2::zero(),
            scale: Vec2::new(1.0, 1.0),
            rotate: 0.0,
            skew: Vec2::zero(),
        }
    }
}

impl TransformConfig {
    /// Check every numeric field is finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.translate.is_finite() {
            return Err(ConfigError::NonFinite("translate"));
        }
        if !self.scale.is_finite() {
            return Err(ConfigError::NonFinite("scale"));
        }
        if !self.rotate.is_finite() {
            return Err(ConfigError::NonFinite("rotate"));
        }
        if !self.skew.is_finite() {
            return Err(ConfigError::NonFinite("skew"));
        }
        Ok(())
    }
}

/// Particle node configuration: base kinematics for preview data flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Base position
    pub position: Vec2,
    /// Base scale
    pub scale: Vec2,
    /// Base rotation in degrees
    pub rotation: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl ParticleConfig {
    /// Check every numeric field is finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.position.is_finite() {
            return Err(ConfigError::NonFinite("position"));
        }
        if !self.scale.is_finite() {
            return Err(ConfigError::NonFinite("scale"));
        }
        if !self.rotation.is_finite() {
            return Err(ConfigError::NonFinite("rotation"));
        }
        Ok(())
    }
}

/// Error for configuration that cannot be used
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A numeric field holds NaN or an infinity
    #[error("field `{0}` is not a finite number")]
    NonFinite(&'static str),

    /// A field that must not be negative is negative
    #[error("field `{0}` must not be negative")]
    Negative(&'static str),

    /// A field that must be positive is zero or negative
    #[error("field `{0}` must be positive")]
    NotPositive(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_emitter_validates() {
        assert_eq!(EmitterConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_emitter_rejects_bad_fields() {
        let cfg = EmitterConfig {
            spawn_rate: -1.0,
            ..EmitterConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Negative("spawn_rate")));

        let cfg = EmitterConfig {
            position: Vec2::new(f32::NAN, 0.0),
            ..EmitterConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NonFinite("position")));

        let cfg = EmitterConfig {
            initial: InitialProperties {
                life: Range::new(0.0, 1.0),
                ..InitialProperties::default()
            },
            ..EmitterConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NotPositive("life.min")));
    }

    #[test]
    fn test_transform_rejects_non_finite() {
        let cfg = TransformConfig {
            skew: Vec2::new(0.0, f32::INFINITY),
            ..TransformConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NonFinite("skew")));
    }

    #[test]
    fn test_config_serialization() {
        let cfg = EmitterConfig {
            shape: EmitterShape::Circle { radius: 4.0 },
            ..EmitterConfig::default()
        };
        let ron = ron::to_string(&cfg).unwrap();
        let loaded: EmitterConfig = ron::from_str(&ron).unwrap();
        assert_eq!(loaded, cfg);
    }
}
