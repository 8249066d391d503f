// SPDX-License-Identifier: MIT OR Apache-2.0
//! The four-phase bake pipeline.

use crate::keyframe::{Interpolation, KeyFrame};
use loopforge_graph::math::{Rgba, Vec2};
use loopforge_sim::Particle;
use serde::{Deserialize, Serialize};

/// Settings for one optimization run. Immutable once the optimizer is
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopSettings {
    /// Loop duration in seconds
    pub duration: f32,
    /// Sampling rate in frames per second
    pub frame_rate: f32,
    /// Maximum deviation from linear interpolation a pruned keyframe may
    /// have, per tracked field
    pub tolerance: f32,
}

impl LoopSettings {
    /// Create settings
    pub fn new(duration: f32, frame_rate: f32, tolerance: f32) -> Self {
        Self {
            duration,
            frame_rate,
            tolerance,
        }
    }
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            duration: 1.0,
            frame_rate: 60.0,
            tolerance: 0.001,
        }
    }
}

/// Offline pipeline that bakes simulated motion into a looping track.
///
/// The simulation is a black box behind the stepping function handed to
/// [`pre_warm`](Self::pre_warm); the optimizer keeps only the last particle
/// snapshot it returned. Phases do not check that earlier phases ran -
/// calling them out of order operates on empty or stale buffers. The
/// documented order is pre-warm, sample, optimize, enforce;
/// [`bake`](Self::bake) runs all four.
#[derive(Debug, Clone, Default)]
pub struct LoopOptimizer {
    settings: LoopSettings,
    states: Vec<Particle>,
    keyframes: Vec<KeyFrame>,
}

impl LoopOptimizer {
    /// Create an optimizer for one run
    pub fn new(settings: LoopSettings) -> Self {
        Self {
            settings,
            states: Vec::new(),
            keyframes: Vec::new(),
        }
    }

    /// Step the simulation for `duration` seconds at the configured frame
    /// rate so transient spawn effects decay, keeping the final snapshot.
    pub fn pre_warm<F>(&mut self, duration: f32, mut step: F)
    where
        F: FnMut(f32) -> Vec<Particle>,
    {
        let steps = (duration * self.settings.frame_rate).ceil() as usize;
        let dt = 1.0 / self.settings.frame_rate;
        for _ in 0..steps {
            self.states = step(dt);
        }
    }

    /// Sample the aggregate particle state into keyframes, one per frame
    /// over the loop duration, both endpoints included.
    pub fn sample_transforms(&mut self) {
        let total_frames = (self.settings.duration * self.settings.frame_rate).ceil() as usize;
        let average = self.average_state();

        self.keyframes.clear();
        for frame in 0..=total_frames {
            self.keyframes.push(KeyFrame {
                time: frame as f32 / self.settings.frame_rate,
                ..average
            });
        }
    }

    /// Drop interior keyframes whose every tracked field lies within
    /// tolerance of the value linearly interpolated between its original
    /// neighbors.
    ///
    /// One left-to-right pass against the pre-prune neighbors: straight
    /// runs collapse, but this is not an iterative simplification. The
    /// first and last keyframes are always kept.
    pub fn optimize_keyframes(&mut self) {
        if self.keyframes.len() < 3 {
            return;
        }

        let before = self.keyframes.len();
        let mut kept = vec![self.keyframes[0]];
        for i in 1..self.keyframes.len() - 1 {
            let (prev, curr, next) = (
                &self.keyframes[i - 1],
                &self.keyframes[i],
                &self.keyframes[i + 1],
            );
            if !self.is_redundant(prev, curr, next) {
                kept.push(*curr);
            }
        }
        kept.push(self.keyframes[before - 1]);

        if kept.len() < before {
            tracing::debug!(
                dropped = before - kept.len(),
                kept = kept.len(),
                "pruned keyframes predictable by linear interpolation"
            );
        }
        self.keyframes = kept;
    }

    /// Replace the final keyframe's values with the first keyframe's,
    /// keeping its time at the configured duration, so playback restarts
    /// without a visible seam.
    pub fn enforce_loop_continuity(&mut self) {
        let Some(first) = self.keyframes.first().copied() else {
            return;
        };
        let duration = self.settings.duration;
        if let Some(last) = self.keyframes.last_mut() {
            *last = KeyFrame {
                time: duration,
                ..first
            };
        }
    }

    /// Run the full pipeline: pre-warm, sample, optimize, enforce.
    pub fn bake<F>(&mut self, pre_warm_duration: f32, step: F) -> &[KeyFrame]
    where
        F: FnMut(f32) -> Vec<Particle>,
    {
        self.pre_warm(pre_warm_duration, step);
        self.sample_transforms();
        self.optimize_keyframes();
        self.enforce_loop_continuity();
        self.keyframes()
    }

    /// The current keyframe track
    pub fn keyframes(&self) -> &[KeyFrame] {
        &self.keyframes
    }

    /// A copy of the run settings
    pub fn settings(&self) -> LoopSettings {
        self.settings
    }

    /// Component-wise mean over the stored snapshot, or the documented
    /// default state when no particles are stored.
    fn average_state(&self) -> KeyFrame {
        if self.states.is_empty() {
            return KeyFrame::default();
        }

        let mut position = Vec2::zero();
        let mut scale = 0.0;
        let mut rotation = 0.0;
        let mut color = Rgba::new(0.0, 0.0, 0.0, 0.0);
        let mut alpha = 0.0;
        for p in &self.states {
            position += p.position;
            scale += p.scale;
            rotation += p.rotation;
            color.r += p.color.r;
            color.g += p.color.g;
            color.b += p.color.b;
            color.a += p.color.a;
            alpha += p.alpha;
        }

        let inv = 1.0 / self.states.len() as f32;
        KeyFrame {
            time: 0.0,
            position: position * inv,
            scale: Vec2::new(scale * inv, scale * inv),
            rotation: rotation * inv,
            color: Rgba::new(color.r * inv, color.g * inv, color.b * inv, color.a * inv),
            alpha: alpha * inv,
        }
    }

    fn is_redundant(&self, prev: &KeyFrame, curr: &KeyFrame, next: &KeyFrame) -> bool {
        let t = (curr.time - prev.time) / (next.time - prev.time);
        let tolerance = self.settings.tolerance;

        let position = Interpolation::lerp_vec2(prev.position, next.position, t);
        let scale = Interpolation::lerp_vec2(prev.scale, next.scale, t);
        let rotation = Interpolation::lerp(prev.rotation, next.rotation, t);
        let color = Interpolation::lerp_rgba(prev.color, next.color, t);
        let alpha = Interpolation::lerp(prev.alpha, next.alpha, t);

        let close = |a: f32, b: f32| (a - b).abs() <= tolerance;
        close(curr.position.x, position.x)
            && close(curr.position.y, position.y)
            && close(curr.scale.x, scale.x)
            && close(curr.scale.y, scale.y)
            && close(curr.rotation, rotation)
            && close(curr.color.r, color.r)
            && close(curr.color.g, color.g)
            && close(curr.color.b, color.b)
            && close(curr.color.a, color.a)
            && close(curr.alpha, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopforge_graph::config::{EmitterConfig, FieldDirection, ForceFieldConfig};
    use loopforge_graph::node::{Node, NodeKind};
    use loopforge_sim::ParticleSystem;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn still_particle() -> Particle {
        Particle {
            position: Vec2::new(2.0, 4.0),
            scale: 3.0,
            rotation: 90.0,
            alpha: 0.5,
            ..Particle::default()
        }
    }

    #[test]
    fn test_pre_warm_step_count() {
        let mut optimizer = LoopOptimizer::new(LoopSettings::default());
        let mut calls = 0;
        optimizer.pre_warm(1.0, |dt| {
            assert!(approx(dt, 1.0 / 60.0));
            calls += 1;
            vec![still_particle()]
        });
        assert_eq!(calls, 60);
        assert_eq!(optimizer.states.len(), 1);
    }

    #[test]
    fn test_sample_produces_inclusive_frame_count() {
        let mut optimizer = LoopOptimizer::new(LoopSettings::default());
        optimizer.pre_warm(0.1, |_| vec![still_particle()]);
        optimizer.sample_transforms();

        let frames = optimizer.keyframes();
        assert_eq!(frames.len(), 61);
        assert_eq!(frames[0].time, 0.0);
        assert!(approx(frames[60].time, 1.0));
        assert!(approx(frames[30].position.x, 2.0));
        assert!(approx(frames[30].scale.y, 3.0));
    }

    #[test]
    fn test_sample_averages_the_pool() {
        let mut optimizer = LoopOptimizer::new(LoopSettings::default());
        optimizer.pre_warm(0.1, |_| {
            vec![
                Particle {
                    position: Vec2::new(0.0, 0.0),
                    scale: 1.0,
                    rotation: 0.0,
                    alpha: 1.0,
                    ..Particle::default()
                },
                Particle {
                    position: Vec2::new(4.0, 2.0),
                    scale: 3.0,
                    rotation: 90.0,
                    alpha: 0.0,
                    ..Particle::default()
                },
            ]
        });
        optimizer.sample_transforms();

        let frame = &optimizer.keyframes()[0];
        assert_eq!(frame.position, Vec2::new(2.0, 1.0));
        assert_eq!(frame.scale, Vec2::new(2.0, 2.0));
        assert_eq!(frame.rotation, 45.0);
        assert_eq!(frame.alpha, 0.5);
    }

    #[test]
    fn test_sample_with_empty_pool_uses_default_state() {
        let mut optimizer = LoopOptimizer::new(LoopSettings::default());
        optimizer.sample_transforms();

        let frame = &optimizer.keyframes()[0];
        assert!(frame.same_values(&KeyFrame::default()));
    }

    #[test]
    fn test_optimize_collapses_linear_motion() {
        let mut optimizer = LoopOptimizer::new(LoopSettings::default());
        optimizer.keyframes = (0..=60)
            .map(|i| KeyFrame {
                time: i as f32 / 60.0,
                position: Vec2::new(i as f32, i as f32),
                rotation: i as f32,
                ..KeyFrame::default()
            })
            .collect();

        optimizer.optimize_keyframes();

        let frames = optimizer.keyframes();
        assert!(frames.len() < 61);
        assert_eq!(frames[0].time, 0.0);
        assert!(approx(frames[frames.len() - 1].time, 1.0));
        assert_eq!(frames[frames.len() - 1].position, Vec2::new(60.0, 60.0));
    }

    #[test]
    fn test_optimize_keeps_deviating_keyframes() {
        let mut optimizer = LoopOptimizer::new(LoopSettings::default());
        let mut frames: Vec<KeyFrame> = (0..=6)
            .map(|i| KeyFrame {
                time: i as f32 / 6.0,
                position: Vec2::new(i as f32, 0.0),
                ..KeyFrame::default()
            })
            .collect();
        frames[3].position.y = 0.5;
        optimizer.keyframes = frames;

        optimizer.optimize_keyframes();

        // The bump survives along with both keyframes whose interpolation
        // window it bends; the straight stretches away from it collapse.
        let times: Vec<f32> = optimizer.keyframes().iter().map(|k| k.time).collect();
        let expected: Vec<f32> = [0, 2, 3, 4, 6].iter().map(|&i| i as f32 / 6.0).collect();
        assert_eq!(times, expected);
    }

    #[test]
    fn test_optimize_on_short_tracks_is_a_no_op() {
        let mut optimizer = LoopOptimizer::new(LoopSettings::default());
        optimizer.optimize_keyframes();
        assert!(optimizer.keyframes().is_empty());

        optimizer.keyframes = vec![KeyFrame::default(), KeyFrame::default()];
        optimizer.optimize_keyframes();
        assert_eq!(optimizer.keyframes().len(), 2);
    }

    #[test]
    fn test_enforce_closes_the_loop() {
        let mut optimizer = LoopOptimizer::new(LoopSettings::default());
        let first = KeyFrame::default();
        let last = KeyFrame {
            time: 1.0,
            position: Vec2::new(10.0, 10.0),
            scale: Vec2::new(2.0, 2.0),
            rotation: 45.0,
            color: Rgba::new(0.0, 0.0, 0.0, 1.0),
            alpha: 0.5,
        };
        optimizer.keyframes = vec![first, last];

        optimizer.enforce_loop_continuity();

        let frames = optimizer.keyframes();
        assert!(frames[1].same_values(&first));
        assert_eq!(frames[1].time, 1.0);
    }

    #[test]
    fn test_enforce_on_empty_track_is_a_no_op() {
        let mut optimizer = LoopOptimizer::new(LoopSettings::default());
        optimizer.enforce_loop_continuity();
        assert!(optimizer.keyframes().is_empty());
    }

    #[test]
    fn test_settings_accessor_returns_copy() {
        let optimizer = LoopOptimizer::new(LoopSettings::new(2.0, 30.0, 0.01));
        let mut copy = optimizer.settings();
        copy.duration = 99.0;
        assert_eq!(copy.duration, 99.0);
        assert_eq!(optimizer.settings().duration, 2.0);
    }

    #[test]
    fn test_full_pipeline_produces_a_closed_loop() {
        let mut system = ParticleSystem::with_seed(11);
        system.add_node(Node::new(
            "orbit_emitter",
            NodeKind::Emitter(EmitterConfig {
                position: Vec2::new(400.0, 300.0),
                spawn_rate: 60.0,
                ..EmitterConfig::default()
            }),
        ));
        system.add_node(Node::new(
            "orbit_force",
            NodeKind::ForceField(ForceFieldConfig {
                position: Vec2::new(400.0, 300.0),
                strength: 2.0,
                direction: FieldDirection::Clockwise,
                ..Default::default()
            }),
        ));

        let settings = LoopSettings::default();
        let mut optimizer = LoopOptimizer::new(settings);
        let frames = optimizer.bake(0.5, |dt| {
            system.update(dt);
            system.particles().to_vec()
        });

        assert!(frames.len() >= 2);
        assert_eq!(frames[0].time, 0.0);
        assert!(approx(frames[frames.len() - 1].time, settings.duration));
        assert!(frames[0].same_values(&frames[frames.len() - 1]));
        for pair in frames.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
    }
}
