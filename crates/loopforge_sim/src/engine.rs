// SPDX-License-Identifier: MIT OR Apache-2.0
//! The particle system: pool, clock, and the fixed tick pipeline.

use crate::particle::Particle;
use loopforge_graph::config::{
    BehaviorConfig, BehaviorTrack, EmitterConfig, EmitterShape, Falloff, FieldDirection,
    ForceFieldConfig, Range, RendererConfig,
};
use loopforge_graph::math::Vec2;
use loopforge_graph::node::{Node, NodeId, NodeKind};
use loopforge_graph::store::{GraphError, GraphStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Default pool cap
const DEFAULT_MAX_PARTICLES: usize = 10_000;

/// Stateful particle simulator.
///
/// Owns the pool, the clock, and an embedded graph store it reads node
/// configuration from. `update` advances one fixed tick; callers gate the
/// cadence externally, there is no pause state here.
#[derive(Debug)]
pub struct ParticleSystem {
    graph: GraphStore,
    particles: Vec<Particle>,
    time: f32,
    max_particles: usize,
    rng: StdRng,
}

impl ParticleSystem {
    /// Create a system seeded from OS entropy, with the default graph: a
    /// `default_emitter` point emitter and a `default_renderer`.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a system with a deterministic random source. Two systems
    /// built with the same seed and the same graph tick identically.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut system = Self {
            graph: GraphStore::new(),
            particles: Vec::new(),
            time: 0.0,
            max_particles: DEFAULT_MAX_PARTICLES,
            rng,
        };
        system.add_node(Node::new(
            "default_emitter",
            NodeKind::Emitter(EmitterConfig::default()),
        ));
        system.add_node(Node::new(
            "default_renderer",
            NodeKind::Renderer(RendererConfig::default()),
        ));
        system
    }

    /// Insert or replace a node
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.graph.add_node(node)
    }

    /// Remove a node and its connections
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        self.graph.remove_node(id)
    }

    /// Append an edge between two existing nodes
    pub fn connect(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        socket: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.graph.connect(from, to, socket)
    }

    /// Remove exactly matching edges
    pub fn disconnect(&mut self, from: &NodeId, to: &NodeId, socket: &str) {
        self.graph.disconnect(from, to, socket);
    }

    /// The embedded graph store
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Mutable access to the embedded graph store
    pub fn graph_mut(&mut self) -> &mut GraphStore {
        &mut self.graph
    }

    /// Read-only snapshot of the live pool, for renderers and samplers
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Seconds of simulation time elapsed
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Current pool cap
    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Set the pool cap. Spawning stops while the pool is full; live
    /// particles are never evicted.
    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// A negative or non-finite `dt` is logged and skipped without touching
    /// any state. The phase order below is fixed; reordering it changes the
    /// output of every effect.
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            tracing::warn!(delta_time = dt, "ignoring update with degenerate delta time");
            return;
        }

        self.time += dt;

        self.advance_particles(dt);

        let emitters: Vec<EmitterConfig> = self.enabled_configs(|kind| match kind {
            NodeKind::Emitter(cfg) => Some(*cfg),
            _ => None,
        });
        for cfg in &emitters {
            self.spawn_from(cfg, dt);
        }

        let fields: Vec<ForceFieldConfig> = self.enabled_configs(|kind| match kind {
            NodeKind::ForceField(cfg) => Some(*cfg),
            _ => None,
        });
        for cfg in &fields {
            self.apply_force_field(cfg);
        }

        let behaviors: Vec<BehaviorConfig> = self.enabled_configs(|kind| match kind {
            NodeKind::Behavior(cfg) => Some(cfg.clone()),
            _ => None,
        });
        for cfg in &behaviors {
            self.apply_behaviors(cfg);
        }
    }

    fn enabled_configs<T>(&self, select: impl Fn(&NodeKind) -> Option<T>) -> Vec<T> {
        self.graph
            .nodes()
            .filter(|node| node.enabled)
            .filter_map(|node| select(&node.kind))
            .collect()
    }

    fn advance_particles(&mut self, dt: f32) {
        self.particles.retain_mut(|p| {
            p.life -= dt;
            if p.life <= 0.0 {
                return false;
            }
            p.velocity += p.acceleration * dt;
            p.position += p.velocity * dt;
            p.rotation += p.rotation_speed * dt;
            p.age += dt;
            true
        });
    }

    fn spawn_from(&mut self, emitter: &EmitterConfig, dt: f32) {
        let count = if emitter.burst_mode {
            // Fires on the tick that crosses an interval boundary.
            if self.time % emitter.burst_interval < dt {
                emitter.burst_count as usize
            } else {
                0
            }
        } else {
            (emitter.spawn_rate * dt).floor() as usize
        };

        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                break;
            }
            let particle = self.make_particle(emitter);
            self.particles.push(particle);
        }
    }

    fn make_particle(&mut self, emitter: &EmitterConfig) -> Particle {
        let props = &emitter.initial;
        let angle = self.sample(props.direction_deg).to_radians();
        let speed = self.sample(props.speed);

        Particle {
            position: self.spawn_position(emitter),
            velocity: Vec2::new(angle.cos() * speed, angle.sin() * speed),
            acceleration: Vec2::zero(),
            scale: self.sample(props.size),
            rotation: self.sample(props.rotation),
            rotation_speed: self.sample(props.spin),
            color: props.color,
            alpha: props.alpha,
            life: self.sample(props.life),
            age: 0.0,
        }
    }

    fn spawn_position(&mut self, emitter: &EmitterConfig) -> Vec2 {
        match emitter.shape {
            EmitterShape::Point => emitter.position,
            EmitterShape::Circle { radius } => {
                // Angle-and-radius draw, denser toward the center on purpose.
                let angle = self.rng.random::<f32>() * TAU;
                let r = self.rng.random::<f32>() * radius;
                emitter.position + Vec2::new(angle.cos() * r, angle.sin() * r)
            }
            EmitterShape::Rectangle { width, height } => {
                let dx = (self.rng.random::<f32>() - 0.5) * width;
                let dy = (self.rng.random::<f32>() - 0.5) * height;
                emitter.position + Vec2::new(dx, dy)
            }
            EmitterShape::Line { length, angle_deg } => {
                let angle = angle_deg.to_radians();
                let t = self.rng.random::<f32>();
                emitter.position + Vec2::new(angle.cos() * length * t, angle.sin() * length * t)
            }
        }
    }

    fn sample(&mut self, range: Range) -> f32 {
        range.min + self.rng.random::<f32>() * (range.max - range.min)
    }

    fn apply_force_field(&mut self, field: &ForceFieldConfig) {
        let radius = if field.radius == 0.0 { 1.0 } else { field.radius };

        for p in &mut self.particles {
            let delta = field.position - p.position;
            let dist = delta.length();
            if dist == 0.0 {
                continue;
            }

            let mut force = field.strength;
            match field.falloff {
                Falloff::None => {}
                Falloff::Linear => force *= 1.0 - dist / radius,
                Falloff::Quadratic => force *= 1.0 - (dist * dist) / (radius * radius),
            }
            if force <= 0.0 {
                continue;
            }

            let inward = delta * (1.0 / dist);
            let direction = match field.direction {
                FieldDirection::Inward => inward,
                FieldDirection::Outward => -inward,
                FieldDirection::Clockwise => Vec2::new(-inward.y, inward.x),
                FieldDirection::Counterclockwise => Vec2::new(inward.y, -inward.x),
                FieldDirection::Custom { angle_deg } => {
                    let angle = angle_deg.to_radians();
                    Vec2::new(angle.cos(), angle.sin())
                }
            };

            // Impulse: added to velocity once per tick, not integrated.
            p.velocity += direction * force;
        }
    }

    fn apply_behaviors(&mut self, behavior: &BehaviorConfig) {
        for p in &mut self.particles {
            let t = p.lifetime_fraction();
            for track in &behavior.tracks {
                match track {
                    BehaviorTrack::Color(colors) if !colors.is_empty() => {
                        p.color = colors[Self::track_index(t, colors.len())];
                    }
                    BehaviorTrack::Scale(sizes) if !sizes.is_empty() => {
                        p.scale = sizes[Self::track_index(t, sizes.len())];
                    }
                    BehaviorTrack::Alpha(alphas) if !alphas.is_empty() => {
                        p.alpha = alphas[Self::track_index(t, alphas.len())];
                    }
                    // Rotation and velocity tracks are declared carriers
                    // with no tick effect; empty tracks have nothing to
                    // assign.
                    _ => {}
                }
            }
        }
    }

    fn track_index(t: f32, len: usize) -> usize {
        (((t * len as f32).floor()) as usize).min(len - 1)
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}
