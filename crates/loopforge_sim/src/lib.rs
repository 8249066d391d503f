// SPDX-License-Identifier: MIT OR Apache-2.0
//! Particle simulation engine for LoopForge.
//!
//! This crate owns the live particle pool and the simulation clock. Each
//! fixed tick it:
//! - Integrates and culls existing particles
//! - Spawns new particles from enabled emitter nodes
//! - Applies enabled force-field nodes
//! - Applies enabled behavior nodes
//!
//! The phase order is fixed and load-bearing: with a seeded engine two runs
//! over the same graph are identical, which the bake pipeline and the tests
//! depend on.
//!
//! Force fields and behaviors act on the entire pool regardless of graph
//! wiring; connections stay editor bookkeeping.

pub mod engine;
pub mod particle;

pub use engine::ParticleSystem;
pub use particle::Particle;
