// SPDX-License-Identifier: MIT OR Apache-2.0
//! Loop optimizer for LoopForge.
//!
//! This crate turns a running particle simulation into the shippable
//! artifact: a compact keyframe track that plays back as a seamless loop.
//! The pipeline has four phases, run in order by the caller:
//! - Pre-warm the simulation so transient spawn effects settle
//! - Sample the aggregate particle state into keyframes
//! - Prune keyframes already predictable by linear interpolation
//! - Force the final keyframe to match the first
//!
//! The simulation is driven through a caller-supplied stepping function;
//! no simulation logic lives here.

pub mod keyframe;
pub mod optimizer;

pub use keyframe::{Interpolation, KeyFrame};
pub use optimizer::{LoopOptimizer, LoopSettings};
