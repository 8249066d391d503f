// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph model for LoopForge.
//!
//! This crate provides the authoring-side graph that particle effects are
//! assembled from:
//! - Typed node configuration records
//! - Connections with named sockets
//! - A static wiring rule table
//! - A pure data-flow helper for live property preview
//!
//! ## Architecture
//!
//! Nodes are value records keyed by string id; editing a node replaces its
//! configuration wholesale. Connections are bookkeeping between existing
//! nodes and carry no evaluation semantics of their own - the wiring rules
//! and the preview data flow are pure functions layered on top.

pub mod config;
pub mod connection;
pub mod dataflow;
pub mod math;
pub mod node;
pub mod rules;
pub mod store;

pub use config::{
    BehaviorConfig, BehaviorTrack, BlendMode, ConfigError, EmitterConfig, EmitterShape, Falloff,
    FieldDirection, ForceFieldConfig, InitialProperties, Material, ParticleConfig, Range,
    RenderMode, RendererConfig, SortMode, TransformConfig,
};
pub use connection::Connection;
pub use dataflow::{node_inputs, process_node_data, DataLink, NodeData, PropertyBag, SocketInput};
pub use math::{Rgba, Vec2};
pub use node::{Node, NodeId, NodeKind, NodeType};
pub use rules::{validate_connection, ConnectionRule, CONNECTION_RULES};
pub use store::{GraphError, GraphStore};
