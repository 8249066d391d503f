// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the effect graph.

use crate::config::{
    BehaviorConfig, EmitterConfig, ForceFieldConfig, ParticleConfig, RendererConfig,
    TransformConfig,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node.
///
/// Ids are caller-supplied strings; the store keys nodes by them and
/// re-adding an id replaces the previous node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create an id from a name
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random id for callers that do not care about the name
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Node type discriminant, used by the wiring rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Spawns particles
    Emitter,
    /// Adds velocity to particles inside its influence
    ForceField,
    /// Rewrites particle properties over their lifetime
    Behavior,
    /// Draw configuration consumed by the rendering backend
    Renderer,
    /// Base kinematics for preview data flow
    Particle,
    /// Composable translate/scale/rotate/skew for preview data flow
    Transform,
    /// Collects preview payloads
    Output,
}

impl NodeType {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Emitter => "Emitter",
            Self::ForceField => "Force Field",
            Self::Behavior => "Behavior",
            Self::Renderer => "Renderer",
            Self::Particle => "Particle",
            Self::Transform => "Transform",
            Self::Output => "Output",
        }
    }
}

/// Node kind with its type-specific configuration payload.
///
/// The tick pipeline and the preview data flow both dispatch by matching on
/// this variant; there is no stringly-typed payload anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Emitter configuration
    Emitter(EmitterConfig),
    /// Force field configuration
    ForceField(ForceFieldConfig),
    /// Behavior track configuration
    Behavior(BehaviorConfig),
    /// Renderer configuration
    Renderer(RendererConfig),
    /// Particle base kinematics
    Particle(ParticleConfig),
    /// Transform configuration
    Transform(TransformConfig),
    /// Output collector (no configuration)
    Output,
}

impl NodeKind {
    /// The type discriminant for this kind
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Emitter(_) => NodeType::Emitter,
            Self::ForceField(_) => NodeType::ForceField,
            Self::Behavior(_) => NodeType::Behavior,
            Self::Renderer(_) => NodeType::Renderer,
            Self::Particle(_) => NodeType::Particle,
            Self::Transform(_) => NodeType::Transform,
            Self::Output => NodeType::Output,
        }
    }
}

/// A node in the effect graph.
///
/// Configuration is a value: editing a node means building a new `Node` with
/// the same id and re-adding it to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id
    pub id: NodeId,
    /// Disabled nodes are skipped by the tick pipeline
    pub enabled: bool,
    /// Type-specific configuration
    pub kind: NodeKind,
}

impl Node {
    /// Create an enabled node
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            kind,
        }
    }

    /// Set the enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The type discriminant for this node
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }
}
