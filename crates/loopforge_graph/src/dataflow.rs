// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pure data-flow helper for live property preview.
//!
//! The editor uses this to show the effective properties of a node as its
//! upstream wiring changes. Nothing here touches the simulation engine:
//! inputs are gathered from an edge list, outputs are recomputed from the
//! node's own configuration plus those inputs, and invalid configuration is
//! rejected before use so the previous preview state can be kept.

use crate::config::ConfigError;
use crate::math::Vec2;
use crate::node::{NodeId, NodeKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A preview edge with sockets named on both ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLink {
    /// Source node id
    pub from: NodeId,
    /// Target node id
    pub to: NodeId,
    /// Socket name on the source
    pub from_socket: String,
    /// Socket name on the target
    pub to_socket: String,
}

impl DataLink {
    /// Create a new link
    pub fn new(
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        from_socket: impl Into<String>,
        to_socket: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            from_socket: from_socket.into(),
            to_socket: to_socket.into(),
        }
    }
}

/// The property payload that flows between preview nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyBag {
    /// Accumulated position
    pub position: Vec2,
    /// Accumulated scale
    pub scale: Vec2,
    /// Accumulated rotation in degrees
    pub rotation: f32,
    /// Accumulated skew
    pub skew: Vec2,
}

impl Default for PropertyBag {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            skew: Vec2::zero(),
        }
    }
}

/// Result of processing one node's preview data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeData {
    /// No preview payload for this node kind
    Empty,
    /// A property bag flowing downstream
    Bag(PropertyBag),
    /// Payloads gathered by an output node
    Collected {
        /// Payload arriving on the `particle` socket
        particle: Option<PropertyBag>,
        /// Payload arriving on the `transform` socket
        transform: Option<PropertyBag>,
    },
}

impl NodeData {
    fn as_bag(&self) -> Option<PropertyBag> {
        match self {
            Self::Bag(bag) => Some(*bag),
            _ => None,
        }
    }
}

/// Upstream payload delivered to one input socket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SocketInput<'a> {
    /// The upstream node the payload came from
    pub node: &'a NodeId,
    /// The payload itself
    pub data: &'a NodeData,
}

/// Gather the payloads of upstream-connected nodes, keyed by the socket
/// they arrive on. Links whose source has no computed payload are skipped.
pub fn node_inputs<'a>(
    node: &NodeId,
    links: &'a [DataLink],
    data: &'a IndexMap<NodeId, NodeData>,
) -> IndexMap<String, SocketInput<'a>> {
    let mut inputs = IndexMap::new();
    for link in links.iter().filter(|l| &l.to == node) {
        if let Some(payload) = data.get(&link.from) {
            inputs.insert(
                link.to_socket.clone(),
                SocketInput {
                    node: &link.from,
                    data: payload,
                },
            );
        }
    }
    inputs
}

/// Recompute a node's effective preview payload from its own configuration
/// and its gathered inputs.
///
/// Transform nodes compose onto the upstream bag, particle nodes add the
/// transform deltas onto their base kinematics, output nodes collect. Kinds
/// without preview semantics yield [`NodeData::Empty`]. Configuration that
/// fails validation returns an error and produces no payload; the caller
/// keeps whatever it previously computed.
pub fn process_node_data(
    kind: &NodeKind,
    inputs: &IndexMap<String, SocketInput<'_>>,
) -> Result<NodeData, ConfigError> {
    let bag_on = |socket: &str| -> Option<PropertyBag> {
        inputs.get(socket).and_then(|input| input.data.as_bag())
    };

    match kind {
        NodeKind::Emitter(cfg) => {
            cfg.validate()?;
            Ok(NodeData::Bag(PropertyBag {
                position: cfg.position,
                ..PropertyBag::default()
            }))
        }
        NodeKind::Transform(cfg) => {
            cfg.validate()?;
            let upstream = bag_on("input").unwrap_or_default();
            Ok(NodeData::Bag(PropertyBag {
                position: upstream.position + cfg.translate,
                scale: Vec2::new(upstream.scale.x * cfg.scale.x, upstream.scale.y * cfg.scale.y),
                rotation: upstream.rotation + cfg.rotate,
                skew: upstream.skew + cfg.skew,
            }))
        }
        NodeKind::Particle(cfg) => {
            cfg.validate()?;
            let transform = bag_on("transform").unwrap_or_default();
            Ok(NodeData::Bag(PropertyBag {
                position: cfg.position + transform.position,
                scale: Vec2::new(
                    cfg.scale.x * transform.scale.x,
                    cfg.scale.y * transform.scale.y,
                ),
                rotation: cfg.rotation + transform.rotation,
                skew: Vec2::zero(),
            }))
        }
        NodeKind::Output => Ok(NodeData::Collected {
            particle: bag_on("particle"),
            transform: bag_on("transform"),
        }),
        NodeKind::ForceField(_) | NodeKind::Behavior(_) | NodeKind::Renderer(_) => {
            Ok(NodeData::Empty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmitterConfig, ParticleConfig, TransformConfig};

    fn computed(entries: &[(&str, NodeData)]) -> IndexMap<NodeId, NodeData> {
        entries
            .iter()
            .map(|(id, data)| (NodeId::new(*id), data.clone()))
            .collect()
    }

    #[test]
    fn test_inputs_keyed_by_target_socket() {
        let links = vec![
            DataLink::new("emitter", "warp", "output", "input"),
            DataLink::new("warp", "base", "output", "transform"),
        ];
        let data = computed(&[
            ("emitter", NodeData::Bag(PropertyBag::default())),
            ("warp", NodeData::Bag(PropertyBag::default())),
        ]);

        let inputs = node_inputs(&NodeId::new("warp"), &links, &data);
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs.get("input").unwrap().node, &NodeId::new("emitter"));

        let inputs = node_inputs(&NodeId::new("base"), &links, &data);
        assert!(inputs.contains_key("transform"));
    }

    #[test]
    fn test_missing_upstream_payload_skipped() {
        let links = vec![DataLink::new("ghost", "warp", "output", "input")];
        let data = computed(&[]);
        assert!(node_inputs(&NodeId::new("warp"), &links, &data).is_empty());
    }

    #[test]
    fn test_transform_composes_upstream() {
        let upstream = PropertyBag {
            position: Vec2::new(1.0, 2.0),
            scale: Vec2::new(2.0, 2.0),
            rotation: 10.0,
            skew: Vec2::new(0.5, 0.0),
        };
        let data = computed(&[("up", NodeData::Bag(upstream))]);
        let links = vec![DataLink::new("up", "warp", "output", "input")];
        let inputs = node_inputs(&NodeId::new("warp"), &links, &data);

        let cfg = TransformConfig {
            translate: Vec2::new(3.0, -1.0),
            scale: Vec2::new(0.5, 2.0),
            rotate: 35.0,
            skew: Vec2::new(0.0, 0.25),
        };
        let result = process_node_data(&NodeKind::Transform(cfg), &inputs).unwrap();

        assert_eq!(
            result,
            NodeData::Bag(PropertyBag {
                position: Vec2::new(4.0, 1.0),
                scale: Vec2::new(1.0, 4.0),
                rotation: 45.0,
                skew: Vec2::new(0.5, 0.25),
            })
        );
    }

    #[test]
    fn test_transform_without_input_starts_from_identity() {
        let cfg = TransformConfig {
            translate: Vec2::new(1.0, 1.0),
            ..TransformConfig::default()
        };
        let result = process_node_data(&NodeKind::Transform(cfg), &IndexMap::new()).unwrap();
        assert_eq!(
            result,
            NodeData::Bag(PropertyBag {
                position: Vec2::new(1.0, 1.0),
                ..PropertyBag::default()
            })
        );
    }

    #[test]
    fn test_particle_adds_transform_deltas() {
        let transform = PropertyBag {
            position: Vec2::new(5.0, 0.0),
            scale: Vec2::new(2.0, 3.0),
            rotation: 90.0,
            skew: Vec2::zero(),
        };
        let data = computed(&[("warp", NodeData::Bag(transform))]);
        let links = vec![DataLink::new("warp", "base", "output", "transform")];
        let inputs = node_inputs(&NodeId::new("base"), &links, &data);

        let cfg = ParticleConfig {
            position: Vec2::new(1.0, 1.0),
            scale: Vec2::new(1.0, 0.5),
            rotation: 10.0,
        };
        let result = process_node_data(&NodeKind::Particle(cfg), &inputs).unwrap();

        assert_eq!(
            result,
            NodeData::Bag(PropertyBag {
                position: Vec2::new(6.0, 1.0),
                scale: Vec2::new(2.0, 1.5),
                rotation: 100.0,
                skew: Vec2::zero(),
            })
        );
    }

    #[test]
    fn test_output_collects_payloads() {
        let bag = PropertyBag::default();
        let data = computed(&[
            ("base", NodeData::Bag(bag)),
            ("warp", NodeData::Bag(bag)),
        ]);
        let links = vec![
            DataLink::new("base", "sink", "output", "particle"),
            DataLink::new("warp", "sink", "output", "transform"),
        ];
        let inputs = node_inputs(&NodeId::new("sink"), &links, &data);

        let result = process_node_data(&NodeKind::Output, &inputs).unwrap();
        assert_eq!(
            result,
            NodeData::Collected {
                particle: Some(bag),
                transform: Some(bag),
            }
        );
    }

    #[test]
    fn test_invalid_transform_rejected() {
        let cfg = TransformConfig {
            rotate: f32::NAN,
            ..TransformConfig::default()
        };
        let result = process_node_data(&NodeKind::Transform(cfg), &IndexMap::new());
        assert_eq!(result, Err(ConfigError::NonFinite("rotate")));
    }

    #[test]
    fn test_emitter_exposes_position() {
        let cfg = EmitterConfig {
            position: Vec2::new(7.0, 8.0),
            ..EmitterConfig::default()
        };
        let result = process_node_data(&NodeKind::Emitter(cfg), &IndexMap::new()).unwrap();
        assert_eq!(
            result,
            NodeData::Bag(PropertyBag {
                position: Vec2::new(7.0, 8.0),
                ..PropertyBag::default()
            })
        );
    }
}
