// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// A directed edge between two nodes, annotated with a socket name.
///
/// Connections are bookkeeping for the editor: the simulation engine never
/// routes data along them. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Source node id
    pub from: NodeId,
    /// Target node id
    pub to: NodeId,
    /// Socket name on the target
    pub socket: String,
}

impl Connection {
    /// Create a new connection
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, socket: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            socket: socket.into(),
        }
    }

    /// Check if this connection touches a specific node
    pub fn involves_node(&self, node_id: &NodeId) -> bool {
        &self.from == node_id || &self.to == node_id
    }

    /// Check for an exact endpoint-and-socket match
    pub fn matches(&self, from: &NodeId, to: &NodeId, socket: &str) -> bool {
        &self.from == from && &self.to == to && self.socket == socket
    }
}
