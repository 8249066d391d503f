// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph store owning nodes and connections.

use crate::connection::Connection;
use crate::node::{Node, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Owner of the effect graph.
///
/// Nodes are keyed by id and iterated in insertion order, which the
/// simulation engine relies on for deterministic ticks. Connections are a
/// flat edge list; `connect` only checks that both endpoints exist. Type
/// legality lives in [`crate::rules::validate_connection`] and is the
/// editor's concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    connections: Vec<Connection>,
}

impl GraphStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, replacing any existing node with the same id.
    ///
    /// Replacement is how edits happen: configuration is a value, not a
    /// shared mutable object.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Remove a node and every connection touching it
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        self.connections.retain(|c| !c.involves_node(id));
        self.nodes.shift_remove(id)
    }

    /// Get a node by id
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable node by id
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append an edge between two existing nodes.
    ///
    /// Fails if either endpoint is missing, leaving the edge list untouched.
    /// No duplicate check and no rule check: the store records whatever the
    /// editor decided to draw.
    pub fn connect(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        socket: impl Into<String>,
    ) -> Result<(), GraphError> {
        if !self.nodes.contains_key(from) {
            return Err(GraphError::InvalidReference(from.clone()));
        }
        if !self.nodes.contains_key(to) {
            return Err(GraphError::InvalidReference(to.clone()));
        }
        self.connections
            .push(Connection::new(from.clone(), to.clone(), socket));
        Ok(())
    }

    /// Remove every edge that exactly matches the triple
    pub fn disconnect(&mut self, from: &NodeId, to: &NodeId, socket: &str) {
        self.connections.retain(|c| !c.matches(from, to, socket));
    }

    /// All connections
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

/// Error for graph operations against missing nodes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Connect referenced a node id that is not in the store
    #[error("no node with id `{0}`")]
    InvalidReference(NodeId),
}
