// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static wiring rules for the graph editor.

use crate::node::NodeType;

/// One row of the wiring rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionRule {
    /// Source node type
    pub from: NodeType,
    /// Target node type
    pub to: NodeType,
    /// Socket name on the source
    pub from_socket: &'static str,
    /// Socket name on the target
    pub to_socket: &'static str,
}

/// Every legal `(from, to, from_socket, to_socket)` combination.
///
/// Rules are directional; a reversed pair is not implied.
pub const CONNECTION_RULES: &[ConnectionRule] = &[
    ConnectionRule {
        from: NodeType::Emitter,
        to: NodeType::Transform,
        from_socket: "output",
        to_socket: "input",
    },
    ConnectionRule {
        from: NodeType::Transform,
        to: NodeType::Particle,
        from_socket: "output",
        to_socket: "transform",
    },
    ConnectionRule {
        from: NodeType::Particle,
        to: NodeType::Output,
        from_socket: "output",
        to_socket: "particle",
    },
    ConnectionRule {
        from: NodeType::Transform,
        to: NodeType::Output,
        from_socket: "output",
        to_socket: "transform",
    },
];

/// Check whether an edge between two node types and sockets is legal.
///
/// Pure lookup against [`CONNECTION_RULES`]; the graph store itself does not
/// call this, the editor does before letting an edge be drawn.
pub fn validate_connection(
    from: NodeType,
    to: NodeType,
    from_socket: &str,
    to_socket: &str,
) -> bool {
    CONNECTION_RULES.iter().any(|rule| {
        rule.from == from
            && rule.to == to
            && rule.from_socket == from_socket
            && rule.to_socket == to_socket
    })
}
