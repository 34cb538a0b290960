//! Port types and functionality for node connections

use super::node::NodeId;
use super::properties::PropertyValue;
use serde::{Deserialize, Serialize};

/// Unique identifier for a port within its node
pub type PortId = usize;

/// Type of port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PortType {
    Input,
    Output,
}

/// Represents a connection point on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub name: String,
    /// Socket kind identifier, resolved to a static type by the mappings
    pub idname: String,
    pub port_type: PortType,
    /// Authored value used when an input is left unlinked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<PropertyValue>,
}

impl Port {
    /// Creates a new port
    pub fn new(
        id: PortId,
        name: impl Into<String>,
        idname: impl Into<String>,
        port_type: PortType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            idname: idname.into(),
            port_type,
            value: None,
        }
    }

    /// Checks if this port is an input
    pub fn is_input(&self) -> bool {
        matches!(self.port_type, PortType::Input)
    }

    /// Checks if this port is an output
    pub fn is_output(&self) -> bool {
        matches!(self.port_type, PortType::Output)
    }
}

/// Identity of a socket in a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SocketId {
    pub node: NodeId,
    pub port: PortId,
    pub port_type: PortType,
}

impl SocketId {
    pub fn input(node: NodeId, port: PortId) -> Self {
        Self {
            node,
            port,
            port_type: PortType::Input,
        }
    }

    pub fn output(node: NodeId, port: PortId) -> Self {
        Self {
            node,
            port,
            port_type: PortType::Output,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self.port_type, PortType::Input)
    }
}

impl std::fmt::Display for SocketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.port_type {
            PortType::Input => "in",
            PortType::Output => "out",
        };
        write!(f, "node {} {} {}", self.node, direction, self.port)
    }
}
