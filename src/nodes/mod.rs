//! Node system - authored graph data structures

pub mod factory;
pub mod graph;
pub mod node;
pub mod port;
pub mod properties;

// Re-export core types
pub use graph::{Connection, NodeGraph};
pub use node::{Node, NodeId};
pub use port::{Port, PortId, PortType, SocketId};
pub use properties::{Properties, PropertyError, PropertyValue};
