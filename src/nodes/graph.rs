//! Node graph data structures and operations

use super::node::{Node, NodeId};
use super::port::{Port, PortId, PortType, SocketId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Represents a connection between two ports on different nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from_node: NodeId,
    pub from_port: PortId,
    pub to_node: NodeId,
    pub to_port: PortId,
}

impl Connection {
    /// Creates a new connection
    pub fn new(from_node: NodeId, from_port: PortId, to_node: NodeId, to_port: PortId) -> Self {
        Self {
            from_node,
            from_port,
            to_node,
            to_port,
        }
    }

    pub fn from_socket(&self) -> SocketId {
        SocketId::output(self.from_node, self.from_port)
    }

    pub fn to_socket(&self) -> SocketId {
        SocketId::input(self.to_node, self.to_port)
    }
}

/// A graph containing nodes and their connections
///
/// Outputs may feed any number of inputs. Inputs should receive at most one
/// connection; the graph accepts more and leaves rejecting them to the
/// compiler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGraph {
    pub nodes: BTreeMap<NodeId, Node>,
    pub connections: Vec<Connection>,
    #[serde(default)]
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            connections: Vec::new(),
            next_node_id: 0,
        }
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        self.nodes.insert(id, node);
        self.next_node_id += 1;
        id
    }

    /// Adds a node to the graph with a specific ID
    pub fn add_node_with_id(&mut self, id: NodeId, mut node: Node) -> NodeId {
        node.id = id;
        self.nodes.insert(id, node);
        // Update next_node_id to avoid conflicts
        if id >= self.next_node_id {
            self.next_node_id = id + 1;
        }
        id
    }

    /// Removes a node and all its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections
            .retain(|conn| conn.from_node != node_id && conn.to_node != node_id);
        self.nodes.remove(&node_id)
    }

    /// Adds a connection between two ports
    pub fn add_connection(&mut self, connection: Connection) -> Result<(), &'static str> {
        self.check_connection(&connection)?;
        self.connections.push(connection);
        Ok(())
    }

    fn check_connection(&self, connection: &Connection) -> Result<(), &'static str> {
        if connection.from_node == connection.to_node {
            return Err("Cannot connect a node to itself");
        }

        let Some(from) = self.nodes.get(&connection.from_node) else {
            return Err("Source node does not exist");
        };
        let Some(to) = self.nodes.get(&connection.to_node) else {
            return Err("Target node does not exist");
        };
        if from.output(connection.from_port).is_none() {
            return Err("Source port does not exist");
        }
        if to.input(connection.to_port).is_none() {
            return Err("Target port does not exist");
        }
        Ok(())
    }

    /// Helper method to add connection by node IDs and port indices
    pub fn add_connection_by_ids(
        &mut self,
        from_node: NodeId,
        from_port: PortId,
        to_node: NodeId,
        to_port: PortId,
    ) -> Result<(), &'static str> {
        self.add_connection(Connection::new(from_node, from_port, to_node, to_port))
    }

    /// Removes a connection by index
    pub fn remove_connection(&mut self, index: usize) -> Option<Connection> {
        if index < self.connections.len() {
            Some(self.connections.remove(index))
        } else {
            None
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks up the port behind a socket identity
    pub fn socket(&self, id: SocketId) -> Option<&Port> {
        self.nodes.get(&id.node)?.port(id.port_type, id.port)
    }

    /// Output sockets linked into the given input, in connection order
    pub fn linked_outputs(&self, input: SocketId) -> Vec<SocketId> {
        self.connections
            .iter()
            .filter(|conn| conn.to_node == input.node && conn.to_port == input.port)
            .map(Connection::from_socket)
            .collect()
    }

    /// Input sockets fed by the given output
    pub fn linked_inputs(&self, output: SocketId) -> Vec<SocketId> {
        self.connections
            .iter()
            .filter(|conn| conn.from_node == output.node && conn.from_port == output.port)
            .map(Connection::to_socket)
            .collect()
    }

    /// Every input socket, in node order
    pub fn all_input_sockets(&self) -> impl Iterator<Item = SocketId> + '_ {
        self.nodes.values().flat_map(|node| {
            node.inputs
                .iter()
                .map(move |port| SocketId::input(node.id, port.id))
        })
    }

    /// Every socket, inputs of a node before its outputs
    pub fn all_sockets(&self) -> impl Iterator<Item = (SocketId, &Port)> + '_ {
        self.nodes.values().flat_map(|node| {
            node.inputs
                .iter()
                .chain(node.outputs.iter())
                .map(move |port| {
                    let id = match port.port_type {
                        PortType::Input => SocketId::input(node.id, port.id),
                        PortType::Output => SocketId::output(node.id, port.id),
                    };
                    (id, port)
                })
        })
    }

    pub fn socket_count(&self) -> usize {
        self.nodes
            .values()
            .map(|node| node.inputs.len() + node.outputs.len())
            .sum()
    }

    /// Save the graph as JSON
    pub fn save_to_file(&self, file_path: &Path) -> Result<(), String> {
        let json_content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize graph: {}", e))?;
        std::fs::write(file_path, json_content)
            .map_err(|e| format!("Failed to write file: {}", e))
    }

    /// Load a graph from a JSON file
    pub fn load_from_file(file_path: &Path) -> Result<Self, String> {
        let file_content = std::fs::read_to_string(file_path)
            .map_err(|e| format!("Failed to read file: {}", e))?;
        Self::from_json(&file_content)
    }

    /// Parse a graph from JSON, rejecting graphs whose ids disagree
    pub fn from_json(content: &str) -> Result<Self, String> {
        let mut graph: Self =
            serde_json::from_str(content).map_err(|e| format!("Failed to parse graph file: {}", e))?;
        graph.validate()?;
        Ok(graph)
    }

    /// Checks ids and connections of a deserialized graph and restores the
    /// node id counter
    fn validate(&mut self) -> Result<(), String> {
        for (&key, node) in &self.nodes {
            if node.id != key {
                return Err(format!("Node stored under id {} has id {}", key, node.id));
            }
            for (ports, port_type) in [(&node.inputs, PortType::Input), (&node.outputs, PortType::Output)] {
                for (index, port) in ports.iter().enumerate() {
                    if port.id != index {
                        return Err(format!(
                            "Port '{}' of node {} is at index {} but has id {}",
                            port.name, key, index, port.id
                        ));
                    }
                    if port.port_type != port_type {
                        return Err(format!(
                            "Port '{}' of node {} is listed as {:?} but has type {:?}",
                            port.name, key, port_type, port.port_type
                        ));
                    }
                }
            }
        }

        for connection in &self.connections {
            self.check_connection(connection).map_err(|e| {
                format!(
                    "Invalid connection from node {} port {} to node {} port {}: {}",
                    connection.from_node, connection.from_port, connection.to_node, connection.to_port, e
                )
            })?;
        }

        let after_last = self.nodes.keys().next_back().map_or(0, |id| id + 1);
        self.next_node_id = self.next_node_id.max(after_last);
        Ok(())
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new()
    }
}
