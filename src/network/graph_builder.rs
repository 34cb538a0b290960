//! Network builder that tracks which graph socket became which network socket

use super::{
    InputSocketRef, Network, NetworkBuilder, NetworkError, NetworkNode, NetworkNodeId, OutputSocketRef,
};
use crate::nodes::{Node, NodeGraph, PortType, SocketId};
use crate::resources::{FunctionId, Resources};
use crate::types::DataType;
use std::collections::HashMap;

/// Static type of every socket in a graph
pub type SocketTypes = HashMap<SocketId, DataType>;

/// Graph socket to network socket association
#[derive(Debug, Clone, Default)]
pub struct SocketMap {
    inputs: HashMap<SocketId, InputSocketRef>,
    outputs: HashMap<SocketId, OutputSocketRef>,
}

impl SocketMap {
    pub fn input(&self, socket: SocketId) -> Option<InputSocketRef> {
        self.inputs.get(&socket).copied()
    }

    pub fn output(&self, socket: SocketId) -> Option<OutputSocketRef> {
        self.outputs.get(&socket).copied()
    }

    pub fn contains(&self, socket: SocketId) -> bool {
        match socket.port_type {
            PortType::Input => self.inputs.contains_key(&socket),
            PortType::Output => self.outputs.contains_key(&socket),
        }
    }

    /// Number of mapped graph sockets
    pub fn len(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of finishing a [`GraphNetworkBuilder`]
#[derive(Debug)]
pub struct MappedNetwork {
    pub network: Network,
    pub socket_map: SocketMap,
}

/// Builds a network for one graph
///
/// Besides the plain [`NetworkBuilder`] primitives it knows the static type
/// of every graph socket and records the socket map as nodes are inserted.
pub struct GraphNetworkBuilder<'a> {
    graph: &'a NodeGraph,
    types: SocketTypes,
    builder: NetworkBuilder,
    socket_map: SocketMap,
}

impl<'a> GraphNetworkBuilder<'a> {
    pub fn new(graph: &'a NodeGraph, types: SocketTypes) -> Self {
        Self {
            graph,
            types,
            builder: NetworkBuilder::new(),
            socket_map: SocketMap::default(),
        }
    }

    pub fn graph(&self) -> &'a NodeGraph {
        self.graph
    }

    pub fn data_type(&self, socket: SocketId) -> DataType {
        self.types.get(&socket).copied().unwrap_or_default()
    }

    pub fn is_data_socket(&self, socket: SocketId) -> bool {
        self.data_type(socket).is_data()
    }

    /// Data-carrying input sockets of `node`, in port order
    pub fn data_inputs(&self, node: &Node) -> Vec<SocketId> {
        node.inputs
            .iter()
            .map(|port| SocketId::input(node.id, port.id))
            .filter(|&socket| self.is_data_socket(socket))
            .collect()
    }

    /// Data-carrying output sockets of `node`, in port order
    pub fn data_outputs(&self, node: &Node) -> Vec<SocketId> {
        node.outputs
            .iter()
            .map(|port| SocketId::output(node.id, port.id))
            .filter(|&socket| self.is_data_socket(socket))
            .collect()
    }

    pub fn has_data_sockets(&self, node: &Node) -> bool {
        !self.data_inputs(node).is_empty() || !self.data_outputs(node).is_empty()
    }

    pub fn data_sockets_of_node_are_mapped(&self, node: &Node) -> bool {
        self.data_inputs(node)
            .into_iter()
            .chain(self.data_outputs(node))
            .all(|socket| self.socket_map.contains(socket))
    }

    /// Adds a function node without mapping any graph sockets
    pub fn add_function_node(
        &mut self,
        resources: &Resources,
        function: FunctionId,
        input_param_indices: &[usize],
        output_param_indices: &[usize],
    ) -> Result<NetworkNodeId, NetworkError> {
        self.builder
            .add_function(resources, function, input_param_indices, output_param_indices)
    }

    /// Adds a function node for `node`, mapping the node's data inputs and
    /// outputs onto the new sockets in order
    pub fn add_function(
        &mut self,
        resources: &Resources,
        function: FunctionId,
        input_param_indices: &[usize],
        output_param_indices: &[usize],
        node: &Node,
    ) -> Result<NetworkNodeId, NetworkError> {
        let inputs = self.data_inputs(node);
        let outputs = self.data_outputs(node);
        check_count(node, "inputs", input_param_indices.len(), inputs.len())?;
        check_count(node, "outputs", output_param_indices.len(), outputs.len())?;

        let id = self.add_function_node(resources, function, input_param_indices, output_param_indices)?;
        for (index, socket) in inputs.into_iter().enumerate() {
            self.map_input(socket, InputSocketRef::new(id, index))?;
        }
        for (index, socket) in outputs.into_iter().enumerate() {
            self.map_output(socket, OutputSocketRef::new(id, index))?;
        }
        Ok(id)
    }

    /// Adds a placeholder keeping the data sockets of `node`
    pub fn add_dummy(&mut self, node: &Node) -> Result<NetworkNodeId, NetworkError> {
        let inputs = self.data_inputs(node);
        let outputs = self.data_outputs(node);
        let input_types = inputs.iter().map(|&socket| self.data_type(socket)).collect();
        let output_types = outputs.iter().map(|&socket| self.data_type(socket)).collect();

        let id = self.builder.add_dummy(node.title.clone(), input_types, output_types);
        for (index, socket) in inputs.into_iter().enumerate() {
            self.map_input(socket, InputSocketRef::new(id, index))?;
        }
        for (index, socket) in outputs.into_iter().enumerate() {
            self.map_output(socket, OutputSocketRef::new(id, index))?;
        }
        Ok(id)
    }

    /// Records that graph input `socket` is represented by `input`
    ///
    /// Both must carry the same type and the graph socket must not be mapped
    /// yet.
    pub fn map_input(&mut self, socket: SocketId, input: InputSocketRef) -> Result<(), NetworkError> {
        let network_type = self
            .builder
            .input_type(input)
            .ok_or_else(|| NetworkError::NoSuchSocket(input.to_string()))?;
        self.check_mapping(socket, network_type)?;
        self.socket_map.inputs.insert(socket, input);
        Ok(())
    }

    pub fn map_output(&mut self, socket: SocketId, output: OutputSocketRef) -> Result<(), NetworkError> {
        let network_type = self
            .builder
            .output_type(output)
            .ok_or_else(|| NetworkError::NoSuchSocket(output.to_string()))?;
        self.check_mapping(socket, network_type)?;
        self.socket_map.outputs.insert(socket, output);
        Ok(())
    }

    fn check_mapping(&self, socket: SocketId, network_type: DataType) -> Result<(), NetworkError> {
        if self.socket_map.contains(socket) {
            return Err(NetworkError::AlreadyMapped(socket.to_string()));
        }
        let graph_type = self.data_type(socket);
        if graph_type != network_type {
            return Err(NetworkError::TypeMismatch {
                from: graph_type,
                to: network_type,
            });
        }
        Ok(())
    }

    pub fn lookup_input(&self, socket: SocketId) -> Result<InputSocketRef, NetworkError> {
        self.socket_map
            .input(socket)
            .ok_or_else(|| NetworkError::Unmapped(socket.to_string()))
    }

    pub fn lookup_output(&self, socket: SocketId) -> Result<OutputSocketRef, NetworkError> {
        self.socket_map
            .output(socket)
            .ok_or_else(|| NetworkError::Unmapped(socket.to_string()))
    }

    pub fn add_link(&mut self, from: OutputSocketRef, to: InputSocketRef) -> Result<(), NetworkError> {
        self.builder.add_link(from, to)
    }

    /// Whether the network socket of graph input `socket` has a link
    pub fn is_input_linked(&self, socket: SocketId) -> bool {
        self.socket_map
            .input(socket)
            .is_some_and(|input| self.builder.is_input_linked(input))
    }

    pub fn network_input_type(&self, input: InputSocketRef) -> Option<DataType> {
        self.builder.input_type(input)
    }

    pub fn network_output_type(&self, output: OutputSocketRef) -> Option<DataType> {
        self.builder.output_type(output)
    }

    pub fn network_node(&self, id: NetworkNodeId) -> Option<&NetworkNode> {
        self.builder.node(id)
    }

    pub fn node_count(&self) -> usize {
        self.builder.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.builder.link_count()
    }

    pub fn socket_map(&self) -> &SocketMap {
        &self.socket_map
    }

    pub fn build(self) -> Result<MappedNetwork, NetworkError> {
        Ok(MappedNetwork {
            network: self.builder.build()?,
            socket_map: self.socket_map,
        })
    }
}

fn check_count(node: &Node, what: &str, expected: usize, found: usize) -> Result<(), NetworkError> {
    if expected == found {
        return Ok(());
    }
    Err(NetworkError::SocketCountMismatch {
        what: format!("{} ({}) data {}", node.title, node.idname, what),
        expected,
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::AddFloats;
    use crate::nodes::NodeId;
    use crate::types::{FLOAT, INTEGER};

    const FLOAT_SOCKET: &str = "float";
    const CONTROL_SOCKET: &str = "control";

    fn typed(graph: &NodeGraph) -> SocketTypes {
        graph
            .all_sockets()
            .map(|(socket, port)| {
                let data_type = match port.idname.as_str() {
                    FLOAT_SOCKET => DataType::Single(&FLOAT),
                    _ => DataType::None,
                };
                (socket, data_type)
            })
            .collect()
    }

    fn add_node(id: NodeId) -> Node {
        let mut node = Node::new(id, "add");
        node.add_input("A", FLOAT_SOCKET)
            .add_input("Flow", CONTROL_SOCKET)
            .add_input("B", FLOAT_SOCKET)
            .add_output("Result", FLOAT_SOCKET);
        node
    }

    #[test]
    fn test_add_function_maps_data_sockets_in_order() {
        let mut graph = NodeGraph::new();
        let id = graph.add_node(add_node(0));
        let node = graph.node(id).unwrap().clone();

        let mut resources = Resources::new();
        let add = resources.add_function(AddFloats::new(), "add");
        let mut builder = GraphNetworkBuilder::new(&graph, typed(&graph));

        assert!(builder.has_data_sockets(&node));
        assert!(!builder.data_sockets_of_node_are_mapped(&node));
        let network_node = builder.add_function(&resources, add, &[0, 1], &[2], &node).unwrap();

        assert!(builder.data_sockets_of_node_are_mapped(&node));
        assert_eq!(
            builder.lookup_input(SocketId::input(id, 2)).unwrap(),
            InputSocketRef::new(network_node, 1)
        );
        assert!(builder.lookup_input(SocketId::input(id, 1)).is_err());
        assert_eq!(builder.socket_map().len(), 3);
    }

    #[test]
    fn test_socket_count_must_match() {
        let mut graph = NodeGraph::new();
        let id = graph.add_node(add_node(0));
        let node = graph.node(id).unwrap().clone();

        let mut resources = Resources::new();
        let add = resources.add_function(AddFloats::new(), "add");
        let mut builder = GraphNetworkBuilder::new(&graph, typed(&graph));

        assert!(matches!(
            builder.add_function(&resources, add, &[0], &[2], &node),
            Err(NetworkError::SocketCountMismatch { expected: 1, found: 2, .. })
        ));
        assert_eq!(builder.node_count(), 0);
    }

    #[test]
    fn test_dummy_keeps_data_sockets() {
        let mut graph = NodeGraph::new();
        let id = graph.add_node(add_node(0));
        let node = graph.node(id).unwrap().clone();
        let mut builder = GraphNetworkBuilder::new(&graph, typed(&graph));

        let dummy = builder.add_dummy(&node).unwrap();
        assert_eq!(builder.network_input_type(InputSocketRef::new(dummy, 1)), Some(DataType::Single(&FLOAT)));
        assert_eq!(builder.network_input_type(InputSocketRef::new(dummy, 2)), None);
        assert!(builder.data_sockets_of_node_are_mapped(&node));
    }

    #[test]
    fn test_mapping_checks_type_and_uniqueness() {
        let mut graph = NodeGraph::new();
        let id = graph.add_node(add_node(0));
        let node = graph.node(id).unwrap().clone();
        let mut builder = GraphNetworkBuilder::new(&graph, typed(&graph));
        builder.add_dummy(&node).unwrap();

        let other = builder.builder.add_dummy("int", vec![DataType::Single(&INTEGER)], vec![]);
        assert!(matches!(
            builder.map_input(SocketId::input(id, 0), InputSocketRef::new(other, 0)),
            Err(NetworkError::AlreadyMapped(_))
        ));

        let mut fresh = GraphNetworkBuilder::new(&graph, typed(&graph));
        let other = fresh.builder.add_dummy("int", vec![DataType::Single(&INTEGER)], vec![]);
        assert!(matches!(
            fresh.map_input(SocketId::input(id, 0), InputSocketRef::new(other, 0)),
            Err(NetworkError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_is_input_linked() {
        let mut graph = NodeGraph::new();
        let source = graph.add_node(add_node(0));
        let target = graph.add_node(add_node(1));
        let source_node = graph.node(source).unwrap().clone();
        let target_node = graph.node(target).unwrap().clone();
        let mut builder = GraphNetworkBuilder::new(&graph, typed(&graph));
        builder.add_dummy(&source_node).unwrap();
        builder.add_dummy(&target_node).unwrap();

        let input = SocketId::input(target, 0);
        assert!(!builder.is_input_linked(input));
        let from = builder.lookup_output(SocketId::output(source, 0)).unwrap();
        let to = builder.lookup_input(input).unwrap();
        builder.add_link(from, to).unwrap();
        assert!(builder.is_input_linked(input));
        assert!(builder.build().is_err());
    }
}
