//! Statically typed function networks
//!
//! A [`Network`] is the compiled form of a node graph. Its nodes wrap
//! function objects owned by a [`Resources`] arena (or are dummies that only
//! keep structure), and every input socket is fed by exactly one link.

pub mod builder;
pub mod graph_builder;

pub use builder::NetworkBuilder;
pub use graph_builder::{GraphNetworkBuilder, MappedNetwork, SocketMap, SocketTypes};

use crate::resources::{FunctionId, Resources};
use crate::types::DataType;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Index of a node within a network
pub type NetworkNodeId = usize;

/// Input socket of a network node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputSocketRef {
    pub node: NetworkNodeId,
    pub index: usize,
}

/// Output socket of a network node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputSocketRef {
    pub node: NetworkNodeId,
    pub index: usize,
}

impl InputSocketRef {
    pub fn new(node: NetworkNodeId, index: usize) -> Self {
        Self { node, index }
    }
}

impl OutputSocketRef {
    pub fn new(node: NetworkNodeId, index: usize) -> Self {
        Self { node, index }
    }
}

impl fmt::Display for InputSocketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.in{}", self.node, self.index)
    }
}

impl fmt::Display for OutputSocketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.out{}", self.node, self.index)
    }
}

/// What a network node does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Calls a function; socket `i` maps to param `input_param_indices[i]`
    Function {
        function: FunctionId,
        input_param_indices: Vec<usize>,
        output_param_indices: Vec<usize>,
    },
    /// Placeholder for a graph node that has no function
    Dummy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkNode {
    pub id: NetworkNodeId,
    pub name: String,
    pub kind: NodeKind,
    pub inputs: Vec<DataType>,
    pub outputs: Vec<DataType>,
}

impl NetworkNode {
    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, NodeKind::Dummy)
    }

    pub fn function(&self) -> Option<FunctionId> {
        match self.kind {
            NodeKind::Function { function, .. } => Some(function),
            NodeKind::Dummy => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    pub from: OutputSocketRef,
    pub to: InputSocketRef,
}

/// Violations of the builder's structural rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("function {0} is not in the resource arena")]
    UnknownFunction(FunctionId),
    #[error("'{function}' has no {expected} param at index {index}")]
    ParamKindMismatch {
        function: String,
        index: usize,
        expected: &'static str,
    },
    #[error("'{function}' param {index} is not assigned to a socket")]
    UncoveredParam { function: String, index: usize },
    #[error("socket {0} does not exist")]
    NoSuchSocket(String),
    #[error("cannot link {from} to {to}")]
    TypeMismatch { from: DataType, to: DataType },
    #[error("input {0} is already linked")]
    AlreadyLinked(InputSocketRef),
    #[error("input {0} has no incoming link")]
    UnlinkedInput(InputSocketRef),
    #[error("{what}: expected {expected} sockets, found {found}")]
    SocketCountMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
    #[error("graph socket {0} is already mapped")]
    AlreadyMapped(String),
    #[error("graph socket {0} has no network socket")]
    Unmapped(String),
}

/// A finished network; read-only
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<NetworkNode>,
    links: Vec<Link>,
    origins: HashMap<InputSocketRef, OutputSocketRef>,
}

impl Network {
    pub(crate) fn from_parts(nodes: Vec<NetworkNode>, links: Vec<Link>) -> Self {
        let origins = links.iter().map(|link| (link.to, link.from)).collect();
        Self { nodes, links, origins }
    }

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn node(&self, id: NetworkNodeId) -> Option<&NetworkNode> {
        self.nodes.get(id)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// The output feeding `input`
    pub fn origin(&self, input: InputSocketRef) -> Option<OutputSocketRef> {
        self.origins.get(&input).copied()
    }

    /// All inputs fed by `output`, in link order
    pub fn targets(&self, output: OutputSocketRef) -> Vec<InputSocketRef> {
        self.links
            .iter()
            .filter(|link| link.from == output)
            .map(|link| link.to)
            .collect()
    }

    pub fn input_type(&self, input: InputSocketRef) -> Option<DataType> {
        self.nodes.get(input.node)?.inputs.get(input.index).copied()
    }

    pub fn output_type(&self, output: OutputSocketRef) -> Option<DataType> {
        self.nodes.get(output.node)?.outputs.get(output.index).copied()
    }

    /// Every input socket of every node
    pub fn input_sockets(&self) -> impl Iterator<Item = InputSocketRef> + '_ {
        self.nodes.iter().flat_map(|node| {
            (0..node.inputs.len()).map(move |index| InputSocketRef::new(node.id, index))
        })
    }
}

/// A compiled network together with the arena owning its functions
pub struct CompiledNetwork {
    pub network: Network,
    pub socket_map: SocketMap,
    pub resources: Resources,
}

impl CompiledNetwork {
    /// Display name of a node, using the resource name for functions
    pub fn node_label(&self, id: NetworkNodeId) -> Option<&str> {
        let node = self.network.node(id)?;
        match node.function() {
            Some(function) => self.resources.function_name(function),
            None => Some(node.name.as_str()),
        }
    }
}

impl fmt::Debug for CompiledNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledNetwork")
            .field("nodes", &self.network.node_count())
            .field("links", &self.network.link_count())
            .field("resources", &self.resources)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FLOAT;

    fn node(id: NetworkNodeId, inputs: usize, outputs: usize) -> NetworkNode {
        NetworkNode {
            id,
            name: format!("n{}", id),
            kind: NodeKind::Dummy,
            inputs: vec![DataType::Single(&FLOAT); inputs],
            outputs: vec![DataType::Single(&FLOAT); outputs],
        }
    }

    #[test]
    fn test_origin_and_targets() {
        let out = OutputSocketRef::new(0, 0);
        let links = vec![
            Link { from: out, to: InputSocketRef::new(1, 0) },
            Link { from: out, to: InputSocketRef::new(2, 0) },
        ];
        let network = Network::from_parts(vec![node(0, 0, 1), node(1, 1, 0), node(2, 1, 0)], links);

        assert_eq!(network.origin(InputSocketRef::new(2, 0)), Some(out));
        assert_eq!(
            network.targets(out),
            vec![InputSocketRef::new(1, 0), InputSocketRef::new(2, 0)]
        );
        assert_eq!(network.input_sockets().count(), 2);
        assert_eq!(network.output_type(out), Some(DataType::Single(&FLOAT)));
        assert_eq!(network.input_type(InputSocketRef::new(0, 0)), None);
    }

    #[test]
    fn test_socket_display() {
        assert_eq!(InputSocketRef::new(3, 1).to_string(), "#3.in1");
        assert_eq!(OutputSocketRef::new(0, 2).to_string(), "#0.out2");
    }
}
