//! Mutable workspace for assembling a [`Network`]

use super::{
    InputSocketRef, Link, Network, NetworkError, NetworkNode, NetworkNodeId, NodeKind,
    OutputSocketRef,
};
use crate::resources::{FunctionId, Resources};
use crate::types::DataType;
use std::collections::HashSet;

/// Collects nodes and links, checking every link as it is added
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<NetworkNode>,
    links: Vec<Link>,
    linked_inputs: HashSet<InputSocketRef>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node calling `function`
    ///
    /// Input socket `i` is bound to param `input_param_indices[i]`, output
    /// socket `i` to `output_param_indices[i]`. Every param the function
    /// reads must be bound to an input and every param it writes to an
    /// output; a mutable param appears in both lists.
    pub fn add_function(
        &mut self,
        resources: &Resources,
        function: FunctionId,
        input_param_indices: &[usize],
        output_param_indices: &[usize],
    ) -> Result<NetworkNodeId, NetworkError> {
        let function_object = resources
            .function(function)
            .ok_or(NetworkError::UnknownFunction(function))?;
        let signature = function_object.signature();
        let function_name = signature.function_name.clone();

        let socket_types = |indices: &[usize], input: bool| -> Result<Vec<DataType>, NetworkError> {
            indices
                .iter()
                .map(|&index| {
                    let param = signature
                        .param(index)
                        .filter(|param| if input { param.kind.is_input() } else { param.kind.is_output() })
                        .ok_or_else(|| NetworkError::ParamKindMismatch {
                            function: function_name.clone(),
                            index,
                            expected: if input { "input" } else { "output" },
                        })?;
                    Ok(param.data_type)
                })
                .collect()
        };
        let inputs = socket_types(input_param_indices, true)?;
        let outputs = socket_types(output_param_indices, false)?;

        for (index, param) in signature.params.iter().enumerate() {
            let covered = (!param.kind.is_input() || input_param_indices.contains(&index))
                && (!param.kind.is_output() || output_param_indices.contains(&index));
            if !covered {
                return Err(NetworkError::UncoveredParam {
                    function: function_name,
                    index,
                });
            }
        }

        let id = self.nodes.len();
        self.nodes.push(NetworkNode {
            id,
            name: function_name,
            kind: NodeKind::Function {
                function,
                input_param_indices: input_param_indices.to_vec(),
                output_param_indices: output_param_indices.to_vec(),
            },
            inputs,
            outputs,
        });
        Ok(id)
    }

    /// Adds a placeholder node with the given socket types
    pub fn add_dummy(
        &mut self,
        name: impl Into<String>,
        inputs: Vec<DataType>,
        outputs: Vec<DataType>,
    ) -> NetworkNodeId {
        let id = self.nodes.len();
        self.nodes.push(NetworkNode {
            id,
            name: name.into(),
            kind: NodeKind::Dummy,
            inputs,
            outputs,
        });
        id
    }

    /// Links two sockets of identical type; each input takes one link
    pub fn add_link(&mut self, from: OutputSocketRef, to: InputSocketRef) -> Result<(), NetworkError> {
        let from_type = self
            .output_type(from)
            .ok_or_else(|| NetworkError::NoSuchSocket(from.to_string()))?;
        let to_type = self
            .input_type(to)
            .ok_or_else(|| NetworkError::NoSuchSocket(to.to_string()))?;
        if from_type != to_type {
            return Err(NetworkError::TypeMismatch {
                from: from_type,
                to: to_type,
            });
        }
        if !self.linked_inputs.insert(to) {
            return Err(NetworkError::AlreadyLinked(to));
        }
        self.links.push(Link { from, to });
        Ok(())
    }

    pub fn is_input_linked(&self, input: InputSocketRef) -> bool {
        self.linked_inputs.contains(&input)
    }

    pub fn input_type(&self, input: InputSocketRef) -> Option<DataType> {
        self.nodes.get(input.node)?.inputs.get(input.index).copied()
    }

    pub fn output_type(&self, output: OutputSocketRef) -> Option<DataType> {
        self.nodes.get(output.node)?.outputs.get(output.index).copied()
    }

    pub fn node(&self, id: NetworkNodeId) -> Option<&NetworkNode> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Finishes the network, failing if any input is still unlinked
    pub fn build(self) -> Result<Network, NetworkError> {
        for node in &self.nodes {
            for index in 0..node.inputs.len() {
                let input = InputSocketRef::new(node.id, index);
                if !self.linked_inputs.contains(&input) {
                    return Err(NetworkError::UnlinkedInput(input));
                }
            }
        }
        Ok(Network::from_parts(self.nodes, self.links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{AddFloats, ConstantValue, PackList};
    use crate::types::{Value, FLOAT, INTEGER};

    fn constant(resources: &mut Resources, value: f32) -> FunctionId {
        resources.add_function(
            ConstantValue::new(Value::Single(FLOAT.wrap(value).unwrap())),
            "constant",
        )
    }

    #[test]
    fn test_build_fully_linked_network() {
        let mut resources = Resources::new();
        let add = resources.add_function(AddFloats::new(), "add");
        let a = constant(&mut resources, 1.0);
        let b = constant(&mut resources, 2.0);

        let mut builder = NetworkBuilder::new();
        let add_node = builder.add_function(&resources, add, &[0, 1], &[2]).unwrap();
        let a_node = builder.add_function(&resources, a, &[], &[0]).unwrap();
        let b_node = builder.add_function(&resources, b, &[], &[0]).unwrap();
        builder
            .add_link(OutputSocketRef::new(a_node, 0), InputSocketRef::new(add_node, 0))
            .unwrap();
        builder
            .add_link(OutputSocketRef::new(b_node, 0), InputSocketRef::new(add_node, 1))
            .unwrap();

        let network = builder.build().unwrap();
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.link_count(), 2);
        assert_eq!(
            network.origin(InputSocketRef::new(add_node, 1)),
            Some(OutputSocketRef::new(b_node, 0))
        );
    }

    #[test]
    fn test_unlinked_input_fails_build() {
        let mut resources = Resources::new();
        let add = resources.add_function(AddFloats::new(), "add");
        let mut builder = NetworkBuilder::new();
        builder.add_function(&resources, add, &[0, 1], &[2]).unwrap();

        assert_eq!(
            builder.build().unwrap_err(),
            NetworkError::UnlinkedInput(InputSocketRef::new(0, 0))
        );
    }

    #[test]
    fn test_param_assignment_is_checked() {
        let mut resources = Resources::new();
        let add = resources.add_function(AddFloats::new(), "add");
        let mut builder = NetworkBuilder::new();

        assert!(matches!(
            builder.add_function(&resources, add, &[0, 2], &[1]),
            Err(NetworkError::ParamKindMismatch { index: 2, .. })
        ));
        assert!(matches!(
            builder.add_function(&resources, add, &[0], &[2]),
            Err(NetworkError::UncoveredParam { index: 1, .. })
        ));
        assert_eq!(
            builder.add_function(&resources, 7, &[], &[]),
            Err(NetworkError::UnknownFunction(7))
        );
    }

    #[test]
    fn test_mutable_param_is_input_and_output() {
        let mut resources = Resources::new();
        let append = resources.add_function(PackList::new(&FLOAT, vec![true, false]), "append");
        let mut builder = NetworkBuilder::new();
        let node = builder.add_function(&resources, append, &[0, 1], &[0]).unwrap();

        assert_eq!(builder.input_type(InputSocketRef::new(node, 0)), Some(DataType::List(&FLOAT)));
        assert_eq!(builder.output_type(OutputSocketRef::new(node, 0)), Some(DataType::List(&FLOAT)));
    }

    #[test]
    fn test_link_rules() {
        let mut builder = NetworkBuilder::new();
        let source = builder.add_dummy("source", vec![], vec![DataType::Single(&FLOAT), DataType::Single(&INTEGER)]);
        let target = builder.add_dummy("target", vec![DataType::Single(&FLOAT)], vec![]);
        let to = InputSocketRef::new(target, 0);

        assert!(matches!(
            builder.add_link(OutputSocketRef::new(source, 1), to),
            Err(NetworkError::TypeMismatch { .. })
        ));
        builder.add_link(OutputSocketRef::new(source, 0), to).unwrap();
        assert!(builder.is_input_linked(to));
        assert_eq!(
            builder.add_link(OutputSocketRef::new(source, 0), to),
            Err(NetworkError::AlreadyLinked(to))
        );
        assert!(matches!(
            builder.add_link(OutputSocketRef::new(source, 5), to),
            Err(NetworkError::NoSuchSocket(_))
        ));
    }
}
