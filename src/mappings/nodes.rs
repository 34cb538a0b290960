//! Inserters for the built-in node kinds

use super::Mappings;
use crate::constants::{node_idname, property};
use crate::error::CompileError;
use crate::functions::{
    AddFloat3s, AddFloats, CombineVector, GetListElement, ListLength, ObjectWorldLocation, PackList,
    SeparateVector, SimpleVectorize, TextLength,
};
use crate::network::{GraphNetworkBuilder, InputSocketRef, OutputSocketRef};
use crate::nodes::{Node, Properties, SocketId};
use crate::resources::{FunctionId, Resources};
use crate::types::{DataType, ValueType};
use std::sync::Arc;

pub fn register(mappings: &mut Mappings) {
    mappings.register_node(node_idname::FLOAT_MATH, insert_float_math);
    mappings.register_node(node_idname::VECTOR_MATH, insert_vector_math);
    mappings.register_node(node_idname::COMBINE_VECTOR, insert_combine_vector);
    mappings.register_node(node_idname::SEPARATE_VECTOR, insert_separate_vector);
    mappings.register_node(node_idname::LIST_LENGTH, insert_list_length);
    mappings.register_node(node_idname::PACK_LIST, insert_pack_list);
    mappings.register_node(node_idname::GET_LIST_ELEMENT, insert_get_list_element);
    mappings.register_node(node_idname::OBJECT_TRANSFORMS, insert_object_location);
    mappings.register_node(node_idname::TEXT_LENGTH, insert_text_length);
}

/// Reads one `BASE`/`LIST` switch per input; a missing switch means `BASE`
fn read_vectorization(node: &Node, prop_names: &[&str]) -> Result<Vec<bool>, CompileError> {
    prop_names
        .iter()
        .map(|&name| -> Result<bool, CompileError> {
            if !node.properties.contains(name) {
                return Ok(false);
            }
            match node.properties.string(name)? {
                property::STATE_BASE => Ok(false),
                property::STATE_LIST => Ok(true),
                other => Err(CompileError::InvalidConfig(format!(
                    "{}: '{}' must be {} or {}, found '{}'",
                    node.title,
                    name,
                    property::STATE_BASE,
                    property::STATE_LIST,
                    other
                ))),
            }
        })
        .collect()
}

/// Wraps `base` in a vectorization adapter when any input is switched to
/// lists, otherwise returns `base` itself
fn get_vectorized_function(
    resources: &mut Resources,
    base: FunctionId,
    node: &Node,
    prop_names: &[&str],
) -> Result<FunctionId, CompileError> {
    let input_is_vectorized = read_vectorization(node, prop_names)?;
    if !input_is_vectorized.contains(&true) {
        return Ok(base);
    }

    let base_function = resources
        .function(base)
        .map(Arc::clone)
        .ok_or_else(|| CompileError::Internal(format!("function {} was not allocated", base)))?;
    let vectorized = SimpleVectorize::new(base_function, input_is_vectorized).ok_or_else(|| {
        CompileError::Internal(format!("{}: vectorization flags do not match inputs", node.title))
    })?;
    Ok(resources.add_function(vectorized, "vectorized function"))
}

/// Element type named by the node's `active_type`
fn active_type(mappings: &Mappings, node: &Node) -> Result<&'static ValueType, CompileError> {
    let type_name = node.properties.string(property::ACTIVE_TYPE)?;
    mappings.value_type(type_name).ok_or_else(|| {
        CompileError::InvalidConfig(format!("{}: unknown element type '{}'", node.title, type_name))
    })
}

fn insert_float_math(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    _mappings: &Mappings,
    node: &Node,
) -> Result<(), CompileError> {
    let base = resources.add_function(AddFloats::new(), "float math function");
    let function = get_vectorized_function(
        resources,
        base,
        node,
        &[property::USE_LIST_A, property::USE_LIST_B],
    )?;
    builder.add_function(resources, function, &[0, 1], &[2], node)?;
    Ok(())
}

fn insert_vector_math(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    _mappings: &Mappings,
    node: &Node,
) -> Result<(), CompileError> {
    let function = resources.add_function(AddFloat3s::new(), "vector math function");
    builder.add_function(resources, function, &[0, 1], &[2], node)?;
    Ok(())
}

fn insert_combine_vector(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    _mappings: &Mappings,
    node: &Node,
) -> Result<(), CompileError> {
    let base = resources.add_function(CombineVector::new(), "combine vector function");
    let function = get_vectorized_function(
        resources,
        base,
        node,
        &[property::USE_LIST_X, property::USE_LIST_Y, property::USE_LIST_Z],
    )?;
    builder.add_function(resources, function, &[0, 1, 2], &[3], node)?;
    Ok(())
}

fn insert_separate_vector(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    _mappings: &Mappings,
    node: &Node,
) -> Result<(), CompileError> {
    let base = resources.add_function(SeparateVector::new(), "separate vector function");
    let function = get_vectorized_function(resources, base, node, &[property::USE_LIST_VECTOR])?;
    builder.add_function(resources, function, &[0], &[1, 2, 3], node)?;
    Ok(())
}

fn insert_list_length(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    mappings: &Mappings,
    node: &Node,
) -> Result<(), CompileError> {
    let ty = active_type(mappings, node)?;
    let function = resources.add_function(ListLength::new(ty), "list length function");
    builder.add_function(resources, function, &[0], &[1], node)?;
    Ok(())
}

fn insert_get_list_element(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    mappings: &Mappings,
    node: &Node,
) -> Result<(), CompileError> {
    let ty = active_type(mappings, node)?;
    let function = resources.add_function(GetListElement::new(ty), "get list element function");
    builder.add_function(resources, function, &[0, 1, 2], &[3], node)?;
    Ok(())
}

/// Reads the list/single state of every item in a variadic collection
fn read_pack_states(node: &Node, prop_name: &str) -> Result<Vec<bool>, CompileError> {
    let items: &[Properties] = if node.properties.contains(prop_name) {
        node.properties.collection(prop_name)?
    } else {
        &[]
    };

    items
        .iter()
        .map(|item| -> Result<bool, CompileError> {
            match item.int(property::STATE)? {
                0 => Ok(false),
                1 => Ok(true),
                state => Err(CompileError::InvalidConfig(format!(
                    "{}: invalid pack list state {}",
                    node.title, state
                ))),
            }
        })
        .collect()
}

/// Adds a pack list function whose inputs are the node's inputs starting at
/// `start_index` and returns its list output
fn build_pack_list_node(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    node: &Node,
    base_type: &'static ValueType,
    prop_name: &str,
    start_index: usize,
) -> Result<OutputSocketRef, CompileError> {
    let input_is_list = read_pack_states(node, prop_name)?;
    let input_amount = input_is_list.len();
    if node.inputs.len() < start_index + input_amount {
        return Err(CompileError::InvalidConfig(format!(
            "{}: {} pack list items but only {} inputs",
            node.title,
            input_amount,
            node.inputs.len().saturating_sub(start_index)
        )));
    }
    for (i, &is_list) in input_is_list.iter().enumerate() {
        let socket = SocketId::input(node.id, start_index + i);
        let expected = if is_list {
            DataType::List(base_type)
        } else {
            DataType::Single(base_type)
        };
        let found = builder.data_type(socket);
        if found != expected {
            return Err(CompileError::InvalidConfig(format!(
                "{}: pack list item {} expects {}, input socket is {}",
                node.title, i, expected, found
            )));
        }
    }

    let pack_list = PackList::new(base_type, input_is_list);
    let output_param_index = pack_list.output_param_index();
    let function = resources.add_function(pack_list, "pack list function");

    let input_param_indices: Vec<usize> = (0..input_amount).collect();
    let network_node =
        builder.add_function_node(resources, function, &input_param_indices, &[output_param_index])?;

    for i in 0..input_amount {
        builder.map_input(
            SocketId::input(node.id, start_index + i),
            InputSocketRef::new(network_node, i),
        )?;
    }
    Ok(OutputSocketRef::new(network_node, 0))
}

fn insert_pack_list(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    mappings: &Mappings,
    node: &Node,
) -> Result<(), CompileError> {
    let ty = active_type(mappings, node)?;
    let packed_list = build_pack_list_node(builder, resources, node, ty, property::VARIADIC, 0)?;
    builder.map_output(SocketId::output(node.id, 0), packed_list)?;
    Ok(())
}

fn insert_object_location(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    _mappings: &Mappings,
    node: &Node,
) -> Result<(), CompileError> {
    let function = resources.add_function(ObjectWorldLocation::new(), "object location function");
    builder.add_function(resources, function, &[0], &[1], node)?;
    Ok(())
}

fn insert_text_length(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    _mappings: &Mappings,
    node: &Node,
) -> Result<(), CompileError> {
    let function = resources.add_function(TextLength::new(), "text length function");
    builder.add_function(resources, function, &[0], &[1], node)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::resolve_socket_types;
    use crate::mappings::get_mappings;
    use crate::network::NodeKind;
    use crate::nodes::{factory, NodeGraph, PropertyValue};
    use crate::types::{DataType, FLOAT, INTEGER, VECTOR};

    /// Runs the node's inserter on a graph holding only that node
    fn insert<R>(
        node: Node,
        check: impl FnOnce(&GraphNetworkBuilder<'_>, &Resources, &Node, Result<(), CompileError>) -> R,
    ) -> R {
        let mut graph = NodeGraph::new();
        let id = graph.add_node(node);
        let node = graph.node(id).unwrap();
        let mappings = get_mappings();
        let mut builder = GraphNetworkBuilder::new(&graph, resolve_socket_types(&graph, mappings));
        let mut resources = Resources::new();

        let inserter = mappings.node_inserter(&node.idname).unwrap();
        let result = inserter(&mut builder, &mut resources, mappings, node);
        check(&builder, &resources, node, result)
    }

    #[test]
    fn test_float_math_without_lists() {
        insert(factory::float_math(false, false), |builder, resources, node, result| {
            result.unwrap();
            assert_eq!(resources.function_count(), 1);
            assert!(builder.data_sockets_of_node_are_mapped(node));
            assert_eq!(
                builder.network_input_type(InputSocketRef::new(0, 1)),
                Some(DataType::Single(&FLOAT))
            );
        });
    }

    #[test]
    fn test_float_math_vectorized() {
        insert(factory::float_math(true, false), |builder, resources, node, result| {
            result.unwrap();
            assert_eq!(resources.names().collect::<Vec<_>>(), vec!["float math function", "vectorized function"]);
            assert!(builder.data_sockets_of_node_are_mapped(node));
            assert_eq!(
                builder.network_input_type(InputSocketRef::new(0, 0)),
                Some(DataType::List(&FLOAT))
            );
            assert_eq!(
                builder.network_output_type(OutputSocketRef::new(0, 0)),
                Some(DataType::List(&FLOAT))
            );
        });
    }

    #[test]
    fn test_invalid_vectorization_state() {
        let node = factory::float_math(false, false)
            .with_property(property::USE_LIST_A, PropertyValue::String("MAYBE".into()));
        insert(node, |_, _, _, result| {
            assert!(matches!(result, Err(CompileError::InvalidConfig(ref m)) if m.contains("MAYBE")));
        });
    }

    #[test]
    fn test_separate_vector_vectorized_outputs_lists() {
        insert(factory::separate_vector(true), |builder, _, node, result| {
            result.unwrap();
            assert!(builder.data_sockets_of_node_are_mapped(node));
            for index in 0..3 {
                assert_eq!(
                    builder.network_output_type(OutputSocketRef::new(0, index)),
                    Some(DataType::List(&FLOAT))
                );
            }
        });
    }

    #[test]
    fn test_get_list_element_uses_active_type() {
        insert(factory::get_list_element(&VECTOR), |builder, _, _, result| {
            result.unwrap();
            let types: Vec<_> = (0..3)
                .map(|index| builder.network_input_type(InputSocketRef::new(0, index)).unwrap())
                .collect();
            assert_eq!(
                types,
                vec![DataType::List(&VECTOR), DataType::Single(&INTEGER), DataType::Single(&VECTOR)]
            );
        });
    }

    #[test]
    fn test_unknown_active_type() {
        let node = factory::list_length(&FLOAT)
            .with_property(property::ACTIVE_TYPE, PropertyValue::String("Color".into()));
        insert(node, |_, resources, _, result| {
            assert!(matches!(result, Err(CompileError::InvalidConfig(ref m)) if m.contains("Color")));
            assert!(resources.is_empty());
        });

        let mut node = Node::new(0, node_idname::LIST_LENGTH);
        node.add_input("List", crate::constants::socket_idname::FLOAT_LIST);
        insert(node, |_, _, _, result| {
            assert!(matches!(result, Err(CompileError::InvalidConfig(ref m)) if m.contains("active_type")));
        });
    }

    #[test]
    fn test_pack_list_output_after_inputs() {
        insert(factory::pack_list(&FLOAT, &[false, true, false]), |builder, _, node, result| {
            result.unwrap();
            assert!(builder.data_sockets_of_node_are_mapped(node));
            let network_node = builder.network_node(0).unwrap();
            assert_eq!(
                network_node.kind,
                NodeKind::Function {
                    function: 0,
                    input_param_indices: vec![0, 1, 2],
                    output_param_indices: vec![3],
                }
            );
            assert_eq!(
                builder.network_input_type(InputSocketRef::new(0, 1)),
                Some(DataType::List(&FLOAT))
            );
        });
    }

    #[test]
    fn test_pack_list_appends_to_first_list() {
        insert(factory::pack_list(&INTEGER, &[true, false]), |builder, _, _, result| {
            result.unwrap();
            let network_node = builder.network_node(0).unwrap();
            assert!(matches!(
                &network_node.kind,
                NodeKind::Function { output_param_indices, .. } if output_param_indices == &vec![0]
            ));
            assert_eq!(network_node.outputs, vec![DataType::List(&INTEGER)]);
        });
    }

    #[test]
    fn test_pack_list_invalid_state() {
        let mut node = factory::pack_list(&FLOAT, &[false]);
        node.properties.set(
            property::VARIADIC,
            PropertyValue::Collection(vec![Properties::new().with(property::STATE, PropertyValue::Int(4))]),
        );
        insert(node, |_, _, _, result| {
            assert!(matches!(result, Err(CompileError::InvalidConfig(_))));
        });
    }

    #[test]
    fn test_simple_nodes() {
        for node in [
            factory::vector_math(),
            factory::combine_vector([false, false, false]),
            factory::object_transforms(),
            factory::text_length(),
            factory::list_length(&VECTOR),
        ] {
            insert(node, |builder, resources, node, result| {
                result.unwrap();
                assert_eq!(resources.function_count(), 1);
                assert_eq!(builder.node_count(), 1);
                assert!(builder.data_sockets_of_node_are_mapped(node));
            });
        }
    }

    #[test]
    fn test_pack_list_items_must_match_inputs() {
        let mut node = factory::pack_list(&FLOAT, &[false, true]);
        node.properties.set(
            property::VARIADIC,
            PropertyValue::Collection(
                [0, 1, 0]
                    .into_iter()
                    .map(|state| Properties::new().with(property::STATE, PropertyValue::Int(state)))
                    .collect(),
            ),
        );
        insert(node, |builder, resources, _, result| {
            assert!(matches!(result, Err(CompileError::InvalidConfig(ref m)) if m.contains("3 pack list items")));
            assert_eq!(builder.node_count(), 0);
            assert!(resources.is_empty());
        });

        let mut node = factory::pack_list(&FLOAT, &[false, true]);
        node.properties.set(
            property::VARIADIC,
            PropertyValue::Collection(vec![
                Properties::new().with(property::STATE, PropertyValue::Int(1)),
                Properties::new().with(property::STATE, PropertyValue::Int(1)),
            ]),
        );
        insert(node, |_, _, _, result| {
            assert!(matches!(result, Err(CompileError::InvalidConfig(ref m)) if m.contains("item 0 expects List<Float>")));
        });
    }
}
