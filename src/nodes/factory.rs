//! Constructors for the built-in node kinds
//!
//! Each function creates a [`Node`] with the sockets and configuration the
//! compiler expects for that kind. Socket kinds follow the configuration:
//! an input switched to `LIST` gets a list socket, and so do all outputs of
//! a vectorized node.

use super::node::Node;
use super::properties::{Properties, PropertyValue};
use crate::constants::{node_idname, property, socket_idname, type_name};
use crate::types::ValueType;

/// Element and list socket kinds of a value type
pub fn socket_idnames(ty: &ValueType) -> Option<(&'static str, &'static str)> {
    let kinds = match ty.name() {
        type_name::FLOAT => (socket_idname::FLOAT, socket_idname::FLOAT_LIST),
        type_name::INTEGER => (socket_idname::INTEGER, socket_idname::INTEGER_LIST),
        type_name::BOOLEAN => (socket_idname::BOOLEAN, socket_idname::BOOLEAN_LIST),
        type_name::VECTOR => (socket_idname::VECTOR, socket_idname::VECTOR_LIST),
        type_name::TEXT => (socket_idname::TEXT, socket_idname::TEXT_LIST),
        type_name::OBJECT => (socket_idname::OBJECT, socket_idname::OBJECT_LIST),
        _ => return None,
    };
    Some(kinds)
}

fn state(use_list: bool) -> PropertyValue {
    let state = if use_list {
        property::STATE_LIST
    } else {
        property::STATE_BASE
    };
    PropertyValue::String(state.into())
}

fn float_socket(use_list: bool) -> &'static str {
    if use_list {
        socket_idname::FLOAT_LIST
    } else {
        socket_idname::FLOAT
    }
}

fn vector_socket(use_list: bool) -> &'static str {
    if use_list {
        socket_idname::VECTOR_LIST
    } else {
        socket_idname::VECTOR
    }
}

/// Sum of two floats, each input optionally a list
pub fn float_math(a_is_list: bool, b_is_list: bool) -> Node {
    let vectorized = a_is_list || b_is_list;
    let mut node = Node::new(0, node_idname::FLOAT_MATH)
        .with_title("Float Math")
        .with_property(property::USE_LIST_A, state(a_is_list))
        .with_property(property::USE_LIST_B, state(b_is_list));
    node.add_input("A", float_socket(a_is_list))
        .add_input("B", float_socket(b_is_list))
        .add_output("Result", float_socket(vectorized));
    node
}

pub fn vector_math() -> Node {
    let mut node = Node::new(0, node_idname::VECTOR_MATH).with_title("Vector Math");
    node.add_input("A", socket_idname::VECTOR)
        .add_input("B", socket_idname::VECTOR)
        .add_output("Result", socket_idname::VECTOR);
    node
}

pub fn combine_vector(use_list: [bool; 3]) -> Node {
    let [x, y, z] = use_list;
    let mut node = Node::new(0, node_idname::COMBINE_VECTOR)
        .with_title("Combine Vector")
        .with_property(property::USE_LIST_X, state(x))
        .with_property(property::USE_LIST_Y, state(y))
        .with_property(property::USE_LIST_Z, state(z));
    node.add_input("X", float_socket(x))
        .add_input("Y", float_socket(y))
        .add_input("Z", float_socket(z))
        .add_output("Vector", vector_socket(x || y || z));
    node
}

pub fn separate_vector(use_list: bool) -> Node {
    let mut node = Node::new(0, node_idname::SEPARATE_VECTOR)
        .with_title("Separate Vector")
        .with_property(property::USE_LIST_VECTOR, state(use_list));
    node.add_input("Vector", vector_socket(use_list))
        .add_output("X", float_socket(use_list))
        .add_output("Y", float_socket(use_list))
        .add_output("Z", float_socket(use_list));
    node
}

fn active_type(ty: &ValueType) -> PropertyValue {
    PropertyValue::String(ty.name().into())
}

pub fn list_length(ty: &ValueType) -> Node {
    let (_, list_socket) = socket_idnames(ty).unwrap_or_default();
    let mut node = Node::new(0, node_idname::LIST_LENGTH)
        .with_title("List Length")
        .with_property(property::ACTIVE_TYPE, active_type(ty));
    node.add_input("List", list_socket)
        .add_output("Length", socket_idname::INTEGER);
    node
}

pub fn get_list_element(ty: &ValueType) -> Node {
    let (element_socket, list_socket) = socket_idnames(ty).unwrap_or_default();
    let mut node = Node::new(0, node_idname::GET_LIST_ELEMENT)
        .with_title("Get List Element")
        .with_property(property::ACTIVE_TYPE, active_type(ty));
    node.add_input("List", list_socket)
        .add_input("Index", socket_idname::INTEGER)
        .add_input("Fallback", element_socket)
        .add_output("Value", element_socket);
    node
}

/// Packs the given items, `true` marking a list item, into one list
pub fn pack_list(ty: &ValueType, items_are_lists: &[bool]) -> Node {
    let (element_socket, list_socket) = socket_idnames(ty).unwrap_or_default();
    let items = items_are_lists
        .iter()
        .map(|&is_list| Properties::new().with(property::STATE, PropertyValue::Int(i64::from(is_list))))
        .collect();
    let mut node = Node::new(0, node_idname::PACK_LIST)
        .with_title("Pack List")
        .with_property(property::ACTIVE_TYPE, active_type(ty))
        .with_property(property::VARIADIC, PropertyValue::Collection(items));
    for (i, &is_list) in items_are_lists.iter().enumerate() {
        let socket = if is_list { list_socket } else { element_socket };
        node.add_input(format!("Item {}", i), socket);
    }
    node.add_output("List", list_socket);
    node
}

pub fn object_transforms() -> Node {
    let mut node = Node::new(0, node_idname::OBJECT_TRANSFORMS).with_title("Object Transforms");
    node.add_input("Object", socket_idname::OBJECT)
        .add_output("Location", socket_idname::VECTOR);
    node
}

pub fn text_length() -> Node {
    let mut node = Node::new(0, node_idname::TEXT_LENGTH).with_title("Text Length");
    node.add_input("Text", socket_idname::TEXT)
        .add_output("Length", socket_idname::INTEGER);
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FLOAT, INTEGER, OBJECT};

    #[test]
    fn test_float_math_sockets_follow_state() {
        let node = float_math(false, true);
        assert_eq!(node.inputs[0].idname, socket_idname::FLOAT);
        assert_eq!(node.inputs[1].idname, socket_idname::FLOAT_LIST);
        assert_eq!(node.outputs[0].idname, socket_idname::FLOAT_LIST);
        assert_eq!(node.properties.string(property::USE_LIST_B), Ok(property::STATE_LIST));
    }

    #[test]
    fn test_pack_list_items() {
        let node = pack_list(&INTEGER, &[true, false]);
        let items = node.properties.collection(property::VARIADIC).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].int(property::STATE), Ok(1));
        assert_eq!(node.inputs[0].idname, socket_idname::INTEGER_LIST);
        assert_eq!(node.inputs[1].idname, socket_idname::INTEGER);
        assert_eq!(node.outputs[0].idname, socket_idname::INTEGER_LIST);
    }

    #[test]
    fn test_socket_idnames() {
        assert_eq!(
            socket_idnames(&FLOAT),
            Some((socket_idname::FLOAT, socket_idname::FLOAT_LIST))
        );
        assert_eq!(socket_idnames(&OBJECT).map(|(_, list)| list), Some(socket_idname::OBJECT_LIST));
        assert_eq!(get_list_element(&OBJECT).inputs[2].idname, socket_idname::OBJECT);
    }
}
