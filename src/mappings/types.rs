//! Socket kinds and element types

use super::Mappings;
use crate::constants::socket_idname;
use crate::types::{builtin_types, DataType, ValueType, BOOLEAN, FLOAT, INTEGER, OBJECT, TEXT, VECTOR};

/// Element socket kind, list socket kind and element type of every
/// built-in value type
pub fn socket_kinds() -> [(&'static str, &'static str, &'static ValueType); 6] {
    [
        (socket_idname::FLOAT, socket_idname::FLOAT_LIST, &*FLOAT),
        (socket_idname::INTEGER, socket_idname::INTEGER_LIST, &*INTEGER),
        (socket_idname::BOOLEAN, socket_idname::BOOLEAN_LIST, &*BOOLEAN),
        (socket_idname::VECTOR, socket_idname::VECTOR_LIST, &*VECTOR),
        (socket_idname::TEXT, socket_idname::TEXT_LIST, &*TEXT),
        (socket_idname::OBJECT, socket_idname::OBJECT_LIST, &*OBJECT),
    ]
}

pub fn register(mappings: &mut Mappings) {
    for ty in builtin_types() {
        mappings.register_value_type(ty);
    }
    for (element_idname, list_idname, ty) in socket_kinds() {
        mappings.register_socket(element_idname, DataType::Single(ty));
        mappings.register_socket(list_idname, DataType::List(ty));
    }
}
