//! Identifiers shared between authored graphs and the compiler
//!
//! Centralized location for node and socket kind identifiers, property keys
//! and element type names so that graphs, mappings and tests agree.

/// Node kind identifiers
pub mod node_idname {
    pub const FLOAT_MATH: &str = "fn_FloatMathNode";
    pub const VECTOR_MATH: &str = "fn_VectorMathNode";
    pub const COMBINE_VECTOR: &str = "fn_CombineVectorNode";
    pub const SEPARATE_VECTOR: &str = "fn_SeparateVectorNode";
    pub const LIST_LENGTH: &str = "fn_ListLengthNode";
    pub const PACK_LIST: &str = "fn_PackListNode";
    pub const GET_LIST_ELEMENT: &str = "fn_GetListElementNode";
    pub const OBJECT_TRANSFORMS: &str = "fn_ObjectTransformsNode";
    pub const TEXT_LENGTH: &str = "fn_TextLengthNode";
}

/// Socket kind identifiers
pub mod socket_idname {
    pub const FLOAT: &str = "fn_FloatSocket";
    pub const INTEGER: &str = "fn_IntegerSocket";
    pub const BOOLEAN: &str = "fn_BooleanSocket";
    pub const VECTOR: &str = "fn_VectorSocket";
    pub const TEXT: &str = "fn_TextSocket";
    pub const OBJECT: &str = "fn_ObjectSocket";

    pub const FLOAT_LIST: &str = "fn_FloatListSocket";
    pub const INTEGER_LIST: &str = "fn_IntegerListSocket";
    pub const BOOLEAN_LIST: &str = "fn_BooleanListSocket";
    pub const VECTOR_LIST: &str = "fn_VectorListSocket";
    pub const TEXT_LIST: &str = "fn_TextListSocket";
    pub const OBJECT_LIST: &str = "fn_ObjectListSocket";

    /// Control-flow socket without a value
    pub const OPERATOR: &str = "fn_OperatorSocket";
}

/// Element type names as stored in node configuration
pub mod type_name {
    pub const FLOAT: &str = "Float";
    pub const INTEGER: &str = "Integer";
    pub const BOOLEAN: &str = "Boolean";
    pub const VECTOR: &str = "Vector";
    pub const TEXT: &str = "Text";
    pub const OBJECT: &str = "Object";
}

/// Node configuration property keys
pub mod property {
    /// Element type of list nodes
    pub const ACTIVE_TYPE: &str = "active_type";

    /// Variadic sub-items of the pack list node
    pub const VARIADIC: &str = "variadic";

    /// Per-item state inside `variadic`: 0 single value, 1 list
    pub const STATE: &str = "state";

    /// Authored default value of a socket
    pub const VALUE: &str = "value";

    /// Vectorization state values
    pub const STATE_BASE: &str = "BASE";
    pub const STATE_LIST: &str = "LIST";

    /// Per-input vectorization switches
    pub const USE_LIST_A: &str = "use_list__a";
    pub const USE_LIST_B: &str = "use_list__b";
    pub const USE_LIST_X: &str = "use_list__x";
    pub const USE_LIST_Y: &str = "use_list__y";
    pub const USE_LIST_Z: &str = "use_list__z";
    pub const USE_LIST_VECTOR: &str = "use_list__vector";
}
