//! Registry tables driving the compiler
//!
//! Everything the compiler knows about concrete node and socket kinds lives
//! here: socket kind to static type, element types by name, and the
//! inserters for nodes, implicit conversions and unlinked-input defaults.
//! The built-in tables are assembled once by [`get_mappings`]; an empty
//! [`Mappings`] can be filled by hand for custom node sets.

pub mod conversions;
pub mod inputs;
pub mod nodes;
pub mod types;

use crate::error::CompileError;
use crate::network::{GraphNetworkBuilder, InputSocketRef, OutputSocketRef};
use crate::nodes::{Node, Port};
use crate::resources::Resources;
use crate::types::{DataType, ValueType};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Compiles one graph node into network nodes and maps all of its data
/// sockets
pub type InsertNodeFn =
    fn(&mut GraphNetworkBuilder<'_>, &mut Resources, &Mappings, &Node) -> Result<(), CompileError>;

/// Adds a conversion node, returning its input and output
pub type InsertConversion = Box<
    dyn Fn(&mut GraphNetworkBuilder<'_>, &mut Resources) -> Result<(InputSocketRef, OutputSocketRef), CompileError>
        + Send
        + Sync,
>;

/// Adds a node producing the value of an unlinked input port
pub type InsertDefault = Box<
    dyn Fn(&mut GraphNetworkBuilder<'_>, &mut Resources, &Port) -> Result<OutputSocketRef, CompileError>
        + Send
        + Sync,
>;

/// Registry of types and inserters, keyed by kind identifiers
#[derive(Default)]
pub struct Mappings {
    data_types: BTreeMap<String, DataType>,
    value_types: BTreeMap<String, &'static ValueType>,
    node_inserters: BTreeMap<String, InsertNodeFn>,
    conversion_inserters: BTreeMap<(String, String), InsertConversion>,
    input_inserters: BTreeMap<String, InsertDefault>,
}

impl Mappings {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in registry
    pub fn builtin() -> Self {
        let mut mappings = Self::new();
        types::register(&mut mappings);
        nodes::register(&mut mappings);
        conversions::register(&mut mappings);
        inputs::register(&mut mappings);
        debug!(
            "Registered {} socket types, {} node inserters, {} conversions, {} input defaults",
            mappings.data_types.len(),
            mappings.node_inserters.len(),
            mappings.conversion_inserters.len(),
            mappings.input_inserters.len()
        );
        mappings
    }

    pub fn register_socket(&mut self, idname: impl Into<String>, data_type: DataType) {
        self.data_types.insert(idname.into(), data_type);
    }

    pub fn register_value_type(&mut self, ty: &'static ValueType) {
        self.value_types.insert(ty.name().to_string(), ty);
    }

    pub fn register_node(&mut self, idname: impl Into<String>, inserter: InsertNodeFn) {
        self.node_inserters.insert(idname.into(), inserter);
    }

    pub fn register_conversion(
        &mut self,
        from_idname: impl Into<String>,
        to_idname: impl Into<String>,
        inserter: InsertConversion,
    ) {
        self.conversion_inserters
            .insert((from_idname.into(), to_idname.into()), inserter);
    }

    pub fn register_default(&mut self, idname: impl Into<String>, inserter: InsertDefault) {
        self.input_inserters.insert(idname.into(), inserter);
    }

    /// Static type of a socket kind, `None` for unknown kinds
    pub fn data_type(&self, idname: &str) -> DataType {
        self.data_types.get(idname).copied().unwrap_or_default()
    }

    pub fn value_type(&self, name: &str) -> Option<&'static ValueType> {
        self.value_types.get(name).copied()
    }

    pub fn node_inserter(&self, idname: &str) -> Option<InsertNodeFn> {
        self.node_inserters.get(idname).copied()
    }

    pub fn conversion_inserter(&self, from_idname: &str, to_idname: &str) -> Option<&InsertConversion> {
        self.conversion_inserters
            .get(&(from_idname.to_string(), to_idname.to_string()))
    }

    pub fn input_inserter(&self, idname: &str) -> Option<&InsertDefault> {
        self.input_inserters.get(idname)
    }

    /// Registered socket kinds
    pub fn socket_idnames(&self) -> impl Iterator<Item = &str> {
        self.data_types.keys().map(String::as_str)
    }

    /// Registered node kinds
    pub fn node_idnames(&self) -> impl Iterator<Item = &str> {
        self.node_inserters.keys().map(String::as_str)
    }
}

static MAPPINGS: Lazy<Mappings> = Lazy::new(Mappings::builtin);

/// Shared built-in registry, created on first use
pub fn get_mappings() -> &'static Mappings {
    &MAPPINGS
}
