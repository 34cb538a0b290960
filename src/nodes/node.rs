//! Node types and core node functionality

use super::port::{Port, PortId, PortType};
use super::properties::{Properties, PropertyValue};
use serde::{Deserialize, Serialize};

/// Unique identifier for a node
pub type NodeId = usize;

/// An authored node: a kind identifier, its sockets and its configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Node kind identifier used to look up its inserter
    pub idname: String,
    pub title: String,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    #[serde(default)]
    pub properties: Properties,
}

impl Node {
    /// Creates a new node of the given kind
    pub fn new(id: NodeId, idname: impl Into<String>) -> Self {
        let idname = idname.into();
        Self {
            id,
            title: idname.clone(),
            idname,
            inputs: vec![],
            outputs: vec![],
            properties: Properties::new(),
        }
    }

    /// Adds an input port to the node
    pub fn add_input(&mut self, name: impl Into<String>, idname: impl Into<String>) -> &mut Self {
        let port_id = self.inputs.len();
        self.inputs
            .push(Port::new(port_id, name, idname, PortType::Input));
        self
    }

    /// Adds an input port carrying an authored default value
    pub fn add_input_with_value(
        &mut self,
        name: impl Into<String>,
        idname: impl Into<String>,
        value: PropertyValue,
    ) -> &mut Self {
        self.add_input(name, idname);
        if let Some(port) = self.inputs.last_mut() {
            port.value = Some(value);
        }
        self
    }

    /// Adds an output port to the node
    pub fn add_output(&mut self, name: impl Into<String>, idname: impl Into<String>) -> &mut Self {
        let port_id = self.outputs.len();
        self.outputs
            .push(Port::new(port_id, name, idname, PortType::Output));
        self
    }

    /// Sets a configuration property
    pub fn with_property(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.set(key, value);
        self
    }

    /// Sets the display title of the node
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn input(&self, port: PortId) -> Option<&Port> {
        self.inputs.get(port)
    }

    pub fn output(&self, port: PortId) -> Option<&Port> {
        self.outputs.get(port)
    }

    /// Looks up a port by direction and index
    pub fn port(&self, port_type: PortType, port: PortId) -> Option<&Port> {
        match port_type {
            PortType::Input => self.input(port),
            PortType::Output => self.output(port),
        }
    }
}
