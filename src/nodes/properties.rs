//! Per-node configuration properties
//!
//! Nodes carry an opaque bag of typed properties which only their inserter
//! reads. Variadic sub-items are stored as collections of nested bags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Vector([f32; 3]),
    String(String),
    Collection(Vec<Properties>),
}

impl PropertyValue {
    /// Human readable name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::Float(_) => "float",
            PropertyValue::Vector(_) => "vector",
            PropertyValue::String(_) => "string",
            PropertyValue::Collection(_) => "collection",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("property '{key}' is missing")]
    Missing { key: String },
    #[error("property '{key}' is a {found}, expected {expected}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Keyed property bag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, PropertyValue>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: PropertyValue) -> &mut Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    fn require(&self, key: &str) -> Result<&PropertyValue, PropertyError> {
        self.0.get(key).ok_or_else(|| PropertyError::Missing {
            key: key.to_string(),
        })
    }

    fn wrong_type(key: &str, expected: &'static str, found: &PropertyValue) -> PropertyError {
        PropertyError::WrongType {
            key: key.to_string(),
            expected,
            found: found.kind(),
        }
    }

    pub fn string(&self, key: &str) -> Result<&str, PropertyError> {
        match self.require(key)? {
            PropertyValue::String(s) => Ok(s),
            other => Err(Self::wrong_type(key, "string", other)),
        }
    }

    /// Enum properties are stored as their integer discriminant
    pub fn int(&self, key: &str) -> Result<i64, PropertyError> {
        match self.require(key)? {
            PropertyValue::Int(i) => Ok(*i),
            other => Err(Self::wrong_type(key, "int", other)),
        }
    }

    /// Integers are accepted where a float is expected
    pub fn float(&self, key: &str) -> Result<f64, PropertyError> {
        match self.require(key)? {
            PropertyValue::Float(f) => Ok(*f),
            PropertyValue::Int(i) => Ok(*i as f64),
            other => Err(Self::wrong_type(key, "float", other)),
        }
    }

    pub fn bool(&self, key: &str) -> Result<bool, PropertyError> {
        match self.require(key)? {
            PropertyValue::Bool(b) => Ok(*b),
            other => Err(Self::wrong_type(key, "bool", other)),
        }
    }

    pub fn vector(&self, key: &str) -> Result<[f32; 3], PropertyError> {
        match self.require(key)? {
            PropertyValue::Vector(v) => Ok(*v),
            other => Err(Self::wrong_type(key, "vector", other)),
        }
    }

    /// Iterate the sub-items of a repeated property
    pub fn collection(&self, key: &str) -> Result<&[Properties], PropertyError> {
        match self.require(key)? {
            PropertyValue::Collection(items) => Ok(items),
            other => Err(Self::wrong_type(key, "collection", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_access() {
        let props = Properties::new()
            .with("active_type", PropertyValue::String("Float".into()))
            .with("count", PropertyValue::Int(3));

        assert_eq!(props.string("active_type"), Ok("Float"));
        assert_eq!(props.int("count"), Ok(3));
        assert_eq!(props.float("count"), Ok(3.0));
        assert!(matches!(
            props.int("active_type"),
            Err(PropertyError::WrongType { expected: "int", found: "string", .. })
        ));
        assert!(matches!(props.string("missing"), Err(PropertyError::Missing { .. })));
    }

    #[test]
    fn test_collection_items() {
        let item = |state| Properties::new().with("state", PropertyValue::Int(state));
        let props = Properties::new().with(
            "variadic",
            PropertyValue::Collection(vec![item(0), item(1)]),
        );

        let states = props
            .collection("variadic")
            .unwrap()
            .iter()
            .map(|p| p.int("state").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(states, vec![0, 1]);
    }

    #[test]
    fn test_json_shape() {
        let props: Properties = serde_json::from_str(
            r#"{"use_list__a": "LIST", "variadic": [{"state": 1}], "value": [1.0, 2.0, 3.0]}"#,
        )
        .unwrap();

        assert_eq!(props.string("use_list__a"), Ok("LIST"));
        assert_eq!(props.collection("variadic").unwrap().len(), 1);
        assert_eq!(props.vector("value"), Ok([1.0, 2.0, 3.0]));
    }
}
