//! Function objects placed into compiled networks
//!
//! A [`MultiFunction`] has an ordered parameter list. Network nodes refer to
//! parameters by index, so the order in a [`Signature`] is part of each
//! function's contract.

pub mod constants;
pub mod conversions;
pub mod lists;
pub mod math;
pub mod vectorize;

pub use constants::ConstantValue;
pub use conversions::{ConvertValue, SingleElementList};
pub use lists::{GetListElement, ListLength, PackList};
pub use math::{AddFloat3s, AddFloats, CombineVector, ObjectWorldLocation, SeparateVector, TextLength};
pub use vectorize::SimpleVectorize;

use crate::types::{DataType, GenericList, GenericValue, Value, ValueType};
use thiserror::Error;

/// How a function uses one of its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Input,
    Output,
    /// Read and then modified in place
    Mutable,
}

impl ParamKind {
    pub fn is_input(&self) -> bool {
        matches!(self, ParamKind::Input | ParamKind::Mutable)
    }

    pub fn is_output(&self) -> bool {
        matches!(self, ParamKind::Output | ParamKind::Mutable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub data_type: DataType,
}

/// Ordered parameter list of a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub function_name: String,
    pub params: Vec<Param>,
}

impl Signature {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            params: Vec::new(),
        }
    }

    pub fn input(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.push(name, ParamKind::Input, data_type);
        self
    }

    pub fn output(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.push(name, ParamKind::Output, data_type);
        self
    }

    pub fn mutable(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.push(name, ParamKind::Mutable, data_type);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, kind: ParamKind, data_type: DataType) {
        self.params.push(Param {
            name: name.into(),
            kind,
            data_type,
        });
    }

    pub fn param(&self, index: usize) -> Option<&Param> {
        self.params.get(index)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("parameter {0} has no value")]
    MissingParam(usize),
    #[error("parameter {index} expected {expected}")]
    WrongType { index: usize, expected: String },
    #[error("parameter {0} does not exist")]
    NoSuchParam(usize),
}

/// Parameter values for one invocation, indexed like the signature
#[derive(Debug, Default)]
pub struct Params {
    values: Vec<Option<Value>>,
}

impl Params {
    pub fn new(signature: &Signature) -> Self {
        Self {
            values: signature.params.iter().map(|_| None).collect(),
        }
    }

    /// Provides an input or mutable value
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), CallError> {
        let slot = self
            .values
            .get_mut(index)
            .ok_or(CallError::NoSuchParam(index))?;
        *slot = Some(value);
        Ok(())
    }

    /// Writes an output value
    pub fn output(&mut self, index: usize, value: Value) -> Result<(), CallError> {
        self.set(index, value)
    }

    /// Writes a concrete value as a single output of type `ty`
    pub fn output_single<T: std::any::Any + Send + Sync>(
        &mut self,
        index: usize,
        ty: &'static ValueType,
        value: T,
    ) -> Result<(), CallError> {
        let value = ty.wrap(value).ok_or_else(|| CallError::WrongType {
            index,
            expected: ty.name().into(),
        })?;
        self.output(index, Value::Single(value))
    }

    pub fn value(&self, index: usize) -> Result<&Value, CallError> {
        self.values
            .get(index)
            .ok_or(CallError::NoSuchParam(index))?
            .as_ref()
            .ok_or(CallError::MissingParam(index))
    }

    pub fn take(&mut self, index: usize) -> Option<Value> {
        self.values.get_mut(index)?.take()
    }

    pub fn single(&self, index: usize) -> Result<&GenericValue, CallError> {
        self.value(index)?
            .as_single()
            .ok_or_else(|| CallError::WrongType {
                index,
                expected: "single value".into(),
            })
    }

    /// Typed view of a single value
    pub fn get<T: 'static>(&self, index: usize) -> Result<&T, CallError> {
        self.single(index)?
            .get::<T>()
            .ok_or_else(|| CallError::WrongType {
                index,
                expected: std::any::type_name::<T>().into(),
            })
    }

    pub fn list(&self, index: usize) -> Result<&GenericList, CallError> {
        self.value(index)?
            .as_list()
            .ok_or_else(|| CallError::WrongType {
                index,
                expected: "list".into(),
            })
    }

    pub fn list_mut(&mut self, index: usize) -> Result<&mut GenericList, CallError> {
        match self.values.get_mut(index) {
            None => Err(CallError::NoSuchParam(index)),
            Some(None) => Err(CallError::MissingParam(index)),
            Some(Some(Value::List(list))) => Ok(list),
            Some(Some(Value::Single(_))) => Err(CallError::WrongType {
                index,
                expected: "list".into(),
            }),
        }
    }
}

/// A function object with a fixed signature
///
/// Implementations are shared read-only between threads once a network is
/// built.
pub trait MultiFunction: Send + Sync {
    fn signature(&self) -> &Signature;

    /// Computes all output and mutable params from the input params
    fn call(&self, params: &mut Params) -> Result<(), CallError>;

    fn name(&self) -> &str {
        &self.signature().function_name
    }
}

/// Invokes `function` once with the given input values, in parameter
/// order, and returns the values of all output and mutable params.
pub fn call_with_inputs(
    function: &dyn MultiFunction,
    inputs: impl IntoIterator<Item = Value>,
) -> Result<Vec<Value>, CallError> {
    let signature = function.signature();
    let mut params = Params::new(signature);
    let mut inputs = inputs.into_iter();
    for (index, param) in signature.params.iter().enumerate() {
        if param.kind.is_input() {
            let value = inputs.next().ok_or(CallError::MissingParam(index))?;
            params.set(index, value)?;
        }
    }

    function.call(&mut params)?;

    signature
        .params
        .iter()
        .enumerate()
        .filter(|(_, param)| param.kind.is_output())
        .map(|(index, _)| params.take(index).ok_or(CallError::MissingParam(index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FLOAT, INTEGER};

    #[test]
    fn test_signature_builder() {
        let sig = Signature::new("Test")
            .input("A", DataType::Single(&FLOAT))
            .mutable("List", DataType::List(&FLOAT))
            .output("Count", DataType::Single(&INTEGER));

        assert_eq!(sig.len(), 3);
        assert!(sig.param(1).unwrap().kind.is_input());
        assert!(sig.param(1).unwrap().kind.is_output());
        assert!(!sig.param(2).unwrap().kind.is_input());
    }

    #[test]
    fn test_params_access() {
        let sig = Signature::new("Test")
            .input("A", DataType::Single(&FLOAT))
            .output("B", DataType::Single(&FLOAT));
        let mut params = Params::new(&sig);

        assert_eq!(params.get::<f32>(0), Err(CallError::MissingParam(0)));
        params
            .set(0, Value::Single(FLOAT.wrap(2.5f32).unwrap()))
            .unwrap();
        assert_eq!(params.get::<f32>(0), Ok(&2.5));
        assert!(matches!(params.get::<i32>(0), Err(CallError::WrongType { index: 0, .. })));
        assert!(matches!(params.list(0), Err(CallError::WrongType { .. })));
        assert_eq!(
            params.set(5, Value::Single(FLOAT.default_value())),
            Err(CallError::NoSuchParam(5))
        );
    }
}
