//! Implicit conversions inserted between mismatched sockets

use super::{CallError, MultiFunction, Params, Signature};
use crate::types::{DataType, GenericList, GenericValue, Value, ValueType};

/// Element conversion routine, `None` if the value is not of the source type
pub type ConvertFn = fn(&GenericValue) -> Option<GenericValue>;

/// Converts a single value or, in list form, every element of a list
pub struct ConvertValue {
    from: &'static ValueType,
    to: &'static ValueType,
    convert: ConvertFn,
    list: bool,
    signature: Signature,
}

impl ConvertValue {
    pub fn new(from: &'static ValueType, to: &'static ValueType, convert: ConvertFn) -> Self {
        Self::build(from, to, convert, false)
    }

    /// Element-wise form converting `List<from>` to `List<to>`
    pub fn list(from: &'static ValueType, to: &'static ValueType, convert: ConvertFn) -> Self {
        Self::build(from, to, convert, true)
    }

    fn build(from: &'static ValueType, to: &'static ValueType, convert: ConvertFn, list: bool) -> Self {
        let (input, output) = if list {
            (DataType::List(from), DataType::List(to))
        } else {
            (DataType::Single(from), DataType::Single(to))
        };
        Self {
            from,
            to,
            convert,
            list,
            signature: Signature::new(format!("Convert {} to {}", input, output))
                .input("In", input)
                .output("Out", output),
        }
    }

    fn convert_one(&self, value: &GenericValue) -> Result<GenericValue, CallError> {
        (self.convert)(value).ok_or_else(|| CallError::WrongType {
            index: 0,
            expected: self.from.name().into(),
        })
    }
}

impl MultiFunction for ConvertValue {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let output = if self.list {
            let mut converted = GenericList::new(self.to);
            for value in params.list(0)?.iter() {
                let value = self.convert_one(value)?;
                converted.push(value).map_err(|_| CallError::WrongType {
                    index: 1,
                    expected: self.to.name().into(),
                })?;
            }
            Value::List(converted)
        } else {
            Value::Single(self.convert_one(params.single(0)?)?)
        };
        params.output(1, output)
    }
}

/// Wraps a single value into a one-element list
pub struct SingleElementList {
    signature: Signature,
}

impl SingleElementList {
    pub fn new(ty: &'static ValueType) -> Self {
        Self {
            signature: Signature::new(format!("Single Element List ({})", ty))
                .input("Value", DataType::Single(ty))
                .output("List", DataType::List(ty)),
        }
    }
}

impl MultiFunction for SingleElementList {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let value = params.single(0)?.clone();
        let mut list = GenericList::new(value.value_type());
        list.push(value).map_err(|_| CallError::WrongType {
            index: 0,
            expected: "list element".into(),
        })?;
        params.output(1, Value::List(list))
    }
}
