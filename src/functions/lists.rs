//! List functions over runtime element types

use super::{CallError, MultiFunction, Params, Signature};
use crate::types::{DataType, GenericList, Value, ValueType, INTEGER};

/// Number of elements in a list
pub struct ListLength {
    signature: Signature,
}

impl ListLength {
    pub fn new(ty: &'static ValueType) -> Self {
        Self {
            signature: Signature::new(format!("List Length ({})", ty))
                .input("List", DataType::List(ty))
                .output("Length", DataType::Single(&INTEGER)),
        }
    }
}

impl MultiFunction for ListLength {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let length = params.list(0)?.len();
        params.output_single(1, &INTEGER, length as i32)
    }
}

/// Element at an index, or the fallback when the index is out of range
pub struct GetListElement {
    ty: &'static ValueType,
    signature: Signature,
}

impl GetListElement {
    pub fn new(ty: &'static ValueType) -> Self {
        Self {
            ty,
            signature: Signature::new(format!("Get List Element ({})", ty))
                .input("List", DataType::List(ty))
                .input("Index", DataType::Single(&INTEGER))
                .input("Fallback", DataType::Single(ty))
                .output("Value", DataType::Single(ty)),
        }
    }
}

impl MultiFunction for GetListElement {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let index = *params.get::<i32>(1)?;
        let list = params.list(0)?;
        if list.element_type() != self.ty {
            return Err(CallError::WrongType {
                index: 0,
                expected: format!("List<{}>", self.ty),
            });
        }

        let element = usize::try_from(index)
            .ok()
            .and_then(|index| list.get(index))
            .cloned();
        let value = match element {
            Some(element) => element,
            None => params.single(2)?.clone(),
        };
        params.output(3, Value::Single(value))
    }
}

/// Packs single values and lists into one list
///
/// Every input is either a single element or a list whose elements are
/// appended. When the first input is a list it becomes a mutable param that
/// the remaining inputs are appended to; otherwise a fresh list is written
/// to an output param placed after all inputs.
pub struct PackList {
    ty: &'static ValueType,
    input_is_list: Vec<bool>,
    signature: Signature,
}

impl PackList {
    pub fn new(ty: &'static ValueType, input_is_list: Vec<bool>) -> Self {
        let mut signature = Signature::new(format!("Pack List ({})", ty));
        let appends = input_is_list.first().copied().unwrap_or(false);
        for (i, &is_list) in input_is_list.iter().enumerate() {
            if i == 0 && appends {
                signature = signature.mutable("List", DataType::List(ty));
            } else if is_list {
                signature = signature.input(format!("List {}", i), DataType::List(ty));
            } else {
                signature = signature.input(format!("Value {}", i), DataType::Single(ty));
            }
        }
        if !appends {
            signature = signature.output("List", DataType::List(ty));
        }

        Self {
            ty,
            input_is_list,
            signature,
        }
    }

    /// Param index of the resulting list
    pub fn output_param_index(&self) -> usize {
        match self.input_is_list.first() {
            Some(true) => 0,
            _ => self.input_is_list.len(),
        }
    }
}

impl MultiFunction for PackList {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let output_index = self.output_param_index();
        let (mut list, start) = if output_index == 0 {
            let list = params.take(0).ok_or(CallError::MissingParam(0))?;
            let list = list.into_list().ok_or_else(|| CallError::WrongType {
                index: 0,
                expected: "list".into(),
            })?;
            (list, 1)
        } else {
            (GenericList::new(self.ty), 0)
        };

        for index in start..self.input_is_list.len() {
            let mismatch = || CallError::WrongType {
                index,
                expected: self.ty.name().into(),
            };
            if self.input_is_list[index] {
                list.extend_from(params.list(index)?)
                    .map_err(|_| mismatch())?;
            } else {
                list.push(params.single(index)?.clone())
                    .map_err(|_| mismatch())?;
            }
        }

        params.output(output_index, Value::List(list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{call_with_inputs, ParamKind};
    use crate::types::{FLOAT, TEXT};

    fn floats(values: &[f32]) -> Value {
        Value::List(GenericList::from_values(&FLOAT, values.iter().copied()).unwrap())
    }

    fn float(value: f32) -> Value {
        Value::Single(FLOAT.wrap(value).unwrap())
    }

    fn int(value: i32) -> Value {
        Value::Single(INTEGER.wrap(value).unwrap())
    }

    fn as_floats(value: &Value) -> Vec<f32> {
        value
            .as_list()
            .unwrap()
            .values::<f32>()
            .unwrap()
            .into_iter()
            .copied()
            .collect()
    }

    #[test]
    fn test_list_length() {
        let outputs = call_with_inputs(&ListLength::new(&FLOAT), [floats(&[1.0, 2.0, 3.0])]).unwrap();
        assert_eq!(outputs[0].as_single().unwrap().get::<i32>(), Some(&3));
    }

    #[test]
    fn test_get_list_element() {
        let function = GetListElement::new(&FLOAT);
        let outputs = call_with_inputs(&function, [floats(&[4.0, 5.0]), int(1), float(-1.0)]).unwrap();
        assert_eq!(outputs[0].as_single().unwrap().get::<f32>(), Some(&5.0));
    }

    #[test]
    fn test_get_list_element_out_of_range_uses_fallback() {
        let function = GetListElement::new(&FLOAT);
        for index in [-1, 2] {
            let outputs =
                call_with_inputs(&function, [floats(&[4.0, 5.0]), int(index), float(-1.0)]).unwrap();
            assert_eq!(outputs[0].as_single().unwrap().get::<f32>(), Some(&-1.0));
        }
    }

    #[test]
    fn test_pack_list_signature_layouts() {
        let pack = PackList::new(&FLOAT, vec![false, true, false]);
        assert_eq!(pack.output_param_index(), 3);
        assert_eq!(pack.signature().len(), 4);
        assert_eq!(pack.signature().param(3).unwrap().kind, ParamKind::Output);
        assert_eq!(pack.signature().param(1).unwrap().data_type, DataType::List(&FLOAT));

        let append = PackList::new(&FLOAT, vec![true, false]);
        assert_eq!(append.output_param_index(), 0);
        assert_eq!(append.signature().len(), 2);
        assert_eq!(append.signature().param(0).unwrap().kind, ParamKind::Mutable);

        let empty = PackList::new(&TEXT, vec![]);
        assert_eq!(empty.output_param_index(), 0);
        assert_eq!(empty.signature().param(0).unwrap().kind, ParamKind::Output);
    }

    #[test]
    fn test_pack_list_values() {
        let pack = PackList::new(&FLOAT, vec![false, true, false]);
        let outputs =
            call_with_inputs(&pack, [float(1.0), floats(&[2.0, 3.0]), float(4.0)]).unwrap();
        assert_eq!(as_floats(&outputs[0]), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_pack_list_appends_to_first_list() {
        let append = PackList::new(&FLOAT, vec![true, false, true]);
        let outputs =
            call_with_inputs(&append, [floats(&[1.0]), float(2.0), floats(&[3.0])]).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(as_floats(&outputs[0]), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_pack_list_rejects_foreign_elements() {
        let pack = PackList::new(&FLOAT, vec![false]);
        let result = call_with_inputs(&pack, [int(1)]);
        assert!(matches!(result, Err(CallError::WrongType { index: 0, .. })));
    }
}
