//! Element-wise lifting of a function over list inputs

use super::{CallError, MultiFunction, ParamKind, Params, Signature};
use crate::types::{GenericList, Value};
use std::sync::Arc;

/// Calls a base function once per list element
///
/// Inputs flagged as vectorized take lists of the base input's type, all
/// outputs become lists. The result length is that of the longest list
/// input. Shorter lists continue with their element type's default and
/// unflagged inputs are passed to every call unchanged.
pub struct SimpleVectorize {
    base: Arc<dyn MultiFunction>,
    input_is_vectorized: Vec<bool>,
    signature: Signature,
}

impl SimpleVectorize {
    /// `input_is_vectorized` holds one flag per input param of `base`.
    /// Returns `None` when the flags do not match or `base` has mutable
    /// params.
    pub fn new(base: Arc<dyn MultiFunction>, input_is_vectorized: Vec<bool>) -> Option<Self> {
        let base_signature = base.signature();
        let input_count = base_signature
            .params
            .iter()
            .filter(|param| param.kind == ParamKind::Input)
            .count();
        let has_mutable = base_signature
            .params
            .iter()
            .any(|param| param.kind == ParamKind::Mutable);
        if has_mutable || input_count != input_is_vectorized.len() {
            return None;
        }

        let mut signature = Signature::new(format!("Vectorize {}", base.name()));
        let mut flags = input_is_vectorized.iter();
        for param in &base_signature.params {
            match param.kind {
                ParamKind::Input => {
                    let data_type = match flags.next() {
                        Some(true) => param.data_type.to_list(),
                        _ => param.data_type,
                    };
                    signature.push(param.name.clone(), ParamKind::Input, data_type);
                }
                ParamKind::Output => {
                    signature.push(param.name.clone(), ParamKind::Output, param.data_type.to_list());
                }
                ParamKind::Mutable => return None,
            }
        }

        Some(Self {
            base,
            input_is_vectorized,
            signature,
        })
    }

    pub fn base(&self) -> &Arc<dyn MultiFunction> {
        &self.base
    }

    pub fn input_is_vectorized(&self) -> &[bool] {
        &self.input_is_vectorized
    }

    /// Value of an input param for the element at `index`
    fn element_input(
        &self,
        params: &Params,
        param_index: usize,
        vectorized: bool,
        index: usize,
    ) -> Result<Value, CallError> {
        if !vectorized {
            return params.value(param_index).cloned();
        }
        let list = params.list(param_index)?;
        let value = match list.get(index) {
            Some(value) => value.clone(),
            None => list.element_type().default_value(),
        };
        Ok(Value::Single(value))
    }
}

impl MultiFunction for SimpleVectorize {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let base_signature = self.base.signature();

        let inputs: Vec<(usize, bool)> = base_signature
            .params
            .iter()
            .enumerate()
            .filter(|(_, param)| param.kind == ParamKind::Input)
            .map(|(index, _)| index)
            .zip(self.input_is_vectorized.iter().copied())
            .collect();

        let mut length = 0;
        for &(param_index, vectorized) in &inputs {
            if vectorized {
                length = length.max(params.list(param_index)?.len());
            }
        }

        let mut outputs: Vec<(usize, GenericList)> = Vec::new();
        for (index, param) in base_signature.params.iter().enumerate() {
            if param.kind != ParamKind::Output {
                continue;
            }
            let ty = param.data_type.element_type().ok_or_else(|| CallError::WrongType {
                index,
                expected: param.data_type.to_string(),
            })?;
            outputs.push((index, GenericList::new(ty)));
        }

        for element in 0..length {
            let mut base_params = Params::new(base_signature);
            for &(param_index, vectorized) in &inputs {
                let value = self.element_input(params, param_index, vectorized, element)?;
                base_params.set(param_index, value)?;
            }

            self.base.call(&mut base_params)?;

            for (param_index, list) in outputs.iter_mut() {
                let value = base_params.single(*param_index)?.clone();
                list.push(value).map_err(|_| CallError::WrongType {
                    index: *param_index,
                    expected: list.element_type().name().into(),
                })?;
            }
        }

        for (param_index, list) in outputs {
            params.output(param_index, Value::List(list))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for SimpleVectorize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleVectorize")
            .field("base", &self.base.name())
            .field("input_is_vectorized", &self.input_is_vectorized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{call_with_inputs, AddFloats, SeparateVector};
    use crate::types::{DataType, FLOAT, VECTOR};
    use glam::Vec3;

    fn floats(values: &[f32]) -> Value {
        Value::List(GenericList::from_values(&FLOAT, values.iter().copied()).unwrap())
    }

    fn float(value: f32) -> Value {
        Value::Single(FLOAT.wrap(value).unwrap())
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
    fn test_signature_lifts_flagged_inputs() {
        let vectorized = SimpleVectorize::new(Arc::new(AddFloats::new()), vec![true, false]).unwrap();
        let signature = vectorized.signature();
        assert_eq!(signature.param(0).unwrap().data_type, DataType::List(&FLOAT));
        assert_eq!(signature.param(1).unwrap().data_type, DataType::Single(&FLOAT));
        assert_eq!(signature.param(2).unwrap().data_type, DataType::List(&FLOAT));
        assert_eq!(signature.param(2).unwrap().kind, ParamKind::Output);
    }

    #[test]
    fn test_flag_count_must_match_inputs() {
        assert!(SimpleVectorize::new(Arc::new(AddFloats::new()), vec![true]).is_none());
    }

    #[test]
    fn test_broadcasts_single_input() {
        let vectorized = SimpleVectorize::new(Arc::new(AddFloats::new()), vec![true, false]).unwrap();
        let outputs = call_with_inputs(&vectorized, [floats(&[1.0, 2.0, 3.0]), float(10.0)]).unwrap();
        assert_eq!(as_floats(&outputs[0]), vec![11.0, 12.0, 13.0]);
    }

    #[test]
    fn test_shorter_list_uses_default() {
        let vectorized = SimpleVectorize::new(Arc::new(AddFloats::new()), vec![true, true]).unwrap();
        let outputs = call_with_inputs(&vectorized, [floats(&[1.0, 2.0, 3.0]), floats(&[5.0])]).unwrap();
        assert_eq!(as_floats(&outputs[0]), vec![6.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_list_gives_empty_outputs() {
        let vectorized = SimpleVectorize::new(Arc::new(AddFloats::new()), vec![true, false]).unwrap();
        let outputs = call_with_inputs(&vectorized, [floats(&[]), float(1.0)]).unwrap();
        assert!(outputs[0].as_list().unwrap().is_empty());
    }

    #[test]
    fn test_multiple_outputs() {
        let vectorized = SimpleVectorize::new(Arc::new(SeparateVector::new()), vec![true]).unwrap();
        let vectors = GenericList::from_values(&VECTOR, [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]).unwrap();
        let outputs = call_with_inputs(&vectorized, [Value::List(vectors)]).unwrap();
        assert_eq!(outputs.len(), 3);
        assert_eq!(as_floats(&outputs[0]), vec![1.0, 4.0]);
        assert_eq!(as_floats(&outputs[2]), vec![3.0, 6.0]);
    }
}
