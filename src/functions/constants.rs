use super::{CallError, MultiFunction, Params, Signature};
use crate::types::Value;

/// Outputs a fixed value
pub struct ConstantValue {
    value: Value,
    signature: Signature,
}

impl ConstantValue {
    pub fn new(value: Value) -> Self {
        let data_type = value.data_type();
        Self {
            value,
            signature: Signature::new(format!("Constant {}", data_type)).output("Value", data_type),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl MultiFunction for ConstantValue {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        params.output(0, self.value.clone())
    }
}
