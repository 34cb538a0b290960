//! Arithmetic, vector and lookup functions on single values

use super::{CallError, MultiFunction, Params, Signature};
use crate::types::{DataType, ObjectRef, FLOAT, INTEGER, OBJECT, TEXT, VECTOR};
use glam::Vec3;

/// Sum of two floats
pub struct AddFloats {
    signature: Signature,
}

impl AddFloats {
    pub fn new() -> Self {
        Self {
            signature: Signature::new("Add Floats")
                .input("A", DataType::Single(&FLOAT))
                .input("B", DataType::Single(&FLOAT))
                .output("Result", DataType::Single(&FLOAT)),
        }
    }
}

impl Default for AddFloats {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiFunction for AddFloats {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let a = *params.get::<f32>(0)?;
        let b = *params.get::<f32>(1)?;
        params.output_single(2, &FLOAT, a + b)
    }
}

/// Component-wise sum of two vectors
pub struct AddFloat3s {
    signature: Signature,
}

impl AddFloat3s {
    pub fn new() -> Self {
        Self {
            signature: Signature::new("Add Vectors")
                .input("A", DataType::Single(&VECTOR))
                .input("B", DataType::Single(&VECTOR))
                .output("Result", DataType::Single(&VECTOR)),
        }
    }
}

impl Default for AddFloat3s {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiFunction for AddFloat3s {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let a = *params.get::<Vec3>(0)?;
        let b = *params.get::<Vec3>(1)?;
        params.output_single(2, &VECTOR, a + b)
    }
}

/// Builds a vector from three floats
pub struct CombineVector {
    signature: Signature,
}

impl CombineVector {
    pub fn new() -> Self {
        Self {
            signature: Signature::new("Combine Vector")
                .input("X", DataType::Single(&FLOAT))
                .input("Y", DataType::Single(&FLOAT))
                .input("Z", DataType::Single(&FLOAT))
                .output("Vector", DataType::Single(&VECTOR)),
        }
    }
}

impl Default for CombineVector {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiFunction for CombineVector {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let x = *params.get::<f32>(0)?;
        let y = *params.get::<f32>(1)?;
        let z = *params.get::<f32>(2)?;
        params.output_single(3, &VECTOR, Vec3::new(x, y, z))
    }
}

/// Splits a vector into its three components
pub struct SeparateVector {
    signature: Signature,
}

impl SeparateVector {
    pub fn new() -> Self {
        Self {
            signature: Signature::new("Separate Vector")
                .input("Vector", DataType::Single(&VECTOR))
                .output("X", DataType::Single(&FLOAT))
                .output("Y", DataType::Single(&FLOAT))
                .output("Z", DataType::Single(&FLOAT)),
        }
    }
}

impl Default for SeparateVector {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiFunction for SeparateVector {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let vector = *params.get::<Vec3>(0)?;
        params.output_single(1, &FLOAT, vector.x)?;
        params.output_single(2, &FLOAT, vector.y)?;
        params.output_single(3, &FLOAT, vector.z)
    }
}

/// World space location of an object, zero for an empty reference
pub struct ObjectWorldLocation {
    signature: Signature,
}

impl ObjectWorldLocation {
    pub fn new() -> Self {
        Self {
            signature: Signature::new("Object Location")
                .input("Object", DataType::Single(&OBJECT))
                .output("Location", DataType::Single(&VECTOR)),
        }
    }
}

impl Default for ObjectWorldLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiFunction for ObjectWorldLocation {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let object = params.get::<ObjectRef>(0)?;
        let location = if object.name.is_empty() {
            Vec3::ZERO
        } else {
            object.world_location
        };
        params.output_single(1, &VECTOR, location)
    }
}

/// Number of characters in a text
pub struct TextLength {
    signature: Signature,
}

impl TextLength {
    pub fn new() -> Self {
        Self {
            signature: Signature::new("Text Length")
                .input("Text", DataType::Single(&TEXT))
                .output("Length", DataType::Single(&INTEGER)),
        }
    }
}

impl Default for TextLength {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiFunction for TextLength {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, params: &mut Params) -> Result<(), CallError> {
        let length = params.get::<String>(0)?.chars().count();
        params.output_single(1, &INTEGER, length as i32)
    }
}
