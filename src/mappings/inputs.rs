//! Default values for unlinked inputs

use super::types::socket_kinds;
use super::{InsertDefault, Mappings};
use crate::error::CompileError;
use crate::functions::ConstantValue;
use crate::network::OutputSocketRef;
use crate::nodes::{Port, PropertyValue};
use crate::types::{GenericList, GenericValue, ObjectRef, Value, ValueType};
use glam::Vec3;

pub fn register(mappings: &mut Mappings) {
    for (element_idname, list_idname, ty) in socket_kinds() {
        mappings.register_default(element_idname, constant_input(ty, false));
        mappings.register_default(list_idname, constant_input(ty, true));
    }
}

/// Inserter producing a constant from the port's authored value; list
/// inputs always start out empty
fn constant_input(ty: &'static ValueType, list: bool) -> InsertDefault {
    Box::new(move |builder, resources, port| {
        let value = if list {
            Value::List(GenericList::new(ty))
        } else {
            Value::Single(authored_value(ty, port)?)
        };
        let name = if list {
            format!("{} list input", ty)
        } else {
            format!("{} input", ty)
        };
        let function = resources.add_function(ConstantValue::new(value), name);
        let node = builder.add_function_node(resources, function, &[], &[0])?;
        Ok(OutputSocketRef::new(node, 0))
    })
}

/// Converts the authored value of `port` to `ty`, the type default when the
/// port has none
pub fn authored_value(ty: &'static ValueType, port: &Port) -> Result<GenericValue, CompileError> {
    let Some(value) = &port.value else {
        return Ok(ty.default_value());
    };

    let wrapped = match value {
        PropertyValue::Float(v) if ty.is::<f32>() => ty.wrap(*v as f32),
        PropertyValue::Int(v) if ty.is::<f32>() => ty.wrap(*v as f32),
        PropertyValue::Int(v) if ty.is::<i32>() => {
            let v = i32::try_from(*v).map_err(|_| {
                CompileError::InvalidConfig(format!("value {} of '{}' is out of range", v, port.name))
            })?;
            ty.wrap(v)
        }
        PropertyValue::Bool(v) if ty.is::<bool>() => ty.wrap(*v),
        PropertyValue::Vector(v) if ty.is::<Vec3>() => ty.wrap(Vec3::from_array(*v)),
        PropertyValue::String(v) if ty.is::<String>() => ty.wrap(v.clone()),
        PropertyValue::String(v) if ty.is::<ObjectRef>() => ty.wrap(ObjectRef::new(v.clone(), Vec3::ZERO)),
        other => {
            return Err(CompileError::InvalidConfig(format!(
                "input '{}' has a {} value, expected {}",
                port.name,
                other.kind(),
                ty
            )))
        }
    };
    wrapped.ok_or_else(|| CompileError::Internal(format!("cannot wrap value of '{}' as {}", port.name, ty)))
}
