//! Implicit conversions between socket kinds

use super::types::socket_kinds;
use super::{InsertConversion, Mappings};
use crate::constants::socket_idname;
use crate::functions::conversions::ConvertFn;
use crate::functions::{ConvertValue, MultiFunction, SingleElementList};
use crate::network::{InputSocketRef, OutputSocketRef};
use crate::types::{GenericValue, ValueType, BOOLEAN, FLOAT, INTEGER, VECTOR};
use glam::Vec3;

fn int_to_float(value: &GenericValue) -> Option<GenericValue> {
    FLOAT.wrap(*value.get::<i32>()? as f32)
}

/// Truncates toward zero
fn float_to_int(value: &GenericValue) -> Option<GenericValue> {
    INTEGER.wrap(*value.get::<f32>()? as i32)
}

fn bool_to_float(value: &GenericValue) -> Option<GenericValue> {
    FLOAT.wrap(if *value.get::<bool>()? { 1.0f32 } else { 0.0 })
}

fn bool_to_int(value: &GenericValue) -> Option<GenericValue> {
    INTEGER.wrap(i32::from(*value.get::<bool>()?))
}

fn float_to_vector(value: &GenericValue) -> Option<GenericValue> {
    VECTOR.wrap(Vec3::splat(*value.get::<f32>()?))
}

fn int_to_vector(value: &GenericValue) -> Option<GenericValue> {
    VECTOR.wrap(Vec3::splat(*value.get::<i32>()? as f32))
}

/// An element conversion together with the socket kinds it connects
struct ElementConversion {
    from_idname: &'static str,
    to_idname: &'static str,
    from_list_idname: &'static str,
    to_list_idname: &'static str,
    from: &'static ValueType,
    to: &'static ValueType,
    convert: ConvertFn,
}

fn element_conversions() -> Vec<ElementConversion> {
    let conversion = |from_idname, to_idname, from_list_idname, to_list_idname, from, to, convert| {
        ElementConversion {
            from_idname,
            to_idname,
            from_list_idname,
            to_list_idname,
            from,
            to,
            convert,
        }
    };
    use socket_idname as s;
    vec![
        conversion(s::INTEGER, s::FLOAT, s::INTEGER_LIST, s::FLOAT_LIST, &*INTEGER, &*FLOAT, int_to_float as ConvertFn),
        conversion(s::FLOAT, s::INTEGER, s::FLOAT_LIST, s::INTEGER_LIST, &*FLOAT, &*INTEGER, float_to_int),
        conversion(s::BOOLEAN, s::FLOAT, s::BOOLEAN_LIST, s::FLOAT_LIST, &*BOOLEAN, &*FLOAT, bool_to_float),
        conversion(s::BOOLEAN, s::INTEGER, s::BOOLEAN_LIST, s::INTEGER_LIST, &*BOOLEAN, &*INTEGER, bool_to_int),
        conversion(s::FLOAT, s::VECTOR, s::FLOAT_LIST, s::VECTOR_LIST, &*FLOAT, &*VECTOR, float_to_vector),
        conversion(s::INTEGER, s::VECTOR, s::INTEGER_LIST, s::VECTOR_LIST, &*INTEGER, &*VECTOR, int_to_vector),
    ]
}

/// Inserter adding one single-input, single-output function node
fn function_conversion<F, M>(name: String, make: M) -> InsertConversion
where
    F: MultiFunction + 'static,
    M: Fn() -> F + Send + Sync + 'static,
{
    Box::new(move |builder, resources| {
        let function = resources.add_function(make(), name.clone());
        let node = builder.add_function_node(resources, function, &[0], &[1])?;
        Ok((InputSocketRef::new(node, 0), OutputSocketRef::new(node, 0)))
    })
}

pub fn register(mappings: &mut Mappings) {
    for conversion in element_conversions() {
        let ElementConversion { from, to, convert, .. } = conversion;
        mappings.register_conversion(
            conversion.from_idname,
            conversion.to_idname,
            function_conversion(format!("{} to {} conversion", from, to), move || {
                ConvertValue::new(from, to, convert)
            }),
        );
        mappings.register_conversion(
            conversion.from_list_idname,
            conversion.to_list_idname,
            function_conversion(format!("{} list to {} list conversion", from, to), move || {
                ConvertValue::list(from, to, convert)
            }),
        );
    }

    for (element_idname, list_idname, ty) in socket_kinds() {
        mappings.register_conversion(
            element_idname,
            list_idname,
            function_conversion(format!("{} single element list", ty), move || SingleElementList::new(ty)),
        );
    }
}
