//! Runtime values passed through function objects

use super::value_type::{Erased, ValueType};
use super::DataType;
use glam::Vec3;
use std::any::Any;
use std::fmt;

/// Handle to a scene object as seen by function objects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectRef {
    pub name: String,
    pub world_location: Vec3,
}

impl ObjectRef {
    pub fn new(name: impl Into<String>, world_location: Vec3) -> Self {
        Self {
            name: name.into(),
            world_location,
        }
    }
}

/// A single value whose concrete type is only known at runtime
pub struct GenericValue {
    ty: &'static ValueType,
    data: Erased,
}

impl GenericValue {
    /// `data` must hold a value of type `ty`
    pub(crate) fn from_erased(ty: &'static ValueType, data: Erased) -> Self {
        Self { ty, data }
    }

    pub fn value_type(&self) -> &'static ValueType {
        self.ty
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.data.downcast_ref()
    }
}

impl Clone for GenericValue {
    fn clone(&self) -> Self {
        Self {
            ty: self.ty,
            data: self.ty.clone_erased(&*self.data),
        }
    }
}

impl fmt::Debug for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.ty)?;
        self.ty.debug_erased(&*self.data, f)?;
        write!(f, ")")
    }
}

/// A homogeneous list of values of one runtime type
#[derive(Clone, Debug)]
pub struct GenericList {
    ty: &'static ValueType,
    items: Vec<GenericValue>,
}

impl GenericList {
    pub fn new(ty: &'static ValueType) -> Self {
        Self { ty, items: Vec::new() }
    }

    /// Builds a list from concrete values, `None` if `T` is not `ty`
    pub fn from_values<T>(ty: &'static ValueType, values: impl IntoIterator<Item = T>) -> Option<Self>
    where
        T: Any + Send + Sync,
    {
        let items = values
            .into_iter()
            .map(|value| ty.wrap(value))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { ty, items })
    }

    pub fn element_type(&self) -> &'static ValueType {
        self.ty
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GenericValue> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenericValue> {
        self.items.iter()
    }

    /// Appends a value, handing it back if its type does not match
    pub fn push(&mut self, value: GenericValue) -> Result<(), GenericValue> {
        if value.value_type() != self.ty {
            return Err(value);
        }
        self.items.push(value);
        Ok(())
    }

    /// Appends clones of all elements of `other`
    pub fn extend_from(&mut self, other: &GenericList) -> Result<(), &'static ValueType> {
        if other.ty != self.ty {
            return Err(other.ty);
        }
        self.items.extend(other.items.iter().cloned());
        Ok(())
    }

    /// Concrete view of the elements, `None` if `T` is not the element type
    pub fn values<T: 'static>(&self) -> Option<Vec<&T>> {
        self.items.iter().map(GenericValue::get::<T>).collect()
    }
}

/// A value flowing along a network link
#[derive(Clone, Debug)]
pub enum Value {
    Single(GenericValue),
    List(GenericList),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Single(value) => DataType::Single(value.value_type()),
            Value::List(list) => DataType::List(list.element_type()),
        }
    }

    /// Default value of a data type; lists start out empty
    pub fn default_for(data_type: DataType) -> Option<Self> {
        match data_type {
            DataType::None => None,
            DataType::Single(ty) => Some(Value::Single(ty.default_value())),
            DataType::List(ty) => Some(Value::List(GenericList::new(ty))),
        }
    }

    pub fn as_single(&self) -> Option<&GenericValue> {
        match self {
            Value::Single(value) => Some(value),
            Value::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&GenericList> {
        match self {
            Value::List(list) => Some(list),
            Value::Single(_) => None,
        }
    }

    pub fn into_list(self) -> Option<GenericList> {
        match self {
            Value::List(list) => Some(list),
            Value::Single(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::value_type::{FLOAT, INTEGER};

    #[test]
    fn test_list_is_homogeneous() {
        let mut list = GenericList::from_values(&FLOAT, [1.0f32, 2.0]).unwrap();
        assert!(list.push(FLOAT.wrap(3.0f32).unwrap()).is_ok());
        assert!(list.push(INTEGER.wrap(4i32).unwrap()).is_err());
        assert_eq!(list.values::<f32>().unwrap(), vec![&1.0, &2.0, &3.0]);
        assert!(GenericList::from_values(&INTEGER, [1.0f32]).is_none());
    }

    #[test]
    fn test_extend_from() {
        let mut a = GenericList::from_values(&INTEGER, [1i32]).unwrap();
        let b = GenericList::from_values(&INTEGER, [2i32, 3]).unwrap();
        a.extend_from(&b).unwrap();
        assert_eq!(a.len(), 3);

        let c = GenericList::new(&FLOAT);
        assert!(a.extend_from(&c).is_err());
    }

    #[test]
    fn test_value_defaults() {
        let single = Value::default_for(DataType::Single(&INTEGER)).unwrap();
        assert_eq!(single.as_single().and_then(|v| v.get::<i32>()), Some(&0));

        let list = Value::default_for(DataType::List(&FLOAT)).unwrap();
        assert!(list.as_list().unwrap().is_empty());
        assert_eq!(list.data_type(), DataType::List(&FLOAT));
        assert!(Value::default_for(DataType::None).is_none());
    }

    #[test]
    fn test_debug_output() {
        let value = INTEGER.wrap(7i32).unwrap();
        assert_eq!(format!("{:?}", value), "Integer(7)");
    }
}
