//! Type-erased element types
//!
//! A [`ValueType`] describes a concrete Rust type by name, size and the few
//! operations generic code needs (default construction, cloning, type
//! checks). Function objects receive it at runtime, e.g. from a node's
//! `active_type` property, and operate on values without knowing the
//! concrete type.

use super::value::{GenericValue, ObjectRef};
use crate::constants::type_name;
use glam::Vec3;
use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

pub(crate) type Erased = Box<dyn Any + Send + Sync>;

pub struct ValueType {
    name: &'static str,
    size: usize,
    alignment: usize,
    type_id: fn() -> TypeId,
    default: fn() -> Erased,
    clone: fn(&(dyn Any + Send + Sync)) -> Erased,
    debug: fn(&(dyn Any + Send + Sync), &mut fmt::Formatter<'_>) -> fmt::Result,
}

fn default_erased<T: Default + Send + Sync + 'static>() -> Erased {
    Box::new(T::default())
}

fn clone_erased<T: Clone + Send + Sync + 'static>(value: &(dyn Any + Send + Sync)) -> Erased {
    match value.downcast_ref::<T>() {
        Some(value) => Box::new(value.clone()),
        // GenericValue only ever pairs a box with its own type
        None => unreachable!("value does not match its type descriptor"),
    }
}

fn debug_erased<T: fmt::Debug + 'static>(
    value: &(dyn Any + Send + Sync),
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => value.fmt(f),
        None => f.write_str("<mismatched>"),
    }
}

impl ValueType {
    /// Describes `T` under the given name
    pub fn new<T>(name: &'static str) -> Self
    where
        T: Clone + Default + fmt::Debug + Send + Sync + 'static,
    {
        Self {
            name,
            size: std::mem::size_of::<T>(),
            alignment: std::mem::align_of::<T>(),
            type_id: TypeId::of::<T>,
            default: default_erased::<T>,
            clone: clone_erased::<T>,
            debug: debug_erased::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Whether this descriptor describes `T`
    pub fn is<T: 'static>(&self) -> bool {
        (self.type_id)() == TypeId::of::<T>()
    }

    /// Default-constructed value of this type
    pub fn default_value(&'static self) -> GenericValue {
        GenericValue::from_erased(self, (self.default)())
    }

    /// Wraps a concrete value, or returns `None` if `T` is not this type
    pub fn wrap<T: Any + Send + Sync>(&'static self, value: T) -> Option<GenericValue> {
        self.is::<T>()
            .then(|| GenericValue::from_erased(self, Box::new(value)))
    }

    pub(crate) fn clone_erased(&self, value: &(dyn Any + Send + Sync)) -> Erased {
        (self.clone)(value)
    }

    pub(crate) fn debug_erased(
        &self,
        value: &(dyn Any + Send + Sync),
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        (self.debug)(value, f)
    }
}

// Names are unique among registered types
impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && (self.type_id)() == (other.type_id)()
    }
}

impl Eq for ValueType {}

impl Hash for ValueType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state)
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub static FLOAT: Lazy<ValueType> = Lazy::new(|| ValueType::new::<f32>(type_name::FLOAT));
pub static INTEGER: Lazy<ValueType> = Lazy::new(|| ValueType::new::<i32>(type_name::INTEGER));
pub static BOOLEAN: Lazy<ValueType> = Lazy::new(|| ValueType::new::<bool>(type_name::BOOLEAN));
pub static VECTOR: Lazy<ValueType> = Lazy::new(|| ValueType::new::<Vec3>(type_name::VECTOR));
pub static TEXT: Lazy<ValueType> = Lazy::new(|| ValueType::new::<String>(type_name::TEXT));
pub static OBJECT: Lazy<ValueType> = Lazy::new(|| ValueType::new::<ObjectRef>(type_name::OBJECT));

/// All built-in element types
pub fn builtin_types() -> [&'static ValueType; 6] {
    [&*FLOAT, &*INTEGER, &*BOOLEAN, &*VECTOR, &*TEXT, &*OBJECT]
}
