//! Static data types of network sockets

pub mod value;
pub mod value_type;

pub use value::{GenericList, GenericValue, ObjectRef, Value};
pub use value_type::{builtin_types, ValueType, BOOLEAN, FLOAT, INTEGER, OBJECT, TEXT, VECTOR};

use std::fmt;

/// Resolved type of a socket
///
/// `None` marks sockets that carry no compiled value; they are left out of
/// network construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DataType {
    #[default]
    None,
    Single(&'static ValueType),
    List(&'static ValueType),
}

impl DataType {
    pub fn is_none(&self) -> bool {
        matches!(self, DataType::None)
    }

    /// Whether sockets of this type take part in the network
    pub fn is_data(&self) -> bool {
        !self.is_none()
    }

    pub fn is_list(&self) -> bool {
        matches!(self, DataType::List(_))
    }

    /// Element type of a single value or list
    pub fn element_type(&self) -> Option<&'static ValueType> {
        match *self {
            DataType::None => None,
            DataType::Single(ty) | DataType::List(ty) => Some(ty),
        }
    }

    /// The list form of this type's element
    pub fn to_list(&self) -> DataType {
        match *self {
            DataType::None => DataType::None,
            DataType::Single(ty) | DataType::List(ty) => DataType::List(ty),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::None => f.write_str("None"),
            DataType::Single(ty) => write!(f, "{}", ty),
            DataType::List(ty) => write!(f, "List<{}>", ty),
        }
    }
}
