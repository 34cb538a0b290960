//! Failure causes of a compilation

use crate::network::NetworkError;
use crate::nodes::properties::PropertyError;
use crate::nodes::SocketId;
use crate::types::DataType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A data input is linked to an output that carries no type
    #[error("input {input} is linked to untyped output {output}")]
    UnresolvedSourceType { input: SocketId, output: SocketId },

    #[error("no implicit conversion from {from} ({from_idname}) to {to} ({to_idname})")]
    MissingConversion {
        from: DataType,
        to: DataType,
        from_idname: String,
        to_idname: String,
    },

    #[error("no default value for unlinked input {socket} ({idname})")]
    MissingDefault { socket: SocketId, idname: String },

    #[error("input {socket} has {count} incoming links")]
    MultiplyLinkedInput { socket: SocketId, count: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A registered inserter broke the builder's rules
    #[error("internal error: {0}")]
    Internal(String),
}

impl CompileError {
    /// Short name of the failure cause
    pub fn cause(&self) -> &'static str {
        match self {
            CompileError::UnresolvedSourceType { .. } => "unresolved source type",
            CompileError::MissingConversion { .. } => "missing conversion",
            CompileError::MissingDefault { .. } => "missing default",
            CompileError::MultiplyLinkedInput { .. } => "multiply-linked input",
            CompileError::InvalidConfig(_) => "invalid configuration",
            CompileError::Internal(_) => "internal consistency violation",
        }
    }
}

impl From<NetworkError> for CompileError {
    fn from(error: NetworkError) -> Self {
        CompileError::Internal(error.to_string())
    }
}

impl From<PropertyError> for CompileError {
    fn from(error: PropertyError) -> Self {
        CompileError::InvalidConfig(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::InputSocketRef;

    #[test]
    fn test_conversions_into_compile_error() {
        let error: CompileError = NetworkError::UnlinkedInput(InputSocketRef::new(1, 0)).into();
        assert_eq!(error, CompileError::Internal("input #1.in0 has no incoming link".into()));
        assert_eq!(error.cause(), "internal consistency violation");

        let error: CompileError = PropertyError::Missing { key: "active_type".into() }.into();
        assert!(matches!(error, CompileError::InvalidConfig(ref message) if message.contains("active_type")));
    }

    #[test]
    fn test_messages() {
        let error = CompileError::MultiplyLinkedInput {
            socket: SocketId::input(4, 1),
            count: 2,
        };
        assert_eq!(error.to_string(), "input node 4 in 1 has 2 incoming links");
        assert_eq!(error.cause(), "multiply-linked input");
    }
}
