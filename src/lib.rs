//! Nodle function network compiler
//!
//! Turns authored node graphs into statically typed multi-function networks.

pub mod compiler;
pub mod config;
pub mod constants;
pub mod error;
pub mod functions;
pub mod mappings;
pub mod network;
pub mod nodes;
pub mod resources;
pub mod types;

// Re-export commonly used types
pub use compiler::{compile, compile_with, generate_network, resolve_socket_types};
pub use config::{CompilerConfig, MultiLinkPolicy};
pub use error::CompileError;
pub use mappings::{get_mappings, Mappings};
pub use network::{CompiledNetwork, MappedNetwork, Network};
pub use nodes::{Node, NodeGraph};
pub use resources::Resources;
