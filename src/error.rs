//! Error types for the compiler

use thiserror::Error;

use crate::schema::NodeId;

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;

/// Structural problems in a schema tree arena
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Node {node} refers to {field} handle {handle} which is out of range ({len} nodes)")]
    DanglingHandle {
        node: NodeId,
        field: &'static str,
        handle: NodeId,
        len: usize,
    },

    #[error("Node {child} is listed as a child of {parent} but its parent is {actual:?}")]
    ParentMismatch {
        parent: NodeId,
        child: NodeId,
        actual: Option<NodeId>,
    },

    #[error("Node {node} is its own ancestor")]
    ParentCycle { node: NodeId },

    #[error("Module not found: {0}")]
    ModuleNotFound(String),
}

/// Fatal compilation errors
///
/// Anything that can degrade locally is reported through
/// [`Diagnostics`](crate::diagnostics::Diagnostics) instead.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Module '{module}' has no namespace declaration")]
    MissingNamespace { module: String },

    #[error("Module '{module}' has no prefix declaration")]
    MissingPrefix { module: String },

    #[error("Node '{name}' ({id}) is not a module")]
    NotAModule { name: String, id: NodeId },

    #[error("Invalid schema tree: {0}")]
    Schema(#[from] SchemaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
