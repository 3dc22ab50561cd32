use thiserror::Error;

use crate::model::{NodeId, ValueHandle};

/// Errors raised by the mutating side of the registry
///
/// Lookups never fail; an unknown node is simply `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A value with this handle is already registered on the node
    #[error("Value {handle} already registered on node {node_id}")]
    DuplicateHandle { node_id: NodeId, handle: ValueHandle },

    /// Node has not been added to the registry
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
