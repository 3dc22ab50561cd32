//! Node value storage
//!
//! This module provides the registry the poll engine resolves addresses against:
//! - `NodeValueRegistry`: lookup-by-node seam
//! - `ValueRegistry`: in-memory implementation fed by discovery notifications

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::model::{NodeId, NodeRecord, ValueDescriptor, ValueHandle};

// ============================================================================
// NodeValueRegistry - lookup seam
// ============================================================================

/// Read side of a node value registry
///
/// Implementations must be internally synchronized. The returned record is a
/// snapshot taken at call time; callers resolve it fresh on every operation
/// instead of holding on to it.
pub trait NodeValueRegistry: Send + Sync {
    /// Look up a node and its values in discovery order
    fn lookup_node(&self, node_id: NodeId) -> Option<NodeRecord>;
}

impl<R: NodeValueRegistry + ?Sized> NodeValueRegistry for Arc<R> {
    fn lookup_node(&self, node_id: NodeId) -> Option<NodeRecord> {
        (**self).lookup_node(node_id)
    }
}

// ============================================================================
// ValueRegistry - in-memory registry
// ============================================================================

/// In-memory registry of nodes and their discovered values
///
/// Values keep the order in which they were added. Cloning is cheap and
/// clones share the same underlying state.
///
/// # Example
///
/// ```rust
/// use value_registry::{NodeId, NodeValueRegistry, ValueAddress, ValueDescriptor, ValueRegistry};
///
/// let registry = ValueRegistry::new();
/// let node = NodeId::new(5);
///
/// registry
///     .add_value(node, ValueDescriptor::new(ValueAddress::new(0x25, 1, 0), 1))
///     .unwrap();
///
/// let record = registry.lookup_node(node).unwrap();
/// assert_eq!(record.values.len(), 1);
/// assert!(registry.lookup_node(NodeId::new(6)).is_none());
/// ```
#[derive(Clone, Default)]
pub struct ValueRegistry {
    nodes: Arc<RwLock<HashMap<NodeId, NodeRecord>>>,
}

impl ValueRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node with no values
    ///
    /// Returns `false` if the node was already known; its values are kept.
    pub fn add_node(&self, node_id: NodeId) -> bool {
        let added = {
            let mut nodes = self.nodes.write();
            if nodes.contains_key(&node_id) {
                false
            } else {
                nodes.insert(node_id, NodeRecord::new(node_id));
                true
            }
        };
        if added {
            debug!(%node_id, "node added");
        }
        added
    }

    /// Remove a node and all of its values
    pub fn remove_node(&self, node_id: NodeId) -> bool {
        let removed = self.nodes.write().remove(&node_id).is_some();
        if removed {
            debug!(%node_id, "node removed");
        }
        removed
    }

    /// Append a value to a node, creating the node record if needed
    pub fn add_value(&self, node_id: NodeId, value: ValueDescriptor) -> Result<()> {
        {
            let mut nodes = self.nodes.write();
            let record = nodes
                .entry(node_id)
                .or_insert_with(|| NodeRecord::new(node_id));

            if record.values.iter().any(|v| v.handle == value.handle) {
                return Err(RegistryError::DuplicateHandle {
                    node_id,
                    handle: value.handle,
                });
            }
            record.values.push(value);
        }

        debug!(%node_id, address = %value.address(), handle = %value.handle, "value added");
        Ok(())
    }

    /// Remove a value from a node, preserving the order of the rest
    ///
    /// Returns `Ok(false)` if the node is known but the handle isn't.
    pub fn remove_value(&self, node_id: NodeId, handle: ValueHandle) -> Result<bool> {
        let removed = {
            let mut nodes = self.nodes.write();
            let record = nodes
                .get_mut(&node_id)
                .ok_or(RegistryError::NodeNotFound(node_id))?;

            let before = record.values.len();
            record.values.retain(|v| v.handle != handle);
            record.values.len() != before
        };
        if removed {
            debug!(%node_id, %handle, "value removed");
        }
        Ok(removed)
    }

    /// Get the number of nodes in the registry
    pub fn node_count(&self) -> usize {
        self.nodes.read().len()
    }

    /// Get the number of values registered on a node
    pub fn value_count(&self, node_id: NodeId) -> usize {
        self.nodes
            .read()
            .get(&node_id)
            .map(NodeRecord::len)
            .unwrap_or(0)
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Get all node IDs, sorted
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.read().keys().copied().collect();
        ids.sort();
        ids
    }

    /// Drop every node and value
    pub fn clear(&self) {
        self.nodes.write().clear();
    }
}

impl NodeValueRegistry for ValueRegistry {
    fn lookup_node(&self, node_id: NodeId) -> Option<NodeRecord> {
        self.nodes.read().get(&node_id).cloned()
    }
}

impl std::fmt::Debug for ValueRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueRegistry")
            .field("node_count", &self.node_count())
            .finish()
    }
}
