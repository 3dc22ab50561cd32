//! Z-Wave Node Value Registry
//!
//! Keeps, per node, the ordered list of values discovered on the network.
//! Each value carries its command class, instance and index together with an
//! opaque handle the protocol driver understands.
//!
//! # Features
//!
//! - **Ordered Values**: values stay in discovery order, which the poll engine
//!   relies on for its first-match policy
//! - **Snapshot Lookups**: `lookup_node` hands back a copy, never a borrowed view
//! - **Shared State**: clones of a `ValueRegistry` see the same nodes
//!
//! # Quick Start
//!
//! ```rust
//! use value_registry::prelude::*;
//!
//! let registry = ValueRegistry::new();
//! let node = NodeId::new(5);
//!
//! // Discovery reports two binary-switch instances on node 5
//! registry.add_value(node, ValueDescriptor::new(ValueAddress::new(0x25, 1, 0), 100)).unwrap();
//! registry.add_value(node, ValueDescriptor::new(ValueAddress::new(0x25, 2, 0), 101)).unwrap();
//!
//! let record = registry.lookup_node(node).unwrap();
//! assert_eq!(record.first_of_class(0x25).unwrap().instance, 1);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ValueRegistry
//!     │
//!     └── nodes: HashMap<NodeId, NodeRecord>
//!             │
//!             └── NodeRecord: Vec<ValueDescriptor>   (discovery order)
//! ```

// Modules
pub mod error;
pub mod model;
pub mod registry;

// Re-exports - Public API
pub use error::{RegistryError, Result};
pub use model::{NodeId, NodeRecord, ValueAddress, ValueDescriptor, ValueHandle};
pub use registry::{NodeValueRegistry, ValueRegistry};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::model::{NodeId, NodeRecord, ValueAddress, ValueDescriptor, ValueHandle};
    pub use crate::registry::{NodeValueRegistry, ValueRegistry};
}
