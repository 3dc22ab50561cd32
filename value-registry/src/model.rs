//! Identity and descriptor types for discovered values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate common ID type implementations
///
/// The optional format string overrides the plain decimal `Display`.
macro_rules! impl_id_type {
    ($name:ident, $inner:ty) => {
        impl_id_type!($name, $inner, "{}");
    };
    ($name:ident, $inner:ty, $display:literal) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, $display, self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(raw: $inner) -> Self {
                $name::new(raw)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Identifier of a single node on the mesh network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u8);

impl NodeId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl_id_type!(NodeId, u8);

/// Opaque handle the protocol driver uses to address one value
///
/// The registry never interprets it; two descriptors with the same
/// handle on one node are rejected by [`crate::ValueRegistry::add_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueHandle(u64);

impl ValueHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl_id_type!(ValueHandle, u64, "{:#018x}");

/// Placement of a value inside a node: command class, instance and index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueAddress {
    pub command_class: u8,
    pub instance: u8,
    pub index: u8,
}

impl ValueAddress {
    pub const fn new(command_class: u8, instance: u8, index: u8) -> Self {
        Self {
            command_class,
            instance,
            index,
        }
    }
}

impl fmt::Display for ValueAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cc={:#04x} instance={} index={}",
            self.command_class, self.instance, self.index
        )
    }
}

/// One discovered value on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDescriptor {
    pub command_class: u8,
    pub instance: u8,
    pub index: u8,
    pub handle: ValueHandle,
}

impl ValueDescriptor {
    pub fn new(address: ValueAddress, handle: u64) -> Self {
        Self {
            command_class: address.command_class,
            instance: address.instance,
            index: address.index,
            handle: ValueHandle::new(handle),
        }
    }

    pub fn address(&self) -> ValueAddress {
        ValueAddress::new(self.command_class, self.instance, self.index)
    }

    /// Exact match on command class, instance and index
    pub fn matches(&self, address: &ValueAddress) -> bool {
        self.command_class == address.command_class
            && self.instance == address.instance
            && self.index == address.index
    }
}

/// A node and its values in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node_id: NodeId,
    pub values: Vec<ValueDescriptor>,
}

impl NodeRecord {
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            values: Vec::new(),
        }
    }

    /// First value in discovery order belonging to `command_class`
    ///
    /// Later values of the same class are ignored, whatever their
    /// instance or index.
    pub fn first_of_class(&self, command_class: u8) -> Option<&ValueDescriptor> {
        self.values
            .iter()
            .find(|value| value.command_class == command_class)
    }

    /// Every value at exactly `address`, in discovery order
    pub fn matching<'a>(
        &'a self,
        address: &'a ValueAddress,
    ) -> impl Iterator<Item = &'a ValueDescriptor> + 'a {
        self.values.iter().filter(move |value| value.matches(address))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
