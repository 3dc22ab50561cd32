//! Z-Wave Poll Control
//!
//! Some Z-Wave devices never report state changes on their own and have to
//! be polled. The protocol driver polls them on a single shared interval,
//! dividing it between every value that has polling enabled. This crate is the
//! addressed front end to that driver: it resolves a node + command class
//! (+ instance + index) into the value handles the driver understands and
//! forwards poll commands to them.
//!
//! # Architecture
//!
//! ```text
//! caller ──► PollController ──lookup_node──► NodeValueRegistry
//!                  │
//!                  └──handle──► PollDriver (radio-level scheduler)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use poll_control::prelude::*;
//! use value_registry::{NodeId, ValueAddress, ValueDescriptor, ValueRegistry};
//!
//! let registry = Arc::new(ValueRegistry::new());
//! let driver = Arc::new(MemoryPollDriver::new());
//!
//! registry
//!     .add_value(NodeId::new(5), ValueDescriptor::new(ValueAddress::new(0x25, 1, 0), 1))
//!     .unwrap();
//!
//! let controller = PollController::builder()
//!     .with_registry(registry)
//!     .with_driver(driver.clone())
//!     .with_config(PollConfig::default())
//!     .build()
//!     .unwrap();
//!
//! controller.set_poll_interval(10_000);
//! controller.enable_poll(5, 0x25, Some(2));
//! assert_eq!(controller.get_poll_intensity(5, 0x25, 1, 0), Some(2));
//! ```

pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod logging;

pub use config::PollConfig;
pub use controller::{PollController, PollControllerBuilder, DEFAULT_POLL_INTENSITY};
pub use driver::{MemoryPollDriver, PollDriver};
pub use error::{PollError, Result};
pub use logging::{init_logging, init_logging_from_env, init_silent, LoggingError, LoggingMode};

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::PollConfig;
    pub use crate::controller::PollController;
    pub use crate::driver::{MemoryPollDriver, PollDriver};
    pub use crate::error::PollError;
}
