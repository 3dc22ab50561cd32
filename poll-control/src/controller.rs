//! PollController - addressed poll commands over the value registry
//!
//! Every operation resolves its address against the registry afresh and then
//! delegates to the driver. Two matching policies coexist:
//!
//! - `enable_poll` / `disable_poll` work per command class and act on the
//!   first value of that class in discovery order only.
//! - `set_poll_intensity` / `get_poll_intensity` act on every value at the
//!   exact (class, instance, index); a read returns the last match's answer.
//!
//! Unknown nodes and unmatched addresses are silent no-ops.

use std::sync::Arc;

use tracing::{debug, trace};
use value_registry::{NodeId, NodeRecord, NodeValueRegistry, ValueAddress, ValueHandle};

use crate::config::PollConfig;
use crate::driver::PollDriver;
use crate::error::{PollError, Result};

/// Intensity used by `enable_poll` when neither caller nor config gives one
pub const DEFAULT_POLL_INTENSITY: u8 = 1;

/// Poll control engine
///
/// Holds no poll state of its own: the registry owns the values and the
/// driver owns their poll flags, intensities and the global interval.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use poll_control::{MemoryPollDriver, PollController};
/// use value_registry::{NodeId, ValueAddress, ValueDescriptor, ValueRegistry};
///
/// let registry = Arc::new(ValueRegistry::new());
/// let driver = Arc::new(MemoryPollDriver::new());
/// registry
///     .add_value(NodeId::new(5), ValueDescriptor::new(ValueAddress::new(0x25, 1, 0), 1))
///     .unwrap();
///
/// let controller = PollController::new(registry, driver.clone());
/// controller.enable_poll(5, 0x25, None);
/// assert_eq!(controller.is_polled(5, 0x25, 1, 0), Some(true));
/// assert_eq!(controller.is_polled(6, 0x25, 1, 0), None);
/// ```
#[derive(Clone)]
pub struct PollController {
    registry: Arc<dyn NodeValueRegistry>,
    driver: Arc<dyn PollDriver>,
    default_intensity: u8,
}

impl PollController {
    /// Create a controller with default settings
    ///
    /// Unlike [`PollControllerBuilder::build`] this does not touch the
    /// driver's poll interval.
    pub fn new(registry: Arc<dyn NodeValueRegistry>, driver: Arc<dyn PollDriver>) -> Self {
        Self {
            registry,
            driver,
            default_intensity: DEFAULT_POLL_INTENSITY,
        }
    }

    /// Create a builder for configuring the controller
    pub fn builder() -> PollControllerBuilder {
        PollControllerBuilder::default()
    }

    /// Intensity applied by `enable_poll(.., None)`
    pub fn default_intensity(&self) -> u8 {
        self.default_intensity
    }

    // ========================================================================
    // Global interval
    // ========================================================================

    /// Set the time between polls, shared by all polled values
    ///
    /// Passed to the driver as-is, in non-exclusive mode: the driver spreads
    /// the interval over every value with polling enabled. It is recommended
    /// not to go below one second per polled device.
    pub fn set_poll_interval(&self, interval_ms: u32) {
        debug!(interval_ms, "setting poll interval");
        self.driver.set_poll_interval(interval_ms, false);
    }

    // ========================================================================
    // Per command class
    // ========================================================================

    /// Enable polling on the first value of `command_class` on a node
    ///
    /// `intensity` defaults to the configured default (1 unless changed).
    pub fn enable_poll(&self, node_id: u8, command_class: u8, intensity: Option<u8>) {
        let node_id = NodeId::new(node_id);
        let intensity = intensity.unwrap_or(self.default_intensity);

        let Some(handle) = self.first_of_class(node_id, command_class) else {
            return;
        };
        debug!(%node_id, command_class, %handle, intensity, "enabling poll");
        self.driver.enable_poll(handle, intensity);
    }

    /// Disable polling on the first value of `command_class` on a node
    pub fn disable_poll(&self, node_id: u8, command_class: u8) {
        let node_id = NodeId::new(node_id);

        let Some(handle) = self.first_of_class(node_id, command_class) else {
            return;
        };
        debug!(%node_id, command_class, %handle, "disabling poll");
        self.driver.disable_poll(handle);
    }

    // ========================================================================
    // Per exact address
    // ========================================================================

    /// Whether the value at the exact address is polled
    ///
    /// `None` when the node or address is unknown, which is not the same
    /// as `Some(false)`.
    pub fn is_polled(
        &self,
        node_id: u8,
        command_class: u8,
        instance: u8,
        index: u8,
    ) -> Option<bool> {
        let address = ValueAddress::new(command_class, instance, index);
        self.with_value(node_id, address, |driver, handle| driver.is_polled(handle))
    }

    /// Set the poll intensity of every value at the exact address
    pub fn set_poll_intensity(
        &self,
        node_id: u8,
        command_class: u8,
        instance: u8,
        index: u8,
        intensity: u8,
    ) {
        let node_id = NodeId::new(node_id);
        let address = ValueAddress::new(command_class, instance, index);

        let Some(record) = self.lookup(node_id) else {
            return;
        };
        for value in record.matching(&address) {
            debug!(%node_id, %address, handle = %value.handle, intensity, "setting poll intensity");
            self.driver.set_poll_intensity(value.handle, intensity);
        }
    }

    /// Poll intensity of the value at the exact address
    ///
    /// Every match is queried and the last one in discovery order wins.
    /// `None` when nothing matches.
    pub fn get_poll_intensity(
        &self,
        node_id: u8,
        command_class: u8,
        instance: u8,
        index: u8,
    ) -> Option<u8> {
        let node_id = NodeId::new(node_id);
        let address = ValueAddress::new(command_class, instance, index);

        let record = self.lookup(node_id)?;
        let mut intensity = None;
        for value in record.matching(&address) {
            intensity = Some(self.driver.get_poll_intensity(value.handle));
        }
        if intensity.is_none() {
            trace!(%node_id, %address, "no value at address");
        }
        intensity
    }

    // ========================================================================
    // Generic value access
    // ========================================================================

    /// Locate the first value at the exact address and run `f` against it
    ///
    /// Returns `None` without calling `f` when nothing matches.
    pub fn with_value<R, F>(&self, node_id: u8, address: ValueAddress, f: F) -> Option<R>
    where
        F: FnOnce(&dyn PollDriver, ValueHandle) -> R,
    {
        let handle = self.value_handle(node_id, address)?;
        Some(f(self.driver.as_ref(), handle))
    }

    /// Handle of the first value at the exact address
    pub fn value_handle(&self, node_id: u8, address: ValueAddress) -> Option<ValueHandle> {
        let node_id = NodeId::new(node_id);
        let handle = self
            .lookup(node_id)?
            .matching(&address)
            .next()
            .map(|value| value.handle);
        if handle.is_none() {
            trace!(%node_id, %address, "no value at address");
        }
        handle
    }

    fn first_of_class(&self, node_id: NodeId, command_class: u8) -> Option<ValueHandle> {
        let handle = self
            .lookup(node_id)?
            .first_of_class(command_class)
            .map(|value| value.handle);
        if handle.is_none() {
            trace!(%node_id, command_class, "no value of command class");
        }
        handle
    }

    fn lookup(&self, node_id: NodeId) -> Option<NodeRecord> {
        let record = self.registry.lookup_node(node_id);
        if record.is_none() {
            trace!(%node_id, "unknown node");
        }
        record
    }
}

impl std::fmt::Debug for PollController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollController")
            .field("default_intensity", &self.default_intensity)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`PollController`]
#[derive(Default)]
pub struct PollControllerBuilder {
    registry: Option<Arc<dyn NodeValueRegistry>>,
    driver: Option<Arc<dyn PollDriver>>,
    config: PollConfig,
}

impl PollControllerBuilder {
    /// Set the registry addresses are resolved against
    pub fn with_registry(mut self, registry: Arc<dyn NodeValueRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the driver poll commands are delegated to
    pub fn with_driver(mut self, driver: Arc<dyn PollDriver>) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Replace the default configuration
    pub fn with_config(mut self, config: PollConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the PollController
    ///
    /// Validates the configuration and, if `initial_interval_ms` is set,
    /// pushes it to the driver.
    pub fn build(self) -> Result<PollController> {
        self.config.validate()?;
        let registry = self
            .registry
            .ok_or(PollError::MissingCollaborator("value registry"))?;
        let driver = self
            .driver
            .ok_or(PollError::MissingCollaborator("poll driver"))?;

        let controller = PollController {
            registry,
            driver,
            default_intensity: self.config.default_intensity,
        };

        if let Some(interval_ms) = self.config.initial_interval_ms {
            controller.set_poll_interval(interval_ms);
        }

        Ok(controller)
    }
}
