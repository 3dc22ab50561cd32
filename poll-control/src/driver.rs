//! Protocol driver seam and an in-memory driver
//!
//! The radio-level scheduler that actually polls devices lives behind
//! [`PollDriver`]. The controller only configures it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;
use value_registry::ValueHandle;

/// Poll configuration surface of the Z-Wave protocol driver
///
/// Implementations are shared between threads and must synchronize
/// internally. Failures (unreachable radio, unresponsive device) are the
/// driver's own concern and are not reported back.
pub trait PollDriver: Send + Sync {
    /// Set the interval shared by every polled value
    ///
    /// With `exclusive == false` the driver divides the interval between all
    /// values that have polling enabled.
    fn set_poll_interval(&self, interval_ms: u32, exclusive: bool);

    /// Start polling a value at the given intensity
    fn enable_poll(&self, handle: ValueHandle, intensity: u8);

    /// Stop polling a value
    fn disable_poll(&self, handle: ValueHandle);

    /// Whether a value is currently polled
    fn is_polled(&self, handle: ValueHandle) -> bool;

    /// Change the poll intensity of a value
    fn set_poll_intensity(&self, handle: ValueHandle, intensity: u8);

    /// Current poll intensity of a value
    fn get_poll_intensity(&self, handle: ValueHandle) -> u8;
}

impl<D: PollDriver + ?Sized> PollDriver for Arc<D> {
    fn set_poll_interval(&self, interval_ms: u32, exclusive: bool) {
        (**self).set_poll_interval(interval_ms, exclusive)
    }

    fn enable_poll(&self, handle: ValueHandle, intensity: u8) {
        (**self).enable_poll(handle, intensity)
    }

    fn disable_poll(&self, handle: ValueHandle) {
        (**self).disable_poll(handle)
    }

    fn is_polled(&self, handle: ValueHandle) -> bool {
        (**self).is_polled(handle)
    }

    fn set_poll_intensity(&self, handle: ValueHandle, intensity: u8) {
        (**self).set_poll_intensity(handle, intensity)
    }

    fn get_poll_intensity(&self, handle: ValueHandle) -> u8 {
        (**self).get_poll_intensity(handle)
    }
}

#[derive(Debug, Default)]
struct DriverState {
    interval_ms: Option<u32>,
    exclusive: bool,
    /// handle -> intensity, 0 meaning not polled
    intensities: HashMap<ValueHandle, u8>,
}

/// Driver that keeps poll state in memory
///
/// Useful for simulations and tests. Intensity 0 means "not polled", so
/// `enable_poll(h, 0)` and `set_poll_intensity(h, 0)` both leave the value
/// unpolled, and a non-zero `set_poll_intensity` turns polling on.
#[derive(Debug, Default)]
pub struct MemoryPollDriver {
    state: RwLock<DriverState>,
}

impl MemoryPollDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last interval set, if any
    pub fn poll_interval(&self) -> Option<u32> {
        self.state.read().interval_ms
    }

    /// Exclusive flag passed with the last interval
    pub fn is_exclusive(&self) -> bool {
        self.state.read().exclusive
    }

    /// Handles with polling enabled, sorted
    pub fn polled_handles(&self) -> Vec<ValueHandle> {
        let mut handles: Vec<ValueHandle> = self
            .state
            .read()
            .intensities
            .iter()
            .filter(|(_, intensity)| **intensity > 0)
            .map(|(handle, _)| *handle)
            .collect();
        handles.sort_by_key(|h| h.raw());
        handles
    }

    fn store_intensity(&self, handle: ValueHandle, intensity: u8) {
        let mut state = self.state.write();
        if intensity == 0 {
            state.intensities.remove(&handle);
        } else {
            state.intensities.insert(handle, intensity);
        }
    }
}

impl PollDriver for MemoryPollDriver {
    fn set_poll_interval(&self, interval_ms: u32, exclusive: bool) {
        let mut state = self.state.write();
        state.interval_ms = Some(interval_ms);
        state.exclusive = exclusive;
        trace!(interval_ms, exclusive, "poll interval stored");
    }

    fn enable_poll(&self, handle: ValueHandle, intensity: u8) {
        self.store_intensity(handle, intensity);
        trace!(%handle, intensity, "poll enabled");
    }

    fn disable_poll(&self, handle: ValueHandle) {
        self.store_intensity(handle, 0);
        trace!(%handle, "poll disabled");
    }

    fn is_polled(&self, handle: ValueHandle) -> bool {
        self.get_poll_intensity(handle) > 0
    }

    fn set_poll_intensity(&self, handle: ValueHandle, intensity: u8) {
        self.store_intensity(handle, intensity);
        trace!(%handle, intensity, "poll intensity stored");
    }

    fn get_poll_intensity(&self, handle: ValueHandle) -> u8 {
        self.state
            .read()
            .intensities
            .get(&handle)
            .copied()
            .unwrap_or(0)
    }
}
