//! Test doubles for poll-control integration tests.
//!
//! `RecordingDriver` wraps a `MemoryPollDriver` and records every call the
//! controller makes, so tests can assert on exactly which handles were
//! touched and in which order.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use poll_control::{MemoryPollDriver, PollController, PollDriver};
use value_registry::{NodeId, ValueAddress, ValueDescriptor, ValueHandle, ValueRegistry};

/// One call received by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    SetInterval { interval_ms: u32, exclusive: bool },
    Enable { handle: ValueHandle, intensity: u8 },
    Disable { handle: ValueHandle },
    IsPolled { handle: ValueHandle },
    SetIntensity { handle: ValueHandle, intensity: u8 },
    GetIntensity { handle: ValueHandle },
}

/// Driver that records calls and keeps state in a `MemoryPollDriver`
#[derive(Debug, Default)]
pub struct RecordingDriver {
    inner: MemoryPollDriver,
    calls: Mutex<Vec<DriverCall>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MemoryPollDriver {
        &self.inner
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: DriverCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PollDriver for RecordingDriver {
    fn set_poll_interval(&self, interval_ms: u32, exclusive: bool) {
        self.record(DriverCall::SetInterval {
            interval_ms,
            exclusive,
        });
        self.inner.set_poll_interval(interval_ms, exclusive);
    }

    fn enable_poll(&self, handle: ValueHandle, intensity: u8) {
        self.record(DriverCall::Enable { handle, intensity });
        self.inner.enable_poll(handle, intensity);
    }

    fn disable_poll(&self, handle: ValueHandle) {
        self.record(DriverCall::Disable { handle });
        self.inner.disable_poll(handle);
    }

    fn is_polled(&self, handle: ValueHandle) -> bool {
        self.record(DriverCall::IsPolled { handle });
        self.inner.is_polled(handle)
    }

    fn set_poll_intensity(&self, handle: ValueHandle, intensity: u8) {
        self.record(DriverCall::SetIntensity { handle, intensity });
        self.inner.set_poll_intensity(handle, intensity);
    }

    fn get_poll_intensity(&self, handle: ValueHandle) -> u8 {
        self.record(DriverCall::GetIntensity { handle });
        self.inner.get_poll_intensity(handle)
    }
}

/// Controller wired to a fresh registry and recording driver
pub struct Harness {
    pub controller: PollController,
    pub registry: Arc<ValueRegistry>,
    pub driver: Arc<RecordingDriver>,
}

impl Harness {
    pub fn new() -> Self {
        let registry = Arc::new(ValueRegistry::new());
        let driver = Arc::new(RecordingDriver::new());
        let controller = PollController::new(registry.clone(), driver.clone());
        Self {
            controller,
            registry,
            driver,
        }
    }

    /// Register a value on a node and return its handle
    pub fn add(&self, node: u8, cc: u8, instance: u8, index: u8, handle: u64) -> ValueHandle {
        let descriptor = ValueDescriptor::new(ValueAddress::new(cc, instance, index), handle);
        self.registry
            .add_value(NodeId::new(node), descriptor)
            .unwrap();
        descriptor.handle
    }
}
