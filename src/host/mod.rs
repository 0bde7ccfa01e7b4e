//! Host object model contract
//!
//! The device never owns routing state: it reads, writes and observes
//! properties of objects in the host's live object model. Everything the
//! device needs from the host goes through [`LiveHost`].

pub mod memory;
pub mod path;

pub use memory::MemoryHost;
pub use path::LivePath;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Host properties used by the routing device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    AvailableRoutingTypes,
    AvailableRoutingChannels,
    RoutingType,
    RoutingChannel,
    HasMidiInput,
    AvailableInputRoutingTypes,
}

impl Property {
    /// Name of the property in the host's object model
    pub fn as_str(&self) -> &'static str {
        match self {
            Property::AvailableRoutingTypes => "available_routing_types",
            Property::AvailableRoutingChannels => "available_routing_channels",
            Property::RoutingType => "routing_type",
            Property::RoutingChannel => "routing_channel",
            Property::HasMidiInput => "has_midi_input",
            Property::AvailableInputRoutingTypes => "available_input_routing_types",
        }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Change notification for one observed property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEvent {
    /// Path exactly as it was observed
    pub path: LivePath,
    pub property: Property,
    /// Current value; `Null` when the host has nothing to report
    pub value: Value,
}

/// Access to the host's live object model
///
/// All calls are synchronous and run on the single control thread that also
/// delivers notifications, so an implementation never needs locking.
pub trait LiveHost {
    /// Read a property. `None` when the object or property does not exist.
    fn get(&self, path: &LivePath, property: Property) -> Option<Value>;

    /// Write a property. The host confirms through a later notification.
    fn set(&mut self, path: &LivePath, property: Property, value: Value);

    /// Start observing a property. The host queues one event carrying the
    /// current value, then one per change.
    fn observe(&mut self, path: &LivePath, property: Property);

    /// Canonical path of an object (resolves `this_device` relative paths)
    fn resolve(&self, path: &LivePath) -> Option<LivePath>;
}

/// Reference to a single named attribute of a host object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableHandle {
    pub path: LivePath,
    pub property: Property,
}

impl ObservableHandle {
    pub fn new(path: LivePath, property: Property) -> Self {
        Self { path, property }
    }

    pub fn read(&self, host: &dyn LiveHost) -> Option<Value> {
        host.get(&self.path, self.property)
    }

    pub fn write(&self, host: &mut dyn LiveHost, value: Value) {
        host.set(&self.path, self.property, value);
    }

    pub fn observe(&self, host: &mut dyn LiveHost) {
        host.observe(&self.path, self.property);
    }

    /// Whether a notification was produced by this handle's observation
    pub fn matches(&self, event: &PropertyEvent) -> bool {
        event.property == self.property && event.path == self.path
    }
}
