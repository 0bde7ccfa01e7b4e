//! In-memory live object model
//!
//! Stands in for the host: a property store per canonical path, observer
//! registrations, and a FIFO of pending notifications. Notifications are
//! delivered one at a time through [`MemoryHost::poll_event`], never from
//! inside `set`, so handlers are not re-entered.

use super::{LiveHost, LivePath, Property, PropertyEvent};
use crate::config::SessionConfig;
use crate::routing::RoutingEntry;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::{debug, warn};

type PropertyMap = HashMap<Property, Value>;
type ChannelTable = BTreeMap<i64, Vec<RoutingEntry>>;

/// A write performed through [`LiveHost::set`]
#[derive(Debug, Clone, PartialEq)]
pub struct HostWrite {
    pub path: LivePath,
    pub property: Property,
    pub value: Value,
}

/// Live object model backed by a [`SessionConfig`]
#[derive(Debug, Default)]
pub struct MemoryHost {
    device_path: LivePath,
    objects: HashMap<LivePath, PropertyMap>,
    /// Channels available per routing type, for each IO object
    channel_tables: HashMap<LivePath, ChannelTable>,
    observers: Vec<(LivePath, Property)>,
    pending: VecDeque<PropertyEvent>,
    writes: Vec<HostWrite>,
}

impl MemoryHost {
    pub fn from_session(session: &SessionConfig) -> Self {
        let mut host = Self::default();
        host.load(session);
        host
    }

    /// Replace the whole set, notifying observers of every value that changed
    pub fn apply_session(&mut self, session: &SessionConfig) {
        let before: Vec<Value> = self
            .observers
            .iter()
            .map(|(path, prop)| self.get(path, *prop).unwrap_or(Value::Null))
            .collect();

        self.load(session);

        let observers = self.observers.clone();
        for ((path, property), old) in observers.into_iter().zip(before) {
            let value = self.get(&path, property).unwrap_or(Value::Null);
            if value != old {
                debug!("External change: {} {}", path, property);
                self.pending.push_back(PropertyEvent {
                    path,
                    property,
                    value,
                });
            }
        }
    }

    /// Change a property from the host side (not logged as a device write)
    pub fn update(&mut self, path: &LivePath, property: Property, value: Value) {
        let Some(canonical) = self.resolve(path) else {
            warn!("Ignoring update of unknown object: {}", path);
            return;
        };
        self.store(&canonical, property, value);
    }

    /// Next pending notification, oldest first
    pub fn poll_event(&mut self) -> Option<PropertyEvent> {
        self.pending.pop_front()
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Writes performed by the device so far
    pub fn writes(&self) -> &[HostWrite] {
        &self.writes
    }

    pub fn device_path(&self) -> &LivePath {
        &self.device_path
    }

    fn load(&mut self, session: &SessionConfig) {
        self.device_path = session.device.path.clone();
        self.objects.clear();
        self.channel_tables.clear();

        self.objects.insert(self.device_path.clone(), PropertyMap::new());

        for track in &session.tracks {
            let mut props = PropertyMap::new();
            props.insert(Property::HasMidiInput, json!(track.has_midi_input));
            props.insert(
                Property::AvailableInputRoutingTypes,
                entries_value(&track.available_input_routing_types),
            );
            self.objects.insert(track.path.clone(), props);
        }

        for io in &session.io {
            let path = io.relative_path().rebase(&self.device_path);
            let channels = io.current_channels();

            let current_type = io
                .available_routing_types
                .iter()
                .find(|t| t.identifier == io.routing_type)
                .map(RoutingEntry::to_value)
                .unwrap_or(Value::Null);
            let current_channel = match io.routing_channel {
                Some(id) => channels.iter().find(|c| c.identifier == id),
                None => channels.first(),
            }
            .map(RoutingEntry::to_value)
            .unwrap_or(Value::Null);

            let mut props = PropertyMap::new();
            props.insert(
                Property::AvailableRoutingTypes,
                entries_value(&io.available_routing_types),
            );
            props.insert(Property::AvailableRoutingChannels, entries_value(channels));
            props.insert(Property::RoutingType, current_type);
            props.insert(Property::RoutingChannel, current_channel);

            self.objects.insert(path.clone(), props);
            self.channel_tables.insert(path, io.channels.clone());
        }
    }

    /// Store a value and queue notifications if it changed
    fn store(&mut self, canonical: &LivePath, property: Property, value: Value) {
        let Some(props) = self.objects.get_mut(canonical) else {
            return;
        };
        if props.get(&property) == Some(&value) {
            return;
        }
        props.insert(property, value.clone());

        for (observed, prop) in &self.observers {
            if *prop != property {
                continue;
            }
            if self.resolve(observed).as_ref() == Some(canonical) {
                self.pending.push_back(PropertyEvent {
                    path: observed.clone(),
                    property,
                    value: value.clone(),
                });
            }
        }
    }

    /// Selecting a routing type changes the channel list and resets the channel
    fn apply_routing_type(&mut self, canonical: &LivePath, value: &Value) {
        let Some(identifier) = value.get("identifier").and_then(Value::as_i64) else {
            return;
        };
        let channels = self
            .channel_tables
            .get(canonical)
            .and_then(|table| table.get(&identifier))
            .cloned()
            .unwrap_or_default();

        let first = channels
            .first()
            .map(RoutingEntry::to_value)
            .unwrap_or(Value::Null);
        self.store(
            canonical,
            Property::AvailableRoutingChannels,
            entries_value(&channels),
        );
        self.store(canonical, Property::RoutingChannel, first);
    }
}

impl LiveHost for MemoryHost {
    fn get(&self, path: &LivePath, property: Property) -> Option<Value> {
        let canonical = self.resolve(path)?;
        self.objects.get(&canonical)?.get(&property).cloned()
    }

    fn set(&mut self, path: &LivePath, property: Property, value: Value) {
        self.writes.push(HostWrite {
            path: path.clone(),
            property,
            value: value.clone(),
        });

        let Some(canonical) = self.resolve(path) else {
            warn!("Write to unknown object ignored: {} {}", path, property);
            return;
        };
        debug!("Host write: {} {} = {}", canonical, property, value);

        if property == Property::RoutingType {
            self.store(&canonical, property, value.clone());
            self.apply_routing_type(&canonical, &value);
        } else {
            self.store(&canonical, property, value);
        }
    }

    fn observe(&mut self, path: &LivePath, property: Property) {
        let key = (path.clone(), property);
        if !self.observers.contains(&key) {
            self.observers.push(key);
        }
        let value = self.get(path, property).unwrap_or(Value::Null);
        self.pending.push_back(PropertyEvent {
            path: path.clone(),
            property,
            value,
        });
    }

    fn resolve(&self, path: &LivePath) -> Option<LivePath> {
        let canonical = path.rebase(&self.device_path);
        self.objects.contains_key(&canonical).then_some(canonical)
    }
}

fn entries_value(entries: &[RoutingEntry]) -> Value {
    Value::Array(entries.iter().map(RoutingEntry::to_value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeviceConfig, IoConfig, TrackConfig};
    use crate::routing::Axis;

    fn session() -> SessionConfig {
        let mut channels = BTreeMap::new();
        channels.insert(
            1,
            vec![
                RoutingEntry::new("All Channels", 100),
                RoutingEntry::new("Ch. 1", 101),
            ],
        );
        channels.insert(2, vec![]);
        SessionConfig {
            device: DeviceConfig {
                path: LivePath::parse("live_set tracks 0 devices 0"),
                args: vec!["midi_inputs".to_string()],
            },
            tracks: vec![TrackConfig {
                path: LivePath::parse("live_set tracks 0"),
                has_midi_input: true,
                available_input_routing_types: vec![],
            }],
            io: vec![IoConfig {
                axis: Axis::MidiInputs,
                index: 0,
                available_routing_types: vec![
                    RoutingEntry::new("Ext: All Ins", 1),
                    RoutingEntry::new("No Input", 2),
                ],
                channels,
                routing_type: 1,
                routing_channel: None,
            }],
        }
    }

    fn io_path() -> LivePath {
        LivePath::this_device_io("midi_inputs", 0)
    }

    #[test]
    fn test_get_resolves_device_relative_paths() {
        let host = MemoryHost::from_session(&session());
        let types = host.get(&io_path(), Property::AvailableRoutingTypes).unwrap();
        assert_eq!(types.as_array().map(Vec::len), Some(2));

        let current = host.get(&io_path(), Property::RoutingChannel).unwrap();
        assert_eq!(current["display_name"], "All Channels");

        let track = LivePath::parse("live_set tracks 0");
        assert_eq!(host.get(&track, Property::HasMidiInput), Some(json!(true)));
        assert_eq!(host.get(&LivePath::parse("live_set tracks 5"), Property::HasMidiInput), None);
    }

    #[test]
    fn test_observe_queues_current_value() {
        let mut host = MemoryHost::from_session(&session());
        host.observe(&io_path(), Property::RoutingType);
        assert_eq!(host.pending_events(), 1);
        let event = host.poll_event().unwrap();
        assert_eq!(event.path, io_path());
        assert_eq!(event.value["identifier"], 1);
        assert!(host.poll_event().is_none());
    }

    #[test]
    fn test_set_routing_type_updates_channels() {
        let mut host = MemoryHost::from_session(&session());
        host.observe(&io_path(), Property::AvailableRoutingChannels);
        host.observe(&io_path(), Property::RoutingChannel);
        while host.poll_event().is_some() {}

        host.set(&io_path(), Property::RoutingType, RoutingEntry::new("No Input", 2).to_value());

        assert_eq!(host.writes().len(), 1);
        let channels = host.poll_event().unwrap();
        assert_eq!(channels.property, Property::AvailableRoutingChannels);
        assert_eq!(channels.value, json!([]));
        let channel = host.poll_event().unwrap();
        assert_eq!(channel.property, Property::RoutingChannel);
        assert_eq!(channel.value, Value::Null);
    }

    #[test]
    fn test_unchanged_write_does_not_notify() {
        let mut host = MemoryHost::from_session(&session());
        host.observe(&io_path(), Property::RoutingType);
        host.poll_event();

        host.set(&io_path(), Property::RoutingType, RoutingEntry::new("Ext: All Ins", 1).to_value());
        assert_eq!(host.pending_events(), 0);
        assert_eq!(host.writes().len(), 1);
    }

    #[test]
    fn test_host_side_update_notifies_without_logging_write() {
        let mut host = MemoryHost::from_session(&session());
        let track = LivePath::parse("live_set tracks 0");
        host.observe(&track, Property::HasMidiInput);
        host.poll_event();

        host.update(&track, Property::HasMidiInput, json!(false));
        let event = host.poll_event().unwrap();
        assert_eq!(event.value, json!(false));
        assert!(host.writes().is_empty());

        host.update(&LivePath::parse("live_set tracks 9"), Property::HasMidiInput, json!(true));
        assert_eq!(host.pending_events(), 0);
    }

    #[test]
    fn test_apply_session_notifies_changed_values_only() {
        let mut host = MemoryHost::from_session(&session());
        host.observe(&io_path(), Property::AvailableRoutingTypes);
        host.observe(&io_path(), Property::AvailableRoutingChannels);
        while host.poll_event().is_some() {}

        let mut next = session();
        next.io[0].channels.insert(1, vec![]);
        host.apply_session(&next);

        let event = host.poll_event().unwrap();
        assert_eq!(event.property, Property::AvailableRoutingChannels);
        assert_eq!(event.value, json!([]));
        assert!(host.poll_event().is_none());
        assert!(host.writes().is_empty());
    }
}
