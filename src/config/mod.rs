//! Session configuration
//!
//! Describes the slice of a Live set the device sees: where the device sits,
//! the tracks around it and the routing state of each of its IO objects.
//! Loaded from YAML and hot-reloaded by [`ConfigWatcher`].

pub mod watcher;

use crate::host::LivePath;
use crate::routing::{Axis, RoutingEntry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tokio::fs;

pub use watcher::ConfigWatcher;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionConfig {
    pub device: DeviceConfig,
    #[serde(default)]
    pub tracks: Vec<TrackConfig>,
    #[serde(default)]
    pub io: Vec<IoConfig>,
}

/// The hosting device
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Canonical path, e.g. `live_set tracks 1 devices 0`
    pub path: LivePath,
    /// Startup arguments: `ioType [channelOffset]`
    #[serde(default)]
    pub args: Vec<String>,
}

/// A track (or return/master track) of the set
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrackConfig {
    pub path: LivePath,
    #[serde(default)]
    pub has_midi_input: bool,
    #[serde(default)]
    pub available_input_routing_types: Vec<RoutingEntry>,
}

/// Routing state of one of the device's IO objects
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IoConfig {
    pub axis: Axis,
    #[serde(default)]
    pub index: u32,
    pub available_routing_types: Vec<RoutingEntry>,
    /// Available channels per routing type identifier
    #[serde(default)]
    pub channels: BTreeMap<i64, Vec<RoutingEntry>>,
    /// Identifier of the current routing type
    pub routing_type: i64,
    /// Identifier of the current routing channel; first channel when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_channel: Option<i64>,
}

impl IoConfig {
    /// Device relative path of this IO object
    pub fn relative_path(&self) -> LivePath {
        LivePath::this_device_io(self.axis.as_str(), self.index)
    }

    /// Channels available for the current routing type
    pub fn current_channels(&self) -> &[RoutingEntry] {
        self.channels
            .get(&self.routing_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl SessionConfig {
    /// Load configuration from file with validation
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read session file: {}", path))?;

        let config = Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse YAML session: {}", path))?;

        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: SessionConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize session to YAML")?;

        fs::write(path, yaml)
            .await
            .with_context(|| format!("Failed to write session file: {}", path))?;

        Ok(())
    }

    /// Validate configuration for correctness and consistency
    pub fn validate(&self) -> Result<()> {
        if self.device.path.is_empty() {
            anyhow::bail!("device path cannot be empty");
        }

        for (idx, track) in self.tracks.iter().enumerate() {
            if track.path.is_empty() {
                anyhow::bail!("track {} path cannot be empty", idx);
            }
        }

        let mut seen = HashSet::new();
        for io in &self.io {
            if !seen.insert((io.axis, io.index)) {
                anyhow::bail!("duplicate io object {} {}", io.axis, io.index);
            }
            self.validate_io(io)
                .with_context(|| format!("Invalid io object '{} {}'", io.axis, io.index))?;
        }

        Ok(())
    }

    fn validate_io(&self, io: &IoConfig) -> Result<()> {
        let known: HashSet<i64> = io
            .available_routing_types
            .iter()
            .map(|t| t.identifier)
            .collect();

        if !known.contains(&io.routing_type) {
            anyhow::bail!(
                "routing_type {} is not one of the available routing types",
                io.routing_type
            );
        }

        for type_id in io.channels.keys() {
            if !known.contains(type_id) {
                anyhow::bail!("channel list given for unknown routing type {}", type_id);
            }
        }

        if let Some(channel) = io.routing_channel {
            if !io.current_channels().iter().any(|c| c.identifier == channel) {
                anyhow::bail!(
                    "routing_channel {} is not available for routing type {}",
                    channel,
                    io.routing_type
                );
            }
        }

        Ok(())
    }
}
