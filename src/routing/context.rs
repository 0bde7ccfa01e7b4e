//! Startup arguments: which IO object of the device this instance governs

use crate::error::{Result, RoutingError};
use crate::host::LivePath;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// IO kind of the device's routing object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    MidiInputs,
    MidiOutputs,
    AudioInputs,
    AudioOutputs,
}

impl Axis {
    pub fn all() -> &'static [Axis] {
        &[
            Axis::MidiInputs,
            Axis::MidiOutputs,
            Axis::AudioInputs,
            Axis::AudioOutputs,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::MidiInputs => "midi_inputs",
            Axis::MidiOutputs => "midi_outputs",
            Axis::AudioInputs => "audio_inputs",
            Axis::AudioOutputs => "audio_outputs",
        }
    }
}

impl FromStr for Axis {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self> {
        Axis::all()
            .iter()
            .copied()
            .find(|axis| axis.as_str() == s)
            .ok_or_else(|| RoutingError::InvalidAxis(s.to_string()))
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which IO object and channel pair this instance governs. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceRoutingContext {
    pub axis: Axis,
    pub channel_offset: u32,
}

impl DeviceRoutingContext {
    /// Build from the device's startup arguments: `ioType [channelOffset]`
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        if args.is_empty() || args.len() > 2 {
            return Err(RoutingError::ArgumentCount { got: args.len() });
        }

        let axis: Axis = args[0].as_ref().parse()?;
        let channel_offset = match args.get(1) {
            Some(raw) => {
                let raw = raw.as_ref();
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| RoutingError::InvalidChannelOffset(raw.to_string()))?
            }
            None => 0,
        };

        Ok(Self {
            axis,
            channel_offset,
        })
    }

    /// Device relative path of the governed IO object
    pub fn path(&self) -> LivePath {
        LivePath::this_device_io(self.axis.as_str(), self.channel_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_defaults_offset() {
        let ctx = DeviceRoutingContext::from_args(&["midi_inputs"]).unwrap();
        assert_eq!(ctx.axis, Axis::MidiInputs);
        assert_eq!(ctx.channel_offset, 0);
        assert_eq!(ctx.path().to_string(), "this_device midi_inputs 0");
    }

    #[test]
    fn test_from_args_with_offset() {
        let ctx = DeviceRoutingContext::from_args(&["audio_outputs", "2"]).unwrap();
        assert_eq!(ctx.axis, Axis::AudioOutputs);
        assert_eq!(ctx.path().to_string(), "this_device audio_outputs 2");
    }

    #[test]
    fn test_from_args_count_errors() {
        let none: [&str; 0] = [];
        assert_eq!(
            DeviceRoutingContext::from_args(&none),
            Err(RoutingError::ArgumentCount { got: 0 })
        );
        assert_eq!(
            DeviceRoutingContext::from_args(&["midi_inputs", "0", "extra"]),
            Err(RoutingError::ArgumentCount { got: 3 })
        );
    }

    #[test]
    fn test_from_args_value_errors() {
        assert_eq!(
            DeviceRoutingContext::from_args(&["midi_thru"]),
            Err(RoutingError::InvalidAxis("midi_thru".to_string()))
        );
        assert_eq!(
            DeviceRoutingContext::from_args(&["audio_inputs", "-1"]),
            Err(RoutingError::InvalidChannelOffset("-1".to_string()))
        );
    }

    #[test]
    fn test_axis_round_trip_names() {
        for axis in Axis::all() {
            assert_eq!(axis.as_str().parse::<Axis>().unwrap(), *axis);
        }
    }
}
