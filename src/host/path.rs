//! Live object paths
//!
//! The host addresses objects with space separated paths such as
//! `live_set tracks 2 devices 0` or the relative form
//! `this_device midi_inputs 0`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root segment of paths relative to the hosting device
pub const THIS_DEVICE: &str = "this_device";

/// Structured object path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LivePath {
    segments: Vec<String>,
}

impl LivePath {
    /// Parse the host's string form. Quote characters are dropped.
    pub fn parse(raw: &str) -> Self {
        let cleaned = raw.replace('"', "");
        Self {
            segments: cleaned.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Path of this device's IO object for the given axis and channel pair
    pub fn this_device_io(axis: &str, channel_offset: u32) -> Self {
        Self {
            segments: vec![
                THIS_DEVICE.to_string(),
                axis.to_string(),
                channel_offset.to_string(),
            ],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the path starts at `this_device`
    pub fn is_device_relative(&self) -> bool {
        self.segments.first().map(String::as_str) == Some(THIS_DEVICE)
    }

    /// Replace a leading `this_device` with the device's canonical path
    pub fn rebase(&self, device: &LivePath) -> LivePath {
        if !self.is_device_relative() {
            return self.clone();
        }
        let mut segments = device.segments.clone();
        segments.extend(self.segments.iter().skip(1).cloned());
        LivePath { segments }
    }

    /// First ancestor (or self) that is a track, return track or the master track.
    ///
    /// Accepted shapes: `... tracks N`, `... return_tracks N`, `... master_track`.
    /// Returns `None` for paths that are not inside any track.
    pub fn owning_track(&self) -> Option<LivePath> {
        let segs = &self.segments;
        for (i, seg) in segs.iter().enumerate() {
            match seg.as_str() {
                "tracks" | "return_tracks" => {
                    let index = segs.get(i + 1)?;
                    if index.parse::<u32>().is_ok() {
                        return Some(LivePath {
                            segments: segs[..i + 2].to_vec(),
                        });
                    }
                    return None;
                }
                "master_track" => {
                    return Some(LivePath {
                        segments: segs[..i + 1].to_vec(),
                    });
                }
                _ => {}
            }
        }
        None
    }
}

impl fmt::Display for LivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(" "))
    }
}

impl From<String> for LivePath {
    fn from(raw: String) -> Self {
        LivePath::parse(&raw)
    }
}

impl From<&str> for LivePath {
    fn from(raw: &str) -> Self {
        LivePath::parse(raw)
    }
}

impl From<LivePath> for String {
    fn from(path: LivePath) -> Self {
        path.to_string()
    }
}
