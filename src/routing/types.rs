//! Routing entry and catalogue types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

/// One selectable routing option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingEntry {
    /// User facing label; not unique, blank means "no channel"
    pub display_name: String,
    /// Host assigned, opaque, stable only within one catalogue snapshot
    pub identifier: i64,
}

impl RoutingEntry {
    pub fn new(display_name: impl Into<String>, identifier: i64) -> Self {
        Self {
            display_name: display_name.into(),
            identifier,
        }
    }

    /// Parse a single entry as the host reports it
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Host representation used for writes
    pub fn to_value(&self) -> Value {
        json!({
            "display_name": self.display_name,
            "identifier": self.identifier,
        })
    }
}

/// Ordered list of routing entries as reported by the host
///
/// Order and length are significant. For type catalogues the last entry is
/// the "No Input" / "No Output" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingCatalog(Vec<RoutingEntry>);

impl RoutingCatalog {
    pub fn new(entries: Vec<RoutingEntry>) -> Self {
        Self(entries)
    }

    /// Parse a host payload. Absent or malformed payloads yield an empty catalogue.
    pub fn from_payload(payload: Option<&Value>) -> Self {
        match payload {
            None | Some(Value::Null) => Self::default(),
            Some(value) => match serde_json::from_value::<Vec<RoutingEntry>>(value.clone()) {
                Ok(entries) => Self(entries),
                Err(e) => {
                    warn!("Ignoring malformed routing list from host: {}", e);
                    Self::default()
                }
            },
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RoutingEntry> {
        self.0.get(index)
    }

    /// The terminal sentinel entry of a type catalogue
    pub fn last(&self) -> Option<&RoutingEntry> {
        self.0.last()
    }

    pub fn entries(&self) -> &[RoutingEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoutingEntry> {
        self.0.iter()
    }

    /// Display names in presentation order
    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|e| e.display_name.clone()).collect()
    }
}

impl From<Vec<RoutingEntry>> for RoutingCatalog {
    fn from(entries: Vec<RoutingEntry>) -> Self {
        Self(entries)
    }
}
