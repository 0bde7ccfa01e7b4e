//! Applies menu selections to the device's current routing type and channel

use super::catalog::CatalogAccessor;
use super::types::RoutingEntry;
use crate::error::{Result, RoutingError};
use crate::host::{LiveHost, LivePath, ObservableHandle, Property};
use serde_json::Value;
use tracing::debug;

/// Validate a menu index as sent by the UI.
///
/// Only JSON numbers that are finite, non-negative integers are accepted.
pub fn parse_index(command: &'static str, value: &Value) -> Result<usize> {
    let invalid = || RoutingError::InvalidIndex {
        command,
        value: value.to_string(),
    };
    let n = value.as_f64().ok_or_else(invalid)?;
    if !n.is_finite() || n < 0.0 || n.fract() != 0.0 {
        return Err(invalid());
    }
    Ok(n as usize)
}

/// Owns the two writable handles of one IO object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingController {
    pub routing_type: ObservableHandle,
    pub routing_channel: ObservableHandle,
}

impl RoutingController {
    pub fn new(path: &LivePath) -> Self {
        Self {
            routing_type: ObservableHandle::new(path.clone(), Property::RoutingType),
            routing_channel: ObservableHandle::new(path.clone(), Property::RoutingChannel),
        }
    }

    pub fn observe(&self, host: &mut dyn LiveHost) {
        self.routing_type.observe(host);
        self.routing_channel.observe(host);
    }

    /// Select the routing type at `index` of the current type catalogue.
    ///
    /// Exactly one host write on success, none on error. The UI is updated
    /// by the notification that follows, not here.
    pub fn set_type(
        &self,
        host: &mut dyn LiveHost,
        catalog: &CatalogAccessor,
        index: &Value,
    ) -> Result<RoutingEntry> {
        let index = parse_index("settype", index)?;
        let types = catalog.get_types(host);
        let entry = types
            .get(index)
            .cloned()
            .ok_or(RoutingError::InvalidRoutingType {
                index,
                available: types.len(),
            })?;
        self.write_type(host, &entry);
        Ok(entry)
    }

    /// Select the routing channel at `index` of the current channel catalogue
    pub fn set_channel(
        &self,
        host: &mut dyn LiveHost,
        catalog: &CatalogAccessor,
        index: &Value,
    ) -> Result<RoutingEntry> {
        let index = parse_index("setchannel", index)?;
        let channels = catalog.get_channels(host);
        let entry = channels
            .get(index)
            .cloned()
            .ok_or(RoutingError::InvalidRoutingChannel {
                index,
                available: channels.len(),
            })?;
        debug!("Routing channel -> {:?} ({})", entry.display_name, entry.identifier);
        self.routing_channel.write(host, entry.to_value());
        Ok(entry)
    }

    pub fn write_type(&self, host: &mut dyn LiveHost, entry: &RoutingEntry) {
        debug!("Routing type -> {:?} ({})", entry.display_name, entry.identifier);
        self.routing_type.write(host, entry.to_value());
    }

    pub fn current_type(&self, host: &dyn LiveHost) -> Option<RoutingEntry> {
        RoutingEntry::from_value(&self.routing_type.read(host)?)
    }

    pub fn current_channel(&self, host: &dyn LiveHost) -> Option<RoutingEntry> {
        RoutingEntry::from_value(&self.routing_channel.read(host)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_index_accepts_integral_numbers() {
        assert_eq!(parse_index("settype", &json!(0)), Ok(0));
        assert_eq!(parse_index("settype", &json!(4)), Ok(4));
        assert_eq!(parse_index("settype", &json!(2.0)), Ok(2));
    }

    #[test]
    fn test_parse_index_rejects_non_indices() {
        for bad in [json!(-1), json!(1.5), json!("1"), json!(null), json!(true), json!([0])] {
            let err = parse_index("setchannel", &bad).unwrap_err();
            assert!(
                matches!(err, RoutingError::InvalidIndex { command: "setchannel", .. }),
                "{} should be rejected",
                bad
            );
        }
    }
}
